use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Current instant as an RFC 3339 UTC string with millisecond precision,
/// e.g. `2026-08-06T09:15:00.123Z`. This is the stored timestamp format.
pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar-date portion (`YYYY-MM-DD`) of the current UTC instant. Record
/// dates and the daily report both use this, so they always agree.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Elapsed hours between two stored timestamps, formatted to exactly two
/// decimal places. Negative when `end` precedes `start`; there is no guard.
pub fn hours_diff(start: &str, end: &str) -> String {
    let (Ok(start), Ok(end)) = (
        DateTime::parse_from_rfc3339(start),
        DateTime::parse_from_rfc3339(end),
    ) else {
        return String::from("0.00");
    };

    let millis = end.signed_duration_since(start).num_milliseconds();
    format!("{:.2}", millis as f64 / 3_600_000.0)
}

/// Stored timestamp rendered as a local short time ("09:05 AM"). Absent or
/// unparseable input yields the empty string, which the CSV export relies on.
pub fn format_time(iso: Option<&str>) -> String {
    let Some(iso) = iso else {
        return String::new();
    };

    match DateTime::parse_from_rfc3339(iso) {
        Ok(ts) => ts.with_timezone(&Local).format("%I:%M %p").to_string(),
        Err(_) => String::new(),
    }
}
