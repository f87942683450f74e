use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance entry. Timestamps are kept as the stored RFC 3339 strings
/// so report responses return rows exactly as persisted.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Jane Cruz",
        "time_in": "2026-08-06T01:02:03.456Z",
        "time_out": "2026-08-06T09:12:13.456Z",
        "hours": 8.17,
        "date": "2026-08-06"
    })
)]
pub struct Record {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Jane Cruz")]
    pub name: String,

    #[schema(example = "2026-08-06T01:02:03.456Z")]
    pub time_in: String,

    /// Null while the record is still open.
    #[schema(example = "2026-08-06T09:12:13.456Z", nullable = true)]
    pub time_out: Option<String>,

    /// Computed once at time-out, two decimal places. Never recomputed.
    #[schema(example = 8.17, nullable = true)]
    pub hours: Option<f64>,

    /// Calendar-date portion of `time_in`, immutable.
    #[schema(example = "2026-08-06")]
    pub date: String,
}
