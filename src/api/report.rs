use actix_web::{HttpResponse, Responder, web};
use csv::{QuoteStyle, WriterBuilder};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;

use crate::model::record::Record;
use crate::store::records;
use crate::utils::time;

/// Daily report for one worker
#[utoipa::path(
    get,
    path = "/report/today/{name}",
    params(
        ("name", Path, description = "Worker name")
    ),
    responses(
        (status = 200, description = "Records for the current date", body = [Record])
    ),
    tag = "Reports"
)]
pub async fn today(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    let today = time::today();

    match records::list_by_name_and_date(pool.get_ref(), &name, &today).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            error!(error = %e, name, "Daily report failed");
            HttpResponse::Ok().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Weekly report for one worker
#[utoipa::path(
    get,
    path = "/report/week/{name}",
    params(
        ("name", Path, description = "Worker name")
    ),
    responses(
        (status = 200, description = "Records of the last seven days", body = [Record])
    ),
    tag = "Reports"
)]
pub async fn week(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match records::list_by_name_since(pool.get_ref(), &name, 7).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            error!(error = %e, name, "Weekly report failed");
            HttpResponse::Ok().json(json!({ "error": e.to_string() }))
        }
    }
}

/// All records as a CSV download
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "CSV attachment `timekeeping.csv`", content_type = "text/csv")
    ),
    tag = "Reports"
)]
pub async fn export(pool: web::Data<SqlitePool>) -> impl Responder {
    let rows = match records::list_all(pool.get_ref()).await {
        Ok(rows) => rows,
        // The original contract reports a listing failure as a plain-text
        // 200 body, not JSON.
        Err(e) => {
            error!(error = %e, "Export listing failed");
            return HttpResponse::Ok().body(e.to_string());
        }
    };

    match render_csv(&rows) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"timekeeping.csv\"",
            ))
            .body(csv),
        Err(e) => {
            error!(error = %e, "Export rendering failed");
            HttpResponse::Ok().body(e.to_string())
        }
    }
}

/// Header plus one line per record. Times go through `format_time`; the
/// hours column is empty when hours is null or zero. Fields are written
/// unquoted and unescaped, matching the historical output format.
fn render_csv(rows: &[Record]) -> anyhow::Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(vec![]);

    wtr.write_record(["Name", "Time In", "Time Out", "Hours", "Date"])?;
    for row in rows {
        let hours = row
            .hours
            .filter(|h| *h != 0.0)
            .map(|h| h.to_string())
            .unwrap_or_default();
        wtr.write_record([
            row.name.as_str(),
            &time::format_time(Some(&row.time_in)),
            &time::format_time(row.time_out.as_deref()),
            &hours,
            row.date.as_str(),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer flush failed: {e}"))?;
    Ok(String::from_utf8(data)?)
}
