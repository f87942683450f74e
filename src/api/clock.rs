use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::store::records;
use crate::utils::time;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct ClockRequest {
    #[schema(example = "Jane Cruz", value_type = String)]
    pub name: Option<String>,
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/timein",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Open record created, or a handled error", body = Object, example = json!({
            "message": "Time In recorded",
            "timeIn": "2026-08-06T01:02:03.456Z"
        })),
    ),
    tag = "Clock"
)]
pub async fn time_in(
    pool: web::Data<SqlitePool>,
    body: web::Json<ClockRequest>,
) -> impl Responder {
    let Some(name) = body.name.as_deref().filter(|n| !n.is_empty()) else {
        return HttpResponse::Ok().json(json!({ "error": "Name required" }));
    };

    let time_in = time::now();
    // The record's date is the date portion of its own time_in, not a second
    // clock reading.
    let date = time_in.split('T').next().unwrap_or("").to_string();

    match records::create_open_record(pool.get_ref(), name, &time_in, &date).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "message": "Time In recorded",
            "timeIn": time_in
        })),
        Err(e) => {
            error!(error = %e, name, "Time in failed");
            HttpResponse::Ok().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Clock-out endpoint
#[utoipa::path(
    post,
    path = "/timeout",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Latest open record closed, or a handled error", body = Object, example = json!({
            "message": "Time Out recorded",
            "timeOut": "2026-08-06T09:12:13.456Z",
            "hours": "8.17"
        })),
    ),
    tag = "Clock"
)]
pub async fn time_out(
    pool: web::Data<SqlitePool>,
    body: web::Json<ClockRequest>,
) -> impl Responder {
    let Some(name) = body.name.as_deref().filter(|n| !n.is_empty()) else {
        return HttpResponse::Ok().json(json!({ "error": "Name required" }));
    };

    let open = match records::find_latest_open_record(pool.get_ref(), name).await {
        Ok(Some(record)) => record,
        Ok(None) => return HttpResponse::Ok().json(json!({ "error": "No active Time In" })),
        Err(e) => {
            error!(error = %e, name, "Open record lookup failed");
            return HttpResponse::Ok().json(json!({ "error": e.to_string() }));
        }
    };

    let time_out = time::now();
    let hours = time::hours_diff(&open.time_in, &time_out);
    let stored_hours = hours.parse::<f64>().unwrap_or(0.0);

    // The closing UPDATE never changes the response; a failure is only logged.
    if let Err(e) = records::close_record(pool.get_ref(), open.id, &time_out, stored_hours).await {
        error!(error = %e, name, id = open.id, "Time out failed");
    }

    HttpResponse::Ok().json(json!({
        "message": "Time Out recorded",
        "timeOut": time_out,
        "hours": hours
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(records::CREATE_RECORDS_TABLE)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    macro_rules! clock_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool))
                    .service(web::resource("/timein").route(web::post().to(time_in)))
                    .service(web::resource("/timeout").route(web::post().to(time_out))),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn time_in_requires_a_name() {
        let srv = clock_app!(test_pool().await);

        for body in [json!({}), json!({ "name": "" })] {
            let req = test::TestRequest::post()
                .uri("/timein")
                .set_json(&body)
                .to_request();
            let res: Value = test::call_and_read_body_json(&srv, req).await;
            assert_eq!(res["error"], "Name required");
        }
    }

    #[actix_web::test]
    async fn time_in_creates_an_open_record() {
        let pool = test_pool().await;
        let srv = clock_app!(pool.clone());

        let req = test::TestRequest::post()
            .uri("/timein")
            .set_json(json!({ "name": "jane" }))
            .to_request();
        let res: Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(res["message"], "Time In recorded");
        assert!(res["timeIn"].is_string());

        let open = records::find_latest_open_record(&pool, "jane")
            .await
            .unwrap()
            .expect("record should be open");
        assert_eq!(Some(open.time_in.as_str()), res["timeIn"].as_str());
        assert!(open.hours.is_none());
    }

    #[actix_web::test]
    async fn time_out_without_open_record_is_a_handled_error() {
        let pool = test_pool().await;
        let srv = clock_app!(pool.clone());

        let req = test::TestRequest::post()
            .uri("/timeout")
            .set_json(json!({ "name": "jane" }))
            .to_request();
        let res: Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(res["error"], "No active Time In");
        assert!(records::list_all(&pool).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn time_in_then_time_out_closes_the_record() {
        let pool = test_pool().await;
        let srv = clock_app!(pool.clone());

        let req = test::TestRequest::post()
            .uri("/timein")
            .set_json(json!({ "name": "jane" }))
            .to_request();
        test::call_service(&srv, req).await;

        let req = test::TestRequest::post()
            .uri("/timeout")
            .set_json(json!({ "name": "jane" }))
            .to_request();
        let res: Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(res["message"], "Time Out recorded");
        assert_eq!(res["hours"], "0.00");

        assert!(
            records::find_latest_open_record(&pool, "jane")
                .await
                .unwrap()
                .is_none()
        );
        let all = records::list_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].hours, Some(0.0));
        assert!(all[0].time_out.is_some());
    }
}
