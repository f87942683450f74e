use crate::api::clock::ClockRequest;
use crate::model::record::Record;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timekeeping API",
        version = "1.0.0",
        description = r#"
## Employee Timekeeping Service

Records clock-in/clock-out events, serves daily and weekly summaries, exports
all records as CSV, and answers a Messenger-style chat webhook.

### Conventions
- Handled failures (missing name, no open record, storage errors) are
  reported as HTTP 200 with an `{"error": message}` body.
- `/export` returns `text/csv` as an attachment.
- The webhook verification handshake echoes `hub.challenge` as plain text.

Built with **Rust**, **Actix Web** and **SQLx**.
"#,
    ),
    paths(
        crate::api::clock::time_in,
        crate::api::clock::time_out,

        crate::api::report::today,
        crate::api::report::week,
        crate::api::report::export,

        crate::api::webhook::verify,
        crate::api::webhook::receive,
    ),
    components(schemas(Record, ClockRequest)),
    tags(
        (name = "Clock", description = "Clock-in / clock-out"),
        (name = "Reports", description = "Daily, weekly and CSV reporting"),
        (name = "Webhook", description = "Chat platform verification and message delivery")
    )
)]
pub struct ApiDoc;
