use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::Value;
use strum_macros::EnumString;
use tracing::{error, info};

use crate::config::Config;
use crate::utils::messenger;

/// Token the platform must present during the verification handshake.
const VERIFY_TOKEN: &str = "timekeeping_verify";

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

// Inbound platform event, reduced to the fields the service reads. Everything
// is optional; delivery payloads vary and unknown shapes must not fail.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Deserialize)]
pub struct MessagingEvent {
    pub sender: Option<Sender>,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct Sender {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Intent {
    #[strum(serialize = "time in")]
    TimeIn,
    #[strum(serialize = "time out")]
    TimeOut,
    #[strum(serialize = "today")]
    Today,
    #[strum(serialize = "week")]
    Week,
    #[strum(disabled)]
    Unknown,
}

impl Intent {
    /// Canned acknowledgment for each intent. Replies are purely textual:
    /// a chat "time in" does not create an attendance record.
    pub fn reply(&self) -> &'static str {
        match self {
            Intent::TimeIn => "✅ Time In recorded",
            Intent::TimeOut => "⏱ Time Out recorded",
            Intent::Today => "📊 Today’s report ready",
            Intent::Week => "📅 Weekly report ready",
            Intent::Unknown => "Commands: time in | time out | today | week",
        }
    }
}

/// Case-insensitive exact match on the supported command phrases.
pub fn classify(text: &str) -> Intent {
    Intent::from_str(&text.to_lowercase()).unwrap_or(Intent::Unknown)
}

/// Webhook verification handshake
#[utoipa::path(
    get,
    path = "/webhook",
    params(
        ("hub.verify_token" = Option<String>, Query, description = "Token configured on the platform side"),
        ("hub.challenge" = Option<String>, Query, description = "Challenge echoed back on success")
    ),
    responses(
        (status = 200, description = "Token matched; body is the challenge", content_type = "text/plain"),
        (status = 403, description = "Token mismatch")
    ),
    tag = "Webhook"
)]
pub async fn verify(query: web::Query<VerifyQuery>) -> impl Responder {
    if query.verify_token.as_deref() == Some(VERIFY_TOKEN) {
        info!("Webhook verified");
        HttpResponse::Ok().body(query.challenge.clone().unwrap_or_default())
    } else {
        HttpResponse::Forbidden().finish()
    }
}

/// Inbound message delivery
#[utoipa::path(
    post,
    path = "/webhook",
    request_body = Object,
    responses(
        (status = 200, description = "Event acknowledged (including keep-alives and unknown payload shapes)"),
        (status = 500, description = "Reply delivery failed")
    ),
    tag = "Webhook"
)]
pub async fn receive(config: web::Data<Config>, body: web::Json<Value>) -> impl Responder {
    // Payloads that don't match the expected shape are keep-alives as far as
    // this endpoint is concerned.
    let Ok(payload) = serde_json::from_value::<WebhookPayload>(body.into_inner()) else {
        return HttpResponse::Ok().finish();
    };
    let Some(event) = payload.entry.first().and_then(|e| e.messaging.first()) else {
        return HttpResponse::Ok().finish();
    };
    let Some(message) = &event.message else {
        return HttpResponse::Ok().finish();
    };
    let Some(sender) = &event.sender else {
        error!("Messaging event carried a message but no sender");
        return HttpResponse::InternalServerError().finish();
    };

    let text = message.text.as_deref().unwrap_or("");
    let intent = classify(text);

    // A platform-level HTTP failure (bad token etc.) still acknowledges the
    // inbound event; only a transport failure is surfaced as 500.
    match messenger::send_text(&config.page_token, &sender.id, intent.reply()).await {
        Ok(status) => {
            info!(%status, ?intent, "Webhook reply sent");
            HttpResponse::Ok().finish()
        }
        Err(e) => {
            error!(error = %e, "Messenger send failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::json;

    use super::*;

    #[::core::prelude::v1::test]
    fn classify_matches_known_phrases() {
        assert_eq!(classify("time in"), Intent::TimeIn);
        assert_eq!(classify("time out"), Intent::TimeOut);
        assert_eq!(classify("today"), Intent::Today);
        assert_eq!(classify("week"), Intent::Week);
    }

    #[::core::prelude::v1::test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify("Time In"), Intent::TimeIn);
        assert_eq!(classify("TIME OUT"), Intent::TimeOut);
        assert_eq!(classify("toDaY"), Intent::Today);
    }

    #[::core::prelude::v1::test]
    fn classify_falls_back_to_unknown() {
        assert_eq!(classify(""), Intent::Unknown);
        assert_eq!(classify("time  in"), Intent::Unknown);
        assert_eq!(classify("report"), Intent::Unknown);
        // Variant names are not phrases.
        assert_eq!(classify("unknown"), Intent::Unknown);
    }

    #[::core::prelude::v1::test]
    fn unknown_reply_lists_the_commands() {
        assert_eq!(
            Intent::Unknown.reply(),
            "Commands: time in | time out | today | week"
        );
    }

    #[actix_web::test]
    async fn verification_echoes_the_challenge() {
        let srv = test::init_service(
            App::new().service(web::resource("/webhook").route(web::get().to(verify))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/webhook?hub.verify_token=timekeeping_verify&hub.challenge=XYZ")
            .to_request();
        let res = test::call_service(&srv, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "XYZ");
    }

    #[actix_web::test]
    async fn verification_rejects_other_tokens() {
        let srv = test::init_service(
            App::new().service(web::resource("/webhook").route(web::get().to(verify))),
        )
        .await;

        for uri in [
            "/webhook?hub.verify_token=wrong&hub.challenge=XYZ",
            "/webhook",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&srv, req).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
            assert!(test::read_body(res).await.is_empty());
        }
    }

    #[actix_web::test]
    async fn keep_alives_are_acknowledged_without_a_reply() {
        let config = Config {
            server_addr: "0.0.0.0:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            page_token: String::new(),
            rate_api_per_min: 600,
        };
        let srv = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(web::resource("/webhook").route(web::post().to(receive))),
        )
        .await;

        // No entry, no messaging event, event without a message, and a shape
        // that isn't a delivery payload at all.
        for body in [
            json!({}),
            json!({ "entry": [] }),
            json!({ "entry": [{ "messaging": [] }] }),
            json!({ "entry": [{ "messaging": [{ "sender": { "id": "42" } }] }] }),
            json!({ "entry": "not-a-list" }),
        ] {
            let req = test::TestRequest::post()
                .uri("/webhook")
                .set_json(&body)
                .to_request();
            let res = test::call_service(&srv, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert!(test::read_body(res).await.is_empty());
        }
    }
}
