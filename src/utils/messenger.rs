use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Serialize;

const SEND_API_URL: &str = "https://graph.facebook.com/v18.0/me/messages";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(20))
        .build()
        .expect("Failed to build messenger client")
});

#[derive(Serialize)]
struct SendRequest<'a> {
    recipient: Recipient<'a>,
    message: OutgoingMessage<'a>,
}

#[derive(Serialize)]
struct Recipient<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    text: &'a str,
}

/// Deliver a text reply through the platform's send-message endpoint, with
/// the page token as a query credential. Any HTTP response from the platform
/// (including auth failures from an empty token) is returned as a status;
/// only transport failures propagate as errors. No retries.
pub async fn send_text(
    page_token: &str,
    recipient_id: &str,
    text: &str,
) -> Result<StatusCode, reqwest::Error> {
    let response = HTTP_CLIENT
        .post(SEND_API_URL)
        .query(&[("access_token", page_token)])
        .json(&SendRequest {
            recipient: Recipient { id: recipient_id },
            message: OutgoingMessage { text },
        })
        .send()
        .await?;

    Ok(response.status())
}
