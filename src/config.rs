use std::env;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    /// Messaging-platform page access token. An empty token is allowed; the
    /// outbound send call then fails at the platform, not at startup.
    pub page_token: String,

    // Rate limiting
    pub rate_api_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        Self {
            server_addr: format!("0.0.0.0:{port}"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:timekeeping.db".to_string()),
            page_token: env::var("PAGE_TOKEN").unwrap_or_default(),
            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap_or(600),
        }
    }
}
