use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use secrecy::SecretString;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub resend_api_key: SecretString,
    pub email_from: String,
    /// Base URL the magic link is built from: `<app_origin>/<token>`.
    pub app_origin: String,
    pub cors_origin: HeaderValue,
    /// Client-held session retention window.
    pub session_ttl_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or("0.0.0.0:8080".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let resend_api_key =
            SecretString::from(env::var("RESEND_API_KEY").expect("RESEND_API_KEY must be set"));
        let email_from = env::var("EMAIL_FROM").expect("EMAIL_FROM must be set");
        let app_origin = env::var("APP_ORIGIN").expect("APP_ORIGIN must be set");

        let cors_origin: HeaderValue = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| app_origin.clone())
            .parse()
            .expect("CORS_ORIGIN must be a valid header value");

        let session_ttl_days: i64 = env::var("SESSION_TTL_DAYS")
            .unwrap_or("7".to_string())
            .parse()
            .expect("SESSION_TTL_DAYS must be a valid number");

        Self {
            bind_addr,
            resend_api_key,
            email_from,
            app_origin,
            cors_origin,
            session_ttl_days,
        }
    }
}
