use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::AccessEmailSender,
};
use secrecy::ExposeSecret;

/// Access-email gateway backed by the Resend HTTP API.
#[derive(Clone)]
pub struct ResendEmailSender {
    client: Client,
    api_key: secrecy::SecretString,
    from: String,
}

impl ResendEmailSender {
    pub fn new(api_key: secrecy::SecretString, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct ResendReq<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl AccessEmailSender for ResendEmailSender {
    async fn send_access_email(
        &self,
        to: &str,
        passcode: &str,
        magic_link: &str,
        token: Uuid,
    ) -> AppResult<()> {
        let html = format!(
            "<p>Your access code is <strong>{passcode}</strong>.</p>\
             <p><a href=\"{magic_link}\">Open your access link</a> and enter the code to get in.</p>"
        );
        let body = ResendReq {
            from: &self.from,
            to: [to],
            subject: "Your access code",
            html: &html,
        };
        let response = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Dispatch(e.to_string()))?;

        if let Err(e) = response.error_for_status() {
            tracing::warn!(%token, error = %e, "access email dispatch rejected by provider");
            return Err(AppError::Dispatch(e.to_string()));
        }
        Ok(())
    }
}
