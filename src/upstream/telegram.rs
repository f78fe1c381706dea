// Telegram Bot API client for the contact-form relay.

use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde_json::json;
use tokio::time::Duration;

use super::UpstreamError;

const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

pub struct TelegramClient {
    http_client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new() -> Self {
        Self::with_base_url(TELEGRAM_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            base_url,
        }
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, bot_token)
    }

    /// Post one message to the configured chat. Any non-2xx reply is an
    /// upstream failure; the response body only goes to the log.
    pub async fn send_message(
        &self,
        bot_token: &str,
        chat_id: &str,
        text: &str,
    ) -> Result<(), UpstreamError> {
        let url = self.send_message_url(bot_token);
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

impl Default for TelegramClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the contact form fields into one HTML-marked-up Telegram message.
/// User-supplied values are escaped before interpolation.
pub fn format_contact_message(
    name: &str,
    email: &str,
    subject: Option<&str>,
    message: &str,
    received_at: DateTime<Utc>,
) -> String {
    let subject = subject
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("General Inquiry");

    format!(
        "<b>New portfolio message</b>\n\n\
         <b>Name:</b> {name}\n\
         <b>Email:</b> {email}\n\
         <b>Subject:</b> {subject}\n\n\
         <b>Message:</b>\n{message}\n\n\
         <b>Received:</b> {date} at {time} UTC",
        name = escape_html(name),
        email = escape_html(email),
        subject = escape_html(subject),
        message = escape_html(message),
        date = received_at.format("%A, %B %e, %Y"),
        time = received_at.format("%H:%M"),
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
