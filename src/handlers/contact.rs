// Contact form endpoint: relays the message to a Telegram chat.

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ApiError;
use crate::handlers::is_blank;
use crate::server::AppState;
use crate::upstream::{telegram::format_contact_message, UpstreamError};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

pub async fn send_message(
    State(state): State<AppState>,
    body: Option<Json<SendMessageRequest>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(request)) = body else {
        return Err(ApiError::missing_body());
    };

    if is_blank(request.name.as_ref())
        || is_blank(request.email.as_ref())
        || is_blank(request.message.as_ref())
    {
        return Err(ApiError::missing_fields(
            "Name, email, and message are required",
        ));
    }

    let Some((bot_token, chat_id)) = state.config.telegram_credentials() else {
        error!("TELEGRAM_BOT_TOKEN or TELEGRAM_USER_ID is not configured");
        return Err(ApiError::Config("Please contact the administrator"));
    };

    let text = format_contact_message(
        request.name.as_deref().unwrap_or_default(),
        request.email.as_deref().unwrap_or_default(),
        request.subject.as_deref(),
        request.message.as_deref().unwrap_or_default(),
        Utc::now(),
    );

    state
        .telegram
        .send_message(bot_token, chat_id, &text)
        .await
        .map_err(|e| match e {
            UpstreamError::Status { status, message } => {
                error!(status, "Telegram API error: {}", message);
                ApiError::Upstream("Failed to send message")
            }
            other => {
                error!("Failed to reach Telegram: {}", other);
                ApiError::Internal
            }
        })?;

    info!("Contact message relayed");

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully!",
    })))
}
