// Text generation endpoint: proxies to Gemini generateContent.

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ApiError;
use crate::handlers::is_blank;
use crate::server::AppState;
use crate::upstream::{gemini::DEFAULT_TEXT_MODEL, UpstreamError};

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
}

pub async fn generate_text(
    State(state): State<AppState>,
    body: Option<Json<GenerateTextRequest>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(request)) = body else {
        return Err(ApiError::missing_body());
    };

    if is_blank(request.prompt.as_ref()) {
        return Err(ApiError::missing_fields("Prompt is required"));
    }
    let prompt = request.prompt.unwrap_or_default();
    let model = request
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());

    let Some(api_key) = state.config.google_api_key() else {
        error!("GOOGLE_API_KEY is not configured");
        return Err(ApiError::Config("Google API key not configured"));
    };

    info!(model = %model, "Generating text");

    let text = state
        .gemini
        .generate_text(api_key, &prompt, &model)
        .await
        .map_err(|e| match e {
            UpstreamError::Credential => ApiError::InvalidApiKey,
            UpstreamError::Quota => ApiError::QuotaExceeded,
            other => {
                error!("Text generation failed: {}", other);
                ApiError::Upstream("Text generation failed")
            }
        })?;

    info!(length = text.len(), "Text generated");

    Ok(Json(json!({
        "success": true,
        "text": text,
        "prompt": prompt,
        "model": model,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
