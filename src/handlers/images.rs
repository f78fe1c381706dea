// Image generation endpoint: proxies to the Imagen predict API.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ApiError;
use crate::handlers::is_blank;
use crate::server::AppState;
use crate::upstream::UpstreamError;

const MIN_IMAGES: i64 = 1;
const MAX_IMAGES: i64 = 8;
const DEFAULT_IMAGES: i64 = 4;

#[derive(Debug, Deserialize)]
pub struct GenerateImagesRequest {
    pub prompt: Option<String>,
    #[serde(rename = "numberOfImages")]
    pub number_of_images: Option<i64>,
}

/// Clamp the requested image count to the supported range.
fn clamp_image_count(requested: Option<i64>) -> u32 {
    requested
        .unwrap_or(DEFAULT_IMAGES)
        .clamp(MIN_IMAGES, MAX_IMAGES) as u32
}

pub async fn generate_images(
    State(state): State<AppState>,
    body: Option<Json<GenerateImagesRequest>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(request)) = body else {
        return Err(ApiError::missing_body());
    };

    if is_blank(request.prompt.as_ref()) {
        return Err(ApiError::missing_fields("Prompt is required"));
    }
    let prompt = request.prompt.unwrap_or_default();
    let sample_count = clamp_image_count(request.number_of_images);

    let Some(api_key) = state.config.google_api_key() else {
        error!("GOOGLE_API_KEY is not configured");
        return Err(ApiError::Config("Please contact the administrator"));
    };

    info!(count = sample_count, "Generating images");

    let payloads = state
        .gemini
        .generate_images(api_key, &prompt, sample_count)
        .await
        .map_err(|e| match e {
            UpstreamError::Credential => ApiError::InvalidApiKey,
            other => {
                error!("Image generation failed: {}", other);
                ApiError::Upstream("Image generation failed")
            }
        })?;

    let images: Vec<Value> = payloads
        .into_iter()
        .enumerate()
        .map(|(idx, base64)| {
            let id = idx + 1;
            json!({
                "id": id,
                "base64": format!("data:image/png;base64,{}", base64),
                "filename": format!("imagen-{}.png", id),
            })
        })
        .collect();

    info!(count = images.len(), "Images generated");

    Ok(Json(json!({
        "success": true,
        "count": images.len(),
        "images": images,
        "prompt": prompt,
    })))
}
