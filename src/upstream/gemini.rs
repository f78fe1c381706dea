// Google Generative Language API client (Gemini text + Imagen).

use reqwest::{header, Client, Response};
use serde::Deserialize;
use serde_json::json;
use tokio::time::Duration;

use super::UpstreamError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for text generation when the request does not name one.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash-latest";

/// Fixed model used for image generation.
pub const IMAGE_MODEL: &str = "imagen-3.0-generate-001";

pub struct GeminiClient {
    http_client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_BASE_URL.to_string())
    }

    /// Construct against a non-default base URL (tests point this at a
    /// local stub).
    pub fn with_base_url(base_url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            base_url,
        }
    }

    /// Build a `models/{model}:{method}` URL.
    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Call `generateContent` and return the first candidate's text.
    pub async fn generate_text(
        &self,
        api_key: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, UpstreamError> {
        let url = self.model_url(model, "generateContent");
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(UpstreamError::Decode(
                "response contained no candidate text".to_string(),
            ));
        }
        Ok(text)
    }

    /// Call the Imagen `:predict` endpoint and return one base64 PNG payload
    /// per generated image. `sample_count` must already be clamped by the
    /// caller.
    pub async fn generate_images(
        &self,
        api_key: &str,
        prompt: &str,
        sample_count: u32,
    ) -> Result<Vec<String>, UpstreamError> {
        let url = self.model_url(IMAGE_MODEL, "predict");
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "sampleCount": sample_count },
        });

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if parsed.predictions.is_empty() {
            return Err(UpstreamError::Decode(
                "response contained no predictions".to_string(),
            ));
        }

        Ok(parsed
            .predictions
            .into_iter()
            .map(|p| p.bytes_base64_encoded)
            .collect())
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass a successful response through, otherwise classify the error body.
async fn check_status(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_error(status.as_u16(), &body))
}

/// Error body of the Generative Language API:
/// `{"error": {"code": u16, "message": "...", "status": "UPPER_SNAKE"}}`.
#[derive(Deserialize, Default)]
struct GoogleErrorBody {
    #[serde(default)]
    error: GoogleErrorDetail,
}

#[derive(Deserialize, Default)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Classify an upstream failure from its HTTP status and error body.
///
/// Structured signals (HTTP status, Google status enum) decide first; the
/// message-substring checks stay as a fallback for unstructured bodies.
fn classify_error(status: u16, body: &str) -> UpstreamError {
    let detail = serde_json::from_str::<GoogleErrorBody>(body)
        .unwrap_or_default()
        .error;

    if status == 401 || status == 403 {
        return UpstreamError::Credential;
    }
    if status == 429 {
        return UpstreamError::Quota;
    }
    match detail.status.as_str() {
        "UNAUTHENTICATED" | "PERMISSION_DENIED" => return UpstreamError::Credential,
        "RESOURCE_EXHAUSTED" => return UpstreamError::Quota,
        _ => {}
    }

    let message = if detail.message.is_empty() {
        body.to_string()
    } else {
        detail.message
    };
    if message.contains("API key") {
        return UpstreamError::Credential;
    }
    if message.contains("quota") {
        return UpstreamError::Quota;
    }

    UpstreamError::Status { status, message }
}
