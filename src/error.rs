use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Request-level error taxonomy. Every variant renders as the normalized
/// `{error, details}` body with its HTTP status; nothing escapes a handler
/// as a raw error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{error}: {details}")]
    BadRequest {
        error: &'static str,
        details: &'static str,
    },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server configuration error: {0}")]
    Config(&'static str),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Upstream call failed. The label is per-endpoint; the client only
    /// ever sees a generic detail string, the real cause goes to the log.
    #[error("{0}")]
    Upstream(&'static str),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn missing_fields(details: &'static str) -> Self {
        Self::BadRequest {
            error: "Missing required fields",
            details,
        }
    }

    pub fn missing_body() -> Self {
        Self::BadRequest {
            error: "No request body provided",
            details: "Request body is required",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::Config(_) | Self::Upstream(_) | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::BadRequest { error, details } => json!({
                "error": error,
                "details": details,
            }),
            Self::MethodNotAllowed => json!({
                "error": "Method not allowed",
            }),
            Self::Config(details) => json!({
                "error": "Server configuration error",
                "details": details,
            }),
            Self::InvalidApiKey => json!({
                "error": "Invalid API key",
                "details": "Please check your Google API configuration",
            }),
            Self::QuotaExceeded => json!({
                "error": "API quota exceeded",
                "details": "Please try again later",
            }),
            Self::Upstream(label) => json!({
                "error": label,
                "details": "Please try again later",
            }),
            Self::Internal => json!({
                "error": "Internal server error",
                "details": "Please try again later",
            }),
        };
        (status, Json(body)).into_response()
    }
}
