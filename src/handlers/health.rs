// Health check endpoint. Accepts GET and POST, no validation, no upstream.

use axum::{http::Method, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health_check(method: Method) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Service is running",
        "timestamp": Utc::now().to_rfc3339(),
        "method": method.as_str(),
    }))
}
