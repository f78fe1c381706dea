// Upstream clients for the two third-party APIs the handlers proxy.

pub mod gemini;
pub mod telegram;

use thiserror::Error;

/// Structured upstream failure kinds. Handlers map these to the normalized
/// response taxonomy instead of pattern-matching human-readable messages.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream rejected the API credential")]
    Credential,

    #[error("upstream quota exhausted")]
    Quota,

    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected upstream response: {0}")]
    Decode(String),
}
