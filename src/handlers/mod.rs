// Request handlers. Each functional endpoint is the same single-pass
// pipeline: validate fields, check credentials, one upstream call, map the
// result to the normalized response shape.

pub mod contact;
pub mod health;
pub mod images;
pub mod text;

/// Presence check used by the validators: `None`, empty, and all-whitespace
/// values all count as missing.
pub(crate) fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
