//! Identifier and label normalization
//!
//! Collaborators hand the registry raw candidate strings (query params,
//! request bodies). These helpers keep a usable candidate and substitute a
//! generated value otherwise; they never fail.

use uuid::Uuid;

/// Placeholder label applied when no usable candidate is supplied
pub const DEFAULT_LABEL: &str = "unnamed";

/// Return `candidate` when it parses as a UUID, otherwise a fresh v4
pub fn generate_id(candidate: Option<&str>) -> Uuid {
    candidate
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Return `candidate` when it is a non-empty string, otherwise [`DEFAULT_LABEL`]
pub fn generate_label(candidate: Option<&str>) -> String {
    match candidate {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_LABEL.to_string(),
    }
}
