//! Registry error types
//!
//! Every store operation either returns a value or exactly one of these;
//! nothing is retried and a failed put leaves the store untouched. Each
//! variant carries enough context to build a diagnostic without inspecting
//! registry internals.

use uuid::Uuid;

use crate::model::ResourceKind;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A record failed admission validation
    Validation {
        kind: ResourceKind,
        field: &'static str,
        reason: &'static str,
    },
    /// A supplied identifier is not UUID syntax
    InvalidIdentifier { value: String },
    /// A well-formed identifier resolves to no stored record
    NotFound { kind: ResourceKind, id: Uuid },
    /// The request targets a capability this registry does not implement
    NotImplemented { capability: &'static str },
}

impl RegistryError {
    /// HTTP status hint for transport collaborators
    ///
    /// The registry never builds responses itself; this is only the
    /// conventional mapping for callers that do.
    pub const fn status_code(&self) -> u16 {
        match self {
            RegistryError::Validation { .. } => 400,
            RegistryError::InvalidIdentifier { .. } => 400,
            RegistryError::NotFound { .. } => 404,
            RegistryError::NotImplemented { .. } => 501,
        }
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Validation {
                kind,
                field,
                reason,
            } => {
                write!(f, "Invalid {} record: field '{}' {}.", kind, field, reason)
            }
            RegistryError::InvalidIdentifier { value } => {
                write!(f, "Identifier '{}' must be a valid UUID.", value)
            }
            RegistryError::NotFound { kind, id } => {
                write!(f, "A {} with identifier '{}' could not be found.", kind, id)
            }
            RegistryError::NotImplemented { capability } => {
                write!(
                    f,
                    "Capability '{}' is not implemented by this registry.",
                    capability
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}
