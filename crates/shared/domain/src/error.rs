//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value assigned to a field broke that field's rule
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Serialization rule that is not of the form `-path.to.relation`
    #[error("Invalid serialization rule: {0}")]
    InvalidRule(String),

    /// Serialization re-entered an entity already on the current path
    #[error("Serialization cycle at {0}")]
    Cycle(String),
}

impl DomainError {
    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field that failed validation, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            DomainError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
