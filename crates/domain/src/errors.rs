//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid Eircode format
    #[error("Invalid Eircode: {0}")]
    InvalidEircode(String),

    /// Unknown hourly weather variable
    #[error("Unknown hourly variable: {0}")]
    UnknownVariable(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
