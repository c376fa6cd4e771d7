//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required caller input is missing
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// An upstream service reported an explicit failure status
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure talking to an external service
    #[error("External service error: {0}")]
    ExternalService(String),

    /// An upstream response was missing expected fields
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
