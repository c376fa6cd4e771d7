//! API error handling
//!
//! Converts every failure into the JSON error body at the handler
//! boundary; nothing propagates as an unhandled fault.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
///
/// The wire key is `error message`, matching the API contract consumed by
/// existing clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description
    #[serde(rename = "error message")]
    pub error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorResponse {
            error_message: message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::MissingParameter(p) => {
                Self::BadRequest(format!("Missing required parameter: {p}"))
            },
            ApplicationError::NotFound(status) => Self::NotFound(status),
            ApplicationError::ExternalService(e) => Self::Internal(format!("Request failed: {e}")),
            ApplicationError::MalformedResponse(_) => {
                Self::Internal("Invalid response format from API".to_string())
            },
            ApplicationError::Configuration(e) | ApplicationError::Internal(e) => Self::Internal(e),
        }
    }
}
