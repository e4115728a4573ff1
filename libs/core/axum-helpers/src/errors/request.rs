use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use super::ErrorResponse;
use crate::validation::Violations;

/// An error that carries the HTTP status the client should see.
///
/// Serializes to `{code, message}`:
///
/// ```rust
/// use axum::http::StatusCode;
/// use axum_helpers::RequestError;
///
/// let err = RequestError::new(StatusCode::NOT_FOUND, "Product not found");
/// assert_eq!(
///     serde_json::to_value(&err).unwrap(),
///     serde_json::json!({"code": 404, "message": "Product not found"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(into = "ErrorResponse")]
#[error("{message}")]
pub struct RequestError {
    status: StatusCode,
    message: String,
}

impl RequestError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 422 whose message is the JSON-encoded `field -> message` map of `violations`.
    pub fn unprocessable(violations: &Violations) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, violations.to_message_json())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RequestError> for ErrorResponse {
    fn from(err: RequestError) -> Self {
        ErrorResponse {
            code: err.code(),
            message: err.message,
        }
    }
}
