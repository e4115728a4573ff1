pub mod codes;
pub mod handlers;
pub mod messages;
pub mod request;
pub mod responses;

pub use codes::ErrorCode;
pub use request::RequestError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::Violations;

/// Serialized form of a [`RequestError`] raised at the HTTP boundary.
///
/// ```json
/// { "code": 400, "message": "Invalid data format." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,
    /// Human-readable error message
    pub message: String,
}

/// Body used by service errors and by message-only success payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field-level violations, `{errors: {field: [messages]}}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: HashMap<String, Vec<String>>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type; [`IntoResponse`] is the
/// one place where errors become status codes and bodies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Malformed input detected before reaching a service. Renders `{code, message}`;
    /// the [`ErrorCode`] is only logged.
    #[error("Client input error: {1}")]
    ClientInput(ErrorCode, RequestError),

    /// Error raised by a service with the status the client should see. Renders `{message}`.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Validation error: {0}")]
    Validation(#[from] Violations),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// 400 for a path identifier that is not a positive integer.
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::ClientInput(ErrorCode::InvalidId, RequestError::bad_request(message))
    }

    /// 400 for a body that is not a JSON object.
    pub fn invalid_json() -> Self {
        Self::ClientInput(
            ErrorCode::InvalidJson,
            RequestError::bad_request(messages::INVALID_DATA_FORMAT),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Request(RequestError::not_found(message))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Request(RequestError::conflict(message))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    /// Status the response will carry.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ClientInput(_, e) | AppError::Request(e) => e.status(),
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::SerdeJson(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::ClientInput(code, e) => {
                tracing::info!(
                    error_code = code.code(),
                    "Client input error: {}",
                    e
                );
                (status, Json(e)).into_response()
            }
            AppError::Request(e) => {
                let code = ErrorCode::from_status(e.status());
                if status.is_server_error() {
                    tracing::error!(error_code = code.code(), "Request error: {}", e);
                } else {
                    tracing::info!(error_code = code.code(), "Request error: {}", e);
                }
                (status, Json(MessageResponse::new(e.message()))).into_response()
            }
            AppError::Validation(violations) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    violations = violations.len(),
                    "Validation error"
                );
                (
                    status,
                    Json(serde_json::json!({ "errors": violations })),
                )
                    .into_response()
            }
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                unexpected(status)
            }
            AppError::SerdeJson(e) => {
                tracing::error!(
                    error_code = ErrorCode::SerdeJsonError.code(),
                    "JSON error: {:?}",
                    e
                );
                unexpected(status)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                unexpected(status)
            }
        }
    }
}

fn unexpected(status: StatusCode) -> Response {
    (
        status,
        Json(MessageResponse::new(messages::UNEXPECTED_ERROR)),
    )
        .into_response()
}
