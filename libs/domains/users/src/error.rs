use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, RequestError, Violations};
use sea_orm::DbErr;
use thiserror::Error;

pub const DUPLICATE_MESSAGE: &str = "User with this email or username already exists";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with this email or username already exists")]
    Duplicate,

    #[error("Invalid registration input: {0}")]
    Invalid(Violations),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Duplicate => RequestError::conflict(DUPLICATE_MESSAGE).into(),
            UserError::Invalid(violations) => RequestError::unprocessable(&violations).into(),
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("password hashing failed: {msg}"))
            }
            UserError::Database(e) => AppError::Database(e),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
