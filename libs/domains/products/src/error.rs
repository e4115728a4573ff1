use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, RequestError, Violations};
use sea_orm::DbErr;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Invalid product input: {0}")]
    Invalid(Violations),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => RequestError::not_found(NOT_FOUND_MESSAGE).into(),
            ProductError::Invalid(violations) => RequestError::unprocessable(&violations).into(),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
