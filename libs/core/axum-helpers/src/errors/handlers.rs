use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorResponse, messages};

fn framework_error(status: StatusCode, message: &str) -> Response {
    tracing::info!(status = status.as_u16(), "{}", message);
    (
        status,
        Json(ErrorResponse {
            code: status.as_u16(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    framework_error(StatusCode::NOT_FOUND, messages::ROUTE_NOT_FOUND)
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    framework_error(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
}
