use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Response,
    routing::post,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, JsonObject, MessageResponse,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestBodyResponse, ConflictResponse, InternalServerErrorResponse,
        ValidationFailedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::hasher::PasswordHashing;
use crate::models::RegisterUser;
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "register";

/// OpenAPI documentation for the registration endpoint
#[derive(OpenApi)]
#[openapi(
    paths(register),
    components(
        schemas(RegisterUser, MessageResponse),
        responses(
            BadRequestBodyResponse,
            ValidationFailedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User registration")
    )
)]
pub struct ApiDoc;

/// Create the registration router
pub fn router<R, H>(service: UserService<R, H>) -> Router
where
    R: UserRepository + 'static,
    H: PasswordHashing + 'static,
{
    Router::new()
        .route("/", post(register))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, response = BadRequestBodyResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository, H: PasswordHashing>(
    State(service): State<Arc<UserService<R, H>>>,
    headers: HeaderMap,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let violations = service.validate(&body);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let username = body.get("username").cloned().unwrap_or_default();

    match service.register(&body).await {
        Ok(payload) => {
            AuditEvent::new("user.register", AuditOutcome::Success)
                .with_client(&headers)
                .with_details(json!({ "username": username }))
                .log();
            payload.render("user")
        }
        Err(err) => {
            AuditEvent::new("user.register", AuditOutcome::Failure)
                .with_client(&headers)
                .with_details(json!({ "username": username, "reason": err.to_string() }))
                .log();
            Err(err.into())
        }
    }
}
