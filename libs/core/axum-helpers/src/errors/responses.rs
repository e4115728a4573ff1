//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, MessageResponse, ValidationErrorResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"message": "An unexpected error occurred."})
)]
pub struct InternalServerErrorResponse(pub MessageResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not a JSON object",
    content_type = "application/json",
    example = json!({"code": 400, "message": "Invalid data format."})
)]
pub struct BadRequestBodyResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed identifier",
    content_type = "application/json",
    example = json!({"code": 400, "message": "Invalid product ID."})
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - field validation failed",
    content_type = "application/json",
    example = json!({
        "errors": {
            "name": [
                "This value is too short. It should have 4 characters or more.",
                "This value should not be blank."
            ]
        }
    })
)]
pub struct ValidationFailedResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"message": "Product not found"})
)]
pub struct NotFoundResponse(pub MessageResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({"message": "User with this email or username already exists"})
)]
pub struct ConflictResponse(pub MessageResponse);
