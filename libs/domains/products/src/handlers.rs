use axum::{
    Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, request::Parts},
    response::Response,
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, JsonObject, MessageResponse, id_from_path,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestBodyResponse, BadRequestIdResponse, InternalServerErrorResponse,
        NotFoundResponse, ValidationFailedResponse,
    },
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";
pub const INVALID_ID_MESSAGE: &str = "Invalid product ID.";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductInput, ProductList, ProductEnvelope, ProductMutation, MessageResponse),
        responses(
            BadRequestBodyResponse,
            BadRequestIdResponse,
            ValidationFailedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub products: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Serialize, ToSchema)]
pub struct ProductMutation {
    pub product: Product,
    #[schema(example = "Product created successfully")]
    pub message: String,
}

/// Positive integer product id taken from the path.
pub struct ProductId(pub i32);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_path(parts, state, INVALID_ID_MESSAGE)
            .await
            .map(ProductId)
    }
}

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products", body = ProductList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<Response, AppError> {
    service.list().await?.render("products")
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = ProductMutation),
        (status = 400, response = BadRequestBodyResponse),
        (status = 422, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let violations = service.validate(&body);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let payload = service.create(&body).await?;

    if let Some(product) = payload.data() {
        AuditEvent::new("product.create", AuditOutcome::Success)
            .with_resource(format!("product:{}", product.id))
            .with_client(&headers)
            .with_details(json!({ "name": product.name }))
            .log();
    }

    payload.render("product")
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductEnvelope),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ProductId(id): ProductId,
) -> Result<Response, AppError> {
    service.get(id).await?.render("product")
}

/// Replace a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductMutation),
        (status = 400, response = BadRequestBodyResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ProductId(id): ProductId,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let violations = service.validate(&body);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let payload = service.update(id, &body).await?;

    AuditEvent::new("product.update", AuditOutcome::Success)
        .with_resource(format!("product:{id}"))
        .with_client(&headers)
        .log();

    payload.render("product")
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ProductId(id): ProductId,
) -> Result<Response, AppError> {
    let payload = service.delete(id).await?;

    AuditEvent::new("product.delete", AuditOutcome::Success)
        .with_resource(format!("product:{id}"))
        .with_client(&headers)
        .log();

    payload.render("product")
}
