//! API routes module

pub mod health;

use axum::Router;
use axum_helpers::{create_router, health_router};
use domain_products::{PgProductRepository, ProductService};
use domain_users::{PgUserRepository, UserService};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes served under `/api`, backed by PostgreSQL.
pub fn routes(state: &AppState) -> Router {
    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let users = UserService::new(PgUserRepository::new(state.db.clone()));

    Router::new()
        .nest("/products", domain_products::handlers::router(products))
        .nest("/register", domain_users::handlers::router(users))
}

/// Full application: docs, `/api` routes, `/health` and `/ready`.
pub fn app(api_routes: Router, state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<ApiDoc>(api_routes, &state.config.server)?
        .merge(health_router(state.config.app))
        .merge(health::router(state.db.clone()));

    Ok(router)
}
