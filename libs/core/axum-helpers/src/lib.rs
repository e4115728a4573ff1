//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError`, `RequestError` and the single error-to-response mapping
//! - **[`validation`]**: rule tables evaluated against untyped JSON objects
//! - **[`extractors`]**: JSON-object body and integer id path extractors
//! - **[`payload`]**: `{data, status, message}` results rendered by handlers
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`audit`]**: audit trail for data modifications
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config)?.merge(health_router(app_info!()));
//! create_production_app(router, &config, async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod payload;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, normalize_trailing_slash, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, MessageResponse, RequestError};

pub use extractors::{JsonObject, id_from_path, parse_id};

pub use payload::Payload;

pub use validation::{Rule, RuleSet, Violation, Violations};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
