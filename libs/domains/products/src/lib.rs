//! Products Domain
//!
//! CRUD over products with rule-table validation of raw JSON bodies.
//!
//! ```text
//! Handlers  → parse id/body, report {errors}, render payloads
//! Service   → validate, convert, call the repository
//! Repository→ trait + in-memory and PostgreSQL implementations
//! Models    → Product, ProductInput
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod rules;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{Product, ProductInput};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
