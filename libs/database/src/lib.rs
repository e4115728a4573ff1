//! Database connectors and utilities.
//!
//! # Features
//!
//! - `postgres` (default): PostgreSQL via SeaORM, migrations, health probe
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`] and [`RetryConfig`]
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "products_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
