//! Custom extractors for Axum handlers.
//!
//! Both reject with [`AppError::ClientInput`](crate::errors::AppError::ClientInput),
//! so malformed input renders as `{code: 400, message}` before any handler runs.

pub mod id_path;
pub mod json_object;

pub use id_path::{id_from_path, parse_id};
pub use json_object::JsonObject;
