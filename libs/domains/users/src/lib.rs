//! Users Domain
//!
//! Registration only: validate the body, hash the password with Argon2 and
//! store the user. Email and username are unique.
//!
//! ```text
//! Handlers  → POST /register
//!    │
//! Service   → validation, password hashing
//!    │
//! Repository → InMemoryUserRepository | PgUserRepository
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod hasher;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod rules;
pub mod service;

pub use error::{UserError, UserResult};
pub use hasher::{Argon2Hasher, PasswordHashing};
pub use models::{NewUser, RegisterUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
