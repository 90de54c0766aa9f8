//! Users Domain
//!
//! Account and credential management behind HTTP Basic authentication.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints + Basic auth middleware
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, hashing, orchestration
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← CredentialStore trait (in-memory, Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← UserRecord (wire), Principal (stored)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryCredentialStore, UserService, handlers};
//!
//! let service = UserService::new(InMemoryCredentialStore::new());
//! let router = handlers::router(service, "accounts");
//! ```

pub mod auth;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use auth::{BasicAuth, require_basic_auth};
pub use error::{UserError, UserResult};
pub use mapper::ROLE_PREFIX;
pub use models::{AuthenticatedUser, Principal, UserRecord};
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres::PostgresCredentialStore;
pub use repository::{CredentialStore, InMemoryCredentialStore};
pub use service::UserService;
