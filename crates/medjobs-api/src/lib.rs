//! Axum HTTP API server for the MedJobs board.
//!
//! This crate provides:
//! - Signup/login with bcrypt password hashes and HS256 session tokens
//! - Role-gated job posting, application and review endpoints
//! - Security headers, request ids and request logging
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use credentials::{Identity, PasswordHasher, TokenCodec};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
