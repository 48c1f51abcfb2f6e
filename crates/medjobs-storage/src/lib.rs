//! SQLite storage layer.
//!
//! This crate provides:
//! - A pooled `Database` handle with the embedded schema migration
//! - Repositories for users, jobs, applications and saved jobs
//! - Classification of driver errors into unavailable / constraint / other

pub mod config;
pub mod database;
pub mod error;
pub mod repos;
mod rows;

pub use config::StorageConfig;
pub use database::Database;
pub use error::{StorageError, StorageResult};
pub use repos::{
    ApplicationRepository, JobRepository, SavedJobRepository, UserCredentials, UserRepository,
};
