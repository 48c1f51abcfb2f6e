//! Storage configuration.

use std::time::Duration;

/// Default database location when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://medjobs.db";

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// SQLite connection URL
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl StorageConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            acquire_timeout: Duration::from_secs(
                std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }

    /// Config for a database file at `path`.
    pub fn for_path(path: impl AsRef<std::path::Path>) -> Self {
        Self {
            url: format!("sqlite://{}", path.as_ref().display()),
            ..Self::default()
        }
    }
}
