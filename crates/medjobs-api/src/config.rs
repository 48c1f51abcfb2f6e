//! API configuration.

use std::time::Duration;

use medjobs_storage::StorageConfig;

use crate::credentials::{BCRYPT_COST_RANGE, DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL};

/// Signing secret used when `JWT_SECRET` is unset. Only acceptable for local
/// development; production startup warns loudly when it is in use.
pub const DEV_JWT_SECRET: &str = "medjobs-development-secret-change-me";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Serve Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// Database pool settings
    pub storage: StorageConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            metrics_enabled: true,
            storage: StorageConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            token_ttl: std::env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .filter(|ttl| !ttl.is_zero() && *ttl <= MAX_TOKEN_TTL)
                .unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|cost| BCRYPT_COST_RANGE.contains(cost))
                .unwrap_or(DEFAULT_BCRYPT_COST),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            storage: StorageConfig::from_env(),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// True if tokens are signed with the built-in development secret.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
