//! Application state.

use std::sync::Arc;

use tracing::{info, warn};

use medjobs_storage::Database;

use crate::config::ApiConfig;
use crate::credentials::{PasswordHasher, TokenCodec};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    /// `None` when the database could not be reached at startup.
    pub db: Option<Database>,
    pub tokens: Arc<TokenCodec>,
    pub passwords: PasswordHasher,
}

impl AppState {
    /// Create state around an already-opened database handle.
    pub fn new(config: ApiConfig, db: Option<Database>) -> Self {
        let tokens = Arc::new(TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl));
        let passwords = PasswordHasher::new(config.bcrypt_cost);

        Self {
            config,
            db,
            tokens,
            passwords,
        }
    }

    /// Open the database and build state.
    ///
    /// A connection failure is logged and the server runs without storage.
    pub async fn connect(config: ApiConfig) -> Self {
        let db = match Database::connect(&config.storage).await {
            Ok(db) => {
                info!("Database connected: {}", config.storage.url);
                Some(db)
            }
            Err(e) => {
                warn!("Database connection failed, continuing without storage: {}", e);
                None
            }
        };

        Self::new(config, db)
    }
}
