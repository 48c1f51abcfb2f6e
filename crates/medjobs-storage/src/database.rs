//! Pooled database handle.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::repos::{ApplicationRepository, JobRepository, SavedJobRepository, UserRepository};

/// Handle to the job board database.
///
/// Cloning is cheap; every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config` and bring the schema up to date.
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        info!(
            "Connected to database: url={}, max_connections={}",
            config.url, config.max_connections
        );
        Ok(db)
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    /// Round-trip a trivial statement to check connectivity.
    pub async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Further queries fail as unavailable.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    pub fn jobs(&self) -> JobRepository<'_> {
        JobRepository::new(&self.pool)
    }

    pub fn applications(&self) -> ApplicationRepository<'_> {
        ApplicationRepository::new(&self.pool)
    }

    pub fn saved_jobs(&self) -> SavedJobRepository<'_> {
        SavedJobRepository::new(&self.pool)
    }
}
