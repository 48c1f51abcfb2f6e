//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database cannot be reached: pool exhausted or closed, I/O failure.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// A UNIQUE constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A FOREIGN KEY constraint rejected the write.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A stored value could not be mapped onto a model type.
    #[error("Invalid stored value: {0}")]
    Decode(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StorageError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// True if the caller should report the store as unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }

    /// True if a UNIQUE constraint rejected the write.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(
            err,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::WorkerCrashed
        ) {
            return Self::Unavailable(err.to_string());
        }

        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::UniqueViolation(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(db.message().to_string());
            }
        }

        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(StorageError::from(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(StorageError::from(sqlx::Error::PoolClosed).is_unavailable());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(StorageError::from(sqlx::Error::Io(io)).is_unavailable());
    }

    #[test]
    fn test_row_not_found_is_plain_database_error() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Database(_)));
        assert!(!err.is_unavailable());
    }
}
