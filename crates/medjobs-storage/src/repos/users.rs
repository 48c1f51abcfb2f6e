use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use medjobs_models::{NewUser, User, UserId};

use crate::error::StorageResult;
use crate::rows::UserRow;

/// A user together with the stored bcrypt hash, for login only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Repository for the `users` table.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account.
    ///
    /// A taken email fails with `StorageError::UniqueViolation`.
    pub async fn create(&self, new_user: &NewUser, password_hash: &str) -> StorageResult<User> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (name, email, password, role, phone, location, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(new_user.role.as_str())
        .bind(&new_user.phone)
        .bind(&new_user.location)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let id = UserId(result.last_insert_rowid());
        info!("Created user: id={}, role={}", id, new_user.role);

        Ok(User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            phone: new_user.phone.clone(),
            location: new_user.location.clone(),
            created_at,
        })
    }

    /// Look up an account and its password hash by email.
    pub async fn find_credentials(&self, email: &str) -> StorageResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        row.map(|row| {
            row.into_parts()
                .map(|(user, password_hash)| UserCredentials { user, password_hash })
        })
        .transpose()
    }

    /// Look up an account by id.
    pub async fn find_by_id(&self, id: UserId) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?;

        row.map(|row| row.into_parts().map(|(user, _)| user)).transpose()
    }
}
