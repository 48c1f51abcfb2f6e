use chrono::Utc;
use sqlx::SqlitePool;

use medjobs_models::{JobId, SavedJob, SavedJobId, SavedJobListing, UserId};

use crate::error::StorageResult;
use crate::rows::SavedJobListingRow;

/// Repository for the `saved_jobs` table.
pub struct SavedJobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SavedJobRepository<'a> {
    pub(crate) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Bookmark `job_id` for `user_id`.
    ///
    /// Returns `None` when the posting does not exist. Saving the same job
    /// twice fails with `StorageError::UniqueViolation`.
    pub async fn save(&self, user_id: UserId, job_id: JobId) -> StorageResult<Option<SavedJob>> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO saved_jobs (user_id, job_id, created_at)
             SELECT ?, id, ? FROM jobs WHERE id = ?",
        )
        .bind(user_id.get())
        .bind(created_at)
        .bind(job_id.get())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(SavedJob {
            id: SavedJobId(result.last_insert_rowid()),
            user_id,
            job_id,
            created_at,
        }))
    }

    /// Bookmarked postings of `user_id`, most recently saved first.
    pub async fn list(&self, user_id: UserId) -> StorageResult<Vec<SavedJobListing>> {
        let rows = sqlx::query_as::<_, SavedJobListingRow>(
            "SELECT j.*, u.name AS hospital_name, s.created_at AS saved_at
             FROM saved_jobs s
             JOIN jobs j ON s.job_id = j.id
             JOIN users u ON j.hospital_id = u.id
             WHERE s.user_id = ?
             ORDER BY s.created_at DESC, s.id DESC",
        )
        .bind(user_id.get())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SavedJobListing::try_from).collect()
    }

    /// Remove a bookmark. Returns `false` if `user_id` had not saved `job_id`.
    pub async fn remove(&self, user_id: UserId, job_id: JobId) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = ? AND job_id = ?")
            .bind(user_id.get())
            .bind(job_id.get())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
