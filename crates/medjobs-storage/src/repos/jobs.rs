use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use medjobs_models::{Job, JobDetail, JobFilter, JobId, JobListing, JobStatus, NewJob, UserId};

use super::contains_pattern;
use crate::error::StorageResult;
use crate::rows::{JobDetailRow, JobListingRow, JobRow};

/// Repository for the `jobs` table.
pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub(crate) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a posting owned by `hospital_id`. New postings are active.
    pub async fn create(&self, hospital_id: UserId, new_job: &NewJob) -> StorageResult<Job> {
        let created_at = Utc::now();
        let status = JobStatus::Active;

        let result = sqlx::query(
            "INSERT INTO jobs (hospital_id, title, description, location, salary, requirements,
                               benefits, employment_type, experience_level, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(hospital_id.get())
        .bind(&new_job.title)
        .bind(&new_job.description)
        .bind(&new_job.location)
        .bind(&new_job.salary)
        .bind(&new_job.requirements)
        .bind(&new_job.benefits)
        .bind(new_job.employment_type.as_str())
        .bind(&new_job.experience_level)
        .bind(status.as_str())
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let id = JobId(result.last_insert_rowid());
        info!("Created job: id={}, hospital_id={}", id, hospital_id);

        Ok(Job {
            id,
            hospital_id,
            title: new_job.title.clone(),
            description: new_job.description.clone(),
            location: new_job.location.clone(),
            salary: new_job.salary.clone(),
            requirements: new_job.requirements.clone(),
            benefits: new_job.benefits.clone(),
            employment_type: new_job.employment_type,
            experience_level: new_job.experience_level.clone(),
            status,
            created_at,
        })
    }

    /// Active postings matching `filter`, newest first.
    pub async fn list_active(&self, filter: &JobFilter) -> StorageResult<Vec<JobListing>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT j.*, u.name AS hospital_name
             FROM jobs j
             JOIN users u ON j.hospital_id = u.id
             WHERE j.status = ",
        );
        query.push_bind(JobStatus::Active.as_str());

        if let Some(search) = filter.search() {
            let pattern = contains_pattern(search);
            query
                .push(" AND (j.title LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR j.description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        if let Some(location) = filter.location() {
            query
                .push(" AND j.location LIKE ")
                .push_bind(contains_pattern(location))
                .push(" ESCAPE '\\'");
        }

        query.push(" ORDER BY j.created_at DESC, j.id DESC");

        let rows = query
            .build_query_as::<JobListingRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(JobListing::try_from).collect()
    }

    /// Every posting owned by `hospital_id`, whatever its status.
    pub async fn list_by_hospital(&self, hospital_id: UserId) -> StorageResult<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE hospital_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(hospital_id.get())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Job::try_from).collect()
    }

    /// A single posting with hospital contact details.
    pub async fn find_detail(&self, id: JobId) -> StorageResult<Option<JobDetail>> {
        let row = sqlx::query_as::<_, JobDetailRow>(
            "SELECT j.*, u.name AS hospital_name, u.email AS hospital_email,
                    u.location AS hospital_location
             FROM jobs j
             JOIN users u ON j.hospital_id = u.id
             WHERE j.id = ?",
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?;

        row.map(JobDetail::try_from).transpose()
    }
}
