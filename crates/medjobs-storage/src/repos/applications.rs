use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use medjobs_models::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob,
    JobId, JobStatus, NewApplication, UserId,
};

use crate::error::StorageResult;
use crate::rows::{ApplicationWithJobRow, OwnedJobApplicantRow};

/// Repository for the `applications` table.
pub struct ApplicationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ApplicationRepository<'a> {
    pub(crate) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply `jobseeker_id` to an active posting.
    ///
    /// Returns `None` when the posting does not exist or is closed. A second
    /// application for the same (job, jobseeker) pair fails with
    /// `StorageError::UniqueViolation`; the constraint is the only guard, so
    /// concurrent duplicates resolve to exactly one row.
    pub async fn create(
        &self,
        jobseeker_id: UserId,
        new_application: &NewApplication,
    ) -> StorageResult<Option<Application>> {
        let created_at = Utc::now();
        let status = ApplicationStatus::Pending;

        let result = sqlx::query(
            "INSERT INTO applications (job_id, jobseeker_id, status, cover_letter, resume_url, created_at)
             SELECT id, ?, ?, ?, ?, ? FROM jobs WHERE id = ? AND status = ?",
        )
        .bind(jobseeker_id.get())
        .bind(status.as_str())
        .bind(&new_application.cover_letter)
        .bind(&new_application.resume_url)
        .bind(created_at)
        .bind(new_application.job_id.get())
        .bind(JobStatus::Active.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let id = ApplicationId(result.last_insert_rowid());
        info!(
            "Created application: id={}, job_id={}, jobseeker_id={}",
            id, new_application.job_id, jobseeker_id
        );

        Ok(Some(Application {
            id,
            job_id: new_application.job_id,
            jobseeker_id,
            status,
            cover_letter: new_application.cover_letter.clone(),
            resume_url: new_application.resume_url.clone(),
            created_at,
        }))
    }

    /// Applications submitted by `jobseeker_id`, with job and hospital, newest first.
    pub async fn list_for_jobseeker(
        &self,
        jobseeker_id: UserId,
    ) -> StorageResult<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationWithJobRow>(
            "SELECT a.id, a.job_id, a.jobseeker_id, a.status, a.cover_letter, a.resume_url,
                    a.created_at, j.title, j.location, j.salary, u.name AS hospital_name
             FROM applications a
             JOIN jobs j ON a.job_id = j.id
             JOIN users u ON j.hospital_id = u.id
             WHERE a.jobseeker_id = ?
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(jobseeker_id.get())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ApplicationWithJob::try_from).collect()
    }

    /// Applications to `job_id` with applicant contact details, newest first.
    ///
    /// Returns `None` unless the posting exists and is owned by
    /// `hospital_id`; an owned posting without applications yields an empty
    /// list.
    pub async fn list_for_owned_job(
        &self,
        job_id: JobId,
        hospital_id: UserId,
    ) -> StorageResult<Option<Vec<ApplicationWithApplicant>>> {
        let rows = sqlx::query_as::<_, OwnedJobApplicantRow>(
            "SELECT a.id, a.job_id, a.jobseeker_id, a.status, a.cover_letter, a.resume_url,
                    a.created_at, u.name, u.email, u.phone, u.location
             FROM jobs j
             LEFT JOIN applications a ON a.job_id = j.id
             LEFT JOIN users u ON a.jobseeker_id = u.id
             WHERE j.id = ? AND j.hospital_id = ?
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(job_id.get())
        .bind(hospital_id.get())
        .fetch_all(self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut applicants = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(applicant) = row.into_applicant()? {
                applicants.push(applicant);
            }
        }
        Ok(Some(applicants))
    }

    /// Set the review status of an application to a job owned by `hospital_id`.
    ///
    /// Returns `false` when the application does not exist or its job
    /// belongs to another hospital.
    pub async fn update_status(
        &self,
        id: ApplicationId,
        hospital_id: UserId,
        status: ApplicationStatus,
    ) -> StorageResult<bool> {
        let result = sqlx::query(
            "UPDATE applications SET status = ?
             WHERE id = ?
               AND job_id IN (SELECT id FROM jobs WHERE hospital_id = ?)",
        )
        .bind(status.as_str())
        .bind(id.get())
        .bind(hospital_id.get())
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(
                "Updated application status: id={}, hospital_id={}, status={}",
                id, hospital_id, status
            );
        }
        Ok(updated)
    }
}
