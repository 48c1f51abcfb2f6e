//! Raw row shapes and their conversion into model types.
//!
//! Enum columns are stored as their snake_case names and parsed back here;
//! a value outside the CHECK constraint surfaces as `StorageError::Decode`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use medjobs_models::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob, EmploymentType,
    Job, JobDetail, JobListing, JobStatus, Role, SavedJobListing, User,
};

use crate::error::{StorageError, StorageResult};

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the public user and the stored password hash.
    pub fn into_parts(self) -> StorageResult<(User, String)> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| StorageError::decode(e.to_string()))?;

        Ok((
            User {
                id: self.id.into(),
                name: self.name,
                email: self.email,
                role,
                phone: self.phone,
                location: self.location,
                created_at: self.created_at,
            },
            self.password,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct JobRow {
    pub id: i64,
    pub hospital_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub employment_type: String,
    pub experience_level: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = StorageError;

    fn try_from(row: JobRow) -> StorageResult<Self> {
        let employment_type = row
            .employment_type
            .parse::<EmploymentType>()
            .map_err(|e| StorageError::decode(e.to_string()))?;
        let status = row.status.parse::<JobStatus>().map_err(StorageError::decode)?;

        Ok(Job {
            id: row.id.into(),
            hospital_id: row.hospital_id.into(),
            title: row.title,
            description: row.description,
            location: row.location,
            salary: row.salary,
            requirements: row.requirements,
            benefits: row.benefits,
            employment_type,
            experience_level: row.experience_level,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct JobListingRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub hospital_name: String,
}

impl TryFrom<JobListingRow> for JobListing {
    type Error = StorageError;

    fn try_from(row: JobListingRow) -> StorageResult<Self> {
        Ok(JobListing {
            job: row.job.try_into()?,
            hospital_name: row.hospital_name,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct JobDetailRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub hospital_name: String,
    pub hospital_email: String,
    pub hospital_location: Option<String>,
}

impl TryFrom<JobDetailRow> for JobDetail {
    type Error = StorageError;

    fn try_from(row: JobDetailRow) -> StorageResult<Self> {
        Ok(JobDetail {
            job: row.job.try_into()?,
            hospital_name: row.hospital_name,
            hospital_email: row.hospital_email,
            hospital_location: row.hospital_location,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct SavedJobListingRow {
    #[sqlx(flatten)]
    pub listing: JobListingRow,
    pub saved_at: DateTime<Utc>,
}

impl TryFrom<SavedJobListingRow> for SavedJobListing {
    type Error = StorageError;

    fn try_from(row: SavedJobListingRow) -> StorageResult<Self> {
        Ok(SavedJobListing {
            listing: row.listing.try_into()?,
            saved_at: row.saved_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ApplicationRow {
    pub id: i64,
    pub job_id: i64,
    pub jobseeker_id: i64,
    pub status: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = StorageError;

    fn try_from(row: ApplicationRow) -> StorageResult<Self> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| StorageError::decode(e.to_string()))?;

        Ok(Application {
            id: row.id.into(),
            job_id: row.job_id.into(),
            jobseeker_id: row.jobseeker_id.into(),
            status,
            cover_letter: row.cover_letter,
            resume_url: row.resume_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ApplicationWithJobRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub hospital_name: String,
}

impl TryFrom<ApplicationWithJobRow> for ApplicationWithJob {
    type Error = StorageError;

    fn try_from(row: ApplicationWithJobRow) -> StorageResult<Self> {
        Ok(ApplicationWithJob {
            application: row.application.try_into()?,
            title: row.title,
            location: row.location,
            salary: row.salary,
            hospital_name: row.hospital_name,
        })
    }
}

/// One row of the owned-job applicant listing.
///
/// The job is LEFT JOINed to its applications, so an owned job with no
/// applications yields a single row whose application columns are NULL.
#[derive(Debug, FromRow)]
pub(crate) struct OwnedJobApplicantRow {
    pub id: Option<i64>,
    pub job_id: Option<i64>,
    pub jobseeker_id: Option<i64>,
    pub status: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl OwnedJobApplicantRow {
    /// The applicant in this row, or `None` for the placeholder row.
    pub fn into_applicant(self) -> StorageResult<Option<ApplicationWithApplicant>> {
        let Some(id) = self.id else {
            return Ok(None);
        };

        let missing = |column: &str| StorageError::decode(format!("application {id}: {column} is NULL"));

        let application = ApplicationRow {
            id,
            job_id: self.job_id.ok_or_else(|| missing("job_id"))?,
            jobseeker_id: self.jobseeker_id.ok_or_else(|| missing("jobseeker_id"))?,
            status: self.status.ok_or_else(|| missing("status"))?,
            cover_letter: self.cover_letter,
            resume_url: self.resume_url,
            created_at: self.created_at.ok_or_else(|| missing("created_at"))?,
        };

        Ok(Some(ApplicationWithApplicant {
            application: application.try_into()?,
            name: self.name.ok_or_else(|| missing("name"))?,
            email: self.email.ok_or_else(|| missing("email"))?,
            phone: self.phone,
            location: self.location,
        }))
    }
}
