//! Job applications and their review status.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, JobId, UserId};
use crate::validation::{non_blank, ValidationError, ValidationResult};

/// Review status set by the hospital that owns the job.
///
/// Any status may be replaced by any other; the owning hospital is trusted
/// to move an application back and forth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An application row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub jobseeker_id: UserId,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An application as the applicant sees it: with the job and hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub hospital_name: String,
}

/// An application as the hospital sees it: with the applicant's contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWithApplicant {
    #[serde(flatten)]
    pub application: Application,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Validated application fields. The applicant comes from the
/// authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: JobId,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

/// Body of `POST /api/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplyRequest {
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl ApplyRequest {
    /// Validate the request.
    pub fn validate(self) -> ValidationResult<NewApplication> {
        let job_id = self
            .job_id
            .filter(|id| id.get() > 0)
            .ok_or(ValidationError::MissingJobId)?;

        Ok(NewApplication {
            job_id,
            cover_letter: non_blank(self.cover_letter),
            resume_url: non_blank(self.resume_url),
        })
    }
}

/// Body of `PUT /api/applications/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateApplicationStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateApplicationStatusRequest {
    /// Validate the request.
    pub fn validate(self) -> ValidationResult<ApplicationStatus> {
        match self.status {
            Some(raw) => raw.parse(),
            None => Err(ValidationError::InvalidStatus(String::new())),
        }
    }
}
