//! Jobs bookmarked by jobseekers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{JobId, SavedJobId, UserId};
use crate::job::JobListing;
use crate::validation::{ValidationError, ValidationResult};

/// A bookmark row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: SavedJobId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
}

/// A bookmarked posting with the time it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJobListing {
    #[serde(flatten)]
    pub listing: JobListing,
    pub saved_at: DateTime<Utc>,
}

/// Body of `POST /api/saved-jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveJobRequest {
    #[serde(default)]
    pub job_id: Option<JobId>,
}

impl SaveJobRequest {
    /// Validate the request.
    pub fn validate(self) -> ValidationResult<JobId> {
        self.job_id
            .filter(|id| id.get() > 0)
            .ok_or(ValidationError::MissingJobId)
    }
}
