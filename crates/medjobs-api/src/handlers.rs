//! Request handlers.

pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod saved_jobs;

pub use applications::*;
pub use auth::*;
pub use health::*;
pub use jobs::*;
pub use saved_jobs::*;

use medjobs_models::JobId;
use serde::Serialize;

use crate::error::ApiError;

/// Body of responses that only confirm an action.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Parse a job id path segment; anything non-numeric is "not found".
pub(crate) fn job_id_from_path(raw: &str) -> Result<JobId, ApiError> {
    JobId::parse(raw).ok_or_else(|| ApiError::not_found("Job not found"))
}
