//! Saved job handlers.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use medjobs_models::{JobId, SaveJobRequest, SavedJobId, SavedJobListing};

use crate::auth::JobseekerUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, Db};
use crate::handlers::MessageResponse;

#[derive(Serialize)]
pub struct SaveJobResponse {
    pub message: &'static str,
    #[serde(rename = "savedJobId")]
    pub saved_job_id: SavedJobId,
}

#[derive(Serialize)]
pub struct SavedJobsResponse {
    pub jobs: Vec<SavedJobListing>,
}

/// Bookmark a posting.
pub async fn save_job(
    Db(db): Db,
    JobseekerUser(jobseeker): JobseekerUser,
    ApiJson(request): ApiJson<SaveJobRequest>,
) -> ApiResult<(StatusCode, Json<SaveJobResponse>)> {
    let job_id = request.validate()?;

    let saved = match db.saved_jobs().save(jobseeker.user_id, job_id).await {
        Ok(Some(saved)) => saved,
        Ok(None) => return Err(ApiError::not_found("Job not found")),
        Err(e) if e.is_unique_violation() => {
            return Err(ApiError::bad_request("Job already saved"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(SaveJobResponse {
            message: "Job saved successfully",
            saved_job_id: saved.id,
        }),
    ))
}

/// The caller's bookmarks, most recently saved first.
pub async fn list_saved_jobs(
    Db(db): Db,
    JobseekerUser(jobseeker): JobseekerUser,
) -> ApiResult<Json<SavedJobsResponse>> {
    let jobs = db.saved_jobs().list(jobseeker.user_id).await?;
    Ok(Json(SavedJobsResponse { jobs }))
}

/// Remove a bookmark.
pub async fn unsave_job(
    Db(db): Db,
    JobseekerUser(jobseeker): JobseekerUser,
    Path(raw_job_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let job_id =
        JobId::parse(&raw_job_id).ok_or_else(|| ApiError::not_found("Saved job not found"))?;

    if !db.saved_jobs().remove(jobseeker.user_id, job_id).await? {
        return Err(ApiError::not_found("Saved job not found"));
    }

    Ok(Json(MessageResponse {
        message: "Job removed from saved jobs",
    }))
}
