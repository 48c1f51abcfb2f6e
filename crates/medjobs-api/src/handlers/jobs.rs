//! Job posting handlers.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use medjobs_models::{CreateJobRequest, Job, JobDetail, JobFilter, JobId, JobListing};

use crate::auth::HospitalUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery, Db};
use crate::handlers::job_id_from_path;
use crate::metrics;

/// Public listing response.
#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobListing>,
}

/// A hospital's own postings.
#[derive(Serialize)]
pub struct OwnJobsResponse {
    pub jobs: Vec<Job>,
}

/// Single posting response.
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobDetail,
}

/// Response for a newly created posting.
#[derive(Serialize)]
pub struct CreateJobResponse {
    pub message: &'static str,
    #[serde(rename = "jobId")]
    pub job_id: JobId,
}

/// List active postings, newest first.
pub async fn list_jobs(
    Db(db): Db,
    ApiQuery(filter): ApiQuery<JobFilter>,
) -> ApiResult<Json<JobListResponse>> {
    let jobs = db.jobs().list_active(&filter).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// Post a new job as the calling hospital.
pub async fn create_job(
    Db(db): Db,
    HospitalUser(hospital): HospitalUser,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<CreateJobResponse>)> {
    let new_job = request.validate()?;

    let job = db.jobs().create(hospital.user_id, &new_job).await?;

    metrics::record_job_created();

    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            message: "Job created successfully",
            job_id: job.id,
        }),
    ))
}

/// Every posting owned by the calling hospital, whatever its status.
pub async fn my_jobs(
    Db(db): Db,
    HospitalUser(hospital): HospitalUser,
) -> ApiResult<Json<OwnJobsResponse>> {
    let jobs = db.jobs().list_by_hospital(hospital.user_id).await?;
    Ok(Json(OwnJobsResponse { jobs }))
}

/// One posting with the hospital's contact details.
pub async fn get_job(Db(db): Db, Path(raw_id): Path<String>) -> ApiResult<Json<JobResponse>> {
    let job_id = job_id_from_path(&raw_id)?;

    let job = db
        .jobs()
        .find_detail(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(JobResponse { job }))
}
