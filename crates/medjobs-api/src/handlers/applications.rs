//! Application handlers: applying, tracking and reviewing.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use medjobs_models::{
    ApplicationId, ApplicationWithApplicant, ApplicationWithJob, ApplyRequest,
    UpdateApplicationStatusRequest,
};

use crate::auth::{HospitalUser, JobseekerUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, Db};
use crate::handlers::{job_id_from_path, MessageResponse};
use crate::metrics;

/// Response for a submitted application.
#[derive(Serialize)]
pub struct ApplyResponse {
    pub message: &'static str,
    #[serde(rename = "applicationId")]
    pub application_id: ApplicationId,
}

/// A jobseeker's applications.
#[derive(Serialize)]
pub struct MyApplicationsResponse {
    pub applications: Vec<ApplicationWithJob>,
}

/// Applications received for one posting.
#[derive(Serialize)]
pub struct JobApplicationsResponse {
    pub applications: Vec<ApplicationWithApplicant>,
}

/// Apply to an active posting as the calling jobseeker.
pub async fn apply(
    Db(db): Db,
    JobseekerUser(jobseeker): JobseekerUser,
    ApiJson(request): ApiJson<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplyResponse>)> {
    let new_application = request.validate()?;

    let application = match db.applications().create(jobseeker.user_id, &new_application).await {
        Ok(Some(application)) => application,
        Ok(None) => return Err(ApiError::not_found("Job not found")),
        Err(e) if e.is_unique_violation() => {
            return Err(ApiError::bad_request("Already applied for this job"));
        }
        Err(e) => return Err(e.into()),
    };

    metrics::record_application_submitted();

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            message: "Application submitted successfully",
            application_id: application.id,
        }),
    ))
}

/// The calling jobseeker's applications, newest first.
pub async fn my_applications(
    Db(db): Db,
    JobseekerUser(jobseeker): JobseekerUser,
) -> ApiResult<Json<MyApplicationsResponse>> {
    let applications = db.applications().list_for_jobseeker(jobseeker.user_id).await?;
    Ok(Json(MyApplicationsResponse { applications }))
}

/// Applications for a posting owned by the calling hospital.
///
/// A posting owned by someone else is reported exactly like a missing one.
pub async fn job_applications(
    Db(db): Db,
    HospitalUser(hospital): HospitalUser,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<JobApplicationsResponse>> {
    let job_id = job_id_from_path(&raw_id)?;

    let applications = db
        .applications()
        .list_for_owned_job(job_id, hospital.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(JobApplicationsResponse { applications }))
}

/// Set the review status of an application to a posting the caller owns.
pub async fn update_application_status(
    Db(db): Db,
    HospitalUser(hospital): HospitalUser,
    Path(raw_id): Path<String>,
    ApiJson(request): ApiJson<UpdateApplicationStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let status = request.validate()?;

    let application_id =
        ApplicationId::parse(&raw_id).ok_or_else(|| ApiError::not_found("Application not found"))?;

    let updated = db
        .applications()
        .update_status(application_id, hospital.user_id, status)
        .await?;

    if !updated {
        return Err(ApiError::not_found("Application not found"));
    }

    metrics::record_application_status(status);

    Ok(Json(MessageResponse {
        message: "Application status updated",
    }))
}
