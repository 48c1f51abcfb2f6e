//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use medjobs_models::ValidationError;
use medjobs_storage::StorageError;

use crate::credentials::CredentialError;

pub type ApiResult<T> = Result<T, ApiError>;

const DATABASE_UNAVAILABLE: &str = "Database not available";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database not available")]
    ServiceUnavailable,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl ApiError {
    /// The single rejection used for a missing, invalid or wrong-role token.
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    pub fn unauthorized_with(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Storage(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Storage(_) | ApiError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Server-side failures never leak details.
    fn client_message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg) => msg.clone(),
            ApiError::Validation(e) => e.to_string(),
            ApiError::ServiceUnavailable => DATABASE_UNAVAILABLE.to_string(),
            ApiError::Storage(e) if e.is_unavailable() => DATABASE_UNAVAILABLE.to_string(),
            ApiError::Storage(_) | ApiError::Credential(_) => INTERNAL_ERROR.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = %status, "Request failed: {}", self);
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
