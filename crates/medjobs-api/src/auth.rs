//! Bearer-token authentication.
//!
//! `authenticate` turns the `Authorization` header into an [`Identity`] or
//! nothing. The extractors below gate handlers by role and reject before the
//! handler body runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;

use medjobs_models::Role;

use crate::credentials::{Identity, TokenCodec};
use crate::error::ApiError;
use crate::state::AppState;

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller from request headers.
///
/// A missing header, a malformed header and an invalid token are
/// indistinguishable to the caller.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenCodec) -> Option<Identity> {
    let token = bearer_token(headers)?;
    tokens.verify(token)
}

fn identity_from_parts(parts: &Parts, state: &AppState) -> Result<Identity, ApiError> {
    authenticate(&parts.headers, &state.tokens).ok_or_else(|| {
        debug!(path = %parts.uri.path(), "Missing or invalid bearer token");
        ApiError::unauthorized()
    })
}

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        identity_from_parts(parts, state).map(Self)
    }
}

/// A signed-in hospital account.
#[derive(Debug, Clone)]
pub struct HospitalUser(pub Identity);

#[axum::async_trait]
impl FromRequestParts<AppState> for HospitalUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = identity_from_parts(parts, state)?;
        match identity.role {
            Role::Hospital => Ok(Self(identity)),
            Role::Jobseeker => Err(ApiError::unauthorized()),
        }
    }
}

/// A signed-in jobseeker account.
#[derive(Debug, Clone)]
pub struct JobseekerUser(pub Identity);

#[axum::async_trait]
impl FromRequestParts<AppState> for JobseekerUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = identity_from_parts(parts, state)?;
        match identity.role {
            Role::Jobseeker => Ok(Self(identity)),
            Role::Hospital => Err(ApiError::unauthorized()),
        }
    }
}
