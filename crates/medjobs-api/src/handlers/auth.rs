//! Signup, login and current-account handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use medjobs_models::{LoginRequest, SignupRequest, User};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, Db};
use crate::metrics;
use crate::state::AppState;

/// Response for signup and login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: User,
}

/// Response for the current account.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: User,
}

/// Create an account and sign it in.
pub async fn signup(
    Db(db): Db,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let (new_user, password) = request.validate()?;

    let password_hash = state.passwords.hash(password).await?;

    let user = match db.users().create(&new_user, &password_hash).await {
        Ok(user) => user,
        Err(e) if e.is_unique_violation() => {
            return Err(ApiError::bad_request("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(user.id, &user.email, user.role)?;

    metrics::record_signup(user.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            token,
            user,
        }),
    ))
}

/// Exchange email and password for a session token.
pub async fn login(
    Db(db): Db,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (email, password) = request.validate()?;

    let Some(credentials) = db.users().find_credentials(&email).await? else {
        metrics::record_login("failure");
        warn!("Login failed: unknown email");
        return Err(ApiError::unauthorized_with("Invalid credentials"));
    };

    if !state.passwords.verify(password, credentials.password_hash).await {
        metrics::record_login("failure");
        warn!("Login failed: wrong password for user {}", credentials.user.id);
        return Err(ApiError::unauthorized_with("Invalid credentials"));
    }

    let user = credentials.user;
    let token = state.tokens.issue(user.id, &user.email, user.role)?;

    metrics::record_login("success");
    info!("User logged in: id={}", user.id);

    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user,
    }))
}

/// The account behind the bearer token.
pub async fn me(Db(db): Db, AuthUser(identity): AuthUser) -> ApiResult<Json<MeResponse>> {
    let user = db
        .users()
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(MeResponse { user }))
}
