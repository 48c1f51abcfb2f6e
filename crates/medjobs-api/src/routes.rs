//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::ApiError;
use crate::handlers::{
    apply, create_job, get_job, health, job_applications, list_jobs, list_saved_jobs, login, me,
    my_applications, my_jobs, ready, save_job, signup, unsave_job, update_application_status,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // Wrong-method requests on known paths get the same JSON 404 as unknown paths
    let auth_routes = Router::new()
        .route("/auth/signup", post(signup).fallback(route_not_found))
        .route("/auth/login", post(login).fallback(route_not_found))
        .route("/auth/me", get(me).fallback(route_not_found));

    // "/jobs/my" is static and wins over "/jobs/:id"
    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job).fallback(route_not_found))
        .route("/jobs/my", get(my_jobs).fallback(route_not_found))
        .route("/jobs/:id", get(get_job).fallback(route_not_found))
        .route(
            "/jobs/:id/applications",
            get(job_applications).fallback(route_not_found),
        );

    let application_routes = Router::new()
        .route("/applications", post(apply).fallback(route_not_found))
        .route("/applications/my", get(my_applications).fallback(route_not_found))
        .route(
            "/applications/:id",
            put(update_application_status).fallback(route_not_found),
        );

    let saved_job_routes = Router::new()
        .route(
            "/saved-jobs",
            get(list_saved_jobs).post(save_job).fallback(route_not_found),
        )
        .route("/saved-jobs/:job_id", delete(unsave_job).fallback(route_not_found));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(job_routes)
        .merge(application_routes)
        .merge(saved_job_routes);

    let health_routes = Router::new()
        .route("/health", get(health).fallback(route_not_found))
        .route("/ready", get(ready).fallback(route_not_found));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route(
            "/metrics",
            get(move || async move { handle.render() }).fallback(route_not_found),
        )
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
