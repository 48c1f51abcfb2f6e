//! API integration tests.

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use medjobs_api::{create_router, ApiConfig, AppState, TokenCodec};
use medjobs_models::{Role, UserId};
use medjobs_storage::{Database, StorageConfig};
use sqlx::SqlitePool;

const SECRET: &str = "api-test-secret";

struct TestApp {
    router: Router,
    storage: StorageConfig,
    _dir: TempDir,
}

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: SECRET.to_string(),
        bcrypt_cost: 4,
        ..ApiConfig::default()
    }
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.storage = StorageConfig::for_path(dir.path().join("api.db"));

    let storage = config.storage.clone();
    let db = Database::connect(&storage).await.unwrap();
    let state = AppState::new(config, Some(db));

    TestApp {
        router: create_router(state, None),
        storage,
        _dir: dir,
    }
}

/// Postings are closed outside the API; flip the column directly.
async fn close_job(app: &TestApp, job_id: i64) {
    let pool = SqlitePool::connect(&app.storage.url).await.unwrap();
    sqlx::query("UPDATE jobs SET status = 'closed' WHERE id = ?")
        .bind(job_id)
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
}

fn app_without_database() -> Router {
    create_router(AppState::new(test_config(), None), None)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Sign up and return (token, user id).
async fn signup(app: &Router, email: &str, role: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": format!("{email} account"),
            "email": email,
            "password": "correct horse",
            "role": role,
            "location": "Boston",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_i64().unwrap(),
    )
}

async fn post_job(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/jobs",
        Some(token),
        Some(json!({
            "title": title,
            "description": "Night shift, level 1 trauma center",
            "location": "Boston, MA",
            "salary": "$95/hr",
            "employment_type": "part_time",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Job created successfully");
    body["jobId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_without_database();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reflects_database() {
    let app = test_app().await;
    let (status, body) = send(&app.router, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");

    let (status, body) = send(&app_without_database(), Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = create_router(AppState::new(test_config(), None), Some(handle));

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_hiring_scenario() {
    let app = test_app().await;
    let router = &app.router;

    let (hospital, _) = signup(router, "hr@mercy.org", "hospital").await;
    let job_id = post_job(router, &hospital, "ER Nurse").await;
    let (seeker, seeker_id) = signup(router, "nurse@example.com", "jobseeker").await;

    let apply_body = json!({ "job_id": job_id, "cover_letter": "Ten years in the ER" });
    let (status, body) = send(
        router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(apply_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Application submitted successfully");
    let application_id = body["applicationId"].as_i64().unwrap();

    let (status, body) = send(
        router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(apply_body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already applied for this job");

    let (status, body) = send(
        router,
        Method::GET,
        &format!("/api/jobs/{job_id}/applications"),
        Some(&hospital),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let applications = body["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["jobseeker_id"], seeker_id);
    assert_eq!(applications[0]["email"], "nurse@example.com");
    assert_eq!(applications[0]["status"], "pending");

    let (status, body) = send(
        router,
        Method::PUT,
        &format!("/api/applications/{application_id}"),
        Some(&hospital),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application status updated");

    let (status, body) = send(router, Method::GET, "/api/applications/my", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    let applications = body["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["status"], "accepted");
    assert_eq!(applications[0]["title"], "ER Nurse");
    assert_eq!(applications[0]["hospital_name"], "hr@mercy.org account");
}

#[tokio::test]
async fn test_login_token_identifies_user() {
    let app = test_app().await;
    let (_, user_id) = signup(&app.router, "hr@mercy.org", "hospital").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "hr@mercy.org", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["user"].get("password").is_none());

    let codec = TokenCodec::new(SECRET.as_bytes(), test_config().token_ttl);
    let identity = codec.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(identity.user_id, UserId(user_id));
    assert_eq!(identity.role, Role::Hospital);

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/api/auth/me",
        body["token"].as_str(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "hr@mercy.org");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app().await;
    signup(&app.router, "hr@mercy.org", "hospital").await;

    for credentials in [
        json!({ "email": "hr@mercy.org", "password": "wrong" }),
        json!({ "email": "nobody@mercy.org", "password": "correct horse" }),
    ] {
        let (status, body) =
            send(&app.router, Method::POST, "/api/auth/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "hr@mercy.org" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password required");
}

#[tokio::test]
async fn test_signup_validation() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "X", "email": "x@example.com", "role": "hospital" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "X", "email": "x@example.com", "password": "pw", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "X", "email": "x@example.com", "password": "pw",
            "role": "hospital", "is_admin": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    signup(&app.router, "x@example.com", "jobseeker").await;
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Y", "email": "x@example.com", "password": "pw", "role": "hospital" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let app = test_app().await;
    let (_, user_id) = signup(&app.router, "Nurse@Example.com", "jobseeker").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Same person", "email": "nurse@example.com",
            "password": "pw", "role": "hospital"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "NURSE@EXAMPLE.COM", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["role"], "jobseeker");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_altered_token_is_rejected() {
    let app = test_app().await;
    let (token, _) = signup(&app.router, "nurse@example.com", "jobseeker").await;

    let (status, _) = send(&app.router, Method::GET, "/api/applications/my", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    for i in 0..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let altered = String::from_utf8(bytes).unwrap();

        let (status, body) =
            send(&app.router, Method::GET, "/api/applications/my", Some(&altered), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "byte {i} altered but accepted");
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_role_guards() {
    let app = test_app().await;
    let router = &app.router;
    let (hospital, _) = signup(router, "hr@mercy.org", "hospital").await;
    let (seeker, _) = signup(router, "nurse@example.com", "jobseeker").await;
    let job_id = post_job(router, &hospital, "ER Nurse").await;

    let job_body = json!({ "title": "T", "description": "D", "location": "L" });
    let (status, _) = send(router, Method::POST, "/api/jobs", Some(&seeker), Some(job_body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(router, Method::POST, "/api/jobs", None, Some(job_body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        router,
        Method::POST,
        "/api/applications",
        Some(&hospital),
        Some(json!({ "job_id": job_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(router, Method::GET, "/api/jobs/my", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(router, Method::GET, "/api/applications/my", Some(&hospital), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_owning_hospital_reviews() {
    let app = test_app().await;
    let router = &app.router;
    let (owner, _) = signup(router, "hr@mercy.org", "hospital").await;
    let (rival, _) = signup(router, "hr@general.org", "hospital").await;
    let (seeker, _) = signup(router, "nurse@example.com", "jobseeker").await;
    let job_id = post_job(router, &owner, "ER Nurse").await;

    let (_, body) = send(
        router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(json!({ "job_id": job_id })),
    )
    .await;
    let application_id = body["applicationId"].as_i64().unwrap();
    let uri = format!("/api/applications/{application_id}");

    let (status, body) = send(router, Method::PUT, &uri, Some(&rival), Some(json!({ "status": "rejected" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Application not found");

    let (status, _) = send(router, Method::PUT, &uri, Some(&seeker), Some(json!({ "status": "accepted" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        router,
        Method::GET,
        &format!("/api/jobs/{job_id}/applications"),
        Some(&rival),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");

    let (status, body) = send(router, Method::PUT, &uri, Some(&owner), Some(json!({ "status": "hired" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    let (status, _) = send(
        router,
        Method::PUT,
        "/api/applications/abc",
        Some(&owner),
        Some(json!({ "status": "reviewed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(router, Method::GET, "/api/applications/my", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applications"][0]["status"], "pending");
}

#[tokio::test]
async fn test_listing_excludes_closed_jobs() {
    let app = test_app().await;
    let router = &app.router;
    let (hospital, _) = signup(router, "hr@mercy.org", "hospital").await;
    let (seeker, _) = signup(router, "nurse@example.com", "jobseeker").await;
    let open_id = post_job(router, &hospital, "ER Nurse").await;
    let closed_id = post_job(router, &hospital, "ICU Nurse").await;

    close_job(&app, closed_id).await;

    let (status, body) = send(router, Method::GET, "/api/jobs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["id"], open_id);
    assert_eq!(jobs[0]["hospital_name"], "hr@mercy.org account");
    assert!(jobs.iter().all(|job| job["status"] == "active"));

    let (status, body) = send(router, Method::GET, "/api/jobs/my", Some(&hospital), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(json!({ "job_id": closed_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");
}

#[tokio::test]
async fn test_job_search_and_detail() {
    let app = test_app().await;
    let router = &app.router;
    let (hospital, _) = signup(router, "hr@mercy.org", "hospital").await;
    let nurse_id = post_job(router, &hospital, "ER Nurse").await;
    post_job(router, &hospital, "Radiology Tech").await;

    let (status, body) = send(router, Method::GET, "/api/jobs?search=nurse", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "ER Nurse");

    let (_, body) = send(router, Method::GET, "/api/jobs?location=boston", None, None).await;
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);

    let (_, body) = send(router, Method::GET, "/api/jobs?location=Denver", None, None).await;
    assert!(body["jobs"].as_array().unwrap().is_empty());

    let (status, body) = send(router, Method::GET, &format!("/api/jobs/{nurse_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["title"], "ER Nurse");
    assert_eq!(body["job"]["employment_type"], "part_time");
    assert_eq!(body["job"]["hospital_email"], "hr@mercy.org");

    for uri in ["/api/jobs/9999", "/api/jobs/abc", "/api/jobs/-1"] {
        let (status, body) = send(router, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Job not found");
    }
}

#[tokio::test]
async fn test_create_job_validation() {
    let app = test_app().await;
    let (hospital, _) = signup(&app.router, "hr@mercy.org", "hospital").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/jobs",
        Some(&hospital),
        Some(json!({ "title": "ER Nurse", "description": "", "location": "Boston" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/jobs",
        Some(&hospital),
        Some(json!({
            "title": "ER Nurse", "description": "Nights", "location": "Boston",
            "employment_type": "gig"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/jobs",
        Some(&hospital),
        Some(json!({ "title": "ER Nurse", "description": "Nights", "location": "Boston", "salary": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let job_id = body["jobId"].as_i64().unwrap();
    let (_, body) = send(&app.router, Method::GET, &format!("/api/jobs/{job_id}"), None, None).await;
    assert_eq!(body["job"]["salary"], Value::Null);
    assert_eq!(body["job"]["employment_type"], "full_time");
}

#[tokio::test]
async fn test_apply_requires_job_id() {
    let app = test_app().await;
    let (seeker, _) = signup(&app.router, "nurse@example.com", "jobseeker").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(json!({ "cover_letter": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Job ID is required");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/applications",
        Some(&seeker),
        Some(json!({ "job_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_duplicate_applications() {
    let app = test_app().await;
    let (hospital, _) = signup(&app.router, "hr@mercy.org", "hospital").await;
    let (seeker, _) = signup(&app.router, "nurse@example.com", "jobseeker").await;
    let job_id = post_job(&app.router, &hospital, "ER Nurse").await;

    let attempts = (0..8).map(|_| {
        let router = app.router.clone();
        let seeker = seeker.clone();
        tokio::spawn(async move {
            send(
                &router,
                Method::POST,
                "/api/applications",
                Some(&seeker),
                Some(json!({ "job_id": job_id })),
            )
            .await
            .0
        })
    });
    let statuses: Vec<StatusCode> = futures_util::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let duplicates = statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count();
    assert_eq!(created, 1, "{statuses:?}");
    assert_eq!(duplicates, 7, "{statuses:?}");
}

#[tokio::test]
async fn test_saved_jobs() {
    let app = test_app().await;
    let router = &app.router;
    let (hospital, _) = signup(router, "hr@mercy.org", "hospital").await;
    let (seeker, _) = signup(router, "nurse@example.com", "jobseeker").await;
    let job_id = post_job(router, &hospital, "ER Nurse").await;

    let (status, body) = send(router, Method::POST, "/api/saved-jobs", Some(&seeker), Some(json!({ "job_id": job_id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["savedJobId"].is_i64());

    let (status, body) = send(router, Method::POST, "/api/saved-jobs", Some(&seeker), Some(json!({ "job_id": job_id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Job already saved");

    let (status, _) = send(router, Method::POST, "/api/saved-jobs", Some(&seeker), Some(json!({ "job_id": 777 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(router, Method::GET, "/api/saved-jobs", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["id"], job_id);
    assert_eq!(jobs[0]["hospital_name"], "hr@mercy.org account");
    assert!(jobs[0]["saved_at"].is_string());

    let uri = format!("/api/saved-jobs/{job_id}");
    let (status, _) = send(router, Method::DELETE, &uri, Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(router, Method::DELETE, &uri, Some(&seeker), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Saved job not found");

    let (status, _) = send(router, Method::GET, "/api/saved-jobs", Some(&hospital), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_without_database_every_api_endpoint_is_unavailable() {
    let app = app_without_database();
    let codec = TokenCodec::new(SECRET.as_bytes(), test_config().token_ttl);
    let hospital = codec.issue(UserId(1), "hr@mercy.org", Role::Hospital).unwrap();

    let requests: [(Method, &str, Option<Value>); 8] = [
        (Method::POST, "/api/auth/signup", Some(json!({}))),
        (Method::POST, "/api/auth/login", Some(json!({}))),
        (Method::GET, "/api/jobs", None),
        (Method::POST, "/api/jobs", Some(json!({}))),
        (Method::GET, "/api/jobs/1", None),
        (Method::GET, "/api/jobs/my", None),
        (Method::PUT, "/api/applications/1", Some(json!({ "status": "accepted" }))),
        (Method::GET, "/api/saved-jobs", None),
    ];

    for (method, uri, body) in requests {
        for token in [None, Some(hospital.as_str())] {
            let (status, response) = send(&app, method.clone(), uri, token, body.clone()).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{method} {uri}");
            assert_eq!(response["error"], "Database not available");
        }
    }
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = app_without_database();

    for uri in ["/api/nope", "/nope"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Route not found");
    }
}

#[tokio::test]
async fn test_wrong_method_is_json_not_found() {
    let app = test_app().await;

    let requests = [
        (Method::DELETE, "/api/jobs"),
        (Method::PUT, "/api/jobs/1"),
        (Method::GET, "/api/applications/1"),
        (Method::GET, "/api/auth/login"),
        (Method::POST, "/health"),
    ];

    for (method, uri) in requests {
        let (status, body) = send(&app.router, method.clone(), uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["error"], "Route not found", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app_without_database();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/jobs")
                .header("Origin", "https://clinic.example")
                .header("Access-Control-Request-Method", "POST")
                .header("Access-Control-Request-Headers", "authorization,content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(method), "{methods}");
    }
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let app = app_without_database();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("X-Request-ID", "trace-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-123");
}
