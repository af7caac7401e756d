#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use sitecms_api::auth::jwt::JwtConfig;
use sitecms_api::auth::password::hash_password;
use sitecms_api::config::ServerConfig;
use sitecms_api::router::build_app_router;
use sitecms_api::state::AppState;
use sitecms_api::storage::ImageStore;
use sitecms_db::models::admin_user::{AdminUser, CreateAdminUser};
use sitecms_db::models::settings::UpdateEmailSettings;
use sitecms_db::repositories::{AdminUserRepo, SettingsRepo};
use sitecms_mailer::RecordingMailer;

pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

const MULTIPART_BOUNDARY: &str = "sitecms-test-boundary";

/// Build a test `ServerConfig` with safe defaults and uploads under `upload_dir`.
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        admin_app_url: "http://localhost:5173/admin".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The application under test plus the pieces tests inspect directly.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    /// Kept alive for the duration of the test.
    pub uploads: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Whether `reference` (e.g. `/uploads/<name>`) exists on disk.
    pub fn stored(&self, reference: &str) -> bool {
        let name = reference.trim_start_matches("/uploads/");
        self.uploads.path().join(name).exists()
    }
}

/// Build the full application router with the production middleware stack,
/// a temporary upload directory, and a recording mailer.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let config = test_config(&uploads);
    let mailer = Arc::new(RecordingMailer::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(ImageStore::new(uploads.path())),
        mailer: mailer.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        mailer,
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an admin account with [`ADMIN_PASSWORD`].
pub async fn create_admin(pool: &PgPool, username: &str) -> AdminUser {
    let password_hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: username.to_string(),
            email: format!("{username}@builder.test"),
            password_hash,
        },
    )
    .await
    .expect("admin creation should succeed")
}

/// Create an admin and log in through the API, returning the bearer token.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    create_admin(pool, "admin").await;
    let body = serde_json::json!({ "username": "admin", "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/v1/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Store active email settings pointing at a dummy SMTP server.
pub async fn configure_email(pool: &PgPool) {
    SettingsRepo::upsert_email(
        pool,
        &UpdateEmailSettings {
            smtp_host: "smtp.builder.test".into(),
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            from_address: "site@builder.test".into(),
            recipient_email: "office@builder.test".into(),
            is_active: true,
        },
    )
    .await
    .expect("email settings upsert should succeed");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should not fail")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::PUT, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// POST a multipart form with a single `image` file field.
pub async fn upload_image(app: Router, token: &str, file_name: &str, bytes: &[u8]) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/upload-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Upload a small image and return its reference.
pub async fn uploaded(app: Router, token: &str, file_name: &str) -> String {
    let response = upload_image(app, token, file_name, b"\x89PNG fake image bytes").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["url"].as_str().unwrap().to_string()
}
