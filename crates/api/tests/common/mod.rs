//! Shared helpers for API integration tests.
//!
//! [`build_test_app`] mirrors the router construction in `main.rs` via
//! [`build_app_router`] so tests exercise the exact middleware stack that
//! production uses.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use donut_api::auth::jwt::JwtConfig;
use donut_api::config::ServerConfig;
use donut_api::router::build_app_router;
use donut_api::state::AppState;
use donut_api::storage::BlobStore;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: test_storage_root(),
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Per-process storage root under the system temp dir. Stored filenames
/// embed a random component, so tests sharing the directory never clash.
fn test_storage_root() -> PathBuf {
    std::env::temp_dir().join(format!("donut-test-audio-{}", std::process::id()))
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let storage = Arc::new(BlobStore::new(config.storage_root.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT with no body (used by set-current).
pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Deserialize a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart helper
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "donut-test-boundary";

/// One field of a hand-assembled multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// POST a multipart/form-data body assembled from `parts`.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register a user through the API and return `(access_token, user_id)`.
pub async fn register_user(app: Router, username: &str) -> (String, i64) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Create a project through the API and return its id.
pub async fn create_project(app: Router, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title });
    let response = post_json_auth(app, "/api/v1/projects", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}

/// Upload a track with an initial version; returns `(track_id, version_id)`.
pub async fn upload_track(app: Router, token: &str, project_id: i64, title: &str) -> (i64, i64) {
    let project_id_text = project_id.to_string();
    let parts = [
        Part::Text("project_id", &project_id_text),
        Part::Text("title", title),
        Part::File("file", "demo.mp3", b"not-really-audio"),
    ];
    let response = post_multipart_auth(app, "/api/v1/tracks/upload", token, &parts).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    (
        json["track"]["id"].as_i64().unwrap(),
        json["version"]["id"].as_i64().unwrap(),
    )
}
