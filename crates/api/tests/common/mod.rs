#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use synthpipe_api::config::ServerConfig;
use synthpipe_api::engine::DriverTiming;
use synthpipe_api::router::build_app_router;
use synthpipe_api::state::AppState;
use synthpipe_db::models::media::{CreateMedia, Media};
use synthpipe_db::repositories::MediaRepo;
use synthpipe_events::{EventBus, EventPersistence};

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "synthpipe-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a per-call temporary upload directory, a 1 MiB upload limit and the
/// production driver timing (2 s initial delay, 2 s between checkpoints).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: std::env::temp_dir()
            .join(format!("synthpipe-test-{}", uuid::Uuid::new_v4().simple())),
        max_upload_bytes: 1024 * 1024,
        driver: DriverTiming {
            initial_delay: Duration::from_secs(2),
            step_interval: Duration::from_secs(2),
        },
    }
}

/// Build the full application router plus the state behind it.
///
/// Uses the same router builder as `main.rs` so tests exercise the real
/// middleware stack. The event log writer is spawned as in production.
pub fn build_test_app() -> (Router, AppState) {
    let pool = synthpipe_db::create_pool();
    let event_bus = Arc::new(EventBus::default());
    tokio::spawn(EventPersistence::run(pool.clone(), event_bus.subscribe()));

    let state = AppState::new(pool, test_config(), event_bus);
    (build_app_router(state.clone()), state)
}

/// Register a media record directly in the datastore, skipping the upload.
pub async fn seed_media(state: &AppState, name: &str) -> Media {
    MediaRepo::create(
        &state.pool,
        CreateMedia {
            original_filename: name.to_string(),
            stored_path: format!("storage/uploads/{name}"),
            extension: "mp4".to_string(),
            size_bytes: 4096,
        },
    )
    .await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string().into_bytes()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Encode a single file part as `multipart/form-data` using [`BOUNDARY`].
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
