//! Integration tests for the `/jobs` resource and the job lifecycle.
//!
//! Timer-driven tests run on a paused clock, so sleeping in the test
//! advances every job driver deterministically.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw, seed_media};
use serde_json::json;

/// Long enough for any job to reach its final checkpoint.
const FULL_RUN: Duration = Duration::from_secs(10);

async fn create_job(app: axum::Router, path: &str, media_id: i64) -> serde_json::Value {
    let response = post_json(
        app,
        path,
        json!({"media_id": media_id, "parameters": {"preset": "night"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn create_variation_job_returns_pending_record() {
    let (app, state) = common::build_test_app();
    let media = seed_media(&state, "drive.mp4").await;

    let job = create_job(app, "/api/v1/jobs/variations", media.id).await;

    assert_eq!(job["id"], 1);
    assert_eq!(job["media_id"], media.id);
    assert_eq!(job["kind"], "variation_generation");
    assert_eq!(job["status"], "pending");
    assert_eq!(job["progress"], 0);
    assert_eq!(job["parameters"]["preset"], "night");
    assert!(job["result"].is_null());
}

#[tokio::test(start_paused = true)]
async fn create_job_for_unknown_media_returns_404() {
    let (app, _state) = common::build_test_app();

    let response = post_json(app, "/api/v1/jobs/conversions", json!({"media_id": 12})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Media with id 12 not found");
}

#[tokio::test(start_paused = true)]
async fn create_job_with_invalid_fields_returns_field_details() {
    let (app, _state) = common::build_test_app();

    let response = post_json(
        app,
        "/api/v1/jobs/variations",
        json!({"media_id": 0, "parameters": [1, 2]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["media_id"].is_array());
    assert!(body["details"]["parameters"].is_array());
}

#[tokio::test(start_paused = true)]
async fn create_job_with_malformed_json_returns_400() {
    let (app, _state) = common::build_test_app();

    let response = post_raw(
        app,
        "/api/v1/jobs/variations",
        "application/json",
        b"{\"media_id\": ".to_vec(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn get_unknown_job_returns_404() {
    let (app, _state) = common::build_test_app();

    for path in [
        "/api/v1/jobs/999",
        "/api/v1/jobs/999/variations",
        "/api/v1/jobs/999/outputs",
        "/api/v1/jobs/999/events",
    ] {
        let response = get(app.clone(), path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test(start_paused = true)]
async fn list_jobs_filters_by_media() {
    let (app, state) = common::build_test_app();
    let first = seed_media(&state, "a.mp4").await;
    let second = seed_media(&state, "b.mp4").await;

    create_job(app.clone(), "/api/v1/jobs/variations", first.id).await;
    create_job(app.clone(), "/api/v1/jobs/conversions", second.id).await;
    create_job(app.clone(), "/api/v1/jobs/conversions", first.id).await;

    let all = body_json(get(app.clone(), "/api/v1/jobs").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let filtered = body_json(get(app.clone(), "/api/v1/jobs?media_id=1").await).await;
    let ids: Vec<_> = filtered["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let by_media = body_json(get(app, "/api/v1/media/2/jobs").await).await;
    assert_eq!(by_media["data"][0]["kind"], "dataset_conversion");
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn progress_is_non_decreasing_and_completed_only_at_100() {
    let (app, state) = common::build_test_app();
    let media = seed_media(&state, "drive.mp4").await;
    let job = create_job(app.clone(), "/api/v1/jobs/variations", media.id).await;
    let path = format!("/api/v1/jobs/{}", job["id"]);

    let mut observed = Vec::new();
    for _ in 0..12 {
        let current = body_json(get(app.clone(), &path).await).await["data"].clone();
        let progress = current["progress"].as_i64().unwrap();
        let status = current["status"].as_str().unwrap().to_string();
        assert!((0..=100).contains(&progress));
        assert_eq!(status == "completed", progress == 100, "status {status} at {progress}");
        observed.push(progress);
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }

    assert!(observed.windows(2).all(|w| w[0] <= w[1]), "{observed:?}");
    assert_eq!(observed.first(), Some(&0));
    assert_eq!(observed.last(), Some(&100));
    assert!(observed.contains(&25) && observed.contains(&50) && observed.contains(&75));
}

#[tokio::test(start_paused = true)]
async fn variation_job_produces_three_variations_after_completion() {
    let (app, state) = common::build_test_app();
    let media = seed_media(&state, "drive.mp4").await;
    let job = create_job(app.clone(), "/api/v1/jobs/variations", media.id).await;
    let variations_path = format!("/api/v1/jobs/{}/variations", job["id"]);

    // Before completion there are no results.
    tokio::time::sleep(Duration::from_millis(6500)).await;
    let early = body_json(get(app.clone(), &variations_path).await).await;
    assert_eq!(early["data"], json!([]));

    tokio::time::sleep(FULL_RUN).await;

    let done = body_json(get(app.clone(), &format!("/api/v1/jobs/{}", job["id"])).await).await;
    assert_eq!(done["data"]["status"], "completed");
    assert_eq!(done["data"]["progress"], 100);
    assert_eq!(done["data"]["result"]["variation_count"], 3);

    let variations = body_json(get(app.clone(), &variations_path).await).await;
    let variations = variations["data"].as_array().unwrap();
    assert_eq!(variations.len(), 3);
    assert!(variations.iter().all(|v| v["job_id"] == job["id"]));

    let outputs_path = format!("/api/v1/jobs/{}/outputs", job["id"]);
    assert_eq!(body_json(get(app.clone(), &outputs_path).await).await["data"], json!([]));

    let single = get(app, &format!("/api/v1/variations/{}", variations[0]["id"])).await;
    assert_eq!(single.status(), StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn conversion_job_seven_output_is_named_after_job() {
    let (app, state) = common::build_test_app();
    let media = seed_media(&state, "drive.mp4").await;
    for _ in 0..6 {
        create_job(app.clone(), "/api/v1/jobs/variations", media.id).await;
    }
    let job = create_job(app.clone(), "/api/v1/jobs/conversions", media.id).await;
    assert_eq!(job["id"], 7);

    tokio::time::sleep(FULL_RUN).await;

    let outputs = body_json(get(app.clone(), "/api/v1/jobs/7/outputs").await).await;
    let outputs = outputs["data"].as_array().unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0]["file_name"].as_str().unwrap().contains('7'));

    let output_id = outputs[0]["id"].as_i64().unwrap();
    let single = body_json(get(app, &format!("/api/v1/outputs/{output_id}")).await).await;
    assert_eq!(single["data"]["job_id"], 7);
}

#[tokio::test(start_paused = true)]
async fn job_event_log_records_lifecycle() {
    let (app, state) = common::build_test_app();
    let media = seed_media(&state, "drive.mp4").await;
    let job = create_job(app.clone(), "/api/v1/jobs/conversions", media.id).await;

    tokio::time::sleep(FULL_RUN).await;

    let events = body_json(get(app.clone(), &format!("/api/v1/jobs/{}/events", job["id"])).await).await;
    let types: Vec<_> = events["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        vec![
            "job.created",
            "job.progress",
            "job.progress",
            "job.progress",
            "job.completed"
        ]
    );

    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["active_jobs"], 0);
    assert_eq!(health["records"]["outputs"], 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_variation_and_output_return_404() {
    let (app, _state) = common::build_test_app();

    assert_eq!(get(app.clone(), "/api/v1/variations/1").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(app, "/api/v1/outputs/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn non_numeric_ids_return_json_bad_request() {
    let (app, _state) = common::build_test_app();

    for path in [
        "/api/v1/jobs/abc",
        "/api/v1/jobs/abc/variations",
        "/api/v1/jobs/abc/outputs",
        "/api/v1/jobs/abc/events",
        "/api/v1/variations/abc",
        "/api/v1/outputs/abc",
    ] {
        let response = get(app.clone(), path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST", "{path}");
        assert!(body["error"].is_string(), "{path}");
    }
}
