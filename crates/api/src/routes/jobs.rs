//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                -> list_jobs
/// POST   /variations      -> create_variation_job
/// POST   /conversions     -> create_conversion_job
/// GET    /{id}            -> get_job
/// GET    /{id}/variations -> list_job_variations
/// GET    /{id}/outputs    -> list_job_outputs
/// GET    /{id}/events     -> list_job_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs))
        .route("/variations", post(jobs::create_variation_job))
        .route("/conversions", post(jobs::create_conversion_job))
        .route("/{id}", get(jobs::get_job))
        .route("/{id}/variations", get(jobs::list_job_variations))
        .route("/{id}/outputs", get(jobs::list_job_outputs))
        .route("/{id}/events", get(jobs::list_job_events))
}
