pub mod health;
pub mod jobs;
pub mod media;

use axum::routing::get;
use axum::Router;

use crate::handlers::results;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /media                       list, upload
/// /media/{id}                  get
/// /media/{id}/jobs             jobs created for this media
///
/// /jobs                        list (optional ?media_id=)
/// /jobs/variations             create variation-generation job
/// /jobs/conversions            create dataset-conversion job
/// /jobs/{id}                   get
/// /jobs/{id}/variations        variations of a job
/// /jobs/{id}/outputs           dataset outputs of a job
/// /jobs/{id}/events            lifecycle event log of a job
///
/// /variations/{id}             get variation
/// /outputs/{id}                get output
/// /events                      full event log
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/media", media::router())
        .nest("/jobs", jobs::router())
        .route("/variations/{id}", get(results::get_variation))
        .route("/outputs/{id}", get(results::get_output))
        .route("/events", get(results::list_events))
}
