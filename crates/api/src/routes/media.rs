//! Route definitions for the `/media` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /                -> list_media
/// POST   /                -> upload_media
/// GET    /{id}            -> get_media
/// GET    /{id}/jobs       -> list_media_jobs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::upload_media))
        .route("/{id}", get(media::get_media))
        .route("/{id}/jobs", get(media::list_media_jobs))
}
