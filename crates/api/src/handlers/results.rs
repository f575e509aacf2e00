//! Handlers for individual result records and the global event log.
//!
//! Result records are immutable once the job driver has stored them.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use synthpipe_core::error::CoreError;
use synthpipe_core::types::DbId;
use synthpipe_db::repositories::{EventRepo, OutputRepo, VariationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/variations/{id}
pub async fn get_variation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let variation = VariationRepo::find_by_id(&state.pool, id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Variation",
            id,
        }))?;
    Ok(Json(DataResponse { data: variation }))
}

/// GET /api/v1/outputs/{id}
pub async fn get_output(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let output = OutputRepo::find_by_id(&state.pool, id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Output",
            id,
        }))?;
    Ok(Json(DataResponse { data: output }))
}

/// GET /api/v1/events
pub async fn list_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_all(&state.pool).await;
    Ok(Json(DataResponse { data: events }))
}
