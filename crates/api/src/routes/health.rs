use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use synthpipe_db::TableCounts;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    active_jobs: usize,
    records: TableCounts,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        active_jobs: state.driver.active_jobs(),
        records: state.pool.row_counts().await,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
