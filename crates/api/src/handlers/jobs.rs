//! Handlers for the `/jobs` resource.
//!
//! Creating a job returns immediately with the `pending` record; the job
//! driver advances it in the background. Reads never mutate job state.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use synthpipe_core::error::CoreError;
use synthpipe_core::job::JobKind;
use synthpipe_core::job_events::EVENT_JOB_CREATED;
use synthpipe_core::types::DbId;
use synthpipe_db::models::job::{CreateJob, Job, JobListQuery, SubmitJob};
use synthpipe_db::repositories::{EventRepo, JobRepo, MediaRepo, OutputRepo, VariationRepo};
use synthpipe_events::PipelineEvent;

use crate::error::{AppError, AppResult};
use crate::extract::{Path, ValidatedJson};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a job by ID or fail with `NotFound`.
pub(crate) async fn find_job(state: &AppState, job_id: DbId) -> AppResult<Job> {
    JobRepo::find_by_id(&state.pool, job_id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        }))
}

/// Create a job of `kind` for an existing media file and start its driver.
async fn submit(state: &AppState, kind: JobKind, input: SubmitJob) -> AppResult<Job> {
    if !MediaRepo::exists(&state.pool, input.media_id).await {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Media",
            id: input.media_id,
        }));
    }

    let job = JobRepo::create(
        &state.pool,
        CreateJob {
            kind,
            media_id: input.media_id,
            parameters: input.parameters,
        },
    )
    .await;

    state.event_bus.publish(
        PipelineEvent::new(EVENT_JOB_CREATED)
            .for_job(job.id)
            .with_payload(json!({ "kind": job.kind, "media_id": job.media_id })),
    );
    state.driver.spawn(&job);

    tracing::info!(
        job_id = job.id,
        kind = %job.kind,
        media_id = job.media_id,
        expected_ms = state.driver.timing().total_duration(kind).as_millis() as u64,
        "Job created",
    );

    Ok(job)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/variations
///
/// Start synthetic variation generation for a media file. Returns 201 with
/// the pending job.
pub async fn create_variation_job(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SubmitJob>,
) -> AppResult<impl IntoResponse> {
    let job = submit(&state, JobKind::VariationGeneration, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// POST /api/v1/jobs/conversions
///
/// Start dataset conversion for a media file. Returns 201 with the pending
/// job.
pub async fn create_conversion_job(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SubmitJob>,
) -> AppResult<impl IntoResponse> {
    let job = submit(&state, JobKind::DatasetConversion, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List all jobs in creation order, optionally filtered by `?media_id=`.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list(&state.pool, &params).await;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = find_job(&state, job_id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/jobs/{id}/variations
///
/// Variations produced by a job. Empty until the job completes.
pub async fn list_job_variations(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_job(&state, job_id).await?;
    let variations = VariationRepo::list_by_job(&state.pool, job_id).await;
    Ok(Json(DataResponse { data: variations }))
}

/// GET /api/v1/jobs/{id}/outputs
///
/// Dataset outputs produced by a job. Empty until the job completes.
pub async fn list_job_outputs(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_job(&state, job_id).await?;
    let outputs = OutputRepo::list_by_job(&state.pool, job_id).await;
    Ok(Json(DataResponse { data: outputs }))
}

/// GET /api/v1/jobs/{id}/events
///
/// Lifecycle events recorded for a job, oldest first.
pub async fn list_job_events(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_job(&state, job_id).await?;
    let events = EventRepo::list_by_job(&state.pool, job_id).await;
    Ok(Json(DataResponse { data: events }))
}
