//! Handlers for the `/media` resource (pipeline upload stage).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use synthpipe_core::error::CoreError;
use synthpipe_core::job_events::EVENT_MEDIA_UPLOADED;
use synthpipe_core::media::validate_upload;
use synthpipe_core::types::DbId;
use synthpipe_db::models::media::{CreateMedia, Media};
use synthpipe_db::repositories::{JobRepo, MediaRepo};
use synthpipe_events::PipelineEvent;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_media(state: &AppState, media_id: DbId) -> AppResult<Media> {
    MediaRepo::find_by_id(&state.pool, media_id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Media",
            id: media_id,
        }))
}

/// POST /api/v1/media
///
/// Upload a source video as multipart form data with a `file` field.
/// The file is validated, written under the configured upload directory and
/// registered. Returns 201 with the media record.
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("The 'file' field must carry a file name".into()))?;
        let data = field.bytes().await?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let size_bytes = data.len() as u64;
    let ext = validate_upload(&filename, size_bytes, state.config.max_upload_bytes)?;

    let storage_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(storage_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_filename = format!(
        "media_{}_{}.{ext}",
        chrono::Utc::now().timestamp(),
        uuid::Uuid::new_v4().simple()
    );
    let file_path = storage_dir.join(&stored_filename);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let media = MediaRepo::create(
        &state.pool,
        CreateMedia {
            original_filename: filename,
            stored_path: file_path.to_string_lossy().to_string(),
            extension: ext,
            size_bytes: size_bytes as i64,
        },
    )
    .await;

    state.event_bus.publish(PipelineEvent::new(EVENT_MEDIA_UPLOADED).with_payload(json!({
        "media_id": media.id,
        "size_bytes": media.size_bytes,
    })));

    tracing::info!(
        media_id = media.id,
        size_bytes = media.size_bytes,
        path = %media.stored_path,
        "Media uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: media })))
}

/// GET /api/v1/media
pub async fn list_media(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::list_all(&state.pool).await;
    Ok(Json(DataResponse { data: media }))
}

/// GET /api/v1/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = find_media(&state, media_id).await?;
    Ok(Json(DataResponse { data: media }))
}

/// GET /api/v1/media/{id}/jobs
///
/// Every job created for this media file, in creation order.
pub async fn list_media_jobs(
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_media(&state, media_id).await?;
    let jobs = JobRepo::list_by_media(&state.pool, media_id).await;
    Ok(Json(DataResponse { data: jobs }))
}
