use serde::Serialize;
use synthpipe_core::types::{DbId, Timestamp};

/// A converted dataset artifact owned by a completed conversion job.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    pub id: DbId,
    pub job_id: DbId,
    pub name: String,
    pub file_name: String,
    pub format: String,
    pub size_bytes: i64,
    pub frame_count: i64,
    pub annotation_count: i64,
    pub created_at: Timestamp,
}
