use serde::Serialize;
use synthpipe_core::types::{DbId, Timestamp};

/// A generated variation owned by a completed variation job.
#[derive(Debug, Clone, Serialize)]
pub struct Variation {
    pub id: DbId,
    pub job_id: DbId,
    pub name: String,
    pub file_name: String,
    pub style: String,
    pub size_bytes: i64,
    pub duration_secs: f64,
    pub created_at: Timestamp,
}
