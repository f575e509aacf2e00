//! Uploaded source media.

use serde::Serialize;
use synthpipe_core::types::{DbId, Timestamp};

/// A row from the `media` table.
#[derive(Debug, Clone, Serialize)]
pub struct Media {
    pub id: DbId,
    pub original_filename: String,
    pub stored_path: String,
    pub extension: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// Input for registering an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub original_filename: String,
    pub stored_path: String,
    pub extension: String,
    pub size_bytes: i64,
}
