//! Persisted pipeline events.

use serde::Serialize;
use synthpipe_core::types::{DbId, Timestamp};

/// A row from the append-only `events` log.
#[derive(Debug, Clone, Serialize)]
pub struct StoredEvent {
    pub id: DbId,
    pub event_type: String,
    pub job_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// Input for appending an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub event_type: String,
    pub job_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
