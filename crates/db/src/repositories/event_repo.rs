//! Repository for the append-only `events` log.

use synthpipe_core::types::DbId;

use crate::models::event::{NewEvent, StoredEvent};
use crate::DbPool;

pub struct EventRepo;

impl EventRepo {
    pub async fn append(pool: &DbPool, input: NewEvent) -> StoredEvent {
        let mut tables = pool.write().await;
        tables
            .events
            .insert_with(|id| StoredEvent {
                id,
                event_type: input.event_type,
                job_id: input.job_id,
                payload: input.payload,
                created_at: input.created_at,
            })
            .clone()
    }

    /// Events recorded for `job_id`, oldest first.
    pub async fn list_by_job(pool: &DbPool, job_id: DbId) -> Vec<StoredEvent> {
        pool.read()
            .await
            .events
            .iter()
            .filter(|e| e.job_id == Some(job_id))
            .cloned()
            .collect()
    }

    pub async fn list_all(pool: &DbPool) -> Vec<StoredEvent> {
        pool.read().await.events.iter().cloned().collect()
    }
}
