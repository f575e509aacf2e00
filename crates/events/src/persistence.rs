//! Event log writer.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends every received [`PipelineEvent`] to the `events` table. It
//! runs as a long-lived background task and stops once the bus is dropped.

use synthpipe_core::types::DbId;
use synthpipe_db::models::event::NewEvent;
use synthpipe_db::repositories::EventRepo;
use synthpipe_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::PipelineEvent;

pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PipelineEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let event_id = Self::persist(&pool, event).await;
                    tracing::trace!(event_id, "Event persisted");
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    async fn persist(pool: &DbPool, event: PipelineEvent) -> DbId {
        EventRepo::append(
            pool,
            NewEvent {
                event_type: event.event_type,
                job_id: event.job_id,
                payload: event.payload,
                created_at: event.timestamp,
            },
        )
        .await
        .id
    }
}
