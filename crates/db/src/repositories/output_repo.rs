//! Repository for the append-only `outputs` table.
//!
//! Rows are only ever inserted by [`JobRepo::complete`](super::JobRepo::complete).

use synthpipe_core::synthesis::PlaceholderOutput;
use synthpipe_core::types::{DbId, Timestamp};

use crate::models::output::Output;
use crate::store::Table;
use crate::DbPool;

pub struct OutputRepo;

impl OutputRepo {
    pub(crate) fn insert_in(
        table: &mut Table<Output>,
        job_id: DbId,
        record: PlaceholderOutput,
        now: Timestamp,
    ) -> DbId {
        table
            .insert_with(|id| Output {
                id,
                job_id,
                name: record.name,
                file_name: record.file_name,
                format: record.format,
                size_bytes: record.size_bytes,
                frame_count: record.frame_count,
                annotation_count: record.annotation_count,
                created_at: now,
            })
            .id
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Output> {
        pool.read().await.outputs.get(id).cloned()
    }

    /// Outputs owned by `job_id`; empty until the job completes.
    pub async fn list_by_job(pool: &DbPool, job_id: DbId) -> Vec<Output> {
        pool.read()
            .await
            .outputs
            .iter()
            .filter(|o| o.job_id == job_id)
            .cloned()
            .collect()
    }
}
