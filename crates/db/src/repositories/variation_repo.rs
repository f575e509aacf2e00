//! Repository for the append-only `variations` table.
//!
//! Rows are only ever inserted by [`JobRepo::complete`](super::JobRepo::complete).

use synthpipe_core::synthesis::PlaceholderVariation;
use synthpipe_core::types::{DbId, Timestamp};

use crate::models::variation::Variation;
use crate::store::Table;
use crate::DbPool;

pub struct VariationRepo;

impl VariationRepo {
    pub(crate) fn insert_in(
        table: &mut Table<Variation>,
        job_id: DbId,
        record: PlaceholderVariation,
        now: Timestamp,
    ) -> DbId {
        table
            .insert_with(|id| Variation {
                id,
                job_id,
                name: record.name,
                file_name: record.file_name,
                style: record.style,
                size_bytes: record.size_bytes,
                duration_secs: record.duration_secs,
                created_at: now,
            })
            .id
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Variation> {
        pool.read().await.variations.get(id).cloned()
    }

    /// Variations owned by `job_id`; empty until the job completes.
    pub async fn list_by_job(pool: &DbPool, job_id: DbId) -> Vec<Variation> {
        pool.read()
            .await
            .variations
            .iter()
            .filter(|v| v.job_id == job_id)
            .cloned()
            .collect()
    }
}
