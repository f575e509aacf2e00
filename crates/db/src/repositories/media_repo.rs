//! Repository for the `media` table.

use chrono::Utc;
use synthpipe_core::types::DbId;

use crate::models::media::{CreateMedia, Media};
use crate::DbPool;

pub struct MediaRepo;

impl MediaRepo {
    /// Register an uploaded file.
    pub async fn create(pool: &DbPool, input: CreateMedia) -> Media {
        let mut tables = pool.write().await;
        let now = Utc::now();
        tables
            .media
            .insert_with(|id| Media {
                id,
                original_filename: input.original_filename,
                stored_path: input.stored_path,
                extension: input.extension,
                size_bytes: input.size_bytes,
                created_at: now,
            })
            .clone()
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Media> {
        pool.read().await.media.get(id).cloned()
    }

    pub async fn exists(pool: &DbPool, id: DbId) -> bool {
        pool.read().await.media.get(id).is_some()
    }

    /// All media in upload order.
    pub async fn list_all(pool: &DbPool) -> Vec<Media> {
        pool.read().await.media.iter().cloned().collect()
    }
}
