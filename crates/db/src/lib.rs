//! In-memory mock datastore for the synthpipe pipeline.
//!
//! Each table is an arena: a growable vector of rows plus a monotonic id
//! counter. Rows are never removed, so a row's id is its position plus one.
//! All tables sit behind a single `RwLock`, which serializes every write.

pub mod error;
pub mod models;
pub mod repositories;
mod store;

use std::sync::Arc;

pub use error::DbError;
pub use store::{Store, TableCounts};

/// Shared handle to the datastore, cloned into every handler and task.
pub type DbPool = Arc<Store>;

/// Create an empty datastore.
pub fn create_pool() -> DbPool {
    Arc::new(Store::default())
}
