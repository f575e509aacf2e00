use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use synthpipe_core::types::DbId;

use crate::models::event::StoredEvent;
use crate::models::job::Job;
use crate::models::media::Media;
use crate::models::output::Output;
use crate::models::variation::Variation;

/// Append-only arena table with monotonically assigned ids starting at 1.
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: Vec<T>,
    next_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Reserve an id and append the row built from it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(build(id));
        &self.rows[self.rows.len() - 1]
    }

    pub(crate) fn get(&self, id: DbId) -> Option<&T> {
        Self::index(id).and_then(|i| self.rows.get(i))
    }

    pub(crate) fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        Self::index(id).and_then(|i| self.rows.get_mut(i))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    fn index(id: DbId) -> Option<usize> {
        if id < 1 {
            return None;
        }
        usize::try_from(id - 1).ok()
    }
}

/// Every table of the datastore.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) media: Table<Media>,
    pub(crate) jobs: Table<Job>,
    pub(crate) variations: Table<Variation>,
    pub(crate) outputs: Table<Output>,
    pub(crate) events: Table<StoredEvent>,
}

/// The datastore. Obtain one through [`crate::create_pool`].
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    /// Number of rows per table, for health reporting.
    pub async fn row_counts(&self) -> TableCounts {
        let tables = self.read().await;
        TableCounts {
            media: tables.media.len(),
            jobs: tables.jobs.len(),
            variations: tables.variations.len(),
            outputs: tables.outputs.len(),
            events: tables.events.len(),
        }
    }
}

/// Row counts reported by [`Store::row_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TableCounts {
    pub media: usize,
    pub jobs: usize,
    pub variations: usize,
    pub outputs: usize,
    pub events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut table: Table<DbId> = Table::default();
        assert_eq!(*table.insert_with(|id| id), 1);
        assert_eq!(*table.insert_with(|id| id), 2);
        assert_eq!(table.get(2), Some(&2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn out_of_range_ids_miss() {
        let mut table: Table<DbId> = Table::default();
        table.insert_with(|id| id);
        assert!(table.get(0).is_none());
        assert!(table.get(-5).is_none());
        assert!(table.get(2).is_none());
        assert!(table.get_mut(9).is_none());
    }
}
