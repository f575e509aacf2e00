use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::JobDriver;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// In-memory datastore.
    pub pool: synthpipe_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Event bus for media and job lifecycle events.
    pub event_bus: Arc<synthpipe_events::EventBus>,
    /// Spawns the background task that advances each created job.
    pub driver: Arc<JobDriver>,
}

impl AppState {
    /// Wire up state around an existing datastore and event bus.
    pub fn new(
        pool: synthpipe_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<synthpipe_events::EventBus>,
    ) -> Self {
        let driver = Arc::new(JobDriver::new(
            pool.clone(),
            Arc::clone(&event_bus),
            config.driver,
        ));
        Self {
            pool,
            config: Arc::new(config),
            event_bus,
            driver,
        }
    }
}
