//! Synthpipe event bus and event log.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PipelineEvent`]: the event envelope for media and job lifecycle.
//! - [`EventPersistence`]: background service that appends every event to
//!   the datastore's event log.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PipelineEvent};
pub use persistence::EventPersistence;
