//! Domain logic for the synthpipe media pipeline.
//!
//! Pure functions, constants and types shared by the datastore, the event
//! bus and the API. Nothing in this crate performs I/O.

pub mod error;
pub mod job;
pub mod job_events;
pub mod media;
pub mod synthesis;
pub mod types;
