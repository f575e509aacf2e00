//! Repository structs, one per table.
//!
//! Each repository is a unit struct with associated async functions taking
//! the shared [`DbPool`](crate::DbPool).

mod event_repo;
mod job_repo;
mod media_repo;
mod output_repo;
mod variation_repo;

pub use event_repo::EventRepo;
pub use job_repo::JobRepo;
pub use media_repo::MediaRepo;
pub use output_repo::OutputRepo;
pub use variation_repo::VariationRepo;
