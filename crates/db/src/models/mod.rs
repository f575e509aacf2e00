pub mod event;
pub mod job;
pub mod media;
pub mod output;
pub mod variation;
