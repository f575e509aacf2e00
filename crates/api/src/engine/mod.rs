//! Job execution engine.
//!
//! Contains the lifecycle driver that advances simulated jobs through their
//! progress checkpoints and stores their placeholder results.

pub mod driver;

pub use driver::{DriverTiming, JobDriver};
