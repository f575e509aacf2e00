//! Event type names published on the pipeline event bus.
//!
//! Used by the job driver and the upload handler when publishing, and by
//! clients reading a job's event log.

/// A media file was uploaded and registered.
pub const EVENT_MEDIA_UPLOADED: &str = "media.uploaded";

/// A job was created in `pending` status.
pub const EVENT_JOB_CREATED: &str = "job.created";

/// A job reached an intermediate checkpoint.
pub const EVENT_JOB_PROGRESS: &str = "job.progress";

/// A job reached its final checkpoint and its results were stored.
pub const EVENT_JOB_COMPLETED: &str = "job.completed";

/// A job was marked failed.
pub const EVENT_JOB_FAILED: &str = "job.failed";
