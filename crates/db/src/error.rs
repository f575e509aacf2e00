use synthpipe_core::types::DbId;

/// Errors raised when a write would break a record invariant.
///
/// Lookups of unknown ids are not errors; repositories return `None`.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Job {job_id} rejected update: {reason}")]
    InvariantViolation { job_id: DbId, reason: String },

    #[error("Job {job_id} result has already been written")]
    ResultAlreadyWritten { job_id: DbId },
}
