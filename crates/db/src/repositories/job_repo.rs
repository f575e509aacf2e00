//! Repository for the `jobs` table.
//!
//! Every write is checked against the job invariants before anything is
//! mutated: progress stays in `0..=100` and never decreases, status follows
//! `pending -> processing -> completed | failed`, a job is `completed`
//! exactly when its progress is 100, and the result payload is written
//! once, together with the completion.

use chrono::Utc;
use synthpipe_core::job::{validate_progress, validate_transition, JobStatus, PROGRESS_MAX};
use synthpipe_core::synthesis::result_payload;
use synthpipe_core::types::DbId;

use crate::error::DbError;
use crate::models::job::{CreateJob, Job, JobArtifacts, JobListQuery, JobUpdate};
use crate::repositories::{OutputRepo, VariationRepo};
use crate::DbPool;

/// Provides create/read/update operations for jobs. Jobs are never deleted.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job at progress 0.
    pub async fn create(pool: &DbPool, input: CreateJob) -> Job {
        let mut tables = pool.write().await;
        let now = Utc::now();
        tables
            .jobs
            .insert_with(|id| Job {
                id,
                media_id: input.media_id,
                kind: input.kind,
                status: JobStatus::Pending,
                progress: 0,
                parameters: input.parameters,
                result: None,
                error_message: None,
                created_at: now,
                updated_at: now,
            })
            .clone()
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Job> {
        pool.read().await.jobs.get(id).cloned()
    }

    /// All jobs in creation order.
    pub async fn list_all(pool: &DbPool) -> Vec<Job> {
        pool.read().await.jobs.iter().cloned().collect()
    }

    /// Jobs whose parent is `media_id`, in creation order.
    pub async fn list_by_media(pool: &DbPool, media_id: DbId) -> Vec<Job> {
        pool.read()
            .await
            .jobs
            .iter()
            .filter(|job| job.media_id == media_id)
            .cloned()
            .collect()
    }

    /// List jobs, optionally filtered by parent media.
    pub async fn list(pool: &DbPool, params: &JobListQuery) -> Vec<Job> {
        match params.media_id {
            Some(media_id) => Self::list_by_media(pool, media_id).await,
            None => Self::list_all(pool).await,
        }
    }

    /// Merge `update` into the job and refresh `updated_at`.
    ///
    /// Returns `Ok(None)` when the id is unknown; callers treat that as a
    /// no-op. Rejected writes leave the row untouched.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        update: JobUpdate,
    ) -> Result<Option<Job>, DbError> {
        let mut tables = pool.write().await;
        let Some(job) = tables.jobs.get_mut(id) else {
            tracing::debug!(job_id = id, "Ignoring update for unknown job");
            return Ok(None);
        };
        check_update(job, &update)?;
        merge_update(job, update);
        Ok(Some(job.clone()))
    }

    /// Mark a job failed. Returns `Ok(None)` when the id is unknown.
    pub async fn fail(
        pool: &DbPool,
        id: DbId,
        message: impl Into<String>,
    ) -> Result<Option<Job>, DbError> {
        Self::update(pool, id, JobUpdate::failed(message)).await
    }

    /// Store the job's result records and complete it in one write.
    ///
    /// The records are inserted only if the completion itself is valid, so a
    /// rejected completion leaves no orphaned results behind.
    pub async fn complete(
        pool: &DbPool,
        id: DbId,
        artifacts: JobArtifacts,
    ) -> Result<Option<Job>, DbError> {
        let mut guard = pool.write().await;
        let tables = &mut *guard;

        let Some(job) = tables.jobs.get(id) else {
            tracing::debug!(job_id = id, "Ignoring completion for unknown job");
            return Ok(None);
        };

        if artifacts.kind() != job.kind {
            return Err(DbError::InvariantViolation {
                job_id: id,
                reason: format!(
                    "{} artifacts cannot complete a {} job",
                    artifacts.kind(),
                    job.kind
                ),
            });
        }

        let kind = job.kind;
        let mut completion = JobUpdate {
            status: Some(JobStatus::Completed),
            progress: Some(PROGRESS_MAX),
            result: Some(serde_json::Value::Null),
            error_message: None,
        };
        check_update(job, &completion)?;

        let now = Utc::now();
        let record_ids: Vec<DbId> = match artifacts {
            JobArtifacts::Variations(records) => records
                .into_iter()
                .map(|r| VariationRepo::insert_in(&mut tables.variations, id, r, now))
                .collect(),
            JobArtifacts::Outputs(records) => records
                .into_iter()
                .map(|r| OutputRepo::insert_in(&mut tables.outputs, id, r, now))
                .collect(),
        };
        completion.result = Some(result_payload(kind, &record_ids));

        let Some(job) = tables.jobs.get_mut(id) else {
            return Ok(None);
        };
        merge_update(job, completion);
        Ok(Some(job.clone()))
    }
}

/// Validate `update` against the current row without mutating it.
fn check_update(job: &Job, update: &JobUpdate) -> Result<(), DbError> {
    let reject = |reason: String| DbError::InvariantViolation {
        job_id: job.id,
        reason,
    };

    let next_status = update.status.unwrap_or(job.status);
    let next_progress = update.progress.unwrap_or(job.progress);

    if (update.status.is_some() || update.progress.is_some()) && job.status.is_terminal() {
        return Err(reject(format!("job is already {}", job.status)));
    }
    if let Some(status) = update.status {
        validate_transition(job.status, status).map_err(|e| reject(e.to_string()))?;
    }
    if let Some(progress) = update.progress {
        validate_progress(job.progress, progress).map_err(|e| reject(e.to_string()))?;
    }
    if (next_status == JobStatus::Completed) != (next_progress == PROGRESS_MAX) {
        return Err(reject(format!(
            "status {next_status} is inconsistent with progress {next_progress}"
        )));
    }
    if update.result.is_some() && job.result.is_some() {
        return Err(DbError::ResultAlreadyWritten { job_id: job.id });
    }
    if update.result.is_some() && next_status != JobStatus::Completed {
        return Err(reject(format!(
            "result can only be written on completion, job would be {next_status}"
        )));
    }
    Ok(())
}

fn merge_update(job: &mut Job, update: JobUpdate) {
    if let Some(status) = update.status {
        job.status = status;
    }
    if let Some(progress) = update.progress {
        job.progress = progress;
    }
    if let Some(result) = update.result {
        job.result = Some(result);
    }
    if let Some(message) = update.error_message {
        job.error_message = Some(message);
    }
    job.updated_at = Utc::now();
}
