//! Job lifecycle driver.
//!
//! Each created job gets one driver task. After an initial delay the task
//! walks the job kind's checkpoint schedule, waiting a fixed interval
//! between checkpoints. Intermediate checkpoints write `processing` and the
//! checkpoint's progress; the final checkpoint stores the placeholder
//! result records and completes the job in a single datastore write.
//!
//! The driver is the only writer of a job after creation. It never cancels,
//! pauses or retries; a job only fails if the datastore rejects a write.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use synthpipe_core::job::{checkpoint_schedule, Checkpoint, JobKind};
use synthpipe_core::job_events::{EVENT_JOB_COMPLETED, EVENT_JOB_FAILED, EVENT_JOB_PROGRESS};
use synthpipe_core::types::DbId;
use synthpipe_db::models::job::{Job, JobArtifacts, JobUpdate};
use synthpipe_db::repositories::JobRepo;
use synthpipe_db::{DbError, DbPool};
use synthpipe_events::{EventBus, PipelineEvent};
use tokio_util::task::TaskTracker;

/// Delays applied by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTiming {
    /// Wait between job creation and the first checkpoint.
    pub initial_delay: Duration,
    /// Wait between successive checkpoints.
    pub step_interval: Duration,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            step_interval: Duration::from_secs(2),
        }
    }
}

impl DriverTiming {
    /// Time from creation until the job completes.
    pub fn total_duration(&self, kind: JobKind) -> Duration {
        let steps = kind.checkpoints().len().saturating_sub(1) as u32;
        self.initial_delay + self.step_interval * steps
    }
}

/// Spawns and tracks driver tasks.
pub struct JobDriver {
    pool: DbPool,
    event_bus: Arc<EventBus>,
    timing: DriverTiming,
    tracker: TaskTracker,
}

impl JobDriver {
    pub fn new(pool: DbPool, event_bus: Arc<EventBus>, timing: DriverTiming) -> Self {
        Self {
            pool,
            event_bus,
            timing,
            tracker: TaskTracker::new(),
        }
    }

    pub fn timing(&self) -> DriverTiming {
        self.timing
    }

    /// Start advancing `job` in the background. Returns immediately.
    pub fn spawn(&self, job: &Job) {
        let pool = self.pool.clone();
        let event_bus = Arc::clone(&self.event_bus);
        let timing = self.timing;
        let (job_id, kind) = (job.id, job.kind);

        self.tracker
            .spawn(async move { run_job(pool, event_bus, timing, job_id, kind).await });
        tracing::debug!(job_id, kind = %kind, "Job driver spawned");
    }

    /// Number of driver tasks still running.
    pub fn active_jobs(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `timeout` for running jobs to finish.
    ///
    /// Returns `true` if every job finished in time.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok()
    }
}

/// Drive a single job from `pending` to its terminal state.
pub async fn run_job(
    pool: DbPool,
    event_bus: Arc<EventBus>,
    timing: DriverTiming,
    job_id: DbId,
    kind: JobKind,
) {
    tokio::time::sleep(timing.initial_delay).await;

    for (i, checkpoint) in checkpoint_schedule(kind).into_iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(timing.step_interval).await;
        }

        match apply_checkpoint(&pool, job_id, kind, checkpoint).await {
            Ok(Some(job)) => publish_checkpoint(&event_bus, &job),
            Ok(None) => {
                tracing::warn!(job_id, "Job disappeared from the store, driver stopping");
                return;
            }
            Err(e) => {
                tracing::error!(job_id, error = %e, "Checkpoint write rejected, failing job");
                fail_job(&pool, &event_bus, job_id, &e).await;
                return;
            }
        }
    }
}

async fn apply_checkpoint(
    pool: &DbPool,
    job_id: DbId,
    kind: JobKind,
    checkpoint: Checkpoint,
) -> Result<Option<Job>, DbError> {
    if checkpoint.is_final() {
        JobRepo::complete(pool, job_id, JobArtifacts::for_job(kind, job_id)).await
    } else {
        JobRepo::update(
            pool,
            job_id,
            JobUpdate::progress(checkpoint.status, checkpoint.progress),
        )
        .await
    }
}

fn publish_checkpoint(event_bus: &EventBus, job: &Job) {
    if job.status.is_terminal() {
        tracing::info!(job_id = job.id, kind = %job.kind, "Job completed");
        event_bus.publish(
            PipelineEvent::new(EVENT_JOB_COMPLETED)
                .for_job(job.id)
                .with_payload(json!({
                    "kind": job.kind,
                    "progress": job.progress,
                    "result": job.result,
                })),
        );
    } else {
        tracing::debug!(job_id = job.id, progress = job.progress, "Job progressed");
        event_bus.publish(
            PipelineEvent::new(EVENT_JOB_PROGRESS)
                .for_job(job.id)
                .with_payload(json!({
                    "status": job.status,
                    "progress": job.progress,
                })),
        );
    }
}

async fn fail_job(pool: &DbPool, event_bus: &EventBus, job_id: DbId, cause: &DbError) {
    match JobRepo::fail(pool, job_id, cause.to_string()).await {
        Ok(Some(_)) => {
            event_bus.publish(
                PipelineEvent::new(EVENT_JOB_FAILED)
                    .for_job(job_id)
                    .with_payload(json!({ "error": cause.to_string() })),
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(job_id, error = %e, "Could not mark job failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
