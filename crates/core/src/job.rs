//! Job kinds, statuses and the fixed progress schedules that drive them.
//!
//! A job walks its kind's checkpoint sequence in order. Every checkpoint
//! except the last leaves the job `processing`; the last one completes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Progress checkpoints for variation-generation jobs.
pub const VARIATION_CHECKPOINTS: [i16; 4] = [25, 50, 75, 100];

/// Progress checkpoints for dataset-conversion jobs.
pub const CONVERSION_CHECKPOINTS: [i16; 4] = [30, 60, 90, 100];

/// Number of variation records produced by one completed variation job.
pub const VARIATIONS_PER_JOB: usize = 3;

/// Number of dataset outputs produced by one completed conversion job.
pub const OUTPUTS_PER_JOB: usize = 1;

/// Lowest valid progress value.
pub const PROGRESS_MIN: i16 = 0;

/// Progress value of a finished job.
pub const PROGRESS_MAX: i16 = 100;

// ---------------------------------------------------------------------------
// JobKind
// ---------------------------------------------------------------------------

/// The two kinds of simulated processing work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Synthetic variation generation from a source video.
    VariationGeneration,
    /// Conversion of a source video into a domain-specific dataset.
    DatasetConversion,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::VariationGeneration => "variation_generation",
            JobKind::DatasetConversion => "dataset_conversion",
        }
    }

    /// Ordered progress checkpoints for this kind. The last entry is always
    /// [`PROGRESS_MAX`].
    pub fn checkpoints(self) -> &'static [i16] {
        match self {
            JobKind::VariationGeneration => &VARIATION_CHECKPOINTS,
            JobKind::DatasetConversion => &CONVERSION_CHECKPOINTS,
        }
    }

    /// Number of result records a completed job of this kind owns.
    pub fn result_count(self) -> usize {
        match self {
            JobKind::VariationGeneration => VARIATIONS_PER_JOB,
            JobKind::DatasetConversion => OUTPUTS_PER_JOB,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "variation_generation" => Ok(JobKind::VariationGeneration),
            "dataset_conversion" => Ok(JobKind::DatasetConversion),
            other => Err(CoreError::Validation(format!(
                "Unknown job kind '{other}'. Expected variation_generation or dataset_conversion"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Completed and failed jobs never change status again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Whether a job in `self` may be written with status `next`.
    ///
    /// The lifecycle is `pending -> processing -> completed | failed`.
    /// A processing job may be re-written as processing across
    /// intermediate checkpoints.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Processing)
                | (
                    JobStatus::Processing,
                    JobStatus::Processing | JobStatus::Completed | JobStatus::Failed
                )
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Checkpoints
// ---------------------------------------------------------------------------

/// A single step of a job's progress schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub progress: i16,
    pub status: JobStatus,
}

impl Checkpoint {
    pub fn is_final(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

/// Build the full checkpoint schedule for a job kind.
pub fn checkpoint_schedule(kind: JobKind) -> Vec<Checkpoint> {
    let points = kind.checkpoints();
    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(i, &progress)| Checkpoint {
            progress,
            status: if i == last {
                JobStatus::Completed
            } else {
                JobStatus::Processing
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a progress write against the current value.
///
/// Progress must stay within `0..=100` and never decrease.
pub fn validate_progress(current: i16, next: i16) -> Result<(), CoreError> {
    if !(PROGRESS_MIN..=PROGRESS_MAX).contains(&next) {
        return Err(CoreError::Validation(format!(
            "Progress must be between {PROGRESS_MIN} and {PROGRESS_MAX}, got {next}"
        )));
    }
    if next < current {
        return Err(CoreError::Conflict(format!(
            "Progress cannot decrease from {current} to {next}"
        )));
    }
    Ok(())
}

/// Validate a status write against the current status.
pub fn validate_transition(current: JobStatus, next: JobStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Invalid job status transition from {current} to {next}"
        )))
    }
}

/// Job parameters are opaque but must be a JSON object.
pub fn validate_parameters(parameters: &serde_json::Value) -> Result<(), validator::ValidationError> {
    if parameters.is_object() {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("not_an_object");
        err.message = Some("parameters must be a JSON object".into());
        Err(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
