//! Job entity models and DTOs for the simulated processing pipeline.

use serde::{Deserialize, Serialize};
use synthpipe_core::job::{validate_parameters, JobKind, JobStatus};
use synthpipe_core::synthesis::{
    output_placeholders, variation_placeholders, PlaceholderOutput, PlaceholderVariation,
};
use synthpipe_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `jobs` table.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: DbId,
    pub media_id: DbId,
    pub kind: JobKind,
    pub status: JobStatus,
    pub progress: i16,
    pub parameters: serde_json::Value,
    pub result: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /api/v1/jobs/variations` and `POST /api/v1/jobs/conversions`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitJob {
    #[validate(range(min = 1, message = "media_id must be a positive id"))]
    pub media_id: DbId,
    #[serde(default = "empty_parameters")]
    #[validate(custom(function = "validate_parameters"))]
    pub parameters: serde_json::Value,
}

fn empty_parameters() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// Input for creating a job row.
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub kind: JobKind,
    pub media_id: DbId,
    pub parameters: serde_json::Value,
}

/// Query parameters for `GET /api/v1/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    /// Only return jobs whose parent is this media id.
    pub media_id: Option<DbId>,
}

/// A partial job write. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub progress: Option<i16>,
    pub result: Option<serde_json::Value>,
    pub error_message: Option<String>,
}

impl JobUpdate {
    /// Advance to an intermediate checkpoint.
    pub fn progress(status: JobStatus, progress: i16) -> Self {
        Self {
            status: Some(status),
            progress: Some(progress),
            ..Self::default()
        }
    }

    /// Mark the job failed with a reason.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(JobStatus::Failed),
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Result records produced by a finished job, inserted alongside its
/// completion.
#[derive(Debug, Clone)]
pub enum JobArtifacts {
    Variations(Vec<PlaceholderVariation>),
    Outputs(Vec<PlaceholderOutput>),
}

impl JobArtifacts {
    /// Synthesize the placeholder records for a job of `kind`.
    pub fn for_job(kind: JobKind, job_id: DbId) -> Self {
        match kind {
            JobKind::VariationGeneration => Self::Variations(variation_placeholders(job_id)),
            JobKind::DatasetConversion => Self::Outputs(output_placeholders(job_id)),
        }
    }

    /// The job kind these artifacts belong to.
    pub fn kind(&self) -> JobKind {
        match self {
            Self::Variations(_) => JobKind::VariationGeneration,
            Self::Outputs(_) => JobKind::DatasetConversion,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Variations(v) => v.len(),
            Self::Outputs(o) => o.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
