//! Deterministic placeholder results for simulated jobs.
//!
//! Nothing here inspects media. Every field is a function of the job id
//! alone, so two runs of the same job id always produce identical records.

use serde::Serialize;
use serde_json::json;

use crate::job::{JobKind, OUTPUTS_PER_JOB, VARIATIONS_PER_JOB};
use crate::types::DbId;

/// Styles cycled through by variation jobs, in output order.
const VARIATION_STYLES: [(&str, &str); VARIATIONS_PER_JOB] = [
    ("weather_shift", "Weather shift"),
    ("lighting_change", "Lighting change"),
    ("camera_angle", "Camera angle"),
];

/// Base size of a placeholder variation file: 15 MiB.
const VARIATION_BASE_BYTES: i64 = 15 * 1024 * 1024;

/// Size step between successive variations of one job: 1 MiB.
const VARIATION_STEP_BYTES: i64 = 1024 * 1024;

/// Duration reported for every placeholder variation.
const VARIATION_DURATION_SECS: f64 = 30.0;

/// Container format of converted datasets.
pub const DATASET_FORMAT: &str = "coco";

const DATASET_SIZE_BYTES: i64 = 50 * 1024 * 1024;
const DATASET_FRAME_COUNT: i64 = 900;
const DATASET_ANNOTATIONS_PER_FRAME: i64 = 5;

/// Placeholder data for one generated variation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderVariation {
    pub name: String,
    pub file_name: String,
    pub style: String,
    pub size_bytes: i64,
    pub duration_secs: f64,
}

/// Placeholder data for one converted dataset artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderOutput {
    pub name: String,
    pub file_name: String,
    pub format: String,
    pub size_bytes: i64,
    pub frame_count: i64,
    pub annotation_count: i64,
}

/// Build the variation records for a completed variation job.
pub fn variation_placeholders(job_id: DbId) -> Vec<PlaceholderVariation> {
    VARIATION_STYLES
        .iter()
        .enumerate()
        .map(|(i, (style, label))| {
            let n = i as i64 + 1;
            PlaceholderVariation {
                name: format!("{label} variation {n}"),
                file_name: format!("variation_{job_id}_{n}.mp4"),
                style: (*style).to_string(),
                size_bytes: VARIATION_BASE_BYTES + VARIATION_STEP_BYTES * i as i64,
                duration_secs: VARIATION_DURATION_SECS,
            }
        })
        .collect()
}

/// Build the dataset records for a completed conversion job.
pub fn output_placeholders(job_id: DbId) -> Vec<PlaceholderOutput> {
    (0..OUTPUTS_PER_JOB)
        .map(|_| PlaceholderOutput {
            name: format!("Converted dataset for job {job_id}"),
            file_name: format!("dataset_{job_id}.zip"),
            format: DATASET_FORMAT.to_string(),
            size_bytes: DATASET_SIZE_BYTES,
            frame_count: DATASET_FRAME_COUNT,
            annotation_count: DATASET_FRAME_COUNT * DATASET_ANNOTATIONS_PER_FRAME,
        })
        .collect()
}

/// Result payload stored on a job once its records exist.
pub fn result_payload(kind: JobKind, record_ids: &[DbId]) -> serde_json::Value {
    match kind {
        JobKind::VariationGeneration => json!({
            "variation_count": record_ids.len(),
            "variation_ids": record_ids,
        }),
        JobKind::DatasetConversion => json!({
            "output_count": record_ids.len(),
            "output_ids": record_ids,
            "format": DATASET_FORMAT,
        }),
    }
}
