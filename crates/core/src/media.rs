//! Upload validation for source media (the first pipeline stage).

use crate::error::CoreError;

/// Accepted video container extensions (lowercase).
pub const SUPPORTED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi", "mkv"];

/// Default upper bound for a single upload: 500 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Maximum length of an uploaded file name.
const MAX_FILENAME_LEN: usize = 255;

/// Extract the lowercase extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Validate an uploaded file and return its normalized extension.
///
/// Rules:
/// - The name must not be empty and must not exceed `MAX_FILENAME_LEN`.
/// - The extension must be one of [`SUPPORTED_VIDEO_EXTENSIONS`].
/// - The file must not be empty or larger than `max_bytes`.
pub fn validate_upload(filename: &str, size_bytes: u64, max_bytes: u64) -> Result<String, CoreError> {
    if filename.trim().is_empty() {
        return Err(CoreError::Validation("File name must not be empty".into()));
    }
    if filename.len() > MAX_FILENAME_LEN {
        return Err(CoreError::Validation(format!(
            "File name must not exceed {MAX_FILENAME_LEN} characters"
        )));
    }

    let ext = file_extension(filename).unwrap_or_default();
    if !SUPPORTED_VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported video format '.{ext}'. Supported: {}",
            SUPPORTED_VIDEO_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    if size_bytes == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {size_bytes} bytes, exceeding the limit of {max_bytes} bytes"
        )));
    }

    Ok(ext)
}
