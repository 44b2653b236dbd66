//! Atomic read/write of the per-project `metadata.json` document.

use std::fs;
use std::path::Path;

use pvs_types::ProjectMetadata;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Load a project's metadata document.
///
/// Returns [`StoreError::MetadataMissing`] when the file does not exist,
/// which callers use to distinguish "not a project" from real I/O failures.
pub fn load_metadata(path: &Path) -> StoreResult<ProjectMetadata> {
    if !path.is_file() {
        return Err(StoreError::MetadataMissing {
            path: path.to_path_buf(),
        });
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Persist a project's metadata document.
///
/// The document is written to a sibling temp file and renamed into place, so
/// a crash mid-write never leaves a torn `metadata.json`.
pub fn save_metadata(path: &Path, metadata: &ProjectMetadata) -> StoreResult<()> {
    let data = serde_json::to_string_pretty(metadata)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), versions = metadata.versions.len(), "metadata saved");
    Ok(())
}
