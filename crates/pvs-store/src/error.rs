//! Error types for persistence operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing project state on disk.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The expected metadata document does not exist.
    #[error("metadata document not found: {path}")]
    MetadataMissing { path: PathBuf },

    /// The metadata document exists but could not be parsed or encoded.
    #[error("metadata serialization error: {0}")]
    Serialization(String),

    /// Any underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for persistence operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
