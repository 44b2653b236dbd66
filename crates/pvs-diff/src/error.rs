//! Error types for snapshot comparison.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while comparing snapshots.
#[derive(Debug, Error)]
pub enum DiffError {
    /// One of the snapshot directories to compare does not exist.
    #[error("snapshot directory not found: {path}")]
    SnapshotMissing { path: PathBuf },

    /// A file was not valid UTF-8. Snapshots hold text; binary content is
    /// outside the comparison contract.
    #[error("file is not valid UTF-8 text: {path}")]
    Encoding { path: PathBuf },

    /// Failure while enumerating a snapshot's files.
    #[error(transparent)]
    Store(#[from] pvs_store::StoreError),

    /// Any underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}


/// Convenience type alias for diff operations.
pub type DiffResult<T> = std::result::Result<T, DiffError>;
