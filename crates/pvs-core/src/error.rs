//! Error types for version store operations.

use pvs_diff::DiffError;
use pvs_store::StoreError;
use pvs_types::TypeError;
use thiserror::Error;

/// Errors that can occur during version store operations.
///
/// Every public operation returns a structured error the caller can branch
/// on; nothing in the core panics on a failure path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A project with this name already exists.
    #[error("project already exists: {name}")]
    AlreadyExists { name: String },

    /// The named project does not exist.
    #[error("project not found: {name}")]
    ProjectNotFound { name: String },

    /// The referenced version archive does not exist.
    #[error("version not found: {project}/{tag}")]
    VersionNotFound { project: String, tag: String },

    /// A version with this tag is already archived. Overwriting is
    /// destructive and requires the explicit opt-in flag.
    #[error("version already exists: {project}/{tag} (pass overwrite to replace)")]
    VersionExists { project: String, tag: String },

    /// Invalid project name or file path.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Snapshot comparison failure.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// Any other filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for version store operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
