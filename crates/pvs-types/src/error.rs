use thiserror::Error;

/// Errors produced by type-level validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project name: {name}: {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid file path: {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid version tag: {tag}: {reason}")]
    InvalidTag { tag: String, reason: String },
}

/// Convenience type alias for validation operations.
pub type Result<T> = std::result::Result<T, TypeError>;
