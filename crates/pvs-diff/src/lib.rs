//! Snapshot comparison for the Project Version Store.
//!
//! Compares two archived snapshot directories file by file and classifies
//! every path as added, deleted, or modified. No hunks are produced; for
//! modified files only the change magnitude is reported (signed line-count
//! delta and absolute character-count delta).
//!
//! Files are treated as UTF-8 text. Content that does not decode is
//! reported as [`DiffError::Encoding`] rather than compared bytewise.

pub mod error;
pub mod snapshot;

pub use error::{DiffError, DiffResult};
pub use snapshot::{diff_dirs, ChangeStats, SnapshotDiff};
