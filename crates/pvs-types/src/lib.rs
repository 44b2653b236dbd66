//! Foundation types for the Project Version Store (PVS).
//!
//! This crate provides the data model shared by every other PVS crate: the
//! per-project metadata document, the append-only version ledger entries, the
//! version tag grammar, and the short content fingerprint.
//!
//! # Key Types
//!
//! - [`ProjectMetadata`] — the one-JSON-document-per-project ledger
//! - [`VersionRecord`] — an immutable entry in a project's version sequence
//! - [`VersionTag`] — `v<major>.<minor>.<patch>` tags plus backup tags
//! - [`ContentHash`] — short order-independent snapshot fingerprint
//! - [`FileMap`] — relative path → text content mapping handed in by callers

pub mod error;
pub mod hash;
pub mod metadata;
pub mod names;
pub mod tag;

pub use error::TypeError;
pub use hash::ContentHash;
pub use metadata::{FileMap, ProjectMetadata, VersionRecord};
pub use names::{validate_project_name, validate_relative_path, validate_version_tag};
pub use tag::VersionTag;
