//! The per-project metadata document and its version ledger.
//!
//! One `metadata.json` lives at the root of each project directory. The
//! version sequence inside it is append-only: records are never mutated or
//! removed once written.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::ContentHash;
use crate::tag::VersionTag;

/// Relative file path → text content mapping supplied to a save.
///
/// A `BTreeMap` so iteration is always in lexicographic path order, which the
/// content hash and the recorded file lists depend on.
pub type FileMap = BTreeMap<String, String>;

/// One immutable entry in a project's version ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// The tag this snapshot was archived under.
    pub version: VersionTag,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Order-independent fingerprint of the saved file mapping.
    pub hash: ContentHash,
    /// Free-text commit message.
    pub commit_message: String,
    /// Sorted relative paths of every file in the archived snapshot.
    pub files: Vec<String>,
}

/// The metadata document persisted as `<project>/metadata.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name; doubles as the directory name under the projects root.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Tag of the most recently saved version. Starts at `v1.0.0` before any
    /// save; backup records do not move it.
    pub current_version: VersionTag,
    /// Append-only version ledger, oldest first.
    pub versions: Vec<VersionRecord>,
    /// Reserved for future use; always empty today.
    pub tags: Vec<String>,
    /// Time of the last save or restore-backup.
    pub last_modified: DateTime<Utc>,
}

impl ProjectMetadata {
    /// A fresh document for a just-created project: empty ledger, current
    /// version `v1.0.0`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: description.into(),
            created: now,
            current_version: VersionTag::initial(),
            versions: Vec::new(),
            tags: Vec::new(),
            last_modified: now,
        }
    }

    /// Append a saved version and advance `current_version` to it.
    pub fn record_version(&mut self, record: VersionRecord) {
        self.current_version = record.version.clone();
        self.last_modified = record.timestamp;
        self.versions.push(record);
    }

    /// Append a restore-created backup record.
    ///
    /// Backups are first-class ledger entries so they stay discoverable, but
    /// `current_version` keeps tracking the latest explicit save.
    pub fn record_backup(&mut self, record: VersionRecord) {
        self.last_modified = record.timestamp;
        self.versions.push(record);
    }

    /// Look up a ledger entry by tag.
    pub fn find_version(&self, tag: &VersionTag) -> Option<&VersionRecord> {
        self.versions.iter().find(|v| &v.version == tag)
    }

    /// Returns `true` if the ledger already carries this tag.
    pub fn has_version(&self, tag: &VersionTag) -> bool {
        self.find_version(tag).is_some()
    }

    /// Drop the ledger entry for a tag, if present. Used only by the
    /// explicit-overwrite save path, which replaces the archive as well.
    pub fn remove_version(&mut self, tag: &VersionTag) {
        self.versions.retain(|v| &v.version != tag);
    }

    /// The non-backup entries of the ledger, oldest first.
    pub fn saved_versions(&self) -> impl Iterator<Item = &VersionRecord> {
        self.versions.iter().filter(|v| !v.version.is_backup())
    }

    /// The restore-created backup entries of the ledger, oldest first.
    pub fn backups(&self) -> impl Iterator<Item = &VersionRecord> {
        self.versions.iter().filter(|v| v.version.is_backup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str) -> VersionRecord {
        VersionRecord {
            version: VersionTag::new(tag),
            timestamp: Utc::now(),
            hash: ContentHash::from_prefix([0; 4]),
            commit_message: "msg".into(),
            files: vec!["a.txt".into()],
        }
    }

    #[test]
    fn new_project_starts_at_v1_0_0() {
        let meta = ProjectMetadata::new("demo", "a demo");
        assert_eq!(meta.current_version, VersionTag::initial());
        assert!(meta.versions.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn record_version_advances_current() {
        let mut meta = ProjectMetadata::new("demo", "");
        meta.record_version(record("v1.0.1"));
        assert_eq!(meta.current_version.as_str(), "v1.0.1");
        assert_eq!(meta.versions.len(), 1);
    }

    #[test]
    fn record_backup_leaves_current_alone() {
        let mut meta = ProjectMetadata::new("demo", "");
        meta.record_version(record("v1.0.1"));
        meta.record_backup(record("backup_20260824_120000"));
        assert_eq!(meta.current_version.as_str(), "v1.0.1");
        assert_eq!(meta.versions.len(), 2);
        assert_eq!(meta.backups().count(), 1);
        assert_eq!(meta.saved_versions().count(), 1);
    }

    #[test]
    fn find_and_has_version() {
        let mut meta = ProjectMetadata::new("demo", "");
        meta.record_version(record("v1.0.1"));
        let tag = VersionTag::new("v1.0.1");
        assert!(meta.has_version(&tag));
        assert_eq!(meta.find_version(&tag).unwrap().commit_message, "msg");
        assert!(!meta.has_version(&VersionTag::new("v9.9.9")));
    }

    #[test]
    fn remove_version_drops_entry() {
        let mut meta = ProjectMetadata::new("demo", "");
        meta.record_version(record("v1.0.1"));
        meta.remove_version(&VersionTag::new("v1.0.1"));
        assert!(meta.versions.is_empty());
    }

    #[test]
    fn json_field_names_match_on_disk_contract() {
        let meta = ProjectMetadata::new("demo", "desc");
        let json = serde_json::to_value(&meta).unwrap();
        for field in [
            "name",
            "description",
            "created",
            "current_version",
            "versions",
            "tags",
            "last_modified",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn version_record_json_fields() {
        let json = serde_json::to_value(record("v1.0.1")).unwrap();
        for field in ["version", "timestamp", "hash", "commit_message", "files"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}
