//! Directory-level diff: compare two snapshots and classify changes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use pvs_store::list_files_relative;
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Change magnitude for one modified file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStats {
    /// Line count in the new snapshot minus line count in the old one.
    pub lines_added: i64,
    /// Absolute difference in character count.
    pub chars_changed: u64,
}

/// The result of comparing two snapshots.
///
/// Path lists are sorted; paths with identical content in both snapshots are
/// omitted entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Paths present only in the new snapshot.
    pub added: Vec<String>,
    /// Paths present in both snapshots with differing content.
    pub modified: Vec<String>,
    /// Paths present only in the old snapshot.
    pub deleted: Vec<String>,
    /// Change magnitude per modified path.
    pub changes: BTreeMap<String, ChangeStats>,
}

impl SnapshotDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the snapshots are identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Total number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }
}

/// Compare the snapshot under `old_dir` against the one under `new_dir`.
///
/// Both directories must exist; a missing one is a
/// [`DiffError::SnapshotMissing`]. File enumeration is recursive and paths
/// are compared by their relative position inside each snapshot.
pub fn diff_dirs(old_dir: &Path, new_dir: &Path) -> DiffResult<SnapshotDiff> {
    for dir in [old_dir, new_dir] {
        if !dir.is_dir() {
            return Err(DiffError::SnapshotMissing {
                path: dir.to_path_buf(),
            });
        }
    }

    let old_files: BTreeSet<String> = list_files_relative(old_dir)?.into_iter().collect();
    let new_files: BTreeSet<String> = list_files_relative(new_dir)?.into_iter().collect();

    let mut diff = SnapshotDiff::new();

    for path in &new_files {
        if !old_files.contains(path) {
            diff.added.push(path.clone());
            continue;
        }
        let old_content = read_text(&old_dir.join(path))?;
        let new_content = read_text(&new_dir.join(path))?;
        if old_content != new_content {
            diff.changes
                .insert(path.clone(), change_stats(&old_content, &new_content));
            diff.modified.push(path.clone());
        }
    }

    for path in old_files.difference(&new_files) {
        diff.deleted.push(path.clone());
    }

    // BTreeSet iteration is in sort order, so the per-category lists are
    // already sorted.
    Ok(diff)
}

fn change_stats(old: &str, new: &str) -> ChangeStats {
    let old_lines = old.lines().count() as i64;
    let new_lines = new.lines().count() as i64;
    let old_chars = old.chars().count() as i64;
    let new_chars = new.chars().count() as i64;
    ChangeStats {
        lines_added: new_lines - old_lines,
        chars_changed: (new_chars - old_chars).unsigned_abs(),
    }
}

fn read_text(path: &Path) -> DiffResult<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| DiffError::Encoding {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvs_store::write_file_map;

    fn snapshot(entries: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        write_file_map(dir.path(), &map).unwrap();
        dir
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let a = snapshot(&[("a.txt", "hello"), ("b.txt", "world")]);
        let b = snapshot(&[("a.txt", "hello"), ("b.txt", "world")]);
        let diff = diff_dirs(a.path(), b.path()).unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn snapshot_against_itself_is_empty() {
        let a = snapshot(&[("a.txt", "hello")]);
        let diff = diff_dirs(a.path(), a.path()).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn added_and_deleted_classified() {
        let old = snapshot(&[("gone.txt", "x")]);
        let new = snapshot(&[("fresh.txt", "y")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();
        assert_eq!(diff.added, vec!["fresh.txt"]);
        assert_eq!(diff.deleted, vec!["gone.txt"]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn modified_carries_change_stats() {
        let old = snapshot(&[("a.txt", "one\ntwo\n")]);
        let new = snapshot(&[("a.txt", "one\ntwo\nthree\n")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();

        assert_eq!(diff.modified, vec!["a.txt"]);
        let stats = diff.changes["a.txt"];
        assert_eq!(stats.lines_added, 1);
        assert_eq!(stats.chars_changed, 6);
    }

    #[test]
    fn shrinking_file_has_negative_line_delta() {
        let old = snapshot(&[("a.txt", "one\ntwo\nthree\n")]);
        let new = snapshot(&[("a.txt", "one\n")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();
        let stats = diff.changes["a.txt"];
        assert_eq!(stats.lines_added, -2);
        assert_eq!(stats.chars_changed, 10);
    }

    #[test]
    fn same_length_change_is_still_modified() {
        let old = snapshot(&[("a.txt", "hello")]);
        let new = snapshot(&[("a.txt", "world")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();
        assert_eq!(diff.modified, vec!["a.txt"]);
        assert_eq!(diff.changes["a.txt"].chars_changed, 0);
        assert_eq!(diff.changes["a.txt"].lines_added, 0);
    }

    #[test]
    fn nested_paths_compared() {
        let old = snapshot(&[("src/lib.rs", "fn a() {}")]);
        let new = snapshot(&[("src/lib.rs", "fn a() {}"), ("src/new.rs", "fn b() {}")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();
        assert_eq!(diff.added, vec!["src/new.rs"]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let a = snapshot(&[("a.txt", "x")]);
        let missing = a.path().join("nope");
        match diff_dirs(a.path(), &missing) {
            Err(DiffError::SnapshotMissing { path }) => assert_eq!(path, missing),
            other => panic!("expected SnapshotMissing, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_content_is_encoding_error() {
        let old = snapshot(&[("a.bin", "text")]);
        let new = snapshot(&[]);
        std::fs::write(new.path().join("a.bin"), [0xff, 0xfe, 0x00]).unwrap();
        match diff_dirs(old.path(), new.path()) {
            Err(DiffError::Encoding { .. }) => {}
            other => panic!("expected Encoding, got {other:?}"),
        }
    }

    #[test]
    fn serde_shape_matches_contract() {
        let old = snapshot(&[("a.txt", "one\n")]);
        let new = snapshot(&[("a.txt", "one\ntwo\n")]);
        let diff = diff_dirs(old.path(), new.path()).unwrap();
        let json = serde_json::to_value(&diff).unwrap();
        for field in ["added", "modified", "deleted", "changes"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["changes"]["a.txt"]["lines_added"], 1);
    }
}
