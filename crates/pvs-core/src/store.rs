//! The [`VersionStore`] handle: project registry, snapshot engine, differ
//! entry points, and restorer.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use pvs_diff::{diff_dirs, SnapshotDiff};
use pvs_store::{
    copy_dir_recursive, list_files_relative, load_metadata, read_file_map, remove_dir_if_exists,
    save_metadata, write_file_map, ProjectLayout, StoreError,
};
use pvs_types::{
    validate_project_name, validate_relative_path, validate_version_tag, ContentHash, FileMap,
    ProjectMetadata, VersionRecord, VersionTag,
};
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::namer;

/// Options for [`VersionStore::save_version_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SaveOptions {
    /// Replace an existing archive under the same tag instead of failing.
    /// The replaced version's ledger entry is dropped along with its files.
    pub overwrite: bool,
}

/// Result of a successful save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The tag the snapshot was archived under.
    pub version: VersionTag,
    /// Fingerprint of the saved file mapping.
    pub hash: ContentHash,
}

/// Result of a successful restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// The tag the working set was restored to.
    pub restored: VersionTag,
    /// Tag of the pre-restore backup, if a working set existed to back up.
    pub backup: Option<VersionTag>,
}

/// A handle to one projects root on the local filesystem.
///
/// All operations are synchronous and act on one project at a time. Saves
/// and restores on the same project are serialized through a per-project
/// lock held for the whole operation, so a metadata document can never
/// disagree with the archives written by a concurrent call through the same
/// handle. Multiple independent handles (e.g. in tests) get independent
/// roots and never collide.
pub struct VersionStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl VersionStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// The projects root this handle operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new project: directory skeleton plus an initial metadata
    /// document with an empty version ledger and current version `v1.0.0`.
    ///
    /// No file content is written. Fails with [`CoreError::AlreadyExists`]
    /// if a directory for this name is already present.
    pub fn create_project(&self, name: &str, description: &str) -> CoreResult<()> {
        validate_project_name(name)?;
        let lock = self.lock_project(name);
        let _guard = lock.lock().expect("project mutex poisoned");

        let layout = self.layout(name);
        if layout.exists() {
            return Err(CoreError::AlreadyExists { name: name.into() });
        }

        layout.scaffold()?;
        let metadata = ProjectMetadata::new(name, description);
        save_metadata(&layout.metadata_path(), &metadata)?;

        info!(project = name, "project created");
        Ok(())
    }

    /// Metadata of every known project under the root, sorted by name.
    ///
    /// Subdirectories without a metadata document are silently skipped;
    /// documents that fail to parse are skipped with a warning rather than
    /// failing the whole listing.
    pub fn list_projects(&self) -> CoreResult<Vec<ProjectMetadata>> {
        let mut projects = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let metadata_path = entry.path().join("metadata.json");
            match load_metadata(&metadata_path) {
                Ok(metadata) => projects.push(metadata),
                Err(StoreError::MetadataMissing { .. }) => {}
                Err(e) => {
                    tracing::warn!(path = %metadata_path.display(), "skipping unreadable metadata: {e}");
                }
            }
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    /// Metadata of one project.
    pub fn project(&self, name: &str) -> CoreResult<ProjectMetadata> {
        validate_project_name(name)?;
        self.load_project(&self.layout(name), name)
    }

    /// Save a new version with default options (tag collisions are errors).
    pub fn save_version(
        &self,
        name: &str,
        files: &FileMap,
        message: &str,
        explicit_tag: Option<&str>,
    ) -> CoreResult<SaveOutcome> {
        self.save_version_with(name, files, message, explicit_tag, SaveOptions::default())
    }

    /// Save a new version of a project.
    ///
    /// The supplied files are merge-written into the working set (files not
    /// named in the mapping stay untouched), then the entire post-merge
    /// working set is archived under the resolved tag and a ledger entry is
    /// appended. The ledger records the full archived file list, which may
    /// be a superset of the mapping saved here.
    ///
    /// Tag resolution: `explicit_tag` verbatim if supplied, otherwise the
    /// current version's patch component is bumped (malformed current tags
    /// degrade to `v1.0.1`). A tag that already has an archive or a ledger
    /// entry fails with [`CoreError::VersionExists`] unless
    /// [`SaveOptions::overwrite`] is set.
    pub fn save_version_with(
        &self,
        name: &str,
        files: &FileMap,
        message: &str,
        explicit_tag: Option<&str>,
        options: SaveOptions,
    ) -> CoreResult<SaveOutcome> {
        validate_project_name(name)?;
        for path in files.keys() {
            validate_relative_path(path)?;
        }
        if let Some(tag) = explicit_tag {
            validate_version_tag(tag)?;
        }

        let lock = self.lock_project(name);
        let _guard = lock.lock().expect("project mutex poisoned");

        let layout = self.layout(name);
        let mut metadata = self.load_project(&layout, name)?;

        let hash = pvs_hash::hash_files(files);
        let tag = match explicit_tag {
            Some(tag) => VersionTag::new(tag),
            None => namer::next_version(&metadata),
        };

        let version_dir = layout.version_dir(&tag);
        if metadata.has_version(&tag) || version_dir.exists() {
            if !options.overwrite {
                return Err(CoreError::VersionExists {
                    project: name.into(),
                    tag: tag.to_string(),
                });
            }
            debug!(project = name, tag = %tag, "overwriting existing version");
            remove_dir_if_exists(&version_dir)?;
            metadata.remove_version(&tag);
        }

        // Merge into the working set, then archive the whole merged tree.
        let current = layout.current_dir();
        write_file_map(&current, files)?;
        copy_dir_recursive(&current, &version_dir)?;

        let record = VersionRecord {
            version: tag.clone(),
            timestamp: Utc::now(),
            hash,
            commit_message: message.into(),
            files: list_files_relative(&version_dir)?,
        };
        metadata.record_version(record);
        save_metadata(&layout.metadata_path(), &metadata)?;

        info!(project = name, tag = %tag, %hash, "version saved");
        Ok(SaveOutcome { version: tag, hash })
    }

    /// The project's full version ledger, oldest first. Includes the backup
    /// records minted by restore.
    pub fn version_history(&self, name: &str) -> CoreResult<Vec<VersionRecord>> {
        Ok(self.project(name)?.versions)
    }

    /// The restore-created backup records of a project, oldest first.
    pub fn list_backups(&self, name: &str) -> CoreResult<Vec<VersionRecord>> {
        Ok(self.project(name)?.backups().cloned().collect())
    }

    /// Compare two archived versions of a project.
    ///
    /// Reports paths added in `tag_b`, deleted since `tag_a`, and modified
    /// between the two, with per-file change magnitude for the modified
    /// set.
    pub fn diff_versions(
        &self,
        name: &str,
        tag_a: &str,
        tag_b: &str,
    ) -> CoreResult<SnapshotDiff> {
        validate_project_name(name)?;
        validate_version_tag(tag_a)?;
        validate_version_tag(tag_b)?;
        let layout = self.layout(name);
        let old_dir = self.archive_dir(&layout, name, &VersionTag::new(tag_a))?;
        let new_dir = self.archive_dir(&layout, name, &VersionTag::new(tag_b))?;
        Ok(diff_dirs(&old_dir, &new_dir)?)
    }

    /// Compare the live working set against an archived version.
    ///
    /// An empty diff means the working set is byte-identical to the archive
    /// (the post-restore condition).
    pub fn diff_working_set(&self, name: &str, tag: &str) -> CoreResult<SnapshotDiff> {
        validate_project_name(name)?;
        validate_version_tag(tag)?;
        let layout = self.layout(name);
        let archive = self.archive_dir(&layout, name, &VersionTag::new(tag))?;
        Ok(diff_dirs(&archive, &layout.current_dir())?)
    }

    /// Restore the working set to an archived version.
    ///
    /// An existing working set is first archived under a fresh
    /// `backup_<timestamp>` tag and registered in the ledger as a backup
    /// record, then removed. The target archive is copied into place. The
    /// project's `current_version` is not changed: it keeps tracking the
    /// latest explicit save.
    pub fn restore_version(&self, name: &str, tag: &str) -> CoreResult<RestoreOutcome> {
        validate_project_name(name)?;
        validate_version_tag(tag)?;
        let lock = self.lock_project(name);
        let _guard = lock.lock().expect("project mutex poisoned");

        let layout = self.layout(name);
        let mut metadata = self.load_project(&layout, name)?;

        let tag = VersionTag::new(tag);
        let version_dir = layout.version_dir(&tag);
        if !version_dir.is_dir() {
            return Err(CoreError::VersionNotFound {
                project: name.into(),
                tag: tag.to_string(),
            });
        }

        let current = layout.current_dir();
        let mut backup = None;
        if current.is_dir() {
            let backup_tag = fresh_backup_tag(&layout, &metadata, Utc::now());
            let backup_dir = layout.version_dir(&backup_tag);
            copy_dir_recursive(&current, &backup_dir)?;

            let contents = read_file_map(&current)?;
            metadata.record_backup(VersionRecord {
                version: backup_tag.clone(),
                timestamp: Utc::now(),
                hash: pvs_hash::hash_files(&contents),
                commit_message: format!("automatic backup before restore to {tag}"),
                files: list_files_relative(&backup_dir)?,
            });

            fs::remove_dir_all(&current)?;
            backup = Some(backup_tag);
        }

        copy_dir_recursive(&version_dir, &current)?;
        save_metadata(&layout.metadata_path(), &metadata)?;

        info!(project = name, tag = %tag, backup = ?backup.as_ref().map(VersionTag::as_str), "version restored");
        Ok(RestoreOutcome {
            restored: tag,
            backup,
        })
    }

    fn layout(&self, name: &str) -> ProjectLayout {
        ProjectLayout::new(&self.root, name)
    }

    /// Load a project's metadata, mapping a missing document to
    /// [`CoreError::ProjectNotFound`]. A directory without metadata is not a
    /// project.
    fn load_project(&self, layout: &ProjectLayout, name: &str) -> CoreResult<ProjectMetadata> {
        if !layout.exists() {
            return Err(CoreError::ProjectNotFound { name: name.into() });
        }
        match load_metadata(&layout.metadata_path()) {
            Ok(metadata) => Ok(metadata),
            Err(StoreError::MetadataMissing { .. }) => {
                Err(CoreError::ProjectNotFound { name: name.into() })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn archive_dir(
        &self,
        layout: &ProjectLayout,
        name: &str,
        tag: &VersionTag,
    ) -> CoreResult<PathBuf> {
        let dir = layout.version_dir(tag);
        if !dir.is_dir() {
            return Err(CoreError::VersionNotFound {
                project: name.into(),
                tag: tag.to_string(),
            });
        }
        Ok(dir)
    }

    fn lock_project(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("project lock table poisoned");
        locks.entry(name.to_string()).or_default().clone()
    }
}

/// Mint a backup tag for `now`, appending a numeric suffix when a restore in
/// the same second already claimed the base tag. Tags stay unique in both
/// the ledger and the `versions/` directory.
fn fresh_backup_tag(
    layout: &ProjectLayout,
    metadata: &ProjectMetadata,
    now: DateTime<Utc>,
) -> VersionTag {
    let taken =
        |tag: &VersionTag| metadata.has_version(tag) || layout.version_dir(tag).is_dir();

    let base = VersionTag::backup(now);
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = VersionTag::new(format!("{base}_{suffix}"));
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
