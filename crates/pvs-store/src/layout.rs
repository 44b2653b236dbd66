use std::fs;
use std::path::{Path, PathBuf};

use pvs_types::VersionTag;

use crate::error::StoreResult;

/// Path arithmetic for one project directory.
///
/// A `ProjectLayout` is cheap to construct and performs no I/O on its own;
/// only [`scaffold`] touches the filesystem.
///
/// [`scaffold`]: ProjectLayout::scaffold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Layout for the project named `name` under `projects_root`.
    ///
    /// The name must already be validated (see
    /// [`pvs_types::validate_project_name`]); this type joins paths blindly.
    pub fn new(projects_root: &Path, name: &str) -> Self {
        Self {
            root: projects_root.join(name),
        }
    }

    /// The project's own directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<project>/metadata.json`.
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("metadata.json")
    }

    /// `<project>/current/` — the mutable working set.
    pub fn current_dir(&self) -> PathBuf {
        self.root.join("current")
    }

    /// `<project>/versions/` — parent of all archived snapshots.
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// `<project>/versions/<tag>/` — one archived snapshot.
    pub fn version_dir(&self, tag: &VersionTag) -> PathBuf {
        self.versions_dir().join(tag.as_str())
    }

    /// `<project>/docs/` — reserved.
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join("docs")
    }

    /// `<project>/exports/` — reserved.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    /// Returns `true` if the project directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Create the project directory skeleton: `versions/`, `current/`,
    /// `docs/`, and `exports/`. Idempotent.
    pub fn scaffold(&self) -> StoreResult<()> {
        for dir in [
            self.versions_dir(),
            self.current_dir(),
            self.docs_dir(),
            self.exports_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
