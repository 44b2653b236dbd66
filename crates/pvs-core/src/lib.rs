//! Core logic for the Project Version Store (PVS).
//!
//! A [`VersionStore`] is an explicit handle over one projects root on the
//! local filesystem. It creates project skeletons, snapshots named sets of
//! text files into monotonically tagged archives, compares archived
//! versions, and restores the working set to an earlier tag while keeping a
//! backup of what it replaced.
//!
//! ```no_run
//! use pvs_core::VersionStore;
//! use pvs_types::FileMap;
//!
//! # fn main() -> Result<(), pvs_core::CoreError> {
//! let store = VersionStore::open("./projects")?;
//! store.create_project("demo", "demo project")?;
//!
//! let mut files = FileMap::new();
//! files.insert("a.txt".into(), "hello".into());
//! let saved = store.save_version("demo", &files, "first save", None)?;
//! assert_eq!(saved.version.as_str(), "v1.0.1");
//!
//! store.restore_version("demo", "v1.0.1")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod namer;
pub mod store;

pub use error::{CoreError, CoreResult};
pub use namer::next_version;
pub use store::{RestoreOutcome, SaveOptions, SaveOutcome, VersionStore};
