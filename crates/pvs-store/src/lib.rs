//! On-disk persistence for the Project Version Store.
//!
//! Each project occupies one directory under the projects root:
//!
//! ```text
//! <project>/metadata.json       the version ledger document
//! <project>/current/...         the mutable working set
//! <project>/versions/<tag>/...  one full archived copy per saved version
//! <project>/docs/, exports/     reserved, unused by the core
//! ```
//!
//! This crate owns the path arithmetic ([`ProjectLayout`]), the atomic
//! `metadata.json` read/write, and the recursive copy/enumerate/remove
//! helpers the snapshot engine and restorer are built on. It never decides
//! policy: which directories get copied when is the core's business.

pub mod error;
pub mod fsutil;
pub mod layout;
pub mod metadata;

pub use error::{StoreError, StoreResult};
pub use fsutil::{
    copy_dir_recursive, list_files_relative, read_file_map, remove_dir_if_exists, write_file_map,
};
pub use layout::ProjectLayout;
pub use metadata::{load_metadata, save_metadata};
