//! Recursive filesystem helpers for working sets and archives.
//!
//! All functions operate on whole directory trees and propagate every I/O
//! error; nothing here is silently ignored.

use std::fs;
use std::path::Path;

use pvs_types::FileMap;

use crate::error::StoreResult;

/// Merge-write a file mapping into `dir`.
///
/// Each entry is written at its relative path, creating parent directories
/// as needed and overwriting an existing file at the same path. Files in
/// `dir` that are not named by the mapping are left untouched: this is a
/// merge, not a replace.
pub fn write_file_map(dir: &Path, files: &FileMap) -> StoreResult<()> {
    for (name, content) in files {
        let dest = dir.join(name);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, content)?;
    }
    Ok(())
}

/// Copy the full tree under `src` to `dst`, byte for byte.
///
/// `dst` is created if missing. Existing files under `dst` at colliding
/// paths are overwritten; symlinks are followed.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> StoreResult<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

/// Sorted relative paths of every file under `dir`, recursively.
///
/// Returns an empty list when `dir` does not exist. Paths use `/` as the
/// separator regardless of platform, matching the metadata file lists.
pub fn list_files_relative(dir: &Path) -> StoreResult<Vec<String>> {
    let mut files = Vec::new();
    if dir.is_dir() {
        collect_files(dir, dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_files(base: &Path, dir: &Path, out: &mut Vec<String>) -> StoreResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(base, &path, out)?;
        } else {
            // The entry is always under `base`, so strip_prefix cannot fail.
            let rel = path.strip_prefix(base).unwrap_or(&path);
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push(rel);
        }
    }
    Ok(())
}

/// Read every file under `dir` back into a [`FileMap`].
///
/// Working sets and archives hold text by contract; bytes that are not valid
/// UTF-8 are replaced rather than failing the read.
pub fn read_file_map(dir: &Path) -> StoreResult<FileMap> {
    let mut map = FileMap::new();
    for rel in list_files_relative(dir)? {
        let bytes = fs::read(dir.join(&rel))?;
        map.insert(rel, String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(map)
}

/// Remove a directory tree if it exists. Missing directories are not an
/// error.
pub fn remove_dir_if_exists(dir: &Path) -> StoreResult<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}
