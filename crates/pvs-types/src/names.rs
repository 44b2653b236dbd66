//! Project name and file path validation.
//!
//! Callers hand the store arbitrary strings for project names and relative
//! file paths. Both end up as filesystem paths, so they are validated before
//! any directory or file is touched:
//!
//! - Project names must be a single path component: no separators, no `..`,
//!   no leading dot, none of the characters that break common filesystems.
//! - File paths must stay inside the working set: relative, no `..`
//!   components, no empty components, no NUL bytes.
//! - Version tags must be exactly one path component, so a caller-supplied
//!   tag can never address anything outside `versions/`.

use std::path::{Component, Path};

use crate::error::{Result, TypeError};

/// Characters that are forbidden anywhere in a project name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a project name, returning `Ok(())` if usable as a directory name.
///
/// # Examples
///
/// ```
/// use pvs_types::validate_project_name;
///
/// assert!(validate_project_name("demo").is_ok());
/// assert!(validate_project_name("my-project_2").is_ok());
/// assert!(validate_project_name("").is_err());
/// assert!(validate_project_name("../escape").is_err());
/// ```
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TypeError::InvalidProjectName {
            name: name.to_string(),
            reason: "project name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(TypeError::InvalidProjectName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if name == "." || name == ".." || name.starts_with('.') {
        return Err(TypeError::InvalidProjectName {
            name: name.to_string(),
            reason: "must not start with '.'".into(),
        });
    }

    if name.chars().any(char::is_whitespace) {
        return Err(TypeError::InvalidProjectName {
            name: name.to_string(),
            reason: "must not contain whitespace".into(),
        });
    }

    Ok(())
}

/// Validate a relative file path destined for a project's working set.
///
/// Rejects anything that could escape the working set directory: absolute
/// paths, `..` components, drive prefixes, and NUL bytes. Forward slashes
/// are the separator; nested paths like `src/main.rs` are fine.
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TypeError::InvalidPath {
            path: path.to_string(),
            reason: "path must not be empty".into(),
        });
    }

    if path.contains('\0') {
        return Err(TypeError::InvalidPath {
            path: path.to_string(),
            reason: "must not contain NUL".into(),
        });
    }

    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(TypeError::InvalidPath {
                    path: path.to_string(),
                    reason: "must not contain '..'".into(),
                });
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(TypeError::InvalidPath {
                    path: path.to_string(),
                    reason: "must be relative".into(),
                });
            }
        }
    }

    Ok(())
}

/// Validate a version tag for use as an archive directory name.
///
/// Tags land on disk as `versions/<tag>`, so they must be exactly one path
/// component: non-empty, no separators, not `.` or `..`, no NUL bytes.
/// Auto-derived (`v1.0.2`) and backup (`backup_…`) tags satisfy this
/// trivially; the check exists for caller-supplied explicit tags, which are
/// otherwise stored verbatim.
pub fn validate_version_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(TypeError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag must not be empty".into(),
        });
    }

    if tag.contains('/') || tag.contains('\\') {
        return Err(TypeError::InvalidTag {
            tag: tag.to_string(),
            reason: "must not contain path separators".into(),
        });
    }

    if tag == "." || tag == ".." {
        return Err(TypeError::InvalidTag {
            tag: tag.to_string(),
            reason: "must not be a relative path component".into(),
        });
    }

    if tag.contains('\0') {
        return Err(TypeError::InvalidTag {
            tag: tag.to_string(),
            reason: "must not contain NUL".into(),
        });
    }

    Ok(())
}
