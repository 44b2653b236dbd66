use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix used for the implicit backup snapshots created by restore.
const BACKUP_PREFIX: &str = "backup_";

/// A version tag identifying one archived snapshot of a project.
///
/// Tags come in three flavors:
/// - auto-derived `v<major>.<minor>.<patch>` tags produced by the namer,
/// - caller-supplied tags, stored verbatim with no format requirement,
/// - `backup_<timestamp>` tags minted for the pre-restore safety copies.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(String);

impl VersionTag {
    /// Wrap a caller-supplied tag verbatim.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag every freshly created project starts from.
    pub fn initial() -> Self {
        Self("v1.0.0".into())
    }

    /// The fixed tag the namer degrades to when the current tag does not
    /// parse as `v<major>.<minor>.<patch>`.
    pub fn fallback() -> Self {
        Self("v1.0.1".into())
    }

    /// Mint a backup tag for the given instant, e.g. `backup_20260824_153012`.
    pub fn backup(at: DateTime<Utc>) -> Self {
        Self(format!("{BACKUP_PREFIX}{}", at.format("%Y%m%d_%H%M%S")))
    }

    /// Returns `true` if this is a restore-created backup tag.
    pub fn is_backup(&self) -> bool {
        self.0.starts_with(BACKUP_PREFIX)
    }

    /// Parse as `v<major>.<minor>.<patch>` with all-integer components.
    ///
    /// Returns `None` for anything else, including extra components or
    /// non-numeric parts.
    pub fn parse_semver(&self) -> Option<(u64, u64, u64)> {
        let rest = self.0.strip_prefix('v')?;
        let mut parts = rest.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((major, minor, patch))
    }

    /// The next auto-derived tag: same major and minor, patch + 1.
    ///
    /// Returns `None` when this tag is not in `v<major>.<minor>.<patch>`
    /// form; the caller decides whether to degrade to [`fallback`].
    ///
    /// [`fallback`]: VersionTag::fallback
    pub fn next_patch(&self) -> Option<Self> {
        let (major, minor, patch) = self.parse_semver()?;
        Some(Self(format!("v{major}.{minor}.{}", patch + 1)))
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionTag({})", self.0)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VersionTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VersionTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}
