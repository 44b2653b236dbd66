//! Auto-derivation of the next version tag.

use pvs_types::{ProjectMetadata, VersionTag};
use tracing::warn;

/// Derive the next tag from a project's recorded current version.
///
/// The current tag is parsed as `v<major>.<minor>.<patch>` and only the
/// patch component is bumped. A current tag in any other format degrades to
/// the fixed fallback `v1.0.1` instead of failing the save: the tag is only
/// a label, and a caller that stored an exotic explicit tag should still be
/// able to keep saving. The degrade is logged because it silently restarts
/// the numbering.
pub fn next_version(metadata: &ProjectMetadata) -> VersionTag {
    match metadata.current_version.next_patch() {
        Some(tag) => tag,
        None => {
            warn!(
                project = %metadata.name,
                current = %metadata.current_version,
                "current version tag is not v<major>.<minor>.<patch>; falling back to v1.0.1"
            );
            VersionTag::fallback()
        }
    }
}
