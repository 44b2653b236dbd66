//! Order-independent snapshot fingerprinting.
//!
//! The store identifies content changes by hashing the file-name→content
//! mapping handed to a save. The fingerprint is a change detector, not a
//! security primitive: it is truncated to 8 hex characters, which is plenty
//! to distinguish successive versions of one project but offers no
//! collision resistance against an adversary.

use pvs_types::{ContentHash, FileMap};

/// Domain-separated BLAKE3 hasher over file mappings.
///
/// The domain tag is prepended to every computation so snapshot fingerprints
/// can never collide with hashes minted for other purposes by a future
/// domain.
pub struct SnapshotHasher {
    domain: &'static str,
}

impl SnapshotHasher {
    /// Hasher for saved snapshots.
    pub const SNAPSHOT: Self = Self {
        domain: "pvs-snapshot-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Fingerprint a file mapping.
    ///
    /// Entries are fed to the digest as `name:content` pairs in lexicographic
    /// name order (`FileMap` is a `BTreeMap`, so iteration order is the sort
    /// order regardless of how the map was built). The full digest is
    /// truncated to 4 bytes.
    pub fn hash_files(&self, files: &FileMap) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        for (name, content) in files {
            hasher.update(name.as_bytes());
            hasher.update(b":");
            hasher.update(content.as_bytes());
        }
        let digest = hasher.finalize();
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&digest.as_bytes()[..4]);
        ContentHash::from_prefix(prefix)
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Fingerprint a file mapping with the default snapshot domain.
pub fn hash_files(files: &FileMap) -> ContentHash {
    SnapshotHasher::SNAPSHOT.hash_files(files)
}
