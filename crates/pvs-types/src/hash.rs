use std::fmt;

use serde::{Deserialize, Serialize};

/// Short fingerprint of a snapshot's file-name→content mapping.
///
/// A `ContentHash` is the first 4 bytes of a keyed digest over the mapping,
/// hex-encoded to 8 characters. It is a change detector, not a security
/// primitive: identical mappings always hash equal, and any byte-level
/// difference changes the hash with overwhelming probability.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 4]);

impl ContentHash {
    /// Create a hash from the leading bytes of a full digest.
    pub fn from_prefix(prefix: [u8; 4]) -> Self {
        Self(prefix)
    }

    /// The raw truncated digest bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Hex-encoded 8-character representation, as stored in metadata.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Metadata stores the hash as a plain hex string, so serde goes through hex
// rather than a byte array.
impl Serialize for ContentHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 4 {
            return Err(serde::de::Error::custom(format!(
                "expected 8 hex chars, got {}",
                s.len()
            )));
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_8_chars() {
        let hash = ContentHash::from_prefix([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hash.to_hex(), "deadbeef");
        assert_eq!(hash.to_hex().len(), 8);
    }

    #[test]
    fn display_matches_hex() {
        let hash = ContentHash::from_prefix([1, 2, 3, 4]);
        assert_eq!(format!("{hash}"), hash.to_hex());
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let hash = ContentHash::from_prefix([0xab, 0xcd, 0x01, 0x23]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"abcd0123\"");
        let parsed: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn reject_wrong_length() {
        let err = serde_json::from_str::<ContentHash>("\"abcd\"");
        assert!(err.is_err());
    }
}
