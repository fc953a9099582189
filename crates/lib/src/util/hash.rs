//! Content hashing for snapshot digests.
//!
//! Digests show up in log records so that two writes of the same cluster can be
//! compared without dumping the snapshot itself.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::HASH_PREFIX_LEN;

/// A full 64-character SHA-256 hash of some content.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// Leading characters of the hash, for log output.
  pub fn short(&self) -> &str {
    let len = self.0.len().min(HASH_PREFIX_LEN);
    &self.0[..len]
  }
}

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}
