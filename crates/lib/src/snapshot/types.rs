use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::util::hash::{ContentHash, hash_bytes};

/// An immutable cluster configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StateSnapshot {
  bytes: Vec<u8>,
}

impl StateSnapshot {
  pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
    Self { bytes: bytes.into() }
  }

  /// Serialize a value as pretty-printed JSON.
  pub fn from_json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
    let bytes = serde_json::to_vec_pretty(value)?;
    Ok(Self { bytes })
  }

  /// Decode the snapshot as JSON into `T`.
  pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
    serde_json::from_slice(&self.bytes)
  }

  /// Check that the snapshot is one well-formed JSON document, without building it.
  pub fn validate_json(&self) -> Result<(), serde_json::Error> {
    serde_json::from_slice::<IgnoredAny>(&self.bytes).map(|_| ())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// SHA-256 of the snapshot bytes.
  pub fn digest(&self) -> ContentHash {
    hash_bytes(&self.bytes)
  }
}

impl From<Vec<u8>> for StateSnapshot {
  fn from(bytes: Vec<u8>) -> Self {
    Self { bytes }
  }
}

impl From<String> for StateSnapshot {
  fn from(s: String) -> Self {
    Self { bytes: s.into_bytes() }
  }
}

impl From<&str> for StateSnapshot {
  fn from(s: &str) -> Self {
    Self::new(s.as_bytes())
  }
}

impl AsRef<[u8]> for StateSnapshot {
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}
