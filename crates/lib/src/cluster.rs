//! Cluster names.
//!
//! A [`ClusterName`] is the only key shared by every backend. It doubles as a
//! directory name, a git tree path component and an object key segment, so the
//! accepted alphabet is deliberately narrow:
//!
//! - 1 to 128 bytes
//! - ASCII letters, digits, `-`, `_` and `.`
//! - no leading `.` (hidden entries are never clusters)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_CLUSTER_NAME_LEN;
use crate::store::StoreError;

/// A validated cluster name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClusterName(String);

impl ClusterName {
  /// Validate and wrap a cluster name.
  pub fn new(name: impl Into<String>) -> Result<Self, StoreError> {
    let name = name.into();
    match validate(&name) {
      Ok(()) => Ok(Self(name)),
      Err(reason) => Err(StoreError::InvalidName { name, reason }),
    }
  }

  /// Check whether a raw entry name would be accepted, without allocating an error.
  pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

fn validate(name: &str) -> Result<(), String> {
  if name.is_empty() {
    return Err("name is empty".to_string());
  }
  if name.len() > MAX_CLUSTER_NAME_LEN {
    return Err(format!("name is longer than {} bytes", MAX_CLUSTER_NAME_LEN));
  }
  if name.starts_with('.') {
    return Err("name must not start with '.'".to_string());
  }
  if let Some(c) = name
    .chars()
    .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
  {
    return Err(format!("character {:?} is not allowed", c));
  }
  Ok(())
}

impl fmt::Display for ClusterName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ClusterName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl FromStr for ClusterName {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for ClusterName {
  type Error = StoreError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<ClusterName> for String {
  fn from(name: ClusterName) -> Self {
    name.0
  }
}
