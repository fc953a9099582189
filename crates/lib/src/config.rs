//! Backend selection and configuration.
//!
//! A [`BackendConfig`] carries exactly the parameters one backend needs. It is a
//! plain value: build it once (from flags, environment or a file) and hand it to
//! [`open_store`](crate::store::open_store).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BUCKET_LOCATION;
use crate::store::StoreError;

/// The available state store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
  #[serde(rename = "fs")]
  Filesystem,
  #[serde(rename = "git")]
  Git,
  #[serde(rename = "jsonfs")]
  JsonFilesystem,
  #[serde(rename = "s3")]
  ObjectStorage,
}

impl BackendKind {
  pub const ALL: [BackendKind; 4] = [
    BackendKind::Filesystem,
    BackendKind::Git,
    BackendKind::JsonFilesystem,
    BackendKind::ObjectStorage,
  ];

  /// Identifier used on the command line and in configuration.
  pub fn as_str(&self) -> &'static str {
    match self {
      BackendKind::Filesystem => "fs",
      BackendKind::Git => "git",
      BackendKind::JsonFilesystem => "jsonfs",
      BackendKind::ObjectStorage => "s3",
    }
  }

  /// Whether this backend keeps its state under a local directory.
  pub fn is_local(&self) -> bool {
    !matches!(self, BackendKind::ObjectStorage)
  }
}

impl fmt::Display for BackendKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BackendKind {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    BackendKind::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| {
        let known: Vec<_> = BackendKind::ALL.iter().map(|k| k.as_str()).collect();
        StoreError::Configuration(format!(
          "unknown state store '{}' (expected one of: {})",
          s,
          known.join(", ")
        ))
      })
  }
}

/// Connection parameters for an S3-compatible object store.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStorageConfig {
  /// Key prefix for all clusters in the bucket.
  pub base_path: String,
  /// Endpoint URL, or a bare `host[:port]` reached over HTTPS.
  pub endpoint: String,
  pub access_key: String,
  pub secret_key: String,
  pub bucket: String,
  /// Bucket region. Empty means [`DEFAULT_BUCKET_LOCATION`].
  #[serde(default)]
  pub location: String,
}

impl ObjectStorageConfig {
  pub fn location(&self) -> &str {
    if self.location.trim().is_empty() {
      DEFAULT_BUCKET_LOCATION
    } else {
      &self.location
    }
  }

  /// Check that every required parameter is present.
  pub fn validate(&self) -> Result<(), StoreError> {
    let missing: Vec<&str> = [
      ("endpoint", &self.endpoint),
      ("access key", &self.access_key),
      ("secret key", &self.secret_key),
      ("bucket", &self.bucket),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
      Ok(())
    } else {
      Err(StoreError::Configuration(format!(
        "object storage requires: {}",
        missing.join(", ")
      )))
    }
  }
}

impl fmt::Debug for ObjectStorageConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ObjectStorageConfig")
      .field("base_path", &self.base_path)
      .field("endpoint", &self.endpoint)
      .field("access_key", &self.access_key)
      .field("secret_key", &"<redacted>")
      .field("bucket", &self.bucket)
      .field("location", &self.location)
      .finish()
  }
}

/// Parameters for one backend kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum BackendConfig {
  #[serde(rename = "fs")]
  Filesystem { base_path: PathBuf },
  #[serde(rename = "git")]
  Git { base_path: PathBuf },
  #[serde(rename = "jsonfs")]
  JsonFilesystem { base_path: PathBuf },
  #[serde(rename = "s3")]
  ObjectStorage(ObjectStorageConfig),
}

impl BackendConfig {
  /// The backend kind this configuration is shaped for.
  pub fn kind(&self) -> BackendKind {
    match self {
      BackendConfig::Filesystem { .. } => BackendKind::Filesystem,
      BackendConfig::Git { .. } => BackendKind::Git,
      BackendConfig::JsonFilesystem { .. } => BackendKind::JsonFilesystem,
      BackendConfig::ObjectStorage(_) => BackendKind::ObjectStorage,
    }
  }

  /// Configuration for a directory-backed kind.
  ///
  /// Fails for [`BackendKind::ObjectStorage`], which needs connection parameters.
  pub fn local(kind: BackendKind, base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
    let base_path = base_path.into();
    match kind {
      BackendKind::Filesystem => Ok(BackendConfig::Filesystem { base_path }),
      BackendKind::Git => Ok(BackendConfig::Git { base_path }),
      BackendKind::JsonFilesystem => Ok(BackendConfig::JsonFilesystem { base_path }),
      BackendKind::ObjectStorage => Err(StoreError::Configuration(
        "the s3 state store needs object storage parameters, not just a path".to_string(),
      )),
    }
  }
}
