//! Object storage state store.
//!
//! # Key layout
//!
//! ```text
//! <bucket>/
//! └── <prefix>/
//!     ├── prod/cluster.state
//!     └── dev/cluster.state
//! ```
//!
//! `<prefix>` is the configured base path without leading `./` or `/` and without
//! a trailing `/`. An empty prefix puts clusters at the bucket root.
//!
//! The wire protocol is behind [`ObjectClient`]: [`S3Client`] speaks to any
//! S3-compatible endpoint, [`MemoryClient`] keeps everything in process.

mod memory;
mod s3;

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use super::{BoxError, ClusterStore, StoreError};
use crate::cluster::ClusterName;
use crate::config::{BackendKind, ObjectStorageConfig};
use crate::consts::OBJECT_STATE_NAME;
use crate::snapshot::StateSnapshot;

pub use self::memory::MemoryClient;
pub use self::s3::S3Client;

/// Errors reported by an [`ObjectClient`].
#[derive(Debug, Error)]
pub enum ClientError {
  /// The service refused the request (HTTP 403).
  #[error("access denied: {0}")]
  AccessDenied(String),

  /// The service answered with an unexpected status.
  #[error("unexpected status {status}: {message}")]
  Status { status: u16, message: String },

  /// The request never got an answer.
  #[error("request failed")]
  Transport(#[source] BoxError),
}

/// Minimal blocking client for one bucket of an object store.
pub trait ObjectClient: fmt::Debug + Send + Sync {
  /// Name of the bucket this client talks to.
  fn bucket(&self) -> &str;

  fn bucket_exists(&self) -> Result<bool, ClientError>;

  fn create_bucket(&self) -> Result<(), ClientError>;

  /// Whole-object PUT.
  fn put_object(&self, key: &str, body: &[u8]) -> Result<(), ClientError>;

  /// Whole-object GET. `None` if the key does not exist.
  fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, ClientError>;

  fn object_exists(&self, key: &str) -> Result<bool, ClientError>;

  /// All keys starting with `prefix`, across every result page.
  fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ClientError>;

  fn delete_object(&self, key: &str) -> Result<(), ClientError>;
}

/// Stores each cluster as one object in a bucket.
#[derive(Debug)]
pub struct ObjectStore {
  client: Box<dyn ObjectClient>,
  prefix: String,
}

impl ObjectStore {
  /// Connect to the configured S3-compatible endpoint, creating the bucket if needed.
  pub fn connect(config: &ObjectStorageConfig) -> Result<Self, StoreError> {
    let client = S3Client::new(config)?;
    Self::with_client(Box::new(client), &config.base_path)
  }

  /// Build a store over any client, creating the bucket if needed.
  ///
  /// Fails with `Unreachable` if the bucket neither exists nor can be created.
  pub fn with_client(client: Box<dyn ObjectClient>, base_path: &str) -> Result<Self, StoreError> {
    ensure_bucket(client.as_ref())?;
    Ok(Self {
      client,
      prefix: normalize_prefix(base_path),
    })
  }

  /// Key prefix all clusters live under (empty for the bucket root).
  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// Object key holding the snapshot of `name`.
  pub fn key(&self, name: &ClusterName) -> String {
    format!("{}{}/{}", self.list_prefix(), name, OBJECT_STATE_NAME)
  }

  fn list_prefix(&self) -> String {
    if self.prefix.is_empty() {
      String::new()
    } else {
      format!("{}/", self.prefix)
    }
  }

  fn location(&self, key: &str) -> String {
    format!("s3://{}/{}", self.client.bucket(), key)
  }

  /// Recover a cluster name from a listed key, if the key is a state object.
  fn name_from_key(&self, key: &str, list_prefix: &str) -> Option<ClusterName> {
    let rest = key.strip_prefix(list_prefix)?;
    let candidate = rest.strip_suffix(OBJECT_STATE_NAME)?.strip_suffix('/')?;
    if candidate.contains('/') || !ClusterName::is_valid(candidate) {
      return None;
    }
    ClusterName::new(candidate).ok()
  }
}

fn ensure_bucket(client: &dyn ObjectClient) -> Result<(), StoreError> {
  let bucket = client.bucket();
  match client.bucket_exists() {
    Ok(true) => {
      debug!(bucket, "bucket exists");
      return Ok(());
    }
    Ok(false) => {}
    Err(e) => debug!(bucket, error = ?e, "could not check bucket, trying to create it"),
  }

  info!(bucket, "creating bucket");
  match client.create_bucket() {
    Ok(()) => Ok(()),
    Err(e) if already_owned(&e) => {
      debug!(bucket, "bucket already exists and is owned by these credentials");
      Ok(())
    }
    // Lost a creation race, or the probe above failed transiently.
    Err(_) if matches!(client.bucket_exists(), Ok(true)) => Ok(()),
    Err(e) => Err(StoreError::unreachable("create bucket", format!("s3://{}", bucket), e)),
  }
}

/// S3 answers a create for a bucket the caller already owns with 409
/// `BucketAlreadyOwnedByYou` everywhere except us-east-1.
fn already_owned(err: &ClientError) -> bool {
  matches!(err, ClientError::Status { status: 409, message } if message.contains("BucketAlreadyOwnedByYou"))
}

fn client_error(op: &'static str, location: String, err: ClientError) -> StoreError {
  match err {
    ClientError::AccessDenied(_) => StoreError::permission_denied(op, location, err),
    _ => StoreError::unreachable(op, location, err),
  }
}

pub(crate) fn normalize_prefix(base_path: &str) -> String {
  let mut path = base_path.trim();
  while let Some(rest) = path.strip_prefix("./") {
    path = rest;
  }
  let path = path.trim_matches('/');
  if path == "." { String::new() } else { path.to_string() }
}

impl ClusterStore for ObjectStore {
  fn kind(&self) -> BackendKind {
    BackendKind::ObjectStorage
  }

  fn list(&self) -> Result<Vec<ClusterName>, StoreError> {
    let list_prefix = self.list_prefix();
    let keys = self
      .client
      .list_keys(&list_prefix)
      .map_err(|e| client_error("list", self.location(&list_prefix), e))?;

    let names: BTreeSet<ClusterName> = keys
      .iter()
      .filter_map(|key| {
        let name = self.name_from_key(key, &list_prefix);
        if name.is_none() {
          debug!(key, "skipping key that is not a cluster state object");
        }
        name
      })
      .collect();

    Ok(names.into_iter().collect())
  }

  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError> {
    let key = self.key(name);
    match self.client.get_object(&key) {
      Ok(Some(bytes)) => {
        debug!(cluster = %name, key, bytes = bytes.len(), "read snapshot");
        Ok(StateSnapshot::from(bytes))
      }
      Ok(None) => Err(StoreError::NotFound(name.clone())),
      Err(e) => Err(client_error("read", self.location(&key), e)),
    }
  }

  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError> {
    let key = self.key(name);
    self
      .client
      .put_object(&key, snapshot.as_bytes())
      .map_err(|e| client_error("write", self.location(&key), e))?;
    debug!(
      cluster = %name,
      key,
      bytes = snapshot.len(),
      digest = snapshot.digest().short(),
      "wrote snapshot"
    );
    Ok(())
  }

  fn delete(&self, name: &ClusterName) -> Result<(), StoreError> {
    if !self.exists(name)? {
      return Err(StoreError::NotFound(name.clone()));
    }
    let key = self.key(name);
    self
      .client
      .delete_object(&key)
      .map_err(|e| client_error("delete", self.location(&key), e))?;
    debug!(cluster = %name, key, "deleted snapshot");
    Ok(())
  }

  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    let key = self.key(name);
    self
      .client
      .object_exists(&key)
      .map_err(|e| client_error("stat", self.location(&key), e))
  }
}
