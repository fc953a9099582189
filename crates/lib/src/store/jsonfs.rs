//! JSON filesystem state store.
//!
//! Same layout as [`FilesystemStore`](super::FilesystemStore) but the state file is
//! `cluster.json` and every snapshot must be a single JSON document. Snapshots are
//! stored verbatim; the JSON check only guards what goes in and what comes out.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::{ClusterStore, FilesystemStore, StoreError};
use crate::cluster::ClusterName;
use crate::config::BackendKind;
use crate::consts::JSON_STATE_FILENAME;
use crate::snapshot::StateSnapshot;

#[derive(Debug, Clone)]
pub struct JsonFilesystemStore {
  files: FilesystemStore,
}

impl JsonFilesystemStore {
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      files: FilesystemStore::with_file_name(base_path, JSON_STATE_FILENAME),
    }
  }

  pub fn base_path(&self) -> &Path {
    self.files.base_path()
  }

  pub fn state_path(&self, name: &ClusterName) -> PathBuf {
    self.files.state_path(name)
  }
}

impl ClusterStore for JsonFilesystemStore {
  fn kind(&self) -> BackendKind {
    BackendKind::JsonFilesystem
  }

  fn list(&self) -> Result<Vec<ClusterName>, StoreError> {
    self.files.list()
  }

  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError> {
    let snapshot = self.files.read(name)?;
    if let Err(e) = snapshot.validate_json() {
      warn!(cluster = %name, path = %self.state_path(name).display(), error = %e, "stored snapshot is not valid JSON");
      return Err(StoreError::corrupt(name, e));
    }
    Ok(snapshot)
  }

  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError> {
    snapshot.validate_json().map_err(|e| StoreError::corrupt(name, e))?;
    self.files.write(name, snapshot)
  }

  fn delete(&self, name: &ClusterName) -> Result<(), StoreError> {
    self.files.delete(name)
  }

  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    self.files.exists(name)
  }
}
