//! Filesystem state store.
//!
//! # Layout
//!
//! ```text
//! <base>/
//! ├── prod/
//! │   └── cluster.state
//! └── dev/
//!     └── cluster.state
//! ```
//!
//! Writes go to a temp file in the cluster directory which is then renamed over
//! the state file, so a crash mid-write never exposes a partial snapshot.
//! Concurrent writers race at the rename; the last one wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{ClusterStore, StoreError};
use crate::cluster::ClusterName;
use crate::config::BackendKind;
use crate::consts::STATE_FILENAME;
use crate::snapshot::StateSnapshot;

/// Stores each cluster as `<base>/<cluster>/<state file>`.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
  base_path: PathBuf,
  file_name: &'static str,
}

impl FilesystemStore {
  /// Create a store rooted at `base_path`. Nothing is touched on disk until the first write.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self::with_file_name(base_path, STATE_FILENAME)
  }

  pub(crate) fn with_file_name(base_path: impl Into<PathBuf>, file_name: &'static str) -> Self {
    Self {
      base_path: base_path.into(),
      file_name,
    }
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  /// Name of the file holding each snapshot.
  pub fn file_name(&self) -> &'static str {
    self.file_name
  }

  /// Directory holding everything stored for `name`.
  pub fn cluster_dir(&self, name: &ClusterName) -> PathBuf {
    self.base_path.join(name.as_str())
  }

  /// Path of the snapshot file for `name`.
  pub fn state_path(&self, name: &ClusterName) -> PathBuf {
    self.cluster_dir(name).join(self.file_name)
  }

  /// Path of the snapshot file relative to the base path, with `/` separators.
  pub fn relative_state_path(&self, name: &ClusterName) -> String {
    format!("{}/{}", name, self.file_name)
  }

  fn location(&self) -> String {
    self.base_path.display().to_string()
  }
}

impl ClusterStore for FilesystemStore {
  fn kind(&self) -> BackendKind {
    BackendKind::Filesystem
  }

  fn list(&self) -> Result<Vec<ClusterName>, StoreError> {
    let entries = match fs::read_dir(&self.base_path) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %self.base_path.display(), "base path does not exist yet");
        return Ok(Vec::new());
      }
      Err(e) => return Err(StoreError::from_io("list", self.location(), e)),
    };

    let mut names = Vec::new();
    for entry in entries {
      let entry = entry.map_err(|e| StoreError::from_io("list", self.location(), e))?;
      let file_name = entry.file_name();

      let Some(raw) = file_name.to_str() else {
        debug!(entry = ?file_name, "skipping non-UTF-8 entry");
        continue;
      };
      if raw.starts_with('.') {
        continue;
      }

      let path = entry.path();
      if !path.is_dir() || !path.join(self.file_name).is_file() {
        debug!(entry = raw, "skipping entry without a state file");
        continue;
      }

      match ClusterName::new(raw) {
        Ok(name) => names.push(name),
        Err(e) => debug!(entry = raw, error = %e, "skipping entry that is not a cluster name"),
      }
    }

    names.sort();
    names.dedup();
    Ok(names)
  }

  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError> {
    let path = self.state_path(name);
    let bytes = fs::read(&path).map_err(|e| StoreError::from_io_for(name, "read", path.display().to_string(), e))?;
    debug!(cluster = %name, path = %path.display(), bytes = bytes.len(), "read snapshot");
    Ok(StateSnapshot::from(bytes))
  }

  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError> {
    let dir = self.cluster_dir(name);
    let path = dir.join(self.file_name);
    let location = path.display().to_string();

    fs::create_dir_all(&dir).map_err(|e| StoreError::from_io("create", dir.display().to_string(), e))?;

    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::from_io("write", location.clone(), e))?;
    temp
      .write_all(snapshot.as_bytes())
      .and_then(|_| temp.as_file().sync_all())
      .map_err(|e| StoreError::from_io("write", location.clone(), e))?;
    temp
      .persist(&path)
      .map_err(|e| StoreError::from_io("write", location, e.error))?;

    debug!(
      cluster = %name,
      path = %path.display(),
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

    let dir = self.cluster_dir(name);
    fs::remove_dir_all(&dir).map_err(|e| StoreError::from_io_for(name, "delete", dir.display().to_string(), e))?;

    debug!(cluster = %name, path = %dir.display(), "deleted snapshot");
    Ok(())
  }

  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    let path = self.state_path(name);
    match fs::metadata(&path) {
      Ok(meta) => Ok(meta.is_file()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(e) => Err(StoreError::from_io("stat", path.display().to_string(), e)),
    }
  }
}
