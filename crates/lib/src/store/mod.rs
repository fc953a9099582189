//! State store backends.
//!
//! Every backend implements [`ClusterStore`]. Each one maps a [`ClusterName`] to
//! a location in its own medium:
//!
//! ```text
//! fs / git:  <base>/<cluster>/cluster.state
//! jsonfs:    <base>/<cluster>/cluster.json
//! s3:        <bucket>/<prefix>/<cluster>/cluster.state
//! ```
//!
//! The `git` base directory is also a git repository; every change to a
//! cluster's state file is committed on `HEAD`.

mod error;
pub mod fs;
pub mod git;
pub mod jsonfs;
pub mod object;
mod select;

use std::fmt;

pub use error::{BoxError, ErrorKind, StoreError};
pub use fs::FilesystemStore;
pub use git::GitStore;
pub use jsonfs::JsonFilesystemStore;
pub use object::{MemoryClient, ObjectClient, ObjectStore, S3Client};
pub use select::open_store;

use crate::cluster::ClusterName;
use crate::config::BackendKind;
use crate::snapshot::StateSnapshot;

/// A constructed, ready-to-use backend.
pub type StoreHandle = Box<dyn ClusterStore>;

/// The contract every state store backend satisfies.
///
/// All calls block. Nothing is cached between calls, so a read only observes a
/// write made by another process if the medium itself makes it visible.
pub trait ClusterStore: fmt::Debug + Send + Sync {
  /// Which backend this is.
  fn kind(&self) -> BackendKind;

  /// Names of all clusters currently persisted, sorted and without duplicates.
  ///
  /// An empty or missing base location yields an empty list, not an error.
  fn list(&self) -> Result<Vec<ClusterName>, StoreError>;

  /// Read the snapshot stored under `name`.
  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError>;

  /// Store `snapshot` under `name`, replacing any previous snapshot.
  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError>;

  /// Remove the snapshot stored under `name`.
  fn delete(&self, name: &ClusterName) -> Result<(), StoreError>;

  /// Whether a snapshot is stored under `name`.
  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    match self.read(name) {
      Ok(_) => Ok(true),
      Err(e) if e.is_not_found() => Ok(false),
      Err(e) => Err(e),
    }
  }

  /// Move the snapshot stored under `from` to `to`.
  ///
  /// Not atomic: a failure after the write leaves the snapshot under both names.
  fn rename(&self, from: &ClusterName, to: &ClusterName) -> Result<(), StoreError> {
    if from == to {
      return self.read(from).map(|_| ());
    }
    let snapshot = self.read(from)?;
    self.write(to, &snapshot)?;
    self.delete(from)
  }
}

impl<T: ClusterStore + ?Sized> ClusterStore for Box<T> {
  fn kind(&self) -> BackendKind {
    (**self).kind()
  }

  fn list(&self) -> Result<Vec<ClusterName>, StoreError> {
    (**self).list()
  }

  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError> {
    (**self).read(name)
  }

  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError> {
    (**self).write(name, snapshot)
  }

  fn delete(&self, name: &ClusterName) -> Result<(), StoreError> {
    (**self).delete(name)
  }

  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    (**self).exists(name)
  }

  fn rename(&self, from: &ClusterName, to: &ClusterName) -> Result<(), StoreError> {
    (**self).rename(from, to)
  }
}
