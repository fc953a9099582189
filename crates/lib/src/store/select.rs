//! Backend construction from configuration.

use tracing::info;

use super::{FilesystemStore, GitStore, JsonFilesystemStore, ObjectStore, StoreError, StoreHandle};
use crate::config::{BackendConfig, BackendKind};

/// Construct the backend named by `kind` from `config`.
///
/// Every configuration problem (a config shaped for a different kind, missing
/// object storage parameters) is reported as `Configuration` before any I/O.
/// Only the object storage backend touches its medium here: it makes sure the
/// bucket exists.
pub fn open_store(kind: BackendKind, config: &BackendConfig) -> Result<StoreHandle, StoreError> {
  if config.kind() != kind {
    return Err(StoreError::Configuration(format!(
      "state store '{}' was given configuration for '{}'",
      kind,
      config.kind()
    )));
  }

  let store: StoreHandle = match config {
    BackendConfig::Filesystem { base_path } => {
      info!(kind = %kind, path = %base_path.display(), "selected state store");
      Box::new(FilesystemStore::new(base_path))
    }
    BackendConfig::Git { base_path } => {
      info!(kind = %kind, path = %base_path.display(), "selected state store");
      Box::new(GitStore::new(base_path))
    }
    BackendConfig::JsonFilesystem { base_path } => {
      info!(kind = %kind, path = %base_path.display(), "selected state store");
      Box::new(JsonFilesystemStore::new(base_path))
    }
    BackendConfig::ObjectStorage(object) => {
      object.validate()?;
      info!(
        kind = %kind,
        endpoint = %object.endpoint,
        bucket = %object.bucket,
        prefix = %object.base_path,
        "selected state store"
      );
      Box::new(ObjectStore::connect(object)?)
    }
  };
  Ok(store)
}
