//! Store error types.

use std::io;

use thiserror::Error;

use crate::cluster::ClusterName;

/// Boxed error from an underlying medium (gix, the S3 client, ...).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by every store operation.
#[derive(Debug, Error)]
pub enum StoreError {
  /// No snapshot is stored under this name.
  #[error("cluster '{0}' not found")]
  NotFound(ClusterName),

  /// The snapshot exists but cannot be decoded.
  #[error("snapshot for cluster '{name}' is corrupt")]
  CorruptSnapshot {
    name: ClusterName,
    #[source]
    source: BoxError,
  },

  /// The medium rejected the operation due to access rights.
  #[error("permission denied while trying to {op} '{location}'")]
  PermissionDenied {
    op: &'static str,
    location: String,
    #[source]
    source: BoxError,
  },

  /// The medium could not be reached, or failed while serving the request.
  #[error("failed to {op} '{location}'")]
  Unreachable {
    op: &'static str,
    location: String,
    #[source]
    source: BoxError,
  },

  /// Backend kind or parameters are invalid. Raised before any I/O.
  #[error("invalid store configuration: {0}")]
  Configuration(String),

  /// A cluster name failed validation.
  #[error("invalid cluster name '{name}': {reason}")]
  InvalidName { name: String, reason: String },
}

/// The coarse failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  CorruptSnapshot,
  PermissionDenied,
  BackendUnreachable,
  Configuration,
}

impl StoreError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      StoreError::NotFound(_) => ErrorKind::NotFound,
      StoreError::CorruptSnapshot { .. } => ErrorKind::CorruptSnapshot,
      StoreError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
      StoreError::Unreachable { .. } => ErrorKind::BackendUnreachable,
      StoreError::Configuration(_) | StoreError::InvalidName { .. } => ErrorKind::Configuration,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.kind() == ErrorKind::NotFound
  }

  pub(crate) fn unreachable(op: &'static str, location: impl Into<String>, source: impl Into<BoxError>) -> Self {
    StoreError::Unreachable {
      op,
      location: location.into(),
      source: source.into(),
    }
  }

  pub(crate) fn permission_denied(op: &'static str, location: impl Into<String>, source: impl Into<BoxError>) -> Self {
    StoreError::PermissionDenied {
      op,
      location: location.into(),
      source: source.into(),
    }
  }

  pub(crate) fn corrupt(name: &ClusterName, source: impl Into<BoxError>) -> Self {
    StoreError::CorruptSnapshot {
      name: name.clone(),
      source: source.into(),
    }
  }

  /// Classify an I/O error on a path that is not addressed by cluster name.
  ///
  /// A missing path here is an environment problem, not a missing cluster.
  pub(crate) fn from_io(op: &'static str, location: impl Into<String>, err: io::Error) -> Self {
    match err.kind() {
      io::ErrorKind::PermissionDenied => Self::permission_denied(op, location, err),
      _ => Self::unreachable(op, location, err),
    }
  }

  /// Classify an I/O error on the file backing `name`.
  pub(crate) fn from_io_for(name: &ClusterName, op: &'static str, location: impl Into<String>, err: io::Error) -> Self {
    match err.kind() {
      io::ErrorKind::NotFound => StoreError::NotFound(name.clone()),
      _ => Self::from_io(op, location, err),
    }
  }
}
