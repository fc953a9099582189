use std::path::Path;

use clusterstore_lib::{BackendConfig, BackendKind, ClusterName, StateSnapshot, StoreHandle, open_store};

pub fn name(s: &str) -> ClusterName {
  ClusterName::new(s).unwrap()
}

pub fn snapshot(cloud: &str) -> StateSnapshot {
  StateSnapshot::from_json(&serde_json::json!({ "name": "prod", "cloud": cloud })).unwrap()
}

/// Open a directory-backed store of `kind` rooted at `base`.
pub fn open_local(kind: BackendKind, base: &Path) -> StoreHandle {
  let config = BackendConfig::local(kind, base).unwrap();
  open_store(kind, &config).unwrap()
}
