//! Backend selection through `open_store`.

use std::path::PathBuf;

use clusterstore_lib::{BackendConfig, BackendKind, ClusterStore, ErrorKind, ObjectStorageConfig, open_store};
use tempfile::TempDir;

use super::common::{name, open_local, snapshot};

#[test]
fn every_local_kind_honours_the_contract() {
  for kind in [BackendKind::Filesystem, BackendKind::Git, BackendKind::JsonFilesystem] {
    let temp = TempDir::new().unwrap();
    let store = open_local(kind, temp.path());
    let prod = name("prod");

    assert!(store.list().unwrap().is_empty(), "{} should start empty", kind);
    store.write(&prod, &snapshot("aws")).unwrap();
    store.write(&prod, &snapshot("gcp")).unwrap();
    assert_eq!(store.read(&prod).unwrap(), snapshot("gcp"), "{} should keep last write", kind);
    assert_eq!(store.list().unwrap(), vec![prod.clone()]);

    store.delete(&prod).unwrap();
    assert_eq!(store.read(&prod).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(store.delete(&prod).unwrap_err().kind(), ErrorKind::NotFound);
  }
}

#[test]
fn kind_and_config_must_agree() {
  let config = BackendConfig::JsonFilesystem {
    base_path: PathBuf::from("_state"),
  };
  let err = open_store(BackendKind::Filesystem, &config).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn object_storage_parameters_are_checked_first() {
  let config = BackendConfig::ObjectStorage(ObjectStorageConfig {
    base_path: "_state".to_string(),
    ..Default::default()
  });
  let err = open_store(BackendKind::ObjectStorage, &config).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn unknown_kind_is_a_configuration_error() {
  let err = "ftp".parse::<BackendKind>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Configuration);
}
