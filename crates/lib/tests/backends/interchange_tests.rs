//! Several handles on the same medium see each other's changes.

use clusterstore_lib::{BackendKind, ClusterStore, ErrorKind, StateSnapshot};
use tempfile::TempDir;

use super::common::{name, open_local, snapshot};

#[test]
fn second_handle_observes_writes() {
  let temp = TempDir::new().unwrap();
  let writer = open_local(BackendKind::Filesystem, temp.path());
  let reader = open_local(BackendKind::Filesystem, temp.path());

  writer.write(&name("prod"), &snapshot("aws")).unwrap();
  assert_eq!(reader.read(&name("prod")).unwrap(), snapshot("aws"));

  writer.delete(&name("prod")).unwrap();
  assert!(reader.list().unwrap().is_empty());
}

#[test]
fn git_working_tree_is_readable_as_plain_filesystem() {
  let temp = TempDir::new().unwrap();
  let git = open_local(BackendKind::Git, temp.path());
  let plain = open_local(BackendKind::Filesystem, temp.path());

  git.write(&name("prod"), &snapshot("aws")).unwrap();
  git.write(&name("dev"), &snapshot("gcp")).unwrap();

  assert_eq!(plain.list().unwrap(), vec![name("dev"), name("prod")]);
  assert_eq!(plain.read(&name("dev")).unwrap(), snapshot("gcp"));
}

#[test]
fn jsonfs_refuses_snapshots_it_cannot_decode() {
  let temp = TempDir::new().unwrap();
  let store = open_local(BackendKind::JsonFilesystem, temp.path());

  let err = store
    .write(&name("prod"), &StateSnapshot::from("definitely not json"))
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::CorruptSnapshot);
  assert!(store.list().unwrap().is_empty());
}

#[test]
fn rename_moves_between_names() {
  let temp = TempDir::new().unwrap();
  let store = open_local(BackendKind::Git, temp.path());

  store.write(&name("old"), &snapshot("aws")).unwrap();
  store.rename(&name("old"), &name("new")).unwrap();

  assert_eq!(store.list().unwrap(), vec![name("new")]);
  assert_eq!(store.read(&name("new")).unwrap(), snapshot("aws"));
}
