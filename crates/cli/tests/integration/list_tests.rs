//! List command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_on_missing_store_is_empty() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("Selected [fs] state store"))
    .stdout(predicate::str::contains("No clusters found"));

  assert!(!env.state_path().exists(), "listing must not create the store");
}

#[test]
fn list_shows_stored_clusters_sorted() {
  let env = TestEnv::new();
  for name in ["staging", "dev", "prod"] {
    env.put_fixture(name);
  }

  env
    .cmd()
    .arg("list")
    .arg("--no-headers")
    .assert()
    .success()
    .stdout("dev\nprod\nstaging\n");
}

#[test]
fn list_with_headers_decorates_names() {
  let env = TestEnv::new();
  env.put_fixture("prod");

  env
    .cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("Selected [fs] state store"))
    .stdout(predicate::str::contains("prod"));
}

#[test]
fn list_skips_foreign_directories() {
  let env = TestEnv::new();
  env.put_fixture("prod");
  std::fs::create_dir_all(env.state_path().join("not-a-cluster")).unwrap();
  std::fs::create_dir_all(env.state_path().join(".hidden")).unwrap();
  std::fs::write(env.state_path().join("README"), "notes").unwrap();

  env
    .cmd()
    .args(["list", "-n"])
    .assert()
    .success()
    .stdout("prod\n");
}

#[test]
fn list_as_json() {
  let env = TestEnv::new();
  env.put_fixture("prod");

  let output = env.cmd().args(["list", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value["store"], "fs");
  assert_eq!(value["clusters"], serde_json::json!(["prod"]));
}
