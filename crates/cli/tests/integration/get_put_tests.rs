//! Get and put command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

#[test]
fn put_then_get_returns_identical_bytes() {
  let env = TestEnv::new();
  env.put_fixture("prod");

  env
    .cmd()
    .args(["get", "prod"])
    .assert()
    .success()
    .stdout(fixture_content("cluster.json"));

  assert!(env.state_file("prod", "cluster.state").is_file());
}

#[test]
fn put_reads_stdin() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["put", "dev"])
    .write_stdin("opaque state\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Stored cluster dev"));

  env.cmd().args(["get", "dev"]).assert().success().stdout("opaque state\n");
}

#[test]
fn put_overwrites_previous_snapshot() {
  let env = TestEnv::new();
  env.put_fixture("prod");

  env.cmd().args(["put", "prod"]).write_stdin("{}").assert().success();

  env.cmd().args(["get", "prod"]).assert().success().stdout("{}");
}

#[test]
fn get_missing_cluster_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["get", "ghost"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("error:"))
    .stderr(predicate::str::contains("cluster 'ghost' not found"));
}

#[test]
fn invalid_cluster_name_is_rejected() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["put", "../escape"])
    .write_stdin("{}")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid cluster name"));

  assert!(!env.state_path().exists());
}

#[test]
fn put_missing_file_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["put", "prod", "--file"])
    .arg(env.temp.path().join("nope.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read"));
}
