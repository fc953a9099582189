//! State store selection integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

#[test]
fn unknown_store_kind_fails() {
  let env = TestEnv::with_kind("dropbox");

  env
    .cmd()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown state store 'dropbox'"));
}

#[test]
fn flag_overrides_environment() {
  let env = TestEnv::with_kind("dropbox");

  env
    .cmd()
    .args(["--state-store", "fs", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Selected [fs] state store"));
}

#[test]
fn s3_without_parameters_fails_before_connecting() {
  let env = TestEnv::with_kind("s3");

  env
    .cmd()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("object storage requires"));
}

#[test]
fn jsonfs_stores_json_documents() {
  let env = TestEnv::with_kind("jsonfs");
  env.put_fixture("prod");

  assert!(env.state_file("prod", "cluster.json").is_file());
  env
    .cmd()
    .args(["get", "prod"])
    .assert()
    .success()
    .stdout(fixture_content("cluster.json"));
}

#[test]
fn jsonfs_rejects_non_json() {
  let env = TestEnv::with_kind("jsonfs");

  env
    .cmd()
    .args(["put", "prod"])
    .write_stdin("not json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("corrupt"));

  env.cmd().args(["list", "-n"]).assert().success().stdout("");
}

#[test]
fn error_causes_are_printed_once() {
  let env = TestEnv::with_kind("jsonfs");

  let output = env.cmd().args(["put", "prod"]).write_stdin("not json").output().unwrap();
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("snapshot for cluster 'prod' is corrupt: "), "stderr: {}", stderr);
  assert_eq!(stderr.matches("line 1 column").count(), 1, "stderr: {}", stderr);
}

#[test]
fn git_store_commits_changes() {
  let env = TestEnv::with_kind("git");
  env.put_fixture("prod");

  assert!(env.state_path().join(".git").is_dir());
  assert!(env.state_file("prod", "cluster.state").is_file());

  env
    .cmd()
    .args(["list", "-n"])
    .assert()
    .success()
    .stdout("prod\n");

  env.cmd().args(["delete", "prod"]).assert().success();
  env.cmd().args(["list", "-n"]).assert().success().stdout("");
}

#[test]
fn verbose_logs_go_to_stderr() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["--verbose", "list", "-n"])
    .assert()
    .success()
    .stdout("")
    .stderr(predicate::str::contains("selected state store"));
}
