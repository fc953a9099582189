//! Delete command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn delete_removes_cluster() {
  let env = TestEnv::new();
  env.put_fixture("prod");
  env.put_fixture("dev");

  env
    .cmd()
    .args(["delete", "prod"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Deleted cluster prod"));

  assert!(!env.state_path().join("prod").exists());
  env.cmd().args(["list", "-n"]).assert().success().stdout("dev\n");
  env.cmd().args(["get", "prod"]).assert().failure();
}

#[test]
fn delete_missing_cluster_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["delete", "ghost"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}
