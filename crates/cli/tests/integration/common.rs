//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the state store.
pub struct TestEnv {
  pub temp: TempDir,
  pub kind: &'static str,
}

impl TestEnv {
  /// Environment for the plain filesystem store.
  pub fn new() -> Self {
    Self::with_kind("fs")
  }

  /// Environment for the given state store kind.
  pub fn with_kind(kind: &'static str) -> Self {
    Self {
      temp: TempDir::new().unwrap(),
      kind,
    }
  }

  /// State store base path (isolated per test, not created up front).
  pub fn state_path(&self) -> PathBuf {
    let root = dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf());
    root.join("_state")
  }

  /// Path of the state file the filesystem layout uses for `name`.
  pub fn state_file(&self, name: &str, file_name: &str) -> PathBuf {
    self.state_path().join(name).join(file_name)
  }

  /// Get a pre-configured Command for the clusterstore binary.
  ///
  /// Selects the store through the environment, the same way a deployment
  /// would, and clears any S3 settings inherited from the host.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("clusterstore");
    cmd.env("CLUSTERSTORE_STATE_STORE", self.kind);
    cmd.env("CLUSTERSTORE_STATE_STORE_PATH", self.state_path());
    for var in [
      "CLUSTERSTORE_S3_ACCESS_KEY",
      "CLUSTERSTORE_S3_SECRET_KEY",
      "CLUSTERSTORE_S3_ENDPOINT",
      "CLUSTERSTORE_S3_LOCATION",
      "CLUSTERSTORE_S3_BUCKET",
      "RUST_LOG",
    ] {
      cmd.env_remove(var);
    }
    cmd
  }

  /// Store the fixture snapshot under `name`.
  pub fn put_fixture(&self, name: &str) {
    self
      .cmd()
      .arg("put")
      .arg(name)
      .arg("--file")
      .arg(fixture_path("cluster.json"))
      .assert()
      .success();
  }
}
