//! Implementation of the `clusterstore put` command.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use clusterstore_lib::{ClusterName, ClusterStore, StateSnapshot};

use crate::output::{format_bytes, print_success};
use crate::store::StoreArgs;

/// Store a snapshot for `name`, read from `file` or from stdin.
pub fn cmd_put(args: &StoreArgs, name: &str, file: Option<&Path>) -> Result<()> {
  let name = ClusterName::new(name)?;
  let bytes = match file {
    Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
    None => {
      let mut buf = Vec::new();
      std::io::stdin()
        .read_to_end(&mut buf)
        .context("Failed to read snapshot from stdin")?;
      buf
    }
  };
  let snapshot = StateSnapshot::from(bytes);
  debug!(cluster = %name, digest = %snapshot.digest(), "storing snapshot");

  let store = args.open()?;
  store.write(&name, &snapshot)?;

  print_success(&format!(
    "Stored cluster {} ({})",
    name,
    format_bytes(snapshot.len() as u64)
  ));
  Ok(())
}
