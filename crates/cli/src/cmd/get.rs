//! Implementation of the `clusterstore get` command.

use std::io::Write;

use anyhow::{Context, Result};

use clusterstore_lib::{ClusterName, ClusterStore};

use crate::store::StoreArgs;

/// Write the stored snapshot of `name` to stdout, byte for byte.
pub fn cmd_get(args: &StoreArgs, name: &str) -> Result<()> {
  let name = ClusterName::new(name)?;
  let store = args.open()?;
  let snapshot = store.read(&name)?;

  let mut stdout = std::io::stdout().lock();
  stdout
    .write_all(snapshot.as_bytes())
    .context("Failed to write snapshot to stdout")?;
  stdout.flush().context("Failed to write snapshot to stdout")?;
  Ok(())
}
