//! Implementation of the `clusterstore delete` command.

use anyhow::Result;

use clusterstore_lib::{ClusterName, ClusterStore};

use crate::output::print_success;
use crate::store::StoreArgs;

pub fn cmd_delete(args: &StoreArgs, name: &str) -> Result<()> {
  let name = ClusterName::new(name)?;
  let store = args.open()?;
  store.delete(&name)?;
  print_success(&format!("Deleted cluster {}", name));
  Ok(())
}
