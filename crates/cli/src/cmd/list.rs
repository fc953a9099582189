//! Implementation of the `clusterstore list` command.

use anyhow::{Context, Result};

use clusterstore_lib::ClusterStore;

use crate::output::{OutputFormat, print_info, print_item, print_json};
use crate::store::StoreArgs;

/// List every cluster in the configured state store.
///
/// With headers, prints which store was selected followed by one decorated line
/// per cluster. Without headers, prints bare names so the output can be piped.
pub fn cmd_list(args: &StoreArgs, no_headers: bool, output: OutputFormat) -> Result<()> {
  let store = args.open()?;
  let names = store.list().context("Failed to list clusters")?;

  if output.is_json() {
    let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    return print_json(&serde_json::json!({
      "store": store.kind(),
      "clusters": names,
    }));
  }

  if no_headers {
    for name in &names {
      println!("{}", name);
    }
    return Ok(());
  }

  print_info(&format!("Selected [{}] state store", store.kind()));
  if names.is_empty() {
    print_info("No clusters found.");
  }
  for name in &names {
    print_item(name.as_str());
  }
  Ok(())
}
