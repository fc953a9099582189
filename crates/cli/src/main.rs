mod cmd;
mod output;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::{OutputFormat, print_error};
use store::StoreArgs;

/// clusterstore - inspect and manage persisted cluster state
#[derive(Parser)]
#[command(name = "clusterstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  store: StoreArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List all clusters in the state store
  List {
    /// Print bare cluster names, one per line
    #[arg(short = 'n', long)]
    no_headers: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Print the stored snapshot of a cluster
  Get {
    /// Cluster name
    name: String,
  },

  /// Store a snapshot for a cluster, replacing any previous one
  Put {
    /// Cluster name
    name: String,

    /// Read the snapshot from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
  },

  /// Remove the stored snapshot of a cluster
  Delete {
    /// Cluster name
    name: String,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::List { no_headers, output } => cmd::cmd_list(&cli.store, no_headers, output),
    Commands::Get { name } => cmd::cmd_get(&cli.store, &name),
    Commands::Put { name, file } => cmd::cmd_put(&cli.store, &name, file.as_deref()),
    Commands::Delete { name } => cmd::cmd_delete(&cli.store, &name),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("error: {:#}", e));
      ExitCode::FAILURE
    }
  }
}
