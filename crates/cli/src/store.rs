//! State store flags shared by every command.

use anyhow::{Context, Result};
use clap::Args;

use clusterstore_lib::platform::paths::expand_path;
use clusterstore_lib::{BackendConfig, BackendKind, ObjectStorageConfig, StoreHandle, open_store};

#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
  /// State store backend: fs, git, jsonfs or s3
  #[arg(short = 's', long, global = true, env = "CLUSTERSTORE_STATE_STORE", default_value = "fs")]
  pub state_store: String,

  /// Base path of the state store (key prefix for s3)
  #[arg(
    short = 'S',
    long,
    global = true,
    env = "CLUSTERSTORE_STATE_STORE_PATH",
    default_value = "./_state"
  )]
  pub state_store_path: String,

  /// S3 access key
  #[arg(long, global = true, env = "CLUSTERSTORE_S3_ACCESS_KEY", default_value = "", hide_env_values = true)]
  pub s3_access: String,

  /// S3 secret key
  #[arg(long, global = true, env = "CLUSTERSTORE_S3_SECRET_KEY", default_value = "", hide_env_values = true)]
  pub s3_secret: String,

  /// S3 endpoint, `host[:port]` or a full URL
  #[arg(long, global = true, env = "CLUSTERSTORE_S3_ENDPOINT", default_value = "")]
  pub s3_endpoint: String,

  /// S3 bucket region (defaults to us-east-1)
  #[arg(long, global = true, env = "CLUSTERSTORE_S3_LOCATION", default_value = "")]
  pub s3_location: String,

  /// S3 bucket
  #[arg(long, global = true, env = "CLUSTERSTORE_S3_BUCKET", default_value = "")]
  pub s3_bucket: String,
}

impl StoreArgs {
  pub fn kind(&self) -> Result<BackendKind> {
    Ok(self.state_store.parse::<BackendKind>()?)
  }

  pub fn backend_config(&self) -> Result<BackendConfig> {
    let kind = self.kind()?;
    if kind.is_local() {
      return Ok(BackendConfig::local(kind, expand_path(&self.state_store_path))?);
    }
    Ok(BackendConfig::ObjectStorage(ObjectStorageConfig {
      base_path: self.state_store_path.clone(),
      endpoint: self.s3_endpoint.clone(),
      access_key: self.s3_access.clone(),
      secret_key: self.s3_secret.clone(),
      bucket: self.s3_bucket.clone(),
      location: self.s3_location.clone(),
    }))
  }

  /// Build the configured backend.
  pub fn open(&self) -> Result<StoreHandle> {
    let kind = self.kind()?;
    let config = self.backend_config()?;
    open_store(kind, &config).with_context(|| format!("Failed to open the {} state store", kind))
  }
}
