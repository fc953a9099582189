//! S3-compatible object client built on `rust-s3` (blocking flavour).

use std::fmt;

use ::s3::creds::Credentials;
use ::s3::error::S3Error;
use ::s3::{Bucket, BucketConfiguration, Region};
use tracing::debug;

use super::{ClientError, ObjectClient};
use crate::config::ObjectStorageConfig;
use crate::store::StoreError;

/// Path-style client for one bucket on a custom S3 endpoint.
pub struct S3Client {
  name: String,
  endpoint: String,
  bucket: Box<Bucket>,
  region: Region,
  credentials: Credentials,
}

impl S3Client {
  /// Build a client. No request is sent until the first call.
  pub fn new(config: &ObjectStorageConfig) -> Result<Self, StoreError> {
    let endpoint = endpoint_url(&config.endpoint);
    let region = Region::Custom {
      region: config.location().to_string(),
      endpoint: endpoint.clone(),
    };
    let credentials = Credentials::new(
      Some(config.access_key.as_str()),
      Some(config.secret_key.as_str()),
      None,
      None,
      None,
    )
    .map_err(|e| StoreError::Configuration(format!("invalid object storage credentials: {}", e)))?;

    let bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
      .map_err(|e| StoreError::Configuration(format!("invalid bucket '{}': {}", config.bucket, e)))?
      .with_path_style();

    debug!(bucket = %config.bucket, endpoint = %endpoint, "configured object storage client");
    Ok(Self {
      name: config.bucket.clone(),
      endpoint,
      bucket,
      region,
      credentials,
    })
  }
}

impl fmt::Debug for S3Client {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("S3Client")
      .field("bucket", &self.name)
      .field("endpoint", &self.endpoint)
      .finish_non_exhaustive()
  }
}

/// Endpoints given as a bare `host[:port]` are reached over HTTPS.
fn endpoint_url(endpoint: &str) -> String {
  let endpoint = endpoint.trim().trim_end_matches('/');
  if endpoint.contains("://") {
    endpoint.to_string()
  } else {
    format!("https://{}", endpoint)
  }
}

fn classify(err: S3Error) -> ClientError {
  match err {
    S3Error::HttpFailWithBody(403, body) => ClientError::AccessDenied(body),
    S3Error::HttpFailWithBody(status, message) => ClientError::Status { status, message },
    other => ClientError::Transport(Box::new(other)),
  }
}

fn check_status(status: u16, body: &[u8]) -> Result<(), ClientError> {
  match status {
    200..=299 => Ok(()),
    403 => Err(ClientError::AccessDenied(String::from_utf8_lossy(body).into_owned())),
    _ => Err(ClientError::Status {
      status,
      message: String::from_utf8_lossy(body).into_owned(),
    }),
  }
}

impl ObjectClient for S3Client {
  fn bucket(&self) -> &str {
    &self.name
  }

  /// Probes with a one-key listing of this bucket, which keys scoped to a
  /// single bucket are allowed to do.
  fn bucket_exists(&self) -> Result<bool, ClientError> {
    match self.bucket.list_page(String::new(), None, None, None, Some(1)) {
      Ok((_, status)) => check_status(status, &[]).map(|_| true),
      Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
      Err(e) => Err(classify(e)),
    }
  }

  fn create_bucket(&self) -> Result<(), ClientError> {
    let response = Bucket::create_with_path_style(
      &self.name,
      self.region.clone(),
      self.credentials.clone(),
      BucketConfiguration::default(),
    )
    .map_err(classify)?;

    if response.success() {
      Ok(())
    } else {
      check_status(response.response_code, response.response_text.as_bytes())
    }
  }

  fn put_object(&self, key: &str, body: &[u8]) -> Result<(), ClientError> {
    let response = self.bucket.put_object(key, body).map_err(classify)?;
    check_status(response.status_code(), response.bytes())
  }

  fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, ClientError> {
    match self.bucket.get_object(key) {
      Ok(response) if response.status_code() == 404 => Ok(None),
      Ok(response) => {
        check_status(response.status_code(), response.bytes())?;
        Ok(Some(response.bytes().to_vec()))
      }
      Err(S3Error::HttpFailWithBody(404, _)) => Ok(None),
      Err(e) => Err(classify(e)),
    }
  }

  fn object_exists(&self, key: &str) -> Result<bool, ClientError> {
    match self.bucket.head_object(key) {
      Ok((_, 404)) => Ok(false),
      Ok((_, status)) => check_status(status, &[]).map(|_| true),
      Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
      Err(e) => Err(classify(e)),
    }
  }

  fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ClientError> {
    let pages = self.bucket.list(prefix.to_string(), None).map_err(classify)?;
    Ok(
      pages
        .into_iter()
        .flat_map(|page| page.contents)
        .map(|object| object.key)
        .collect(),
    )
  }

  fn delete_object(&self, key: &str) -> Result<(), ClientError> {
    match self.bucket.delete_object(key) {
      // Deleting an absent key is not an error for S3 either.
      Ok(response) if response.status_code() == 404 => Ok(()),
      Ok(response) => check_status(response.status_code(), response.bytes()),
      Err(S3Error::HttpFailWithBody(404, _)) => Ok(()),
      Err(e) => Err(classify(e)),
    }
  }
}
