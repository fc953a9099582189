//! In-process object client.
//!
//! Clones share the same buckets, so a test can hand one clone to an
//! [`ObjectStore`](super::ObjectStore) and inspect or tamper with the bucket
//! through another.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ClientError, ObjectClient};

#[derive(Debug, Default)]
struct Buckets {
  objects: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
  deny_writes: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryClient {
  bucket: String,
  state: Arc<Mutex<Buckets>>,
}

impl MemoryClient {
  /// A client for `bucket`, which does not exist yet.
  pub fn new(bucket: impl Into<String>) -> Self {
    Self {
      bucket: bucket.into(),
      state: Arc::default(),
    }
  }

  /// A client for `bucket`, which already exists and is empty.
  pub fn with_bucket(bucket: impl Into<String>) -> Self {
    let client = Self::new(bucket);
    if let Ok(mut state) = client.state() {
      state.objects.insert(client.bucket.clone(), BTreeMap::new());
    }
    client
  }

  /// Make every mutating request fail with `AccessDenied`.
  pub fn set_deny_writes(&self, deny: bool) {
    if let Ok(mut state) = self.state() {
      state.deny_writes = deny;
    }
  }

  /// All keys currently in the bucket, sorted.
  pub fn keys(&self) -> Vec<String> {
    self
      .state()
      .ok()
      .and_then(|state| state.objects.get(&self.bucket).map(|b| b.keys().cloned().collect()))
      .unwrap_or_default()
  }

  fn state(&self) -> Result<MutexGuard<'_, Buckets>, ClientError> {
    self
      .state
      .lock()
      .map_err(|_| ClientError::Transport("memory client state poisoned".into()))
  }

  fn check_writable(&self, state: &Buckets) -> Result<(), ClientError> {
    if state.deny_writes {
      return Err(ClientError::AccessDenied(format!("writes to bucket '{}' are denied", self.bucket)));
    }
    Ok(())
  }

  fn no_such_bucket(&self) -> ClientError {
    ClientError::Status {
      status: 404,
      message: format!("bucket '{}' does not exist", self.bucket),
    }
  }
}

impl ObjectClient for MemoryClient {
  fn bucket(&self) -> &str {
    &self.bucket
  }

  fn bucket_exists(&self) -> Result<bool, ClientError> {
    Ok(self.state()?.objects.contains_key(&self.bucket))
  }

  fn create_bucket(&self) -> Result<(), ClientError> {
    let mut state = self.state()?;
    self.check_writable(&state)?;
    state.objects.entry(self.bucket.clone()).or_default();
    Ok(())
  }

  fn put_object(&self, key: &str, body: &[u8]) -> Result<(), ClientError> {
    let mut state = self.state()?;
    self.check_writable(&state)?;
    let bucket = state.objects.get_mut(&self.bucket).ok_or_else(|| self.no_such_bucket())?;
    bucket.insert(key.to_string(), body.to_vec());
    Ok(())
  }

  fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, ClientError> {
    let state = self.state()?;
    let bucket = state.objects.get(&self.bucket).ok_or_else(|| self.no_such_bucket())?;
    Ok(bucket.get(key).cloned())
  }

  fn object_exists(&self, key: &str) -> Result<bool, ClientError> {
    let state = self.state()?;
    let bucket = state.objects.get(&self.bucket).ok_or_else(|| self.no_such_bucket())?;
    Ok(bucket.contains_key(key))
  }

  fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ClientError> {
    let state = self.state()?;
    let bucket = state.objects.get(&self.bucket).ok_or_else(|| self.no_such_bucket())?;
    Ok(bucket.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
  }

  fn delete_object(&self, key: &str) -> Result<(), ClientError> {
    let mut state = self.state()?;
    self.check_writable(&state)?;
    let bucket = state.objects.get_mut(&self.bucket).ok_or_else(|| self.no_such_bucket())?;
    bucket.remove(key);
    Ok(())
  }
}
