//! clusterstore-lib: pluggable state stores for cluster configuration snapshots.
//!
//! Every backend implements [`store::ClusterStore`], so the tooling that creates,
//! applies, lists and deletes clusters never needs to know where state lives:
//! - `fs`: one directory per cluster under a base path
//! - `git`: the `fs` layout inside a git repository, one commit per change
//! - `jsonfs`: the `fs` layout with every snapshot enforced to be JSON
//! - `s3`: one object per cluster in an S3-compatible bucket
//!
//! Use [`store::open_store`] to turn a [`config::BackendKind`] and a
//! [`config::BackendConfig`] into a ready-to-use [`store::StoreHandle`].

pub mod cluster;
pub mod config;
pub mod consts;
pub mod platform;
pub mod snapshot;
pub mod store;
pub mod util;

pub use cluster::ClusterName;
pub use config::{BackendConfig, BackendKind, ObjectStorageConfig};
pub use snapshot::StateSnapshot;
pub use store::{ClusterStore, ErrorKind, StoreError, StoreHandle, open_store};
