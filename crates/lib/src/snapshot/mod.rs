//! Cluster state snapshots.
//!
//! A snapshot is the full configuration of one cluster at a point in time. The
//! store layer treats it as an opaque, immutable blob: it is stored and returned
//! byte-for-byte, and only the JSON backend looks inside (to check it parses).

mod types;

pub use types::*;
