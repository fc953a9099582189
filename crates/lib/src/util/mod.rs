//! Shared utilities.
//!
//! Content hashing for snapshot digests, plus test helpers.

pub mod hash;
