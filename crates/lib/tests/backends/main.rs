//! Public API tests for clusterstore-lib backends.

mod common;

mod interchange_tests;
mod selection_tests;
