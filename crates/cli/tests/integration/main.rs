//! CLI integration tests against real state stores on disk.

mod common;

mod delete_tests;
mod get_put_tests;
mod list_tests;
mod store_selection_tests;
