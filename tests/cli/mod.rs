//! CLI command integration tests
//!
//! Each test builds a throwaway vault, runs the `namevault` binary inside it
//! and checks stdout, exit codes and the files left behind.

pub mod build_tests;
pub mod export_tests;
pub mod maintain_tests;
pub mod query_tests;
