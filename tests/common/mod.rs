//! Common test utilities and fixtures for namevault integration tests
//!
//! This module provides:
//! - `TestVault` builder for creating shard directories with various layouts
//! - Custom assertions for validating CLI output

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;
pub mod test_vault;

pub use assertions::*;
pub use test_vault::TestVault;
