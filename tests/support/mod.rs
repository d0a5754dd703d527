//! Test support utilities for vaultprobe integration tests.
//!
//! Provides reusable test environment setup, a fake secret store, and
//! helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod vault;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use vault::Vault;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. Child processes use
/// `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment whose config points at a property file
    /// holding `rows` for `environment`.
    pub fn with_properties(environment: &str, rows: &[(&str, &str)]) -> Self {
        let t = Self::new();
        t.write_properties(environment, rows);
        t.write_config(FILE_SOURCE_CONFIG);
        t
    }
}
