//! Test support utilities for scopespread integration tests.
//!
//! Provides space fixtures, an isolated CLI environment and assertions.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod platforms;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use platforms::*;

use std::path::PathBuf;

use scopespread::{SnapshotFile, SpaceSnapshot};
use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// Child processes use `.current_dir()`, so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment holding `space` as `space.json`.
    pub fn with_space(space: &SpaceSnapshot) -> Self {
        let t = Self::new();
        SnapshotFile::write(&t.snapshot_path(), space).expect("failed to write snapshot");
        t
    }

    /// Path of the snapshot file inside the test directory.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("space.json")
    }

    /// Current contents of the snapshot file.
    pub fn space(&self) -> SpaceSnapshot {
        SnapshotFile::open(self.snapshot_path())
            .expect("failed to read snapshot")
            .space()
            .clone()
    }

    /// Write a `.scopespread.toml` into the test directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join(".scopespread.toml"), contents)
            .expect("failed to write config");
    }
}
