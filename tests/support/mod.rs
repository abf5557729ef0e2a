//! Test support utilities for vault-handler integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// `dir` doubles as input and output directory; `home` keeps the binary away
/// from the real `~/.kube/config`. Child processes use `.current_dir()`, so
/// tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment holding a manifest and its input files.
    pub fn with_files(manifest: &str, files: &[(&str, &[u8])]) -> Self {
        let t = Self::new();
        t.write(MANIFEST_FILE, manifest.as_bytes());
        for (name, content) in files {
            t.write(name, content);
        }
        t
    }

    /// Project directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the project directory.
    pub fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Read a file under the project directory.
    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(name)).expect("failed to read test file")
    }
}
