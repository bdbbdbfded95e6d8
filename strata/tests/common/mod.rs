//! Common test utilities for integration tests.
//!
//! This module provides a small fixture builder for laying out directory
//! trees with per-directory configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree populated for a test.
///
/// The tree is removed when the fixture is dropped.
pub struct TreeFixture {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a `/`-separated relative path in the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root().to_path_buf(), |acc, part| acc.join(part))
    }

    /// Writes a file, creating parent directories as needed.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
        self
    }

    /// Creates a directory (and its parents).
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).expect("Failed to create directory");
        self
    }

    /// Writes a `summarize.json` with the given `excludes` into a directory.
    ///
    /// Use `""` for the root directory.
    pub fn excludes(self, dir: &str, patterns: &[&str]) -> Self {
        let body = serde_json::json!({ "excludes": patterns }).to_string();
        let relative = if dir.is_empty() {
            "summarize.json".to_string()
        } else {
            format!("{dir}/summarize.json")
        };
        self.file(&relative, &body)
    }
}
