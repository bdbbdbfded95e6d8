//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory tree
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated directory tree.
///
/// Commands built from it run with the tree root as working directory and
/// with the `STRATA_*` environment variables cleared.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the strata binary.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("STRATA_CONFIG_NAME")
            .env_remove("STRATA_BASE_CONFIG")
            .env_remove("STRATA_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file below the root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a `summarize.json` holding `excludes` into `dir` (`""` for the root).
    pub fn excludes(&self, dir: &str, patterns: &[&str]) -> PathBuf {
        let relative = if dir.is_empty() {
            "summarize.json".to_string()
        } else {
            format!("{dir}/summarize.json")
        };
        self.write(
            &relative,
            &serde_json::json!({ "excludes": patterns }).to_string(),
        )
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Run `summarize` on the root and return stdout.
    pub fn summarize(&self) -> String {
        let output = self
            .command()
            .arg("summarize")
            .output()
            .expect("Failed to run summarize");
        assert!(
            output.status.success(),
            "summarize failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}
