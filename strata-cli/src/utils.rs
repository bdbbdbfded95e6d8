//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution and configuration loading.

use crate::error::CliError;
use std::env;
use std::path::{Component, Path, PathBuf};
use strata::{LayeredConfig, WalkOptions};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// File name of the per-directory configuration.
    pub config_name: String,

    /// Optional base configuration file.
    pub base: Option<PathBuf>,
}

impl GlobalOptions {
    /// Walk options derived from the global flags.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            config_name: self.config_name.clone(),
        }
    }
}

/// Build the layered configuration the commands start from.
///
/// The `--base` file, when given, becomes the base layer and must exist.
/// Without it the base is empty.
pub fn load_configuration(global: &GlobalOptions) -> Result<LayeredConfig, CliError> {
    let Some(base) = &global.base else {
        return Ok(LayeredConfig::default());
    };

    if !base.is_file() {
        return Err(CliError::Config(format!(
            "Base configuration not found: {}",
            base.display()
        )));
    }
    Ok(LayeredConfig::from_file(base)?)
}

/// Resolve the directory to operate on, using CWD if not specified.
///
/// The result is canonical so that relative paths rendered against it are
/// stable. It must name an existing directory.
pub fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };

    if !path.is_dir() {
        return Err(CliError::InvalidArguments(format!(
            "Not a directory: {}",
            path.display()
        )));
    }
    Ok(path.canonicalize()?)
}

/// Make a user-supplied path absolute without following its last component.
///
/// The path is joined onto CWD and `.`/`..` are folded lexically, so a
/// symlink is named by where it sits, not by what it points to. If that
/// lands outside `root` (e.g. `root` was reached through a symlinked
/// ancestor) the parent directory is canonicalized and the name re-attached.
pub fn resolve_target(path: &Path, root: &Path) -> Result<PathBuf, CliError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    let lexical = normalize_lexically(&absolute);
    if lexical.starts_with(root) {
        return Ok(lexical);
    }

    match (lexical.parent(), lexical.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(lexical),
        },
        _ => Ok(lexical),
    }
}

/// Fold `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
