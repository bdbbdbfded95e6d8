//! Error types for the strata library.
//!
//! This module provides the error hierarchy for configuration loading,
//! layer stack manipulation and dotted-path lookups, using `thiserror`
//! for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration source parsed successfully but its root is not an object.
    #[error("configuration root in {} must be an object, got {found}", path.display())]
    InvalidConfigRoot {
        /// The source that was loaded.
        path: PathBuf,
        /// The JSON type name of the root value that was found.
        found: &'static str,
    },

    /// A pop was attempted with no layers on the stack.
    #[error("no layer available to remove")]
    EmptyLayerStack,

    /// No layer with the given id exists on the stack.
    #[error("layer with id '{id}' not found")]
    LayerNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A string could not be parsed as a layer id.
    #[error("invalid layer id '{id}': expected 'layer-<number>'")]
    InvalidLayerId {
        /// The text that was parsed.
        id: String,
    },

    /// A dotted path was empty or contained an empty segment.
    #[error("invalid dotted path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// Traversal of a dotted path failed.
    #[error("path not found: '{path}' ({reason} at level {depth})")]
    PathNotFound {
        /// The full dotted path that was requested.
        path: String,
        /// Zero-based index of the segment at which resolution failed.
        depth: usize,
        /// What went wrong at that depth.
        reason: PathNotFoundReason,
    },

    /// A configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or converted.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a dotted-path traversal stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathNotFoundReason {
    /// The current node is an object but lacks the requested key.
    MissingKey(String),
    /// The current node is not an object, so it cannot be descended into.
    NotAnObject,
}

impl fmt::Display for PathNotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "missing key '{key}'"),
            Self::NotAnObject => write!(f, "intermediate node is not an object"),
        }
    }
}

impl Error {
    /// Check if error indicates a dotted path did not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{Error, PathNotFoundReason};
    ///
    /// let err = Error::PathNotFound {
    ///     path: "a.b".to_string(),
    ///     depth: 1,
    ///     reason: PathNotFoundReason::MissingKey("b".to_string()),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error indicates a malformed dotted path.
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}
