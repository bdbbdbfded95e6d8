//! Configuration values and dotted-path addressing.
//!
//! Configuration data is held as [`serde_json::Value`], a tagged union over
//! object, array, string, number, boolean and null. Objects keep their key
//! insertion order (`preserve_order`), so merged output lists base keys first
//! followed by keys introduced by later layers.

use crate::error::{Error, PathNotFoundReason, Result};

/// A JSON-like configuration value.
pub type ConfigValue = serde_json::Value;

/// An ordered mapping of string keys to configuration values.
pub type ConfigMap = serde_json::Map<String, ConfigValue>;

/// Returns the JSON type name of a value, for diagnostics.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::config::kind_name;
///
/// assert_eq!(kind_name(&json!({})), "object");
/// assert_eq!(kind_name(&json!([1, 2])), "array");
/// ```
#[must_use]
pub fn kind_name(value: &ConfigValue) -> &'static str {
    match value {
        ConfigValue::Null => "null",
        ConfigValue::Bool(_) => "boolean",
        ConfigValue::Number(_) => "number",
        ConfigValue::String(_) => "string",
        ConfigValue::Array(_) => "array",
        ConfigValue::Object(_) => "object",
    }
}

/// A validated, `.`-separated key path such as `build.targets.debug`.
///
/// # Examples
///
/// ```
/// use strata::config::DottedPath;
///
/// let path = DottedPath::parse("build.targets.debug").unwrap();
/// assert_eq!(path.segments(), ["build", "targets", "debug"]);
///
/// assert!(DottedPath::parse("").is_err());
/// assert!(DottedPath::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> DottedPath<'a> {
    /// Parses a dotted path.
    ///
    /// Surrounding whitespace is ignored. Blank paths and paths with an empty
    /// segment (leading, trailing or doubled dots) are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is blank or malformed.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "path cannot be empty".to_string(),
            });
        }

        let segments: Vec<&str> = trimmed.split('.').collect();
        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: format!("empty segment at position {position}"),
            });
        }

        Ok(Self {
            raw: trimmed,
            segments,
        })
    }

    /// The individual keys, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// The path as written (without surrounding whitespace).
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Walks `root` key by key and returns the node the path points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] carrying the depth of the segment that
    /// failed, and whether the key was missing or the node was not an object.
    pub fn resolve<'v>(&self, root: &'v ConfigValue) -> Result<&'v ConfigValue> {
        let mut node = root;
        for (depth, key) in self.segments.iter().enumerate() {
            let ConfigValue::Object(map) = node else {
                return Err(self.not_found(depth, PathNotFoundReason::NotAnObject));
            };
            node = map.get(*key).ok_or_else(|| {
                self.not_found(depth, PathNotFoundReason::MissingKey((*key).to_string()))
            })?;
        }
        Ok(node)
    }

    fn not_found(&self, depth: usize, reason: PathNotFoundReason) -> Error {
        Error::PathNotFound {
            path: self.raw.to_string(),
            depth,
            reason,
        }
    }
}
