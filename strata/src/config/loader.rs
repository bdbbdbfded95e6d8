//! Configuration file loading.
//!
//! A configuration source is a UTF-8 file whose root must be an object.
//! JSON is the default format; files with a `.yaml` or `.yml` extension are
//! parsed as YAML. A missing file is not an error and loads as an empty
//! object.

use crate::config::value::{kind_name, ConfigMap, ConfigValue};
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Serialization format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::config::ConfigFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ConfigFormat::from_path(Path::new("summarize.json")), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Path::new("strata.yml")), ConfigFormat::Yaml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Loads configuration objects from files or strings.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigFormat, ConfigLoader};
/// use std::path::Path;
///
/// let map = ConfigLoader::parse_str(
///     r#"{"excludes": ["*.log"]}"#,
///     ConfigFormat::Json,
///     Path::new("inline.json"),
/// )
/// .unwrap();
/// assert!(map.contains_key("excludes"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a configuration file.
    ///
    /// Returns an empty object if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// JSON/YAML, or its root value is not an object.
    pub fn load_file(path: &Path) -> Result<ConfigMap> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No configuration at {}", path.display());
                return Ok(ConfigMap::new());
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse_str(&contents, ConfigFormat::from_path(path), path)
    }

    /// Parse configuration text in the given format.
    ///
    /// `origin` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or its root is not an object.
    pub fn parse_str(contents: &str, format: ConfigFormat, origin: &Path) -> Result<ConfigMap> {
        let value: ConfigValue = match format {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        };

        match value {
            ConfigValue::Object(map) => Ok(map),
            other => Err(Error::InvalidConfigRoot {
                path: origin.to_path_buf(),
                found: kind_name(&other),
            }),
        }
    }
}
