//! Layered configuration for strata.
//!
//! This module provides a base configuration object with an ordered stack of
//! overlay layers, typically one per directory visited during a walk:
//! - JSON or YAML configuration files whose root must be an object
//! - Deep merging (objects merge, arrays concatenate, everything else overwrites)
//! - Dotted-path lookups such as `build.targets.debug`
//!
//! # Merge Order
//!
//! The effective configuration is `base`, then each layer from oldest to
//! newest. Later layers win conflicts.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strata::config::LayeredConfig;
//!
//! let mut config = LayeredConfig::default();
//! let layer = json!({"excludes": ["target/"], "build": {"jobs": 4}});
//! config.push_value(layer.as_object().unwrap().clone(), "root", "summarize.json");
//!
//! assert_eq!(config.require("build.jobs").unwrap(), json!(4));
//! assert!(!config.has("build.targets").unwrap());
//! ```
//!
//! Loading the base from a file:
//!
//! ```no_run
//! use strata::config::LayeredConfig;
//! use std::path::Path;
//!
//! let config = LayeredConfig::from_file(Path::new("strata.json")).unwrap();
//! println!("{}", config.effective());
//! ```

pub mod layered;
pub mod loader;
pub mod merger;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use layered::{Layer, LayerId, LayerInfo, LayerScope, LayeredConfig, EXCLUDES_KEY};
pub use loader::{ConfigFormat, ConfigLoader};
pub use merger::ConfigMerger;
pub use value::{kind_name, ConfigMap, ConfigValue, DottedPath};
