#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! Layered JSON configuration with gitignore-style path exclusion.
//!
//! A directory walker keeps a [`LayeredConfig`]: a base configuration plus a
//! stack of per-directory overlays. At each directory it reads the merged
//! `excludes` list and asks [`ExcludeRules`] which entries to skip.
//!
//! ## Core Types
//!
//! - [`LayeredConfig`] and [`ConfigMerger`]: layered, deep-merged configuration
//! - [`Pattern`] and [`ExcludeRules`]: gitignore-style matching with negation
//! - [`Summarizer`]: the directory walker that ties the two together
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use strata::{ExcludeRules, LayeredConfig};
//!
//! let base = json!({"excludes": ["*.log"]});
//! let mut config = LayeredConfig::new(base.as_object().unwrap().clone());
//!
//! let local = json!({"excludes": ["!keep.log"]});
//! config.push_value(local.as_object().unwrap().clone(), "local", "sub/summarize.json");
//!
//! let rules = ExcludeRules::new(config.excludes().unwrap());
//! assert!(rules.is_excluded_relative("sub/debug.log", false));
//! assert!(!rules.is_excluded_relative("sub/keep.log", false));
//! ```

pub mod config;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod walk;

// Re-export key types at crate root for convenience
pub use config::{ConfigMerger, ConfigValue, LayerId, LayerInfo, LayeredConfig};
pub use error::{Error, PathNotFoundReason, Result};
pub use exclude::{is_excluded, matches, ExcludeRules, Pattern};
pub use logging::{init_logger, LogLevel, Logger};
pub use walk::{Summarizer, WalkOptions, WalkStats};
