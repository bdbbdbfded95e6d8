//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `summarize`: Print every non-excluded file under a directory
//! - `check_ignore`: Report whether paths would be skipped by a summary
//! - `show_config`: Show the effective configuration for a directory
//! - `completions`: Generate shell completion scripts

pub mod check_ignore;
pub mod completions;
pub mod show_config;
pub mod summarize;

pub use check_ignore::CheckIgnoreCommand;
pub use completions::CompletionsCommand;
pub use show_config::ShowConfigCommand;
pub use summarize::SummarizeCommand;
