//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CheckIgnoreCommand, CompletionsCommand, ShowConfigCommand, SummarizeCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for summarizing directory trees.
#[derive(Parser)]
#[command(name = "strata")]
#[command(
    version,
    about = "Summarize directory trees with layered exclusion config",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// File name of the per-directory configuration
    #[arg(
        long,
        value_name = "NAME",
        global = true,
        env = "STRATA_CONFIG_NAME",
        default_value = strata::walk::DEFAULT_CONFIG_NAME
    )]
    pub config_name: String,

    /// Base configuration file applied beneath every directory layer
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_BASE_CONFIG")]
    pub base: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print every non-excluded file under a directory
    Summarize(SummarizeCommand),

    /// Report whether paths would be skipped by a summary
    CheckIgnore(CheckIgnoreCommand),

    /// Show the effective configuration for a directory
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["strata", "summarize", "src", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Summarize(_)));
    }

    #[test]
    fn test_config_name_default() {
        let cli = Cli::try_parse_from(["strata", "show-config"]).unwrap();
        assert_eq!(cli.config_name, "summarize.json");
        assert!(cli.base.is_none());
    }

    #[test]
    fn test_check_ignore_requires_paths() {
        assert!(Cli::try_parse_from(["strata", "check-ignore"]).is_err());
    }
}
