//! Main entry point for the strata CLI.
//!
//! This is the command-line interface for the strata directory summarizer.
//! It provides commands for working with layered exclusion config:
//! - `summarize`: Print every non-excluded file under a directory
//! - `check-ignore`: Report whether paths would be skipped
//! - `show-config`: Show the effective configuration for a directory
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity and route library diagnostics to it
    strata::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config_name: cli.config_name,
        base: cli.base,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Summarize(cmd) => cmd.execute(&global),
        cli::Command::CheckIgnore(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
