//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "strata";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            for line in install_hint(self.shell) {
                eprintln!("# {line}");
            }
            eprintln!();
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

fn install_hint(shell: Shell) -> Vec<String> {
    let mut lines = vec![format!("Generated {shell} completion script. To enable it:")];
    match shell {
        Shell::Bash => {
            lines.push(format!(
                "  {BIN_NAME} completions bash > ~/.local/share/bash-completion/completions/{BIN_NAME}"
            ));
            lines.push(format!("or in ~/.bashrc: eval \"$({BIN_NAME} completions bash)\""));
        }
        Shell::Zsh => {
            lines.push(format!("  {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}"));
            lines.push("and make sure ~/.zsh/completions is in your $fpath".to_string());
        }
        Shell::Fish => {
            lines.push(format!(
                "  {BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish"
            ));
        }
        Shell::PowerShell => {
            lines.push(format!(
                "  {BIN_NAME} completions powershell | Out-String | Invoke-Expression"
            ));
        }
        _ => {}
    }
    lines
}
