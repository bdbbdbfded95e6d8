//! Build script for strata-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize directory trees with layered exclusion config")
        .long_about(
            "Print the contents of a directory tree, skipping entries matched by \
             gitignore-style patterns collected from per-directory config files",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-name")
                .long("config-name")
                .help("File name of the per-directory configuration")
                .value_name("NAME")
                .global(true)
                .default_value("summarize.json")
                .env("STRATA_CONFIG_NAME"),
        )
        .arg(
            Arg::new("base")
                .long("base")
                .help("Base configuration file applied beneath every directory layer")
                .value_name("PATH")
                .global(true)
                .env("STRATA_BASE_CONFIG"),
        )
        .subcommands(vec![
            Command::new("summarize")
                .about("Print every non-excluded file under a directory")
                .long_about("Walk a directory depth-first and print each file that is not excluded"),
            Command::new("check-ignore")
                .about("Report whether paths would be skipped by a summary")
                .long_about("Evaluate paths against the exclusion rules active where the walk would meet them"),
            Command::new("show-config")
                .about("Show the effective configuration for a directory")
                .long_about("Print the merged configuration, a single key, or the active layers"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("strata.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
