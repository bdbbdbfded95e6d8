//! Command to show the effective configuration for a directory.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_root, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::Summarizer;

/// Show the effective configuration for a directory.
///
/// Layers are collected the way a summary run from `--root` would see them
/// inside `DIR`.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Directory whose configuration to show (defaults to current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Root the layers are collected from (defaults to DIR)
    #[arg(long, value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Print only the value at this dotted key
    #[arg(long, value_name = "KEY", conflicts_with = "layers")]
    pub get: Option<String>,

    /// List the active layers instead of the merged configuration
    #[arg(long)]
    pub layers: bool,
}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let dir = resolve_root(self.dir)?;
        let root = match self.root {
            Some(root) => resolve_root(Some(root))?,
            None => dir.clone(),
        };
        if dir.strip_prefix(&root).is_err() {
            return Err(CliError::InvalidArguments(format!(
                "{} is not inside {}",
                dir.display(),
                root.display()
            )));
        }

        let mut config = load_configuration(global)?;
        let pushed = Summarizer::new(global.walk_options())
            .push_directory_layers(&root, &dir, &mut config)?;
        log::debug!("Collected {pushed} layers for {}", dir.display());

        if self.layers {
            if let Some(base) = &global.base {
                println!("base\t{}", base.display());
            }
            for layer in config.list_layers() {
                println!("{}\t{}\t{}", layer.id, layer.name, layer.source_path.display());
            }
            return Ok(());
        }

        let value = match &self.get {
            Some(key) => config.require(key)?,
            None => config.effective(),
        };
        let rendered = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::Config(e.to_string()))?;
        println!("{rendered}");
        Ok(())
    }
}
