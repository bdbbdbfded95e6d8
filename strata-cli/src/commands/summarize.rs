//! Command to print the contents of a directory tree.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_root, GlobalOptions};
use clap::Args;
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use strata::config::{ConfigMap, EXCLUDES_KEY};
use strata::Summarizer;

/// Print every non-excluded file under a directory.
#[derive(Args)]
pub struct SummarizeCommand {
    /// Directory to summarize (defaults to current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Additional exclusion pattern, applied below every local config
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,
}

impl SummarizeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_root(self.dir)?;
        let mut config = load_configuration(global)?;

        if !self.excludes.is_empty() {
            let mut overrides = ConfigMap::new();
            let patterns = self.excludes.into_iter().map(Value::String).collect();
            overrides.insert(EXCLUDES_KEY.to_string(), Value::Array(patterns));
            config.push_value(overrides, "cli", "--exclude");
        }

        let summarizer = Summarizer::new(global.walk_options());
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        let stats = summarizer.run(&root, &mut config, &mut out)?;
        out.flush()?;

        log::info!(
            "Summarized {} files in {} directories ({} excluded)",
            stats.files,
            stats.directories,
            stats.excluded
        );
        Ok(())
    }
}
