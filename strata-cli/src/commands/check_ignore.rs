//! Command to report whether paths would be skipped by a summary.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_root, resolve_target, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::Summarizer;

/// Report whether paths would be skipped by a summary.
///
/// Each path is evaluated with the configuration layers the walk would have
/// active at that point. Exits with status 1 if none of the paths is excluded.
#[derive(Args)]
pub struct CheckIgnoreCommand {
    /// Root of the walk (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

impl CheckIgnoreCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_root(self.root)?;
        let config = load_configuration(global)?;
        let summarizer = Summarizer::new(global.walk_options());

        let mut any_excluded = false;
        for path in &self.paths {
            let target = resolve_target(path, &root)?;
            if target.strip_prefix(&root).is_err() {
                log::warn!(
                    "{} is outside {}; matching it as given",
                    target.display(),
                    root.display()
                );
            }

            let excluded = summarizer.is_path_excluded(&root, &target, &config)?;
            let verdict = if excluded { "excluded" } else { "included" };
            println!("{verdict} {}", path.display());
            any_excluded |= excluded;
        }

        if any_excluded {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(
                "No paths are excluded".to_string(),
            ))
        }
    }
}
