//! Directory summarizer.
//!
//! Walks a directory tree depth-first, printing every non-excluded file as a
//! `=== relative/path ===` header followed by its contents. Each directory
//! may carry a local configuration file (`summarize.json` by default) whose
//! contents are layered on top of its parent's configuration for the
//! duration of that directory's visit.
//!
//! Entries are visited in sorted order, and a directory's own layer is pushed
//! before any of its entries are evaluated, so a local `excludes` list
//! applies to the directory's direct children as well as everything below.

use crate::config::LayeredConfig;
use crate::error::{Error, Result};
use crate::exclude::{relative_path, ExcludeRules};
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// File name of the per-directory configuration.
pub const DEFAULT_CONFIG_NAME: &str = "summarize.json";

/// Marker printed instead of content for files that are not valid UTF-8.
pub const BINARY_MARKER: &str = "[Binary file - content not displayable]";

/// Options controlling a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// File name of the per-directory configuration.
    pub config_name: String,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            config_name: DEFAULT_CONFIG_NAME.to_string(),
        }
    }
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Files printed.
    pub files: usize,
    /// Directories entered, including the root.
    pub directories: usize,
    /// Entries skipped by exclusion rules.
    pub excluded: usize,
    /// Directories that could not be listed.
    pub denied: usize,
}

/// Prints the contents of a directory tree.
///
/// # Examples
///
/// ```no_run
/// use strata::config::LayeredConfig;
/// use strata::walk::{Summarizer, WalkOptions};
/// use std::path::Path;
///
/// let mut config = LayeredConfig::default();
/// let summarizer = Summarizer::new(WalkOptions::default());
/// let stats = summarizer
///     .run(Path::new("."), &mut config, &mut std::io::stdout())
///     .unwrap();
/// eprintln!("{} files", stats.files);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    options: WalkOptions,
}

impl Summarizer {
    /// Creates a summarizer with the given options.
    #[must_use]
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walks `root`, writing the summary to `out`.
    ///
    /// Layers pushed during the walk are removed again before this returns,
    /// so `config` is left as it was passed in.
    ///
    /// # Errors
    ///
    /// Returns an error if a local configuration file is malformed, its
    /// `excludes` is not a list of strings, or writing to `out` fails.
    pub fn run<W: Write>(
        &self,
        root: &Path,
        config: &mut LayeredConfig,
        out: &mut W,
    ) -> Result<WalkStats> {
        let mut stats = WalkStats::default();
        self.visit_dir(root, root, config, out, &mut stats)?;
        log::debug!(
            "Walk finished: {} files, {} directories, {} excluded, {} denied",
            stats.files,
            stats.directories,
            stats.excluded,
            stats.denied
        );
        Ok(stats)
    }

    fn visit_dir<W: Write>(
        &self,
        dir: &Path,
        root: &Path,
        config: &mut LayeredConfig,
        out: &mut W,
        stats: &mut WalkStats,
    ) -> Result<()> {
        let mut scope = match config.scoped_layer(&self.local_config(dir)) {
            Ok(scope) => scope,
            Err(Error::ConfigRead { source, .. })
                if source.kind() == io::ErrorKind::PermissionDenied =>
            {
                return Self::report_denied(dir, root, out, stats);
            }
            Err(e) => return Err(e),
        };
        let rules = ExcludeRules::new(scope.excludes()?);

        let entries = match sorted_entries(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Self::report_denied(dir, root, out, stats);
            }
            Err(e) => return Err(e.into()),
        };
        stats.directories += 1;

        for entry in entries {
            let is_dir = entry.is_dir();
            if rules.is_excluded(&entry, root, is_dir) {
                log::debug!("Excluded {}", relative_path(&entry, root));
                stats.excluded += 1;
                continue;
            }

            if is_dir {
                self.visit_dir(&entry, root, &mut scope, out, stats)?;
            } else {
                write_file(&entry, root, out)?;
                stats.files += 1;
            }
        }

        Ok(())
    }

    fn report_denied<W: Write>(
        dir: &Path,
        root: &Path,
        out: &mut W,
        stats: &mut WalkStats,
    ) -> Result<()> {
        let relative = relative_path(dir, root);
        log::warn!("Access denied: {relative}");
        writeln!(out, "[Access denied: {relative}]")?;
        stats.denied += 1;
        Ok(())
    }

    fn local_config(&self, dir: &Path) -> PathBuf {
        dir.join(&self.options.config_name)
    }

    /// Pushes the local layers the walk would have active inside `dir`.
    ///
    /// That is the layer of `root` and of every directory between `root` and
    /// `dir`, inclusive. Returns the number of layers pushed. `dir` must lie
    /// under `root`; otherwise only the root layer is pushed.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the configuration files is malformed.
    pub fn push_directory_layers(
        &self,
        root: &Path,
        dir: &Path,
        config: &mut LayeredConfig,
    ) -> Result<usize> {
        let mut pushed = 0;
        let mut current = root.to_path_buf();
        if config.push_layer(&self.local_config(&current), None)?.is_some() {
            pushed += 1;
        }

        for component in normal_components(root, dir) {
            current.push(component);
            if config.push_layer(&self.local_config(&current), None)?.is_some() {
                pushed += 1;
            }
        }
        Ok(pushed)
    }

    /// Decides whether the walk would skip `path`.
    ///
    /// A path is skipped if it, or any directory between `root` and it, is
    /// excluded by the rules active where that entry is evaluated. `config`
    /// is not modified.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file on the way is malformed.
    pub fn is_path_excluded(
        &self,
        root: &Path,
        path: &Path,
        config: &LayeredConfig,
    ) -> Result<bool> {
        let mut config = config.clone();
        let mut current = root.to_path_buf();
        config.push_layer(&self.local_config(&current), None)?;

        if path.strip_prefix(root).is_err() {
            let rules = ExcludeRules::new(config.excludes()?);
            return Ok(rules.is_excluded(path, root, path.is_dir()));
        }

        let components = normal_components(root, path);
        for (index, component) in components.iter().enumerate() {
            current.push(component);
            let is_dir = current.is_dir();
            let rules = ExcludeRules::new(config.excludes()?);
            if rules.is_excluded(&current, root, is_dir) {
                return Ok(true);
            }
            if index + 1 < components.len() {
                config.push_layer(&self.local_config(&current), None)?;
            }
        }
        Ok(false)
    }
}

/// The plain path components of `path` below `root`.
fn normal_components<'a>(root: &Path, path: &'a Path) -> Vec<&'a std::ffi::OsStr> {
    path.strip_prefix(root)
        .map(|rest| {
            rest.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Lists a directory, sorted by file name.
fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn write_file<W: Write>(path: &Path, root: &Path, out: &mut W) -> Result<()> {
    writeln!(out, "=== {} ===", relative_path(path, root))?;

    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => writeln!(out, "{}", normalize_newlines(&text))?,
            Err(_) => writeln!(out, "{BINARY_MARKER}")?,
        },
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            writeln!(out, "[Error reading file: {e}]")?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn normalize_newlines(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n").into()
    } else {
        text.into()
    }
}
