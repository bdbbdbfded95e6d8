//! Ordered exclusion rules with negation.
//!
//! Rules are evaluated in list order and the last rule that matches decides:
//! a plain pattern excludes, a `!pattern` re-includes. Evaluation never stops
//! early, so a later broad pattern can re-exclude something an earlier
//! negation brought back, and vice versa.

use crate::exclude::pattern::Pattern;
use std::borrow::Cow;
use std::path::Path;

/// One compiled exclusion rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    negated: bool,
    source: String,
}

impl Rule {
    /// Returns true for a `!` re-inclusion rule.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The pattern line this rule was compiled from (trimmed).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A compiled, ordered list of gitignore-style exclusion patterns.
///
/// # Examples
///
/// ```
/// use strata::exclude::ExcludeRules;
///
/// let rules = ExcludeRules::new(["*.log", "!keep.log"]);
/// assert!(rules.is_excluded_relative("a.log", false));
/// assert!(!rules.is_excluded_relative("keep.log", false));
///
/// // Order matters: the broad pattern now comes last and wins.
/// let reversed = ExcludeRules::new(["!keep.log", "*.log"]);
/// assert!(reversed.is_excluded_relative("keep.log", false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExcludeRules {
    rules: Vec<Rule>,
}

impl ExcludeRules {
    /// Compiles pattern lines in order, dropping blank lines and comments.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .filter_map(|raw| {
                let line = raw.as_ref().trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let (negated, body) = match line.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, line),
                };
                Some(Rule {
                    pattern: Pattern::new(body),
                    negated,
                    source: line.to_string(),
                })
            })
            .collect();
        Self { rules }
    }

    /// Returns true if there are no effective rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The compiled rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Decides whether a forward-slash relative path is excluded.
    #[must_use]
    pub fn is_excluded_relative(&self, relative: &str, is_dir: bool) -> bool {
        self.rules.iter().fold(false, |excluded, rule| {
            if rule.pattern.matches(relative, is_dir) {
                !rule.negated
            } else {
                excluded
            }
        })
    }

    /// Decides whether `path` is excluded, relative to the walk root `base`.
    #[must_use]
    pub fn is_excluded(&self, path: &Path, base: &Path, is_dir: bool) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        self.is_excluded_relative(&relative_path(path, base), is_dir)
    }
}

/// Renders `path` relative to `base` with forward slashes.
///
/// Paths outside `base` are used as-is. The root itself renders as `.`.
///
/// # Examples
///
/// ```
/// use strata::exclude::relative_path;
/// use std::path::Path;
///
/// assert_eq!(relative_path(Path::new("/w/src/lib.rs"), Path::new("/w")), "src/lib.rs");
/// assert_eq!(relative_path(Path::new("other/x"), Path::new("/w")), "other/x");
/// ```
#[must_use]
pub fn relative_path(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let text = relative.to_string_lossy();
    if text.is_empty() {
        return ".".to_string();
    }
    match text {
        Cow::Borrowed(s) if !s.contains('\\') => s.to_string(),
        other => other.replace('\\', "/"),
    }
}

/// Decides whether a filesystem entry is excluded by an ordered pattern list.
///
/// Whether `path` is a directory is read from the filesystem (following
/// symlinks); a missing path counts as a file.
///
/// # Examples
///
/// ```
/// use strata::exclude::is_excluded;
/// use std::path::Path;
///
/// let root = Path::new("/project");
/// let patterns = ["*.log", "!keep.log"];
/// assert!(is_excluded(&root.join("a.log"), root, &patterns));
/// assert!(!is_excluded(&root.join("keep.log"), root, &patterns));
/// assert!(!is_excluded(&root.join("a.log"), root, &[] as &[&str]));
/// ```
#[must_use]
pub fn is_excluded<S: AsRef<str>>(path: &Path, base: &Path, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    ExcludeRules::new(patterns).is_excluded(path, base, path.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_rules_exclude_nothing() {
        let rules = ExcludeRules::new(Vec::<String>::new());
        assert!(rules.is_empty());
        assert!(!rules.is_excluded_relative("anything", false));
    }

    #[test]
    fn test_comments_and_blanks_are_dropped() {
        let rules = ExcludeRules::new(["", "  ", "# comment", "*.o"]);
        assert_eq!(rules.rules().len(), 1);
        assert_eq!(rules.rules()[0].source(), "*.o");
    }

    #[test]
    fn test_negation_reincludes() {
        let rules = ExcludeRules::new(["*.log", "!keep.log"]);
        assert!(rules.is_excluded_relative("a.log", false));
        assert!(!rules.is_excluded_relative("keep.log", false));
        assert!(!rules.is_excluded_relative("sub/keep.log", false));
        assert!(rules.rules()[1].is_negated());
    }

    #[test]
    fn test_last_match_wins() {
        let rules = ExcludeRules::new(["!keep.log", "*.log"]);
        assert!(rules.is_excluded_relative("a.log", false));
        assert!(rules.is_excluded_relative("keep.log", false));
    }

    #[test]
    fn test_reexclude_after_negation() {
        let rules = ExcludeRules::new(["*.log", "!keep.log", "keep*"]);
        assert!(rules.is_excluded_relative("keep.log", false));
    }

    #[test]
    fn test_negation_without_prior_match_is_noop() {
        let rules = ExcludeRules::new(["!keep.log"]);
        assert!(!rules.is_excluded_relative("keep.log", false));
        assert!(!rules.is_excluded_relative("other", false));
    }

    #[test]
    fn test_negated_comment_and_bare_bang_never_match() {
        let rules = ExcludeRules::new(["*", "!#x", "!"]);
        assert!(rules.is_excluded_relative("#x", false));
    }

    #[test]
    fn test_dir_only_in_rules() {
        let rules = ExcludeRules::new(["cache/"]);
        assert!(rules.is_excluded_relative("cache", true));
        assert!(!rules.is_excluded_relative("cache", false));
    }

    #[test]
    fn test_relative_path_rendering() {
        let base = Path::new("/work");
        assert_eq!(relative_path(Path::new("/work/a/b.txt"), base), "a/b.txt");
        assert_eq!(relative_path(Path::new("/work"), base), ".");
        assert_eq!(relative_path(Path::new("/elsewhere/x"), base), "/elsewhere/x");
    }

    #[test]
    fn test_is_excluded_reads_directory_flag() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("cache")).unwrap();
        fs::write(root.join("cachefile"), "x").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("cache"), "x").unwrap();

        let patterns = ["cache/"];
        assert!(is_excluded(&root.join("cache"), root, &patterns));
        assert!(!is_excluded(&root.join("sub").join("cache"), root, &patterns));
        assert!(!is_excluded(&root.join("cachefile"), root, &patterns));
    }

    #[test]
    fn test_is_excluded_anchored_against_base() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub").join("build")).unwrap();
        fs::create_dir(root.join("build")).unwrap();

        let patterns = vec!["/build".to_string()];
        assert!(is_excluded(&root.join("build"), root, &patterns));
        assert!(!is_excluded(&root.join("sub").join("build"), root, &patterns));
    }
}
