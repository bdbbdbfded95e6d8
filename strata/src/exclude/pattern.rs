//! Single gitignore-style pattern matching.
//!
//! A pattern line is interpreted as follows:
//!
//! - blank lines and lines starting with `#` never match
//! - a trailing `/` restricts the pattern to directories
//! - a leading `/` anchors the pattern to the root of the walk
//! - otherwise the pattern may match at any depth: the full path, any suffix
//!   of it starting at a segment boundary, or any single segment
//!
//! Wildcards follow shell `fnmatch` rules: `*` matches any run of characters
//! (including `/`), `?` matches exactly one character, and `[...]` / `[!...]`
//! match a character class. An unclosed `[` is a literal bracket.

use regex::{Regex, RegexBuilder};

/// A compiled shell-style wildcard that must match a whole string.
///
/// # Examples
///
/// ```
/// use strata::exclude::Glob;
///
/// let glob = Glob::new("*.log");
/// assert!(glob.is_match("debug.log"));
/// assert!(glob.is_match("sub/debug.log"));
/// assert!(!glob.is_match("debug.log.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct Glob {
    // None when the pattern can never match (e.g. an empty class like `[z-a]`).
    regex: Option<Regex>,
}

impl Glob {
    /// Compiles a wildcard pattern.
    ///
    /// Matching is case-sensitive except on Windows, where it ignores case.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let regex = translate(pattern).and_then(|source| {
            RegexBuilder::new(&source)
                .case_insensitive(cfg!(windows))
                .build()
                .map_err(|e| log::warn!("Ignoring unusable pattern '{pattern}': {e}"))
                .ok()
        });
        Self { regex }
    }

    /// Returns true if the whole of `text` matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// One gitignore-style pattern line, pre-parsed for repeated matching.
///
/// Negation (`!`) is not handled here; see
/// [`ExcludeRules`](crate::exclude::ExcludeRules).
///
/// # Examples
///
/// ```
/// use strata::exclude::Pattern;
///
/// let anchored = Pattern::new("/build");
/// assert!(anchored.matches("build", true));
/// assert!(!anchored.matches("sub/build", true));
///
/// let dir_only = Pattern::new("cache/");
/// assert!(dir_only.matches("cache", true));
/// assert!(!dir_only.matches("cache", false));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    glob: Option<Glob>,
    dir_only: bool,
    anchored: bool,
}

impl Pattern {
    /// Parses a pattern line. Surrounding whitespace is ignored.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            return Self {
                glob: None,
                dir_only: false,
                anchored: false,
            };
        }

        let dir_only = match text.strip_suffix('/') {
            Some(rest) => {
                text = rest;
                true
            }
            None => false,
        };
        let anchored = match text.strip_prefix('/') {
            Some(rest) => {
                text = rest;
                true
            }
            None => false,
        };

        Self {
            glob: Some(Glob::new(text)),
            dir_only,
            anchored,
        }
    }

    /// Returns true if this line is blank or a comment.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.glob.is_none()
    }

    /// Returns true if the pattern only applies to directories.
    #[must_use]
    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Returns true if the pattern is anchored at the root.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Tests a forward-slash separated path relative to the walk root.
    #[must_use]
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        let Some(glob) = &self.glob else {
            return false;
        };
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            return glob.is_match(path);
        }

        if glob.is_match(path) {
            return true;
        }
        let mut suffixes = path.match_indices('/').map(|(i, _)| &path[i + 1..]);
        if suffixes.any(|suffix| glob.is_match(suffix)) {
            return true;
        }
        path.split('/').any(|segment| glob.is_match(segment))
    }
}

/// Tests a single gitignore-style pattern against a relative path.
///
/// # Examples
///
/// ```
/// use strata::exclude::matches;
///
/// assert!(matches("*.log", "debug.log", false));
/// assert!(matches("*.log", "sub/debug.log", false));
/// assert!(!matches("*.log", "debug.log.txt", false));
/// assert!(!matches("# comment", "# comment", false));
/// ```
#[must_use]
pub fn matches(pattern: &str, path: &str, is_dir: bool) -> bool {
    Pattern::new(pattern).matches(path, is_dir)
}

/// Converts a wildcard pattern into an anchored regex source.
///
/// Returns `None` if the pattern contains a character class that can match
/// nothing, which makes the whole pattern unmatchable.
fn translate(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^(?s:");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end])?);
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            _ => push_literal(&mut out, c),
        }
    }

    out.push_str(r")\z");
    Some(out)
}

/// Finds the index of the `]` closing a class that opens just before `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    // A `]` right after the opening bracket is a literal member.
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Translates the body of a `[...]` class. Reversed ranges are dropped.
fn translate_class(body: &[char]) -> Option<String> {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut members = String::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            let (lo, hi) = (body[k], body[k + 2]);
            if lo <= hi {
                push_literal(&mut members, lo);
                members.push('-');
                push_literal(&mut members, hi);
            }
            k += 3;
        } else {
            push_literal(&mut members, body[k]);
            k += 1;
        }
    }

    match (members.is_empty(), negated) {
        (true, false) => None,
        (true, true) => Some(".".to_string()),
        (false, false) => Some(format!("[{members}]")),
        (false, true) => Some(format!("[^{members}]")),
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
