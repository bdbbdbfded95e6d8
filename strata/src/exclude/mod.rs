//! Gitignore-style path exclusion.
//!
//! - [`Pattern`] and [`matches`]: does one pattern line match a relative path?
//! - [`ExcludeRules`] and [`is_excluded`]: combine an ordered list of plain and
//!   `!`-negated patterns with last-match-wins semantics.
//!
//! Paths are always relative to the root of the walk and use `/` separators.

pub mod pattern;
pub mod rules;

pub use pattern::{matches, Glob, Pattern};
pub use rules::{is_excluded, relative_path, ExcludeRules, Rule};
