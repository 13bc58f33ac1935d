//! Sanitized category paths.
//!
//! Category keys must round-trip stably through display and re-parse, so
//! every level of a [`StrictPath`] is normalized by [`sanitize_segment`]:
//!
//! - Slashes are stripped
//! - Brackets (`[]`, `()`, `{}`, `<>`) and whitespace become `_`
//! - Anything other than ASCII/Unicode alphanumerics, `_` and `-` is stripped
//! - Runs of `_` collapse to one, and leading/trailing `_` are trimmed
//!
//! Levels that sanitize to the empty string are dropped.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::path::{Path, SEPARATORS};

const BRACKETS: &[char] = &['[', ']', '(', ')', '{', '}', '<', '>'];

/// Normalize a single category segment.
///
/// # Examples
///
/// ```
/// use taxon_types::sanitize_segment;
///
/// assert_eq!(sanitize_segment("Q3 [draft]"), "Q3_draft");
/// assert_eq!(sanitize_segment("a/b"), "ab");
/// assert_eq!(sanitize_segment("x__y!!"), "x_y");
/// ```
pub fn sanitize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for ch in segment.chars() {
        let mapped = if BRACKETS.contains(&ch) || ch.is_whitespace() {
            '_'
        } else if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            ch
        } else {
            continue;
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out.trim_matches('_').to_string()
}

/// A [`Path`] whose every level has passed through [`sanitize_segment`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct StrictPath(Path);

impl StrictPath {
    /// Parse and sanitize a delimited string.
    pub fn parse(s: &str) -> Self {
        let levels = s
            .split(SEPARATORS)
            .map(sanitize_segment)
            .filter(|level| !level.is_empty())
            .collect();
        Self(Path::from_levels_unchecked(levels))
    }

    /// Sanitize the levels of an existing path.
    pub fn from_path(path: &Path) -> Self {
        let levels = path
            .iter()
            .map(|level| sanitize_segment(level))
            .filter(|level| !level.is_empty())
            .collect();
        Self(Path::from_levels_unchecked(levels))
    }

    /// Borrow the underlying path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Unwrap into the underlying path.
    pub fn into_path(self) -> Path {
        self.0
    }
}

impl Deref for StrictPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for StrictPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<StrictPath> for Path {
    fn from(strict: StrictPath) -> Self {
        strict.0
    }
}

impl From<&str> for StrictPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for StrictPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<StrictPath> for String {
    fn from(strict: StrictPath) -> Self {
        strict.0.to_string()
    }
}

impl fmt::Display for StrictPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn brackets_become_underscores() {
        assert_eq!(sanitize_segment("list[0]"), "list_0");
        assert_eq!(sanitize_segment("f(x)"), "f_x");
        assert_eq!(sanitize_segment("<tag>"), "tag");
    }

    #[test]
    fn illegal_characters_are_stripped() {
        assert_eq!(sanitize_segment("caf\u{e9}!?"), "caf\u{e9}");
        assert_eq!(sanitize_segment("a.b"), "ab");
        assert_eq!(sanitize_segment("a\\b/c"), "abc");
        assert_eq!(sanitize_segment("kebab-case"), "kebab-case");
    }

    #[test]
    fn underscores_collapse() {
        assert_eq!(sanitize_segment("a___b"), "a_b");
        assert_eq!(sanitize_segment("a [ ] b"), "a_b");
        assert_eq!(sanitize_segment("__x__"), "x");
    }

    #[test]
    fn empty_levels_are_dropped() {
        let path = StrictPath::parse("/reports/!!!/q3 [final]");
        assert_eq!(path.levels(), ["reports", "q3_final"]);
    }

    #[test]
    fn from_path_matches_parse() {
        let raw = Path::parse("/My Reports/(old)");
        assert_eq!(StrictPath::from_path(&raw), StrictPath::parse("/My Reports/(old)"));
    }

    #[test]
    fn derefs_to_path() {
        let strict = StrictPath::parse("a/b c");
        let path: &Path = &strict;
        assert_eq!(path.last(), Some("b_c"));
        assert_eq!(strict.to_string(), "/a/b_c");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(segment in "\\PC{0,24}") {
            let once = sanitize_segment(&segment);
            prop_assert_eq!(sanitize_segment(&once), once);
        }

        #[test]
        fn strict_paths_round_trip(s in "\\PC{0,40}") {
            let strict = StrictPath::parse(&s);
            prop_assert_eq!(StrictPath::parse(&strict.to_string()), strict);
        }
    }
}
