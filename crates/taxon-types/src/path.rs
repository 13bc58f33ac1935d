//! Hierarchical paths.
//!
//! A [`Path`] is parsed from a delimited string such as `/reports/finance/q3`
//! or `reports.finance.q3`. Both `/` and `.` separate levels and empty
//! segments are dropped, so `//a/./b/` and `a.b` name the same path.
//! Equality, hashing and ordering are structural over the levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// Characters that separate levels in a path string.
pub const SEPARATORS: &[char] = &['/', '.'];

/// An immutable sequence of path levels.
///
/// # Examples
///
/// ```
/// use taxon_types::Path;
///
/// let path = Path::parse("/reports/finance.q3");
/// assert_eq!(path.levels(), ["reports", "finance", "q3"]);
/// assert_eq!(path.to_string(), "/reports/finance/q3");
/// assert_eq!(path, Path::parse("reports//finance/q3/"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Path {
    levels: Vec<String>,
}

impl Path {
    /// The empty path. Displays as `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a delimited string into a path. Never fails.
    pub fn parse(s: &str) -> Self {
        Self {
            levels: s
                .split(SEPARATORS)
                .filter(|level| !level.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a path from already-split levels.
    ///
    /// Unlike [`Path::parse`], every level must be non-empty and free of
    /// separators.
    pub fn try_from_levels<I, S>(levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let levels = levels
            .into_iter()
            .map(|level| {
                let level = level.into();
                validate_level(&level)?;
                Ok(level)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { levels })
    }

    pub(crate) fn from_levels_unchecked(levels: Vec<String>) -> Self {
        Self { levels }
    }

    /// The levels of this path, outermost first.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The innermost level, if any.
    pub fn last(&self) -> Option<&str> {
        self.levels.last().map(String::as_str)
    }

    /// The path one level up. The root has no parent.
    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.levels.split_last()?;
        Some(Self {
            levels: rest.to_vec(),
        })
    }

    /// Return a new path with `level` appended.
    pub fn join(&self, level: impl Into<String>) -> Result<Path> {
        let level = level.into();
        validate_level(&level)?;
        let mut levels = self.levels.clone();
        levels.push(level);
        Ok(Self { levels })
    }

    /// Return a new path with all of `other`'s levels appended.
    pub fn concat(&self, other: &Path) -> Path {
        let mut levels = Vec::with_capacity(self.len() + other.len());
        levels.extend_from_slice(&self.levels);
        levels.extend_from_slice(&other.levels);
        Self { levels }
    }

    /// The path made of the first `n` levels (all of them if `n` is larger).
    pub fn prefix(&self, n: usize) -> Path {
        Self {
            levels: self.levels[..n.min(self.len())].to_vec(),
        }
    }

    /// Returns `true` if `prefix`'s levels are a leading run of this path's.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.levels.starts_with(&prefix.levels)
    }

    /// Iterate over the levels.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.levels.iter()
    }
}

fn validate_level(level: &str) -> Result<()> {
    if level.is_empty() {
        return Err(TypeError::InvalidLevel {
            level: level.to_string(),
            reason: "level must not be empty".into(),
        });
    }
    if let Some(sep) = level.chars().find(|c| SEPARATORS.contains(c)) {
        return Err(TypeError::InvalidLevel {
            level: level.to_string(),
            reason: format!("contains separator {sep:?}"),
        });
    }
    Ok(())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.levels.is_empty() {
            return f.write_str("/");
        }
        for level in &self.levels {
            write!(f, "/{level}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
