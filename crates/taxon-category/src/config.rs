//! Index configuration.

use std::fs;

use serde::{Deserialize, Serialize};
use taxon_types::{Path, StrictPath};
use tracing::debug;

use crate::error::{CategoryError, Result};

/// Default location of the reserved "all categories" index.
pub const DEFAULT_ALL_CATEGORIES: &str = "_all";

/// Configuration shared by the category dbs.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```
/// use taxon_category::IndexConfig;
///
/// let config = IndexConfig::from_toml_str("index_all_categories = true").unwrap();
/// assert!(config.index_all_categories);
/// assert!(config.memoize_paths);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Path of the reserved index that aggregates every category.
    pub all_categories: String,
    /// When `true`, `add_object` also files every object under the
    /// all-categories index.
    pub index_all_categories: bool,
    /// Memoize path -> node resolution in path trees.
    pub memoize_paths: bool,
    /// Sanitize category paths with [`StrictPath`] before use.
    pub strict_paths: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            all_categories: DEFAULT_ALL_CATEGORIES.to_string(),
            index_all_categories: false,
            memoize_paths: true,
            strict_paths: false,
        }
    }
}

impl IndexConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| CategoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded index config");
        Ok(config)
    }

    /// Check that the reserved path names at least one level.
    pub fn validate(&self) -> Result<()> {
        if self.all_categories_path().is_empty() {
            return Err(CategoryError::Config(format!(
                "all_categories must name a non-root path, got {:?}",
                self.all_categories
            )));
        }
        Ok(())
    }

    /// The reserved all-categories path, normalized like any other key.
    pub fn all_categories_path(&self) -> Path {
        self.key(&Path::parse(&self.all_categories))
    }

    /// Normalize a caller-supplied category path.
    pub fn key(&self, path: &Path) -> Path {
        if self.strict_paths {
            StrictPath::from_path(path).into_path()
        } else {
            path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = IndexConfig::default();
        assert_eq!(c.all_categories, "_all");
        assert!(!c.index_all_categories);
        assert!(c.memoize_paths);
        assert!(!c.strict_paths);
        assert_eq!(c.all_categories_path(), Path::parse("/_all"));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(IndexConfig::from_toml_str("").unwrap(), IndexConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = IndexConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, CategoryError::Config(_)));
    }

    #[test]
    fn root_all_categories_is_rejected() {
        let err = IndexConfig::from_toml_str("all_categories = \"/\"").unwrap_err();
        assert!(matches!(err, CategoryError::Config(_)));
        let err = IndexConfig::from_toml_str("all_categories = \"!!\"\nstrict_paths = true")
            .unwrap_err();
        assert!(matches!(err, CategoryError::Config(_)));
    }

    #[test]
    fn strict_keys_are_sanitized() {
        let config = IndexConfig {
            strict_paths: true,
            ..Default::default()
        };
        assert_eq!(
            config.key(&Path::parse("/My Reports/q3 [final]")),
            Path::parse("/My_Reports/q3_final")
        );
        let lax = IndexConfig::default();
        assert_eq!(lax.key(&Path::parse("/a b")).levels(), ["a b"]);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "all_categories = \"/everything\"").unwrap();
        writeln!(file, "memoize_paths = false").unwrap();
        let config = IndexConfig::load(file.path()).unwrap();
        assert_eq!(config.all_categories_path(), Path::parse("/everything"));
        assert!(!config.memoize_paths);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IndexConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CategoryError::Io(_)));
    }
}
