//! Flat category index.
//!
//! [`SimpleCategoryObjectDb`] keys one keyword index per *full* category
//! path. Asking for `/a/b/c` creates exactly that entry and nothing for
//! `/a` or `/a/b`.

use std::collections::hash_map::{self, Entry, HashMap};
use std::hash::Hash;
use std::iter;

use taxon_trie::RadixObjectDb;
use taxon_types::Path;
use tracing::{debug, trace};

use crate::config::IndexConfig;
use crate::error::Result;

/// A flat map from category path to keyword index, plus the reserved
/// all-categories index, which always exists.
///
/// # Examples
///
/// ```
/// use taxon_category::SimpleCategoryObjectDb;
/// use taxon_types::Path;
///
/// let mut db = SimpleCategoryObjectDb::new();
/// db.add_object(&Path::parse("/fruit/red"), "apple", 1);
///
/// assert!(db.category(&Path::parse("/fruit")).is_none());
/// assert_eq!(db.get_category(&Path::parse("/fruit/red")).search("app"), vec![1]);
/// assert!(db.get_all_categories().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct SimpleCategoryObjectDb<T> {
    categories: HashMap<Path, RadixObjectDb<T>>,
    all_path: Path,
    all: RadixObjectDb<T>,
    config: IndexConfig,
}

impl<T: Clone + Eq + Hash> Default for SimpleCategoryObjectDb<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> SimpleCategoryObjectDb<T> {
    /// Create a db holding only the empty all-categories index.
    pub fn new() -> Self {
        Self::build(IndexConfig::default())
    }

    /// Create a db holding only the empty all-categories index.
    ///
    /// Fails with [`CategoryError::Config`](crate::CategoryError::Config)
    /// if `config` does not pass [`IndexConfig::validate`].
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndexConfig) -> Self {
        Self {
            categories: HashMap::new(),
            all_path: config.all_categories_path(),
            all: RadixObjectDb::new(),
            config,
        }
    }

    /// The keyword index at `path`, created on first use.
    pub fn get_category(&mut self, path: &Path) -> &mut RadixObjectDb<T> {
        let key = self.config.key(path);
        if key == self.all_path {
            return &mut self.all;
        }
        match self.categories.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(category = %entry.key(), "created flat category");
                entry.insert(RadixObjectDb::new())
            }
        }
    }

    /// The keyword index at `path`, if it exists.
    pub fn category(&self, path: &Path) -> Option<&RadixObjectDb<T>> {
        let key = self.config.key(path);
        if key == self.all_path {
            return Some(&self.all);
        }
        self.categories.get(&key)
    }

    /// The reserved all-categories index.
    pub fn get_all_categories(&self) -> &RadixObjectDb<T> {
        &self.all
    }

    /// Mutable access to the reserved all-categories index.
    pub fn get_all_categories_mut(&mut self) -> &mut RadixObjectDb<T> {
        &mut self.all
    }

    /// File `object` under `word` in the category at `path`.
    pub fn add_object(&mut self, path: &Path, word: &str, object: T) {
        let key = self.config.key(path);
        trace!(category = %key, word, "adding object to flat category");
        if self.config.index_all_categories && key != self.all_path {
            self.all.add_object(word, object.clone());
        }
        self.get_category(&key).add_object(word, object);
    }

    /// Objects in the category at `path` under any word starting with
    /// `prefix`. Empty if the category does not exist.
    pub fn search(&self, path: &Path, prefix: &str) -> Vec<T> {
        self.category(path)
            .map(|db| db.search(prefix))
            .unwrap_or_default()
    }

    /// Every category, the reserved one first, then in no particular order.
    pub fn categories(&self) -> impl Iterator<Item = (&Path, &RadixObjectDb<T>)> + '_ {
        iter::once((&self.all_path, &self.all)).chain(self.categories.iter())
    }

    /// Paths of every ordinary category, in no particular order.
    pub fn paths(&self) -> hash_map::Keys<'_, Path, RadixObjectDb<T>> {
        self.categories.keys()
    }

    /// Number of categories, including the reserved one.
    pub fn len(&self) -> usize {
        self.categories.len() + 1
    }

    /// Returns `true` if only the reserved category exists.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Drop every category and empty the reserved one.
    pub fn clear(&mut self) {
        debug!(categories = self.len(), "clearing flat category db");
        self.categories.clear();
        self.all.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Path {
        Path::parse(s)
    }

    #[test]
    fn all_categories_always_exists() {
        let db: SimpleCategoryObjectDb<u8> = SimpleCategoryObjectDb::new();
        assert_eq!(db.len(), 1);
        assert!(db.is_empty());
        assert!(db.category(&p("/_all")).is_some());
        assert_eq!(db.categories().count(), 1);
    }

    #[test]
    fn no_intermediate_categories() {
        let mut db = SimpleCategoryObjectDb::new();
        db.add_object(&p("/a/b/c"), "word", 1);
        assert_eq!(db.len(), 2);
        assert!(db.category(&p("/a")).is_none());
        assert!(db.category(&p("/a/b")).is_none());
        assert_eq!(db.search(&p("a.b.c"), "wo"), vec![1]);
        assert_eq!(db.paths().collect::<Vec<_>>(), vec![&p("/a/b/c")]);
    }

    #[test]
    fn reserved_path_routes_to_all_index() {
        let mut db = SimpleCategoryObjectDb::new();
        db.add_object(&p("/_all"), "global", 'g');
        assert_eq!(db.get_all_categories().search("glo"), vec!['g']);
        assert!(db.is_empty());
    }

    #[test]
    fn index_all_categories_mirrors_objects() {
        let config = IndexConfig {
            index_all_categories: true,
            ..Default::default()
        };
        let mut db = SimpleCategoryObjectDb::with_config(config).unwrap();
        db.add_object(&p("/fruit"), "apple", 1);
        db.add_object(&p("/tools"), "axe", 2);
        db.add_object(&p("/_all"), "anvil", 3);
        assert_eq!(db.get_all_categories().search("a"), vec![1, 2, 3]);
        assert_eq!(db.search(&p("/fruit"), "a"), vec![1]);
    }

    #[test]
    fn clear_keeps_reserved_entry() {
        let mut db = SimpleCategoryObjectDb::new();
        db.add_object(&p("/x"), "one", 1);
        db.get_all_categories_mut().add_object("one", 1);
        db.clear();
        assert_eq!(db.len(), 1);
        assert!(db.get_all_categories().is_empty());
        assert!(db.category(&p("/x")).is_none());
        assert!(db.category(&p("/_all")).is_some());
    }

    #[test]
    fn custom_reserved_path() {
        let config = IndexConfig {
            all_categories: "/every/thing".into(),
            ..Default::default()
        };
        let mut db = SimpleCategoryObjectDb::with_config(config).unwrap();
        db.get_category(&p("every.thing")).add_object("k", 5);
        assert_eq!(db.get_all_categories().objects_for_word("k"), vec![5]);
        assert!(db.category(&p("/_all")).is_none());
    }

    #[test]
    fn root_reserved_path_is_rejected() {
        let config = IndexConfig {
            all_categories: "/".into(),
            ..Default::default()
        };
        assert!(matches!(
            SimpleCategoryObjectDb::<u8>::with_config(config),
            Err(crate::error::CategoryError::Config(_))
        ));
    }
}
