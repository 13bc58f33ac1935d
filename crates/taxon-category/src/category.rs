//! Category trees whose every node is a keyword index.

use std::hash::Hash;

use taxon_trie::RadixObjectDb;
use taxon_types::Path;
use tracing::{debug, trace};

use crate::config::IndexConfig;
use crate::error::Result;
use crate::tree::{NodeId, PathTree, TreeNode};

/// A category node: a named level owning its own keyword index.
pub type CategoryObjectNode<T> = TreeNode<RadixObjectDb<T>>;

impl<T> TreeNode<RadixObjectDb<T>> {
    /// The keyword index owned by this category.
    pub fn tree(&self) -> &RadixObjectDb<T> {
        self.value()
    }

    /// Mutable access to the keyword index owned by this category.
    pub fn tree_mut(&mut self) -> &mut RadixObjectDb<T> {
        self.value_mut()
    }
}

/// Objects filed under a category path and, within it, under keywords.
///
/// Categories are declared by use: [`add_object`](Self::add_object) and
/// [`get_child_by_path`](Self::get_child_by_path) create every missing
/// level. Read-only queries ([`lookup`](Self::lookup),
/// [`category`](Self::category), [`search`](Self::search)) never do.
///
/// # Examples
///
/// ```
/// use taxon_category::CategoryObjectDb;
/// use taxon_types::Path;
///
/// let mut db = CategoryObjectDb::new();
/// let q3 = Path::parse("/finance/q3");
/// db.add_object(&q3, "revenue", "X");
///
/// assert_eq!(db.search(&q3, "rev"), vec!["X"]);
/// assert!(db.search(&Path::parse("/finance/q4"), "rev").is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct CategoryObjectDb<T> {
    tree: PathTree<RadixObjectDb<T>>,
    config: IndexConfig,
    all: NodeId,
}

impl<T: Clone + Eq + Hash> Default for CategoryObjectDb<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> CategoryObjectDb<T> {
    /// Create an empty db with the default configuration.
    pub fn new() -> Self {
        Self::build(IndexConfig::default())
    }

    /// Create an empty db.
    ///
    /// Fails with [`CategoryError::Config`](crate::CategoryError::Config)
    /// if `config` does not pass [`IndexConfig::validate`].
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndexConfig) -> Self {
        let mut tree = PathTree::new(config.memoize_paths);
        let all = tree.lookup_or_create(&config.all_categories_path());
        Self { tree, config, all }
    }

    /// The configuration this db was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The underlying path tree.
    pub fn path_tree(&self) -> &PathTree<RadixObjectDb<T>> {
        &self.tree
    }

    // ---------------------------------------------------------------
    // Node resolution
    // ---------------------------------------------------------------

    /// Resolve `path`, creating every missing category along the way.
    pub fn get_child_by_path(&mut self, path: &Path) -> NodeId {
        let key = self.config.key(path);
        self.tree.lookup_or_create(&key)
    }

    /// Resolve `path` relative to another category, creating as needed.
    pub fn get_child_by_path_from(&mut self, from: NodeId, path: &Path) -> Result<NodeId> {
        let key = self.config.key(path);
        self.tree.lookup_or_create_from(from, &key)
    }

    /// Resolve `path` if every level already exists.
    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        self.tree.lookup(&self.config.key(path))
    }

    /// The category behind `id`, unless the id is stale.
    pub fn node(&self, id: NodeId) -> Option<&CategoryObjectNode<T>> {
        self.tree.node(id)
    }

    /// Mutable access to the category behind `id`, unless the id is stale.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut CategoryObjectNode<T>> {
        self.tree.node_mut(id)
    }

    // ---------------------------------------------------------------
    // Indexes
    // ---------------------------------------------------------------

    /// The keyword index of an existing category.
    pub fn category(&self, path: &Path) -> Option<&RadixObjectDb<T>> {
        self.lookup(path).and_then(|id| self.node(id)).map(TreeNode::tree)
    }

    /// The keyword index of `path`, creating the category if needed.
    pub fn category_mut(&mut self, path: &Path) -> &mut RadixObjectDb<T> {
        let key = self.config.key(path);
        self.tree.value_or_create_mut(&key)
    }

    /// The reserved index spanning every category.
    ///
    /// It is only filled automatically when
    /// [`IndexConfig::index_all_categories`] is set; otherwise callers
    /// file objects there themselves through
    /// [`get_all_categories_mut`](Self::get_all_categories_mut).
    pub fn get_all_categories(&self) -> &RadixObjectDb<T> {
        self.tree[self.all].tree()
    }

    /// Mutable access to the reserved all-categories index.
    pub fn get_all_categories_mut(&mut self) -> &mut RadixObjectDb<T> {
        self.tree[self.all].tree_mut()
    }

    /// File `object` under `word` in the category at `path`.
    pub fn add_object(&mut self, path: &Path, word: &str, object: T) {
        let key = self.config.key(path);
        trace!(category = %key, word, "adding object to category");
        let into_all = self.config.index_all_categories && &key != self.tree[self.all].path();
        if into_all {
            self.get_all_categories_mut().add_object(word, object.clone());
        }
        self.tree.value_or_create_mut(&key).add_object(word, object);
    }

    /// Objects in the category at `path` under any word starting with
    /// `prefix`. Empty if the category does not exist.
    pub fn search(&self, path: &Path, prefix: &str) -> Vec<T> {
        self.category(path)
            .map(|db| db.search(prefix))
            .unwrap_or_default()
    }

    /// Objects registered under exactly `word` in the category at `path`.
    pub fn objects_for_word(&self, path: &Path, word: &str) -> Vec<T> {
        self.category(path)
            .map(|db| db.objects_for_word(word))
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------
    // Traversal and reset
    // ---------------------------------------------------------------

    /// Depth-1 categories, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryObjectNode<T>> + '_ {
        self.tree.iter()
    }

    /// Every category with its full path, in creation order.
    pub fn categories(&self) -> impl Iterator<Item = (&Path, &RadixObjectDb<T>)> + '_ {
        self.tree.nodes().map(|node| (node.path(), node.tree()))
    }

    /// Number of categories, including the reserved one and its ancestors.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if no category exists besides the reserved one.
    pub fn is_empty(&self) -> bool {
        let reserved = self.config.all_categories_path();
        self.categories().all(|(path, _)| reserved.starts_with(path))
    }

    /// Drop every category and every index, then re-create the reserved
    /// all-categories node. Ids issued before this call become stale.
    pub fn clear(&mut self) {
        debug!(categories = self.len(), "clearing category db");
        self.tree.clear();
        self.all = self.tree.lookup_or_create(&self.config.all_categories_path());
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a CategoryObjectDb<T> {
    type Item = &'a CategoryObjectNode<T>;
    type IntoIter = Box<dyn Iterator<Item = &'a CategoryObjectNode<T>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
