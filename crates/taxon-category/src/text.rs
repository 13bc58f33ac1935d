//! Path trees that name one value per node.

use taxon_types::Path;
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::tree::{NodeId, PathTree, TreeNode};

/// A text node: a named level holding at most one value.
pub type TextObjectNode<T> = TreeNode<Option<T>>;

impl<T> TreeNode<Option<T>> {
    /// The value at this node, if one was set.
    pub fn get_value(&self) -> Option<&T> {
        self.value().as_ref()
    }

    /// Overwrite the value at this node, returning the previous one.
    pub fn set_value(&mut self, value: T) -> Option<T> {
        self.value_mut().replace(value)
    }

    /// Remove and return the value at this node.
    pub fn take_value(&mut self) -> Option<T> {
        self.value_mut().take()
    }
}

/// A path-addressed map: each category path names at most one object.
///
/// # Examples
///
/// ```
/// use taxon_category::TextObjectDb;
/// use taxon_types::Path;
///
/// let mut db = TextObjectDb::new();
/// let path = Path::parse("/menu/file/open");
/// assert_eq!(db.set_value(&path, "Open..."), None);
/// assert_eq!(db.set_value(&path, "Open File..."), Some("Open..."));
/// assert_eq!(db.value(&path), Some(&"Open File..."));
/// assert_eq!(db.value(&Path::parse("/menu/file")), None);
/// ```
#[derive(Clone, Debug)]
pub struct TextObjectDb<T> {
    tree: PathTree<Option<T>>,
    config: IndexConfig,
}

impl<T> Default for TextObjectDb<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TextObjectDb<T> {
    /// Create an empty db with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an empty db. Text trees have no reserved node, so only
    /// `memoize_paths` and `strict_paths` are read.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            tree: PathTree::new(config.memoize_paths),
            config,
        }
    }

    /// The underlying path tree.
    pub fn path_tree(&self) -> &PathTree<Option<T>> {
        &self.tree
    }

    /// Resolve `path`, creating every missing node along the way.
    pub fn get_child_by_path(&mut self, path: &Path) -> NodeId {
        let key = self.config.key(path);
        self.tree.lookup_or_create(&key)
    }

    /// Resolve `path` relative to another node, creating as needed.
    pub fn get_child_by_path_from(&mut self, from: NodeId, path: &Path) -> Result<NodeId> {
        let key = self.config.key(path);
        self.tree.lookup_or_create_from(from, &key)
    }

    /// Resolve `path` if every level already exists.
    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        self.tree.lookup(&self.config.key(path))
    }

    /// The node behind `id`, unless the id is stale.
    pub fn node(&self, id: NodeId) -> Option<&TextObjectNode<T>> {
        self.tree.node(id)
    }

    /// Mutable access to the node behind `id`, unless the id is stale.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TextObjectNode<T>> {
        self.tree.node_mut(id)
    }

    /// Name `value` by `path`. Last write wins; the previous value is
    /// returned.
    pub fn set_value(&mut self, path: &Path, value: T) -> Option<T> {
        let key = self.config.key(path);
        self.tree.value_or_create_mut(&key).replace(value)
    }

    /// The value named by `path`.
    pub fn value(&self, path: &Path) -> Option<&T> {
        self.lookup(path)
            .and_then(|id| self.node(id))
            .and_then(TreeNode::get_value)
    }

    /// Remove the value named by `path`. The node itself stays.
    pub fn take_value(&mut self, path: &Path) -> Option<T> {
        let id = self.lookup(path)?;
        self.node_mut(id).and_then(TreeNode::take_value)
    }

    /// Depth-1 nodes, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TextObjectNode<T>> + '_ {
        self.tree.iter()
    }

    /// Every `(path, value)` pair, in creation order.
    pub fn values(&self) -> impl Iterator<Item = (&Path, &T)> + '_ {
        self.tree
            .nodes()
            .filter_map(|node| node.get_value().map(|value| (node.path(), value)))
    }

    /// Number of nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Drop every node and value. Ids issued before this call become stale.
    pub fn clear(&mut self) {
        debug!(nodes = self.len(), "clearing text db");
        self.tree.clear();
    }
}

impl<'a, T> IntoIterator for &'a TextObjectDb<T> {
    type Item = &'a TextObjectNode<T>;
    type IntoIter = Box<dyn Iterator<Item = &'a TextObjectNode<T>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
