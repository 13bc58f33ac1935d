//! Arena-backed path tree.
//!
//! Nodes live in a `Vec` and refer to each other by index, so a resolved
//! [`NodeId`] stays valid while the tree grows. Nodes are never removed
//! individually; [`PathTree::clear`] drops everything but the root and
//! bumps the generation, which invalidates every id handed out before.

use std::collections::{BTreeMap, HashMap};
use std::ops::{Index, IndexMut};

use taxon_types::Path;
use tracing::debug;

use crate::error::{CategoryError, Result};

const ROOT: usize = 0;

/// Handle to a node in a [`PathTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

impl NodeId {
    /// Arena slot of this node.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Generation of the tree this id was issued by.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A node in a [`PathTree`]: a named level holding a value of type `V`.
#[derive(Clone, Debug)]
pub struct TreeNode<V> {
    name: String,
    path: Path,
    parent: Option<usize>,
    children: BTreeMap<String, usize>,
    value: V,
}

impl<V> TreeNode<V> {
    /// The level this node represents. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path from the root to this node.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` for the root node.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of direct children.
    pub fn get_child_count(&self) -> usize {
        self.children.len()
    }

    /// Names of direct children, sorted.
    pub fn child_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.keys().map(String::as_str)
    }

    /// The value stored at this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the value stored at this node.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

/// A tree of named levels with one `V` per node.
#[derive(Clone, Debug)]
pub struct PathTree<V> {
    nodes: Vec<TreeNode<V>>,
    memo: HashMap<Path, usize>,
    memoize: bool,
    generation: u64,
}

impl<V: Default> Default for PathTree<V> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<V: Default> PathTree<V> {
    /// Create a tree holding only the root.
    pub fn new(memoize: bool) -> Self {
        Self {
            nodes: vec![TreeNode {
                name: String::new(),
                path: Path::root(),
                parent: None,
                children: BTreeMap::new(),
                value: V::default(),
            }],
            memo: HashMap::new(),
            memoize,
            generation: 0,
        }
    }

    /// The root node's id in the current generation.
    pub fn root(&self) -> NodeId {
        self.id(ROOT)
    }

    /// Number of nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Incremented by every [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn id(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.generation,
        }
    }

    fn resolve(&self, id: NodeId) -> Option<usize> {
        (id.generation == self.generation && id.index < self.nodes.len()).then_some(id.index)
    }

    fn require(&self, id: NodeId) -> Result<usize> {
        self.resolve(id).ok_or(CategoryError::StaleNode {
            index: id.index,
            generation: id.generation,
            current: self.generation,
        })
    }

    /// The node behind `id`, unless the id is stale.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode<V>> {
        self.resolve(id).map(|index| &self.nodes[index])
    }

    /// Mutable access to the node behind `id`, unless the id is stale.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<V>> {
        let index = self.resolve(id)?;
        Some(&mut self.nodes[index])
    }

    // ---------------------------------------------------------------
    // Read-only descent
    // ---------------------------------------------------------------

    /// Resolve `path` from the root without creating anything.
    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        if let Some(&index) = self.memo.get(path) {
            return Some(self.id(index));
        }
        self.walk(ROOT, path).map(|index| self.id(index))
    }

    /// Resolve `path` relative to `from` without creating anything.
    pub fn lookup_from(&self, from: NodeId, path: &Path) -> Option<NodeId> {
        let start = self.resolve(from)?;
        self.walk(start, path).map(|index| self.id(index))
    }

    fn walk(&self, start: usize, path: &Path) -> Option<usize> {
        path.iter()
            .try_fold(start, |index, level| self.nodes[index].children.get(level).copied())
    }

    // ---------------------------------------------------------------
    // Creating descent
    // ---------------------------------------------------------------

    /// Resolve `path` from the root, creating every missing level.
    ///
    /// Resolving the same path again returns the same id.
    pub fn lookup_or_create(&mut self, path: &Path) -> NodeId {
        let index = self.create_index(path);
        self.id(index)
    }

    /// Alias of [`lookup_or_create`](Self::lookup_or_create).
    pub fn get_child_by_path(&mut self, path: &Path) -> NodeId {
        self.lookup_or_create(path)
    }

    /// Resolve `path` relative to `from`, creating every missing level.
    pub fn lookup_or_create_from(&mut self, from: NodeId, path: &Path) -> Result<NodeId> {
        let start = self.require(from)?;
        let index = self.descend_or_create(start, path);
        if self.memoize {
            let full = self.nodes[index].path.clone();
            self.memo.insert(full, index);
        }
        Ok(self.id(index))
    }

    /// The value at `path`, creating the path if needed.
    pub fn value_or_create_mut(&mut self, path: &Path) -> &mut V {
        let index = self.create_index(path);
        &mut self.nodes[index].value
    }

    fn create_index(&mut self, path: &Path) -> usize {
        if let Some(&index) = self.memo.get(path) {
            return index;
        }
        let index = self.descend_or_create(ROOT, path);
        if self.memoize {
            self.memo.insert(path.clone(), index);
        }
        index
    }

    fn descend_or_create(&mut self, start: usize, path: &Path) -> usize {
        let base = self.nodes[start].path.clone();
        let mut index = start;
        for (depth, level) in path.iter().enumerate() {
            if let Some(&child) = self.nodes[index].children.get(level) {
                index = child;
                continue;
            }
            let child = self.nodes.len();
            let child_path = base.concat(&path.prefix(depth + 1));
            debug!(path = %child_path, index = child, "created tree node");
            self.nodes.push(TreeNode {
                name: level.clone(),
                path: child_path,
                parent: Some(index),
                children: BTreeMap::new(),
                value: V::default(),
            });
            self.nodes[index].children.insert(level.clone(), child);
            index = child;
        }
        index
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    /// Direct children of `id`, in name order. Empty for a stale id.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let generation = self.generation;
        self.resolve(id).into_iter().flat_map(move |index| {
            self.nodes[index]
                .children
                .values()
                .map(move |&child| NodeId { index: child, generation })
        })
    }

    /// The parent of `id`. `None` for the root or a stale id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let index = self.resolve(id)?;
        self.nodes[index].parent.map(|parent| self.id(parent))
    }

    /// Depth-1 nodes, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<V>> + '_ {
        self.nodes[ROOT]
            .children
            .values()
            .map(move |&index| &self.nodes[index])
    }

    /// Every node except the root, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode<V>> + '_ {
        self.nodes.iter().skip(1)
    }

    // ---------------------------------------------------------------
    // Reset
    // ---------------------------------------------------------------

    /// Drop every node but the root, reset the root's value and forget
    /// all memoized paths. Ids issued before this call become stale.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.len(),
            memoized = self.memo.len(),
            generation = self.generation,
            "clearing path tree"
        );
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT];
        root.children.clear();
        root.value = V::default();
        self.memo.clear();
        self.generation += 1;
    }
}

impl<V: Default> Index<NodeId> for PathTree<V> {
    type Output = TreeNode<V>;

    /// Panics on a stale id; use [`PathTree::node`] to check.
    fn index(&self, id: NodeId) -> &TreeNode<V> {
        match self.node(id) {
            Some(node) => node,
            None => panic!("stale node id {id:?} (tree is at generation {})", self.generation),
        }
    }
}

impl<V: Default> IndexMut<NodeId> for PathTree<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut TreeNode<V> {
        let generation = self.generation;
        match self.node_mut(id) {
            Some(node) => node,
            None => panic!("stale node id {id:?} (tree is at generation {generation})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn p(s: &str) -> Path {
        Path::parse(s)
    }

    // ---- Test 1: Auto-creation is idempotent ----
    #[test]
    fn repeated_resolution_returns_same_node() {
        let mut tree: PathTree<u32> = PathTree::default();
        let first = tree.get_child_by_path(&p("/a/b/c"));
        let second = tree.get_child_by_path(&p("/a/b/c"));
        assert_eq!(first, second);
        assert_eq!(tree.len(), 3);
    }

    // ---- Test 2: Shared levels are created once ----
    #[test]
    fn shared_levels_are_reused() {
        let mut tree: PathTree<u32> = PathTree::default();
        tree.lookup_or_create(&p("/a/b/c"));
        tree.lookup_or_create(&p("/a/b/d"));
        tree.lookup_or_create(&p("/a"));
        assert_eq!(tree.len(), 4);
    }

    // ---- Test 3: Read-only lookup never creates ----
    #[test]
    fn lookup_does_not_grow_tree() {
        let mut tree: PathTree<u32> = PathTree::default();
        assert!(tree.lookup(&p("/x/y")).is_none());
        assert!(tree.is_empty());
        let id = tree.lookup_or_create(&p("/x/y"));
        assert_eq!(tree.lookup(&p("x.y")), Some(id));
        assert!(tree.lookup(&p("/x/z")).is_none());
        assert_eq!(tree.len(), 2);
    }

    // ---- Test 4: Nodes know their name and full path ----
    #[test]
    fn node_identity() {
        let mut tree: PathTree<u32> = PathTree::default();
        let id = tree.lookup_or_create(&p("/reports/finance"));
        let node = &tree[id];
        assert_eq!(node.name(), "finance");
        assert_eq!(node.path(), &p("/reports/finance"));
        assert!(!node.is_root());
        assert!(tree[tree.root()].is_root());
        assert_eq!(tree[tree.root()].path(), &Path::root());
    }

    // ---- Test 5: Relative descent ----
    #[test]
    fn relative_descent_builds_full_paths() {
        let mut tree: PathTree<u32> = PathTree::default();
        let reports = tree.lookup_or_create(&p("/reports"));
        let q3 = tree.lookup_or_create_from(reports, &p("finance/q3")).unwrap();
        assert_eq!(tree[q3].path(), &p("/reports/finance/q3"));
        assert_eq!(tree.lookup(&p("/reports/finance/q3")), Some(q3));
        assert_eq!(tree.lookup_from(reports, &p("finance")), tree.parent(q3));
    }

    // ---- Test 6: Values are per node ----
    #[test]
    fn values_are_stored_per_node() {
        let mut tree: PathTree<u32> = PathTree::default();
        *tree.value_or_create_mut(&p("/a")) += 5;
        *tree.value_or_create_mut(&p("/a/b")) += 7;
        *tree.value_or_create_mut(&p("/a")) += 1;
        let a = tree.lookup(&p("/a")).unwrap();
        assert_eq!(*tree[a].value(), 6);
        let b = tree.lookup(&p("/a/b")).unwrap();
        assert_eq!(*tree[b].value(), 7);
    }

    // ---- Test 7: Iteration covers depth-1 children only ----
    #[test]
    fn iter_yields_depth_one_children() {
        let mut tree: PathTree<u32> = PathTree::default();
        tree.lookup_or_create(&p("/b/x"));
        tree.lookup_or_create(&p("/a/y/z"));
        let names: Vec<&str> = tree.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(tree.nodes().count(), 5);
        assert_eq!(tree.children(tree.root()).count(), 2);
    }

    // ---- Test 8: Clear invalidates ids and the memo ----
    #[test]
    fn clear_bumps_generation() {
        let mut tree: PathTree<u32> = PathTree::default();
        let old = tree.lookup_or_create(&p("/a/b"));
        *tree.value_or_create_mut(&Path::root()) = 9;
        tree.clear();

        assert_eq!(tree.generation(), 1);
        assert!(tree.is_empty());
        assert!(tree.node(old).is_none());
        assert!(tree.lookup(&p("/a/b")).is_none());
        assert_eq!(*tree[tree.root()].value(), 0);
        assert!(matches!(
            tree.lookup_or_create_from(old, &p("c")),
            Err(CategoryError::StaleNode { .. })
        ));
        assert_eq!(tree.children(old).count(), 0);

        let new = tree.lookup_or_create(&p("/a/b"));
        assert_ne!(new, old);
        assert_eq!(tree.len(), 2);
    }

    // ---- Test 9: Memoization can be disabled ----
    #[test]
    fn unmemoized_tree_resolves_the_same() {
        let mut tree: PathTree<u32> = PathTree::new(false);
        let a = tree.lookup_or_create(&p("/a/b"));
        let b = tree.lookup_or_create(&p("/a/b"));
        assert_eq!(a, b);
        assert_eq!(tree.lookup(&p("/a/b")), Some(a));
        assert!(tree.memo.is_empty());
    }

    #[test]
    #[should_panic(expected = "stale node id")]
    fn indexing_with_stale_id_panics() {
        let mut tree: PathTree<u32> = PathTree::default();
        let id = tree.lookup_or_create(&p("/a"));
        tree.clear();
        let _ = &tree[id];
    }

    fn arb_paths() -> impl Strategy<Value = Vec<Path>> {
        proptest::collection::vec(proptest::collection::vec("[a-c]{1,2}", 1..4), 1..8).prop_map(
            |paths| {
                paths
                    .into_iter()
                    .map(|levels| Path::try_from_levels(levels).unwrap())
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn same_path_same_id(paths in arb_paths(), memoize in any::<bool>()) {
            let mut tree: PathTree<u8> = PathTree::new(memoize);
            let first: Vec<NodeId> = paths.iter().map(|path| tree.lookup_or_create(path)).collect();
            let second: Vec<NodeId> = paths.iter().map(|path| tree.get_child_by_path(path)).collect();
            prop_assert_eq!(&first, &second);
            for (path, id) in paths.iter().zip(&first) {
                prop_assert_eq!(tree.lookup(path), Some(*id));
                prop_assert_eq!(tree[*id].path(), path);
            }
        }

        #[test]
        fn len_counts_distinct_levels(paths in arb_paths(), rounds in 1usize..4) {
            let mut tree: PathTree<u8> = PathTree::default();
            let mut seen = HashSet::new();
            for path in &paths {
                let before = tree.len();
                let fresh = (1..=path.len()).filter(|&n| seen.insert(path.prefix(n))).count();
                for _ in 0..rounds {
                    tree.lookup_or_create(path);
                }
                prop_assert_eq!(tree.len(), before + fresh);
            }
            prop_assert_eq!(tree.len(), seen.len());
        }

        #[test]
        fn ids_go_stale_after_clear(paths in arb_paths()) {
            let mut tree: PathTree<u8> = PathTree::default();
            let ids: Vec<NodeId> = paths.iter().map(|path| tree.lookup_or_create(path)).collect();
            tree.clear();
            prop_assert!(tree.is_empty());
            for (path, id) in paths.iter().zip(&ids) {
                prop_assert!(tree.node(*id).is_none());
                prop_assert!(tree.lookup(path).is_none());
            }
            let again = tree.lookup_or_create(&paths[0]);
            prop_assert_ne!(again, ids[0]);
        }
    }
}
