//! The accumulating trie node.
//!
//! Every node caches the full prefix that reaches it, the set of words that
//! pass through it, and every object registered under any of those words.
//! Children are created lazily on the first insertion that needs them and
//! are only ever removed by [`TrieNode::clear`].

use std::collections::btree_map::{self, Entry};
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::alphabet::Alphabet;
use crate::collection::ObjectCollection;
use crate::error::{Result, TrieError};

/// A node in an accumulating prefix trie.
///
/// Iterating a node yields its accumulated objects, not its children.
#[derive(Clone, Debug)]
pub struct TrieNode<A: Alphabet, C> {
    /// Edge label from the parent. `None` only for a root.
    token: Option<A::Token>,
    /// Standardized path from the root to this node, inclusive.
    prefix: A::Word,
    /// Distinct words that pass through this node.
    words: BTreeSet<A::Word>,
    /// Objects registered under any word passing through this node.
    objects: C,
    /// Objects registered under a word ending exactly here.
    exact: C,
    children: BTreeMap<A::Token, TrieNode<A, C>>,
}

impl<A: Alphabet, C: ObjectCollection> Default for TrieNode<A, C> {
    fn default() -> Self {
        Self::root()
    }
}

impl<A: Alphabet, C: ObjectCollection> TrieNode<A, C> {
    /// Create a root node: no token, empty prefix.
    pub fn root() -> Self {
        Self::with_identity(None, A::Word::default())
    }

    fn with_identity(token: Option<A::Token>, prefix: A::Word) -> Self {
        Self {
            token,
            prefix,
            words: BTreeSet::new(),
            objects: C::default(),
            exact: C::default(),
            children: BTreeMap::new(),
        }
    }

    /// The edge label leading to this node, or `None` for a root.
    pub fn token(&self) -> Option<&A::Token> {
        self.token.as_ref()
    }

    /// Returns `true` if this node is a root.
    pub fn is_root(&self) -> bool {
        self.token.is_none()
    }

    /// The standardized prefix this node represents.
    pub fn prefix(&self) -> &A::Word {
        &self.prefix
    }

    // ---------------------------------------------------------------
    // Insertion
    // ---------------------------------------------------------------

    /// Register `object` under `word`.
    ///
    /// The object is added to this node and to every node along `word`,
    /// creating nodes as needed. Afterwards, resolving any prefix of
    /// `word` from this node yields `object`. An empty word is ignored.
    pub fn add_object(&mut self, word: &A::Key, object: C::Item)
    where
        C::Item: Clone,
    {
        let word = A::standardize(word);
        let tokens = A::tokens(&word);
        if tokens.is_empty() {
            trace!("ignoring empty word");
            return;
        }
        trace!(word = %word, depth = tokens.len(), "indexing object");

        let mut node = self;
        node.register(&word, object.clone());
        for token in tokens {
            node = match node.children.entry(token) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let prefix = A::extend(&node.prefix, entry.key());
                    let child = Self::with_identity(Some(entry.key().clone()), prefix);
                    entry.insert(child)
                }
            };
            node.register(&word, object.clone());
        }
        node.exact.insert(object);
    }

    fn register(&mut self, word: &A::Word, object: C::Item) {
        if !self.words.contains(word) {
            self.words.insert(word.clone());
        }
        self.objects.insert(object);
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Resolve the node matching `prefix` exactly, relative to this node.
    ///
    /// Returns `None` as soon as a token has no matching child. The empty
    /// prefix resolves to `self`.
    pub fn get_child(&self, prefix: &A::Key) -> Option<&Self> {
        A::tokens(&A::standardize(prefix))
            .iter()
            .try_fold(self, |node, token| node.children.get(token))
    }

    /// Like [`get_child`](Self::get_child), but a miss is an error.
    pub fn require_child(&self, prefix: &A::Key) -> Result<&Self> {
        self.get_child(prefix)
            .ok_or_else(|| TrieError::PrefixNotFound {
                prefix: A::standardize(prefix).to_string(),
            })
    }

    /// The direct child reached over `token`.
    pub fn child(&self, token: &A::Token) -> Option<&Self> {
        self.children.get(token)
    }

    /// Iterate over direct children in token order.
    pub fn children(&self) -> btree_map::Iter<'_, A::Token, TrieNode<A, C>> {
        self.children.iter()
    }

    /// Number of direct children.
    pub fn get_child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Self::node_count).sum::<usize>()
    }

    /// Depth-first walk over this subtree in token order, starting here.
    pub fn descendants(&self) -> Descendants<'_, A, C> {
        Descendants { stack: vec![self] }
    }

    // ---------------------------------------------------------------
    // Objects and words
    // ---------------------------------------------------------------

    /// A copy of the objects accumulated at this node, in collection order.
    pub fn get_objects(&self) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.objects.iter().cloned().collect()
    }

    /// Borrow the objects accumulated at this node.
    pub fn objects(&self) -> C::Iter<'_> {
        self.objects.iter()
    }

    /// Number of distinct objects accumulated at this node.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if `object` was registered under a word through here.
    pub fn contains_object(&self, object: &C::Item) -> bool {
        self.objects.contains(object)
    }

    /// Objects registered under a word that ends exactly at this node.
    pub fn get_exact_objects(&self) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.exact.iter().cloned().collect()
    }

    /// Objects registered under exactly `word`, excluding longer words.
    pub fn objects_for_word(&self, word: &A::Key) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.get_child(word)
            .map(Self::get_exact_objects)
            .unwrap_or_default()
    }

    /// Returns `true` if some registered word ends exactly at this node.
    pub fn is_word(&self) -> bool {
        !self.exact.is_empty()
    }

    /// Returns `true` if `word` was registered through this node.
    pub fn contains_word(&self, word: &A::Key) -> bool {
        self.words.contains(&A::standardize(word))
    }

    /// Distinct words that pass through this node.
    pub fn get_words(&self) -> &BTreeSet<A::Word> {
        &self.words
    }

    /// Distinct words passing through the node at `prefix`, if it exists.
    pub fn words_with_prefix(&self, prefix: &A::Key) -> Option<&BTreeSet<A::Word>> {
        self.get_child(prefix).map(Self::get_words)
    }

    // ---------------------------------------------------------------
    // Reset
    // ---------------------------------------------------------------

    /// Drop every child and forget all words and objects.
    ///
    /// The node keeps its own token and prefix.
    pub fn clear(&mut self) {
        self.children.clear();
        self.words.clear();
        self.objects.clear();
        self.exact.clear();
    }
}

impl<'a, A: Alphabet, C: ObjectCollection> IntoIterator for &'a TrieNode<A, C> {
    type Item = &'a C::Item;
    type IntoIter = C::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Depth-first iterator over a trie subtree. See [`TrieNode::descendants`].
pub struct Descendants<'a, A: Alphabet, C> {
    stack: Vec<&'a TrieNode<A, C>>,
}

impl<'a, A: Alphabet, C> Iterator for Descendants<'a, A, C> {
    type Item = &'a TrieNode<A, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values().rev());
        Some(node)
    }
}
