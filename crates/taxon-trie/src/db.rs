//! Root-owning trie wrapper.

use std::collections::BTreeSet;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::collection::ObjectCollection;
use crate::error::Result;
use crate::node::TrieNode;

/// A whole trie: owns the root node and exposes the node contract at tree
/// granularity.
///
/// # Examples
///
/// ```
/// use taxon_trie::RadixObjectDb;
///
/// let mut db = RadixObjectDb::new();
/// db.add_object("Antony", "A");
/// db.add_object("ant", "B");
///
/// assert_eq!(db.get_child("ANT").unwrap().get_objects(), vec!["A", "B"]);
/// assert_eq!(db.objects_for_word("ant"), vec!["B"]);
/// assert!(db.get_child("b").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TrieDb<A: Alphabet, C> {
    root: TrieNode<A, C>,
}

impl<A: Alphabet, C: ObjectCollection> Default for TrieDb<A, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Alphabet, C: ObjectCollection> TrieDb<A, C> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::root(),
        }
    }

    /// The root node.
    pub fn root(&self) -> &TrieNode<A, C> {
        &self.root
    }

    /// Register `object` under `word`. See [`TrieNode::add_object`].
    pub fn add_object(&mut self, word: &A::Key, object: C::Item)
    where
        C::Item: Clone,
    {
        self.root.add_object(word, object);
    }

    /// Resolve the node for `prefix`, or `None` if no word starts with it.
    pub fn get_child(&self, prefix: &A::Key) -> Option<&TrieNode<A, C>> {
        self.root.get_child(prefix)
    }

    /// Like [`get_child`](Self::get_child), but a miss is an error.
    pub fn require_child(&self, prefix: &A::Key) -> Result<&TrieNode<A, C>> {
        self.root.require_child(prefix)
    }

    /// Every object in the trie, in collection order.
    pub fn get_objects(&self) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.root.get_objects()
    }

    /// Objects under any word starting with `prefix`. Empty on a miss.
    pub fn search(&self, prefix: &A::Key) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.get_child(prefix)
            .map(TrieNode::get_objects)
            .unwrap_or_default()
    }

    /// Objects registered under exactly `word`.
    pub fn objects_for_word(&self, word: &A::Key) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        self.root.objects_for_word(word)
    }

    /// Every distinct word in the trie.
    pub fn get_words(&self) -> &BTreeSet<A::Word> {
        self.root.get_words()
    }

    /// Words starting with `prefix`, if any word does.
    pub fn words_with_prefix(&self, prefix: &A::Key) -> Option<&BTreeSet<A::Word>> {
        self.root.words_with_prefix(prefix)
    }

    /// Returns `true` if `word` has been registered.
    pub fn contains_word(&self, word: &A::Key) -> bool {
        self.root.contains_word(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.root.get_words().len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.root.get_words().is_empty()
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Drop every word and object. The root survives.
    pub fn clear(&mut self) {
        debug!(words = self.len(), nodes = self.node_count(), "clearing trie");
        self.root.clear();
    }
}

impl<'a, A: Alphabet, C: ObjectCollection> IntoIterator for &'a TrieDb<A, C> {
    type Item = &'a C::Item;
    type IntoIter = C::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.objects()
    }
}
