//! Prefix tries for taxon.
//!
//! A trie here is an *accumulating* index: inserting `(word, object)`
//! registers `object` on every node along `word`'s path, so resolving any
//! prefix of `word` yields `object`. The same node type serves two
//! alphabets:
//!
//! - [`Chars`] keys nodes by case-folded character, giving the keyword
//!   index [`RadixObjectDb`]. Objects keep first-insertion order.
//! - [`Levels`] keys nodes by whole path level, giving [`PathObjectDb`].
//!   Objects are kept sorted.
//!
//! # Modules
//!
//! - [`alphabet`] — The [`Alphabet`] trait and its two implementations
//! - [`collection`] — Object collection policies: [`UniqueList`], [`SortedSet`]
//! - [`node`] — The [`TrieNode`] itself
//! - [`db`] — [`TrieDb`], the root-owning wrapper
//! - [`error`] — Error types for `Result`-flavoured lookups

pub mod alphabet;
pub mod collection;
pub mod db;
pub mod error;
pub mod node;

pub use alphabet::{Alphabet, Chars, Levels};
pub use collection::{ObjectCollection, SortedSet, UniqueList};
pub use db::TrieDb;
pub use error::{Result, TrieError};
pub use node::{Descendants, TrieNode};

/// A character-keyed trie node whose objects keep first-insertion order.
pub type RadixObjectNode<T> = TrieNode<Chars, UniqueList<T>>;

/// The root of a character-keyed keyword index.
pub type RadixObjectDb<T> = TrieDb<Chars, UniqueList<T>>;

/// A path-level-keyed trie node whose objects are kept sorted.
pub type PathObjectNode<T> = TrieNode<Levels, SortedSet<T>>;

/// The root of a path-level-keyed index.
pub type PathObjectDb<T> = TrieDb<Levels, SortedSet<T>>;
