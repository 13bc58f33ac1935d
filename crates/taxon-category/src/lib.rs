//! Category trees for taxon.
//!
//! Objects are filed under a hierarchical category [`Path`] such as
//! `/reports/finance/q3` and, within a category, under free-text keywords.
//!
//! # Architecture
//!
//! - [`PathTree`] is an arena of [`TreeNode`]s addressed by [`NodeId`].
//!   Descent either stays read-only ([`PathTree::lookup`]) or creates
//!   missing levels ([`PathTree::lookup_or_create`]). Resolved paths are
//!   memoized until the next [`PathTree::clear`], which also bumps the
//!   tree's generation so older ids stop resolving.
//! - [`CategoryObjectDb`] puts a keyword index ([`RadixObjectDb`]) at
//!   every node of a path tree.
//! - [`TextObjectDb`] puts at most one value at every node instead.
//! - [`SimpleCategoryObjectDb`] is the flat alternative: one keyword index
//!   per full path, no intermediate nodes.
//!
//! Every db reserves an "all categories" index at
//! [`IndexConfig::all_categories`].
//!
//! # Modules
//!
//! - [`config`] — [`IndexConfig`], loadable from TOML
//! - [`error`] — [`CategoryError`]
//! - [`tree`] — The arena-backed [`PathTree`]
//! - [`category`] — [`CategoryObjectDb`]
//! - [`text`] — [`TextObjectDb`]
//! - [`simple`] — [`SimpleCategoryObjectDb`]
//!
//! [`Path`]: taxon_types::Path
//! [`RadixObjectDb`]: taxon_trie::RadixObjectDb

pub mod category;
pub mod config;
pub mod error;
pub mod simple;
pub mod text;
pub mod tree;

pub use category::{CategoryObjectDb, CategoryObjectNode};
pub use config::{IndexConfig, DEFAULT_ALL_CATEGORIES};
pub use error::{CategoryError, Result};
pub use simple::SimpleCategoryObjectDb;
pub use text::{TextObjectDb, TextObjectNode};
pub use tree::{NodeId, PathTree, TreeNode};
