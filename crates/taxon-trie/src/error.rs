//! Error types for trie lookups.

use thiserror::Error;

/// Errors from trie operations.
///
/// Insertion never fails; only the `require_*` lookups report a miss as
/// an error instead of `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrieError {
    /// No node matches the full prefix.
    #[error("prefix not found: {prefix}")]
    PrefixNotFound { prefix: String },
}

/// Convenience type alias for trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;
