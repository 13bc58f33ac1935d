//! Error types for category operations.

use thiserror::Error;

/// Errors that can occur in category trees and their configuration.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// A node id from before the last `clear()` was used.
    #[error("stale node id {index} (generation {generation}, tree is at {current})")]
    StaleNode {
        index: usize,
        generation: u64,
        current: u64,
    },

    /// The configuration is malformed or inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while reading a config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for category operations.
pub type Result<T> = std::result::Result<T, CategoryError>;
