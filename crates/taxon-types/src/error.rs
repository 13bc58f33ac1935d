use thiserror::Error;

/// Errors produced by path construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid path level {level:?}: {reason}")]
    InvalidLevel { level: String, reason: String },
}

/// Convenience type alias for path operations.
pub type Result<T> = std::result::Result<T, TypeError>;
