//! Foundation types for taxon.
//!
//! Every other taxon crate addresses its data by [`Path`]: an immutable
//! sequence of levels parsed from a `/`- or `.`-delimited string. Category
//! keys that must round-trip stably go through [`StrictPath`], which
//! sanitizes each level before use.
//!
//! # Key Types
//!
//! - [`Path`] — Immutable, structurally hashed sequence of path levels
//! - [`StrictPath`] — A [`Path`] whose levels have been sanitized
//! - [`TypeError`] — Errors from strict path construction

pub mod error;
pub mod path;
pub mod strict;

pub use error::{Result, TypeError};
pub use path::{Path, SEPARATORS};
pub use strict::{sanitize_segment, StrictPath};
