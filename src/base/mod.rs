//! Foundation types for the Solstice toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`FileSet`] - Interned file identifiers
//! - [`Position`], [`Span`] - Line/column positions for symbol nodes
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`normalize_path`] - Lexical path normalization for import lookup
//!
//! This module has NO dependencies on other solstice modules.

mod file_id;
mod line_index;
mod path;
mod position;

pub use file_id::{FileId, FileSet};
pub use line_index::LineIndex;
pub use path::{normalize_path, parent_dir};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
