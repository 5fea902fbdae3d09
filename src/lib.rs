//! # solstice-base
//!
//! Core library for Solidity language intelligence: parsing, symbol linking,
//! and the read-only queries behind hover and go-to-definition.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → IDE features (hover target, goto-def, references)
//!   ↓
//! project    → Directory loading, remappings.txt discovery
//!   ↓
//! workspace  → Cross-file linking, re-analysis, invalidation
//!   ↓
//! hir        → Symbol trees: node model, tree builder, orphan resolution
//!   ↓
//! parser     → Logos lexer, recursive-descent parser, rowan CST
//!   ↓
//! base       → Primitives (FileId, Position/Span, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → workspace → project → ide)
// ============================================================================

/// Foundation types: FileId, Position/Span, LineIndex
pub mod base;

/// Crate-wide error type
pub mod error;

/// Parser: Logos lexer, recursive-descent parser, typed AST over rowan
pub mod parser;

/// Symbol trees: node model, factory, tree builder, orphan engine, locator
pub mod hir;

/// Workspace index: per-file trees, cross-file links, invalidation
pub mod workspace;

/// Project management: directory loading
pub mod project;

/// IDE features: hover target, goto-definition, find-references
pub mod ide;

// Re-export foundation types
pub use base::{FileId, FileSet, LineIndex, Position, Span};
pub use error::{AnalysisError, Result};
