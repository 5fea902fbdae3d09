//! Workspace index: per-file symbol trees linked across files.
//!
//! Each file's tree is built on its own (see [`crate::hir`]); what a file
//! cannot resolve locally stays in its pending pool. Installing a tree
//! links that pool against the files it imports and re-links every file
//! that imports it, after clearing all links into the tree being replaced.
//!
//! ## Key Types
//!
//! - [`Workspace`]: Owner of the installed trees and the link graph
//! - [`Snapshot`]: Immutable, consistent view used by queries
//! - [`WorkspaceConfig`] / [`Remapping`]: Import remappings and limits
//! - [`IndexOutcome`]: Installed, or dropped as stale
//!
//! ## Install sequence
//!
//! ```text
//! prepare(path, text)     ← parse + build, no lock, parallel-safe
//!     │
//!     ▼
//! install(prepared)       ← link lock held from here
//!     │  stale?           → Stale, nothing changes
//!     │  invalidate       ← unlink dependents, drop back links
//!     │  insert tree      ← or leave absent on syntax errors
//!     │  link file        ← inherited, imported, members
//!     │  re-link          ← importers (nearest first) and dependents
//!     ▼
//! snapshot swap           ← readers see old or new, never a mix
//! ```

mod config;
mod imports;
mod index;
mod linker;
mod snapshot;

pub use config::{Remapping, WorkspaceConfig, parse_remappings};
pub use imports::{candidate_path, import_matches, resolve_import};
pub use index::{IndexOutcome, PreparedFile, Workspace};
pub use snapshot::Snapshot;
