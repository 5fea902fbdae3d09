//! Symbol trees: the semantic model built from one file's CST.
//!
//! Every composite syntax node becomes a [`SymbolNode`] in a flat
//! per-file arena ([`FileSymbolTree`]). Usages are linked to the
//! declarations they name while the tree is built; whatever the file cannot
//! resolve on its own stays in the tree's pending pool for the workspace
//! linker.
//!
//! ## Key Types
//!
//! - [`NodeKind`]: Kind tag plus the resolution roles of each kind
//! - [`SymbolNode`] / [`NodeData`]: Shared fields and kind payload
//! - [`NodeRef`]: Generation-checked handle to a node in any file
//! - [`TreeBuilder`]: Builds a tree and runs the orphan claim engine
//! - [`NodeLookup`]: Read access used by member resolution
//!
//! ## Build Pipeline
//!
//! ```text
//! SyntaxNode (rowan)
//!     │  make_node           ← factory: kind, name, ranges, payload
//!     ▼
//! SymbolNode
//!     │  accept              ← immediate lookup, or pending pool
//!     ▼                         declarations claim pending usages
//! FileSymbolTree
//!     │  member fixpoint     ← `a.b`, `L.S` once bases are linked
//!     ▼
//! residual pending pool     ← handed to workspace linking
//! ```

mod builder;
mod factory;
mod kind;
mod locate;
mod members;
mod node;
mod tree;

pub use builder::{DEFAULT_MAX_INHERITANCE_DEPTH, TreeBuilder, build_tree};
pub use factory::make_node;
pub use kind::{BUILTINS, NodeKind, is_builtin};
pub use locate::find_node_at;
pub use members::{
    NodeLookup, claim_target, constructor_of, find_inherited, find_member, linearize, members,
    resolve_member_access, resolve_path,
};
pub use node::{NodeData, NodeId, NodeRef, SymbolNode};
pub use tree::FileSymbolTree;
