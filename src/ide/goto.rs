//! Go-to-definition implementation.

use smol_str::SmolStr;

use crate::base::{FileId, Position, Span};
use crate::hir::{NodeKind, NodeRef, SymbolNode};
use crate::workspace::Snapshot;

use super::hover::resolve_hover_target;

/// A range in a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    pub span: Span,
}

impl Location {
    /// Where a node's name is written, or the whole node when it has none
    /// (constructors, fallback functions).
    pub fn of_name(node: &SymbolNode) -> Self {
        Self {
            file: node.file,
            span: node.name_range.unwrap_or(node.range),
        }
    }
}

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub location: Location,
    pub node: NodeRef,
    pub kind: NodeKind,
    pub name: Option<SmolStr>,
}

/// Where the declaration `node` resolved to is named.
///
/// `None` when `node` is unresolved or its declaration's tree is gone.
pub fn resolve_definition(snapshot: &Snapshot, node: NodeRef) -> Option<Location> {
    let declaration = snapshot.node(node)?.resolved_declaration?;
    snapshot.node(declaration).map(Location::of_name)
}

/// Find the definition of the usage at the given position.
pub fn goto_definition(snapshot: &Snapshot, file: FileId, position: Position) -> GotoResult {
    let target = resolve_hover_target(snapshot, file, position).and_then(|usage| {
        let declaration = snapshot.node(usage)?.resolved_declaration?;
        let node = snapshot.node(declaration)?;
        Some(GotoTarget {
            location: Location::of_name(node),
            node: declaration,
            kind: node.kind(),
            name: node.name.clone(),
        })
    });
    match target {
        Some(target) => GotoResult::single(target),
        None => GotoResult::empty(),
    }
}
