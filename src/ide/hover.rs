//! Hover target resolution.
//!
//! The core hands out nodes, not text: rendering hover contents is the
//! caller's business.

use smol_str::SmolStr;

use crate::base::{FileId, Position, Span};
use crate::hir::{NodeKind, NodeRef};
use crate::workspace::Snapshot;

/// What a hover at a position is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hovered usage.
    pub node: NodeRef,
    pub kind: NodeKind,
    pub name: Option<SmolStr>,
    /// Range to highlight: the usage's name, or the whole usage.
    pub range: Span,
    /// Declaration the usage resolved to.
    pub declaration: NodeRef,
    /// First declared type of the usage, for rendering.
    pub declared_type: Option<NodeRef>,
}

/// The usage node at `position`, if there is one.
///
/// Finds the deepest node containing the position and keeps it only when
/// it references a declaration by name. Import symbols are not hover
/// targets.
pub fn resolve_hover_target(
    snapshot: &Snapshot,
    file: FileId,
    position: Position,
) -> Option<NodeRef> {
    let tree = snapshot.tree(file)?;
    let id = tree.find_node_at(position)?;
    is_hover_kind(tree.node(id)?.kind()).then(|| tree.node_ref(id))
}

fn is_hover_kind(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Identifier
            | NodeKind::MemberAccess
            | NodeKind::UserDefinedTypeName
            | NodeKind::ModifierInvocation
    )
}

/// First entry of a node's declared type.
pub fn declared_type_of(snapshot: &Snapshot, node: NodeRef) -> Option<NodeRef> {
    snapshot.node(node)?.declared_type.first().copied()
}

/// The name a node declares or references.
pub fn identifier_name(snapshot: &Snapshot, node: NodeRef) -> Option<&str> {
    snapshot.node(node)?.name()
}

/// Hover information at a position.
///
/// `None` unless the position is on a usage that resolved to a declaration;
/// an unresolved name carries no information.
pub fn hover(snapshot: &Snapshot, file: FileId, position: Position) -> Option<HoverResult> {
    let target = resolve_hover_target(snapshot, file, position)?;
    let node = snapshot.node(target)?;
    let declaration = node.resolved_declaration?;
    Some(HoverResult {
        node: target,
        kind: node.kind(),
        name: node.name.clone(),
        range: node.name_range.unwrap_or(node.range),
        declaration,
        declared_type: declared_type_of(snapshot, target),
    })
}
