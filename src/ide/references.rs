//! Find-references, built on the declarations' back links.

use crate::base::{FileId, Position};
use crate::hir::NodeRef;
use crate::workspace::Snapshot;

use super::goto::Location;

/// Result of a find-references request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// The declaration the references point at.
    pub declaration: Option<NodeRef>,
    pub references: Vec<Reference>,
}

impl ReferenceResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// A reference to a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub node: NodeRef,
    pub location: Location,
    /// Whether this entry is the declaration itself.
    pub is_definition: bool,
}

/// All usages of the declaration at `position`, or of the declaration the
/// usage at `position` resolves to.
pub fn find_references(
    snapshot: &Snapshot,
    file: FileId,
    position: Position,
    include_declaration: bool,
) -> ReferenceResult {
    let Some(declaration) = declaration_at(snapshot, file, position) else {
        return ReferenceResult::empty();
    };
    let Some(decl_node) = snapshot.node(declaration) else {
        return ReferenceResult::empty();
    };

    let mut references = Vec::new();
    if include_declaration {
        references.push(Reference {
            node: declaration,
            location: Location::of_name(decl_node),
            is_definition: true,
        });
    }
    references.extend(decl_node.references.iter().filter_map(|&usage| {
        let node = snapshot.node(usage)?;
        Some(Reference {
            node: usage,
            location: Location::of_name(node),
            is_definition: false,
        })
    }));

    ReferenceResult {
        declaration: Some(declaration),
        references,
    }
}

fn declaration_at(snapshot: &Snapshot, file: FileId, position: Position) -> Option<NodeRef> {
    let tree = snapshot.tree(file)?;
    let id = tree.find_node_at(position)?;
    let node = tree.node(id)?;
    if node.is_declaration() {
        Some(tree.node_ref(id))
    } else if node.is_usage() {
        node.resolved_declaration
    } else {
        None
    }
}
