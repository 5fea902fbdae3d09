//! Assertions over linked symbol trees.

use solstice::hir::NodeRef;
use solstice::ide::Analysis;

/// Assert `usage` resolved to `declaration`.
pub fn assert_resolves_to(analysis: &Analysis, usage: NodeRef, declaration: NodeRef) {
    let node = analysis.node(usage).expect("usage exists in snapshot");
    assert_eq!(
        node.resolved_declaration,
        Some(declaration),
        "'{}' resolved to {:?}",
        node.name().unwrap_or("<unnamed>"),
        node.resolved_declaration
    );
}

/// No link anywhere in the snapshot points at a node that is not installed.
pub fn assert_no_dangling_links(analysis: &Analysis) {
    for tree in analysis.snapshot().trees() {
        for (_, node) in tree.nodes() {
            for link in node.resolved_declaration.iter().chain(&node.declared_type) {
                assert!(analysis.node(*link).is_some(), "dangling link {link:?}");
            }
            for back in &node.references {
                assert!(analysis.node(*back).is_some(), "dangling reference {back:?}");
            }
        }
    }
}

/// Every usage in every tree is either linked or still pending.
pub fn assert_pools_conserved(analysis: &Analysis) {
    for tree in analysis.snapshot().trees() {
        for (id, node) in tree.nodes() {
            if node.is_usage() {
                assert!(
                    node.is_resolved() != tree.is_pending(id),
                    "usage '{}' is neither resolved nor pending exactly once",
                    node.name().unwrap_or("<unnamed>")
                );
            }
        }
    }
}
