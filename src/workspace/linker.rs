//! Cross-file linking of a file's residual pending pool.
//!
//! Runs after a tree is built, against the snapshot being assembled. Links
//! are computed against an immutable view first and applied afterwards, in
//! rounds, until a full round makes no progress:
//!
//! 1. import symbols and inheritance specifiers (everything else depends
//!    on them);
//! 2. plain usages: inherited members of the enclosing contract, then
//!    imported declarations;
//! 3. member accesses and qualified type names.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::FileId;
use crate::hir::{
    self, NodeData, NodeId, NodeKind, NodeRef, SymbolNode, claim_target, find_inherited,
    resolve_member_access, resolve_path,
};

use super::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Imports,
    Names,
    Members,
}

const PHASES: [Phase; 3] = [Phase::Imports, Phase::Names, Phase::Members];

/// Link what `file` could not resolve on its own. Returns how many usages
/// were linked.
pub(crate) fn link_file(snapshot: &mut Snapshot, file: FileId, max_depth: usize) -> usize {
    let mut total = 0;
    loop {
        let mut progress = 0;
        for phase in PHASES {
            loop {
                let links = collect_links(snapshot, file, phase, max_depth);
                if links.is_empty() {
                    break;
                }
                progress += apply_links(snapshot, file, links);
                if phase == Phase::Names {
                    break;
                }
            }
        }
        if progress == 0 {
            break;
        }
        total += progress;
    }
    if total > 0 {
        trace!(?file, linked = total, "cross-file links");
    }
    total
}

fn collect_links(
    snapshot: &Snapshot,
    file: FileId,
    phase: Phase,
    max_depth: usize,
) -> Vec<(NodeId, NodeRef)> {
    let Some(tree) = snapshot.tree(file) else {
        return Vec::new();
    };
    tree.pending()
        .filter_map(|usage| {
            let node = tree.node(usage)?;
            if phase_of(tree, node) != phase {
                return None;
            }
            let usage_ref = tree.node_ref(usage);
            let target = match phase {
                Phase::Imports => resolve_import_phase(snapshot, file, usage, node),
                Phase::Names => resolve_name(snapshot, usage_ref, node, max_depth),
                Phase::Members => resolve_member(snapshot, usage_ref, node, max_depth),
            }?;
            Some((usage, claim_target(snapshot, node, target)))
        })
        .collect()
}

fn phase_of(tree: &hir::FileSymbolTree, node: &SymbolNode) -> Phase {
    match node.kind() {
        NodeKind::ImportSymbol => Phase::Imports,
        NodeKind::MemberAccess => Phase::Members,
        NodeKind::UserDefinedTypeName if node.is_qualified_type_name() => Phase::Members,
        NodeKind::UserDefinedTypeName
            if node
                .parent
                .and_then(|p| tree.node(p))
                .is_some_and(|p| p.kind() == NodeKind::InheritanceSpecifier) =>
        {
            Phase::Imports
        }
        _ => Phase::Names,
    }
}

fn resolve_import_phase(
    snapshot: &Snapshot,
    file: FileId,
    usage: NodeId,
    node: &SymbolNode,
) -> Option<NodeRef> {
    if node.kind() == NodeKind::ImportSymbol {
        let import = node.parent?;
        return snapshot.import_symbol_target(file, import, usage);
    }
    let name = node.name()?;
    snapshot.imported(
        file,
        name,
        &|decl: &SymbolNode| decl.accepts_kind(node),
        &mut FxHashSet::from_iter([file]),
    )
}

/// Inherited members across files first, then imports.
fn resolve_name(
    snapshot: &Snapshot,
    usage: NodeRef,
    node: &SymbolNode,
    max_depth: usize,
) -> Option<NodeRef> {
    let tree = snapshot.tree(usage.file)?;
    let inherited = tree
        .enclosing_contract(usage.node)
        .and_then(|contract| find_inherited(snapshot, tree.node_ref(contract), node, max_depth));
    if inherited.is_some() {
        return inherited;
    }
    let name = node.name()?;
    snapshot.imported(
        usage.file,
        name,
        &|decl: &SymbolNode| decl.accepts_kind(node),
        &mut FxHashSet::from_iter([usage.file]),
    )
}

fn resolve_member(
    snapshot: &Snapshot,
    usage: NodeRef,
    node: &SymbolNode,
    max_depth: usize,
) -> Option<NodeRef> {
    match &node.data {
        NodeData::MemberAccess => resolve_member_access(snapshot, usage, max_depth),
        NodeData::UserDefinedTypeName { path } => {
            let segments: Vec<&str> = path.split('.').collect();
            let (first, rest) = segments.split_first()?;
            let head = resolve_path_head(snapshot, usage, first, max_depth)?;
            resolve_path(snapshot, head, rest, max_depth)
        }
        _ => None,
    }
}

/// The container the first segment of `A.B.C` names, seen from `usage`.
fn resolve_path_head(
    snapshot: &Snapshot,
    usage: NodeRef,
    first: &str,
    max_depth: usize,
) -> Option<NodeRef> {
    let tree = snapshot.tree(usage.file)?;
    let is_container = |decl: &SymbolNode| decl.kind().is_member_container();
    let named = |candidate: &NodeRef| {
        snapshot
            .node(*candidate)
            .is_some_and(|decl| decl.name() == Some(first) && is_container(decl))
    };

    for ancestor in tree.ancestors(usage.node) {
        let scope = tree.node_ref(ancestor);
        let scopes = match tree.node(ancestor).map(SymbolNode::kind) {
            Some(NodeKind::ContractDefinition) => hir::linearize(snapshot, scope, max_depth),
            _ => vec![scope],
        };
        let found = scopes
            .into_iter()
            .find_map(|s| hir::members(snapshot, s).into_iter().find(|c| named(c)));
        if found.is_some() {
            return found;
        }
    }

    snapshot.imported(
        usage.file,
        first,
        &is_container,
        &mut FxHashSet::from_iter([usage.file]),
    )
}

/// Apply computed links: the usage side in `file`, the back link in the
/// declaration's file.
fn apply_links(snapshot: &mut Snapshot, file: FileId, links: Vec<(NodeId, NodeRef)>) -> usize {
    let mut applied = 0;
    for (usage, declaration) in links {
        let Some(tree) = snapshot.tree_mut(file) else {
            break;
        };
        let usage_ref = tree.node_ref(usage);
        tree.link_external(usage, declaration);
        applied += 1;

        if snapshot.node(declaration).is_some() {
            if let Some(decl_tree) = snapshot.tree_mut(declaration.file) {
                decl_tree.add_reference(declaration.node, usage_ref);
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineIndex;
    use crate::hir::build_tree;
    use crate::parser::parse;

    fn snapshot(files: &[(&str, &str)]) -> Snapshot {
        let mut snapshot = Snapshot::new(Vec::new());
        let mut set = crate::base::FileSet::new();
        let mut trees = Vec::new();
        for (path, text) in files {
            let file = set.intern(path);
            let parse = parse(text);
            trees.push(build_tree(&parse.syntax(), file, 1, &LineIndex::new(text)));
        }
        snapshot.set_files(set);
        for tree in trees {
            snapshot.insert_tree(tree);
        }
        snapshot
    }

    fn find(snapshot: &Snapshot, path: &str, kind: NodeKind, name: &str) -> NodeRef {
        let file = snapshot.file_id(path).expect("file");
        let tree = snapshot.tree(file).expect("tree");
        let (id, _) = tree
            .nodes()
            .find(|(_, n)| n.kind() == kind && n.name() == Some(name))
            .unwrap_or_else(|| panic!("{kind:?} {name} in {path}"));
        tree.node_ref(id)
    }

    fn link(snapshot: &mut Snapshot, path: &str) -> usize {
        let file = snapshot.file_id(path).expect("file");
        link_file(snapshot, file, hir::DEFAULT_MAX_INHERITANCE_DEPTH)
    }

    #[test]
    fn test_plain_import_and_inherited_member() {
        let mut snapshot = snapshot(&[
            ("src/Base.sol", "contract Base { uint total; function bump() internal {} }"),
            (
                "src/Child.sol",
                "import \"./Base.sol\";\ncontract Child is Base { function f() public { bump(); total; } }",
            ),
        ]);
        assert!(link(&mut snapshot, "src/Child.sol") >= 3);

        let base_ref = find(&snapshot, "src/Child.sol", NodeKind::UserDefinedTypeName, "Base");
        let bump_ref = find(&snapshot, "src/Child.sol", NodeKind::Identifier, "bump");
        let total_ref = find(&snapshot, "src/Child.sol", NodeKind::Identifier, "total");
        let base = find(&snapshot, "src/Base.sol", NodeKind::ContractDefinition, "Base");
        let bump = find(&snapshot, "src/Base.sol", NodeKind::FunctionDefinition, "bump");
        let total = find(&snapshot, "src/Base.sol", NodeKind::VariableDeclaration, "total");

        let resolved = |r: NodeRef| snapshot.node(r).and_then(|n| n.resolved_declaration);
        assert_eq!(resolved(base_ref), Some(base));
        assert_eq!(resolved(bump_ref), Some(bump));
        assert_eq!(resolved(total_ref), Some(total));
        assert_eq!(
            snapshot.node(bump).map(|n| n.references.clone()),
            Some(vec![bump_ref])
        );
    }

    #[test]
    fn test_aliased_symbol_import() {
        let mut snapshot = snapshot(&[
            (
                "lib/Math.sol",
                "library Math { function max(uint a, uint b) internal pure returns (uint) { return a; } }",
            ),
            (
                "src/User.sol",
                "import {Math as M} from \"../lib/Math.sol\";\ncontract User { function f() public { M.max(1, 2); } }",
            ),
        ]);
        link(&mut snapshot, "src/User.sol");

        let symbol = find(&snapshot, "src/User.sol", NodeKind::ImportSymbol, "Math");
        let math = find(&snapshot, "lib/Math.sol", NodeKind::ContractDefinition, "Math");
        let max = find(&snapshot, "lib/Math.sol", NodeKind::FunctionDefinition, "max");
        let m = find(&snapshot, "src/User.sol", NodeKind::Identifier, "M");
        let access = find(&snapshot, "src/User.sol", NodeKind::MemberAccess, "max");

        let resolved = |r: NodeRef| snapshot.node(r).and_then(|n| n.resolved_declaration);
        assert_eq!(resolved(symbol), Some(math));
        assert_eq!(resolved(m), Some(math));
        assert_eq!(resolved(access), Some(max));
    }

    #[test]
    fn test_unit_alias_member_and_qualified_type() {
        let mut snapshot = snapshot(&[
            ("Types.sol", "struct Order { uint id; }\nenum Side { Buy, Sell }"),
            (
                "Book.sol",
                "import \"./Types.sol\" as T;\ncontract Book { T.Order last; function f() public { T.Side.Buy; } }",
            ),
        ]);
        link(&mut snapshot, "Book.sol");

        let order_use = find(&snapshot, "Book.sol", NodeKind::UserDefinedTypeName, "Order");
        let order = find(&snapshot, "Types.sol", NodeKind::StructDefinition, "Order");
        let buy_use = find(&snapshot, "Book.sol", NodeKind::MemberAccess, "Buy");
        let buy = find(&snapshot, "Types.sol", NodeKind::EnumValue, "Buy");

        let resolved = |r: NodeRef| snapshot.node(r).and_then(|n| n.resolved_declaration);
        assert_eq!(resolved(order_use), Some(order));
        assert_eq!(resolved(buy_use), Some(buy));
    }

    #[test]
    fn test_unimported_file_is_not_visible() {
        let mut snapshot = snapshot(&[
            ("A.sol", "contract Hidden {}"),
            ("B.sol", "contract B { Hidden h; }"),
        ]);
        assert_eq!(link(&mut snapshot, "B.sol"), 0);
        let usage = find(&snapshot, "B.sol", NodeKind::UserDefinedTypeName, "Hidden");
        let file = snapshot.file_id("B.sol").expect("file");
        assert!(
            snapshot
                .tree(file)
                .is_some_and(|t| t.is_pending(usage.node))
        );
    }

    #[test]
    fn test_transitive_plain_import() {
        let mut snapshot = snapshot(&[
            ("A.sol", "contract Deep {}"),
            ("B.sol", "import \"./A.sol\";"),
            ("C.sol", "import \"./B.sol\";\ncontract C { Deep d; }"),
        ]);
        link(&mut snapshot, "C.sol");
        let usage = find(&snapshot, "C.sol", NodeKind::UserDefinedTypeName, "Deep");
        let deep = find(&snapshot, "A.sol", NodeKind::ContractDefinition, "Deep");
        assert_eq!(
            snapshot.node(usage).and_then(|n| n.resolved_declaration),
            Some(deep)
        );
    }
}
