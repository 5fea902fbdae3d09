//! Position → node lookup.

use super::node::NodeId;
use super::tree::FileSymbolTree;
use crate::base::Position;

/// Deepest node whose range contains `position` (end inclusive).
///
/// Descends from the root, always into the first child that contains the
/// position; returns `None` when the root itself does not.
pub fn find_node_at(tree: &FileSymbolTree, position: Position) -> Option<NodeId> {
    let mut current = tree.root();
    if !tree.node(current)?.range.contains(position) {
        return None;
    }

    'descend: loop {
        let node = tree.node(current)?;
        for &child in &node.children {
            if tree
                .node(child)
                .is_some_and(|c| c.range.contains(position))
            {
                current = child;
                continue 'descend;
            }
        }
        return Some(current);
    }
}

impl FileSymbolTree {
    pub fn find_node_at(&self, position: Position) -> Option<NodeId> {
        find_node_at(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LineIndex};
    use crate::hir::{NodeKind, build_tree};
    use crate::parser::parse;

    fn tree(text: &str) -> FileSymbolTree {
        let parse = parse(text);
        build_tree(&parse.syntax(), FileId::new(0), 1, &LineIndex::new(text))
    }

    fn kind_at(tree: &FileSymbolTree, line: usize, column: usize) -> Option<NodeKind> {
        let id = tree.find_node_at(Position::new(line, column))?;
        tree.node(id).map(|n| n.kind())
    }

    #[test]
    fn test_deepest_node_wins() {
        let tree = tree("contract C {\n    function f() public { g(1); }\n}");
        assert_eq!(kind_at(&tree, 1, 26), Some(NodeKind::Identifier));
        assert_eq!(kind_at(&tree, 1, 28), Some(NodeKind::NumberLiteral));
        assert_eq!(kind_at(&tree, 1, 4), Some(NodeKind::FunctionDefinition));
        assert_eq!(kind_at(&tree, 0, 0), Some(NodeKind::ContractDefinition));
    }

    #[test]
    fn test_member_name_lands_on_member_access() {
        let tree = tree("contract C { function f() public { a.b; } }");
        // column of `b`
        assert_eq!(kind_at(&tree, 0, 37), Some(NodeKind::MemberAccess));
        assert_eq!(kind_at(&tree, 0, 35), Some(NodeKind::Identifier));
    }

    #[test]
    fn test_outside_any_node() {
        let tree = tree("contract C {}");
        assert_eq!(kind_at(&tree, 5, 0), None);
    }
}
