//! Find references tests for the IDE layer.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use solstice::hir::NodeKind;

#[test]
fn test_find_references_from_declaration() {
    let (host, file_id) = analysis_from_solidity(TOKEN_SOL);
    let analysis = host.analysis();

    let position = position_of(TOKEN_SOL, "amount)", 1, 0);
    let result = analysis.find_references(file_id, position, false);

    assert_eq!(result.len(), 3, "two updates and the emit");
    assert!(result.references.iter().all(|r| !r.is_definition));
    let param = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "amount", 1);
    assert_eq!(result.declaration, Some(param));
}

#[test]
fn test_find_references_from_usage_includes_declaration() {
    let (host, file_id) = analysis_from_solidity(TOKEN_SOL);
    let analysis = host.analysis();

    let position = position_of(TOKEN_SOL, "balances[to]", 0, 2);
    let result = analysis.find_references(file_id, position, true);

    assert_eq!(result.len(), 3);
    let definitions: Vec<_> = result.references.iter().filter(|r| r.is_definition).collect();
    assert_eq!(definitions.len(), 1);
    assert_eq!(
        definitions[0].location.span.start,
        position_of(TOKEN_SOL, "balances;", 0, 0)
    );
}

#[test]
fn test_find_references_across_files() {
    let host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);
    let analysis = host.analysis();
    let parent = analysis.file_id("Parent.sol").expect("parent");
    let child = analysis.file_id("Child.sol").expect("child");

    let result = analysis.find_references(parent, position_of(PARENT_SOL, "ping", 0, 0), false);
    assert_eq!(result.len(), 1);
    assert_eq!(result.references[0].location.file, child);
}

#[test]
fn test_find_references_nothing_at_position() {
    let (host, file_id) = analysis_from_solidity(TOKEN_SOL);
    let analysis = host.analysis();
    let result = analysis.find_references(file_id, solstice::Position::new(99, 0), true);
    assert!(result.is_empty());
    assert_eq!(result.declaration, None);
}
