//! Hover tests for the IDE layer.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use solstice::hir::NodeKind;

#[test]
fn test_hover_unresolved_identifier_is_none() {
    let source = r#"contract C {
    function f() public {
        undefinedThing();
    }
}
"#;
    let (host, file_id) = analysis_from_solidity(source);
    let analysis = host.analysis();
    let position = position_of(source, "undefinedThing", 0, 3);

    // The usage is found, but nothing is known about it.
    let target = analysis
        .resolve_hover_target(file_id, position)
        .expect("usage under cursor");
    assert_eq!(analysis.identifier_name(target), Some("undefinedThing"));
    assert_eq!(analysis.resolve_definition(target), None);
    assert!(analysis.hover(file_id, position).is_none());
}

#[test]
fn test_hover_on_whitespace_is_none() {
    let (host, file_id) = analysis_from_solidity(SHADOWING_SOL);
    let analysis = host.analysis();
    assert!(analysis.hover(file_id, solstice::Position::new(40, 0)).is_none());
}

#[test]
fn test_hover_local_shadows_state_variable() {
    let (host, file_id) = analysis_from_solidity(SHADOWING_SOL);
    let analysis = host.analysis();

    let state = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "value", 0);
    let local = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "value", 1);

    // `return value;` in outer() and member()
    let in_outer = analysis
        .hover(file_id, position_of(SHADOWING_SOL, "value;", 1, 0))
        .expect("hover in outer");
    assert_eq!(in_outer.declaration, local);

    let in_member = analysis
        .hover(file_id, position_of(SHADOWING_SOL, "value;", 2, 0))
        .expect("hover in member");
    assert_eq!(in_member.declaration, state);
}

#[test]
fn test_hover_reports_usage_range_and_declared_type() {
    let (host, file_id) = analysis_from_solidity(TOKEN_SOL);
    let analysis = host.analysis();

    let position = position_of(TOKEN_SOL, "balances[to]", 0, 4);
    let hover = analysis.hover(file_id, position).expect("hover");

    assert_eq!(hover.kind, NodeKind::Identifier);
    assert_eq!(hover.name.as_deref(), Some("balances"));
    assert_eq!(hover.range.start, position_of(TOKEN_SOL, "balances[to]", 0, 0));

    let declared = hover.declared_type.expect("typed usage");
    assert_eq!(declared, hover.declaration);
    assert_eq!(
        analysis.node(declared).map(|n| n.kind()),
        Some(NodeKind::VariableDeclaration)
    );
}

#[test]
fn test_hover_member_access_on_struct_field() {
    let source = r#"contract Points {
    struct Point {
        uint x;
        uint y;
    }

    Point origin;

    function getY() public view returns (uint) {
        return origin.y;
    }
}
"#;
    let (host, file_id) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let hover = analysis
        .hover(file_id, position_of(source, "origin.y", 0, 7))
        .expect("hover on member");
    assert_eq!(hover.kind, NodeKind::MemberAccess);
    let field = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "y", 0);
    assert_eq!(hover.declaration, field);
}

#[test]
fn test_declared_type_of_declaration_is_itself() {
    let (host, _) = analysis_from_solidity(TOKEN_SOL);
    let analysis = host.analysis();
    let balances = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "balances", 0);
    assert_eq!(analysis.declared_type_of(balances), Some(balances));
}

#[test]
fn test_import_symbol_is_not_a_hover_target() {
    let host = analysis_from_files(&[
        ("Parent.sol", PARENT_SOL),
        ("Child.sol", CHILD_WITH_CONSTRUCTOR_SOL),
    ]);
    let analysis = host.analysis();
    let file = analysis.file_id("Child.sol").expect("child");

    let on_import = position_of(CHILD_WITH_CONSTRUCTOR_SOL, "Base", 0, 1);
    assert!(analysis.resolve_hover_target(file, on_import).is_none());
    assert!(analysis.hover(file, on_import).is_none());

    // the same name used as a base is a target
    let on_base = position_of(CHILD_WITH_CONSTRUCTOR_SOL, "Base", 1, 1);
    let target = analysis
        .resolve_hover_target(file, on_base)
        .expect("base name");
    assert_eq!(analysis.identifier_name(target), Some("Base"));
}
