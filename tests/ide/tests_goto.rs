//! Go to definition tests for the IDE layer.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use solstice::hir::NodeKind;

// =============================================================================
// GOTO DEFINITION - SINGLE FILE
// =============================================================================

#[test]
fn test_goto_definition_forward_struct_in_return_type() {
    let (host, file_id) = analysis_from_source(DEFINITION_SOL, "Definition.sol");
    let analysis = host.analysis();

    // `S` in `returns (S memory)`
    let position = position_of(DEFINITION_SOL, "S memory", 0, 0);
    let result = analysis.goto_definition(file_id, position);

    assert!(!result.is_empty(), "Goto definition should find the struct");
    let target = &result.targets[0];
    assert_eq!(target.kind, NodeKind::StructDefinition);
    assert_eq!(target.name.as_deref(), Some("S"));
    assert_eq!(target.location.file, file_id);
    assert_eq!(
        target.location.span.start,
        position_of(DEFINITION_SOL, "S {", 0, 0),
        "Should land on the struct's name"
    );
}

#[test]
fn test_resolve_definition_matches_goto() {
    let (host, file_id) = analysis_from_source(DEFINITION_SOL, "Definition.sol");
    let analysis = host.analysis();

    // the local `S memory s;` inside the function body
    let position = position_of(DEFINITION_SOL, "S memory", 1, 0);
    let usage = analysis
        .resolve_hover_target(file_id, position)
        .expect("type name under cursor");
    let location = analysis.resolve_definition(usage).expect("resolved");
    let goto = analysis.goto_definition(file_id, position);

    assert_eq!(goto.targets.len(), 1);
    assert_eq!(goto.targets[0].location, location);
}

#[test]
fn test_goto_definition_forward_function_call() {
    let source = r#"contract Caller {
    function run() public {
        helper();
    }

    function helper() internal {}
}
"#;
    let (host, file_id) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let result = analysis.goto_definition(file_id, position_of(source, "helper();", 0, 2));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].kind, NodeKind::FunctionDefinition);
    assert_eq!(
        result.targets[0].location.span.start,
        position_of(source, "helper()", 1, 0)
    );
}

#[test]
fn test_goto_definition_on_declaration_is_empty() {
    let (host, file_id) = analysis_from_source(DEFINITION_SOL, "Definition.sol");
    let analysis = host.analysis();

    // the `x` field declaration, not a usage
    let result = analysis.goto_definition(file_id, position_of(DEFINITION_SOL, "x;", 0, 0));
    assert!(result.is_empty());
}

#[test]
fn test_goto_definition_unresolved_is_empty() {
    let source = "contract C { function f() public { nowhere(); } }";
    let (host, file_id) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let result = analysis.goto_definition(file_id, position_of(source, "nowhere", 0, 1));
    assert!(result.is_empty());
}

// =============================================================================
// GOTO DEFINITION - ACROSS FILES
// =============================================================================

#[test]
fn test_goto_definition_base_contract_survives_parent_reindex() {
    let mut host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);

    for _ in 0..2 {
        host.set_file_content("Parent.sol", PARENT_SOL)
            .expect("re-index parent");
        let analysis = host.analysis();
        let child = analysis.file_id("Child.sol").expect("child");
        let parent = analysis.file_id("Parent.sol").expect("parent");

        // `Base` in `is Base(42)`
        let result = analysis.goto_definition(child, position_of(CHILD_SOL, "Base(42)", 0, 1));
        assert_eq!(result.targets.len(), 1, "link must hold after re-analysis");
        let target = &result.targets[0];
        assert_eq!(target.location.file, parent);
        assert_eq!(target.kind, NodeKind::ContractDefinition);
        assert_eq!(
            target.location.span.start,
            position_of(PARENT_SOL, "Base", 0, 0)
        );
    }
}

#[test]
fn test_goto_definition_inherited_function_across_files() {
    let host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);
    let analysis = host.analysis();
    let child = analysis.file_id("Child.sol").expect("child");

    let ping = analysis.goto_definition(child, position_of(CHILD_SOL, "ping()", 0, 1));
    assert_eq!(ping.targets.len(), 1);
    assert_eq!(ping.targets[0].name.as_deref(), Some("ping"));

    let seed = analysis.goto_definition(child, position_of(CHILD_SOL, "seed", 0, 1));
    assert_eq!(seed.targets.len(), 1);
    assert_eq!(seed.targets[0].kind, NodeKind::VariableDeclaration);
}

#[test]
fn test_goto_definition_constructor_invocation_lands_on_base_constructor() {
    let mut host = analysis_from_files(&[
        ("Parent.sol", PARENT_SOL),
        ("Child.sol", CHILD_WITH_CONSTRUCTOR_SOL),
    ]);

    for _ in 0..2 {
        host.set_file_content("Parent.sol", PARENT_SOL)
            .expect("re-index parent");
        let analysis = host.analysis();
        let child = analysis.file_id("Child.sol").expect("child");
        let parent = analysis.file_id("Parent.sol").expect("parent");

        // `Base` in `constructor() Base(7)`
        let position = position_of(CHILD_WITH_CONSTRUCTOR_SOL, "Base(7)", 0, 1);
        let result = analysis.goto_definition(child, position);
        assert_eq!(result.targets.len(), 1);
        let target = &result.targets[0];
        assert_eq!(target.location.file, parent);
        assert_eq!(target.kind, NodeKind::FunctionDefinition);
        assert_eq!(target.name, None, "constructors are unnamed");
        assert_eq!(
            target.location.span.start,
            position_of(PARENT_SOL, "constructor", 0, 0)
        );
    }
}
