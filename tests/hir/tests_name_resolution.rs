//! Name resolution tests over whole files.

use rstest::rstest;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;
use solstice::hir::NodeKind;

#[test]
fn test_forward_struct_reference_is_claimed() {
    let (host, _) = analysis_from_source(DEFINITION_SOL, "Definition.sol");
    let analysis = host.analysis();

    let structure = find_node(&analysis, "Definition.sol", NodeKind::StructDefinition, "S", 0);
    for nth in 0..2 {
        let usage = find_node(&analysis, "Definition.sol", NodeKind::UserDefinedTypeName, "S", nth);
        assert_resolves_to(&analysis, usage, structure);
    }
    assert_eq!(
        analysis.node(structure).map(|n| n.references.len()),
        Some(2)
    );
    assert_pools_conserved(&analysis);
}

#[rstest]
#[case::event(
    "event Paid(uint amount);",
    "emit Paid(1);",
    NodeKind::EventDefinition,
    "Paid"
)]
#[case::custom_error(
    "error Denied();",
    "revert Denied();",
    NodeKind::CustomErrorDefinition,
    "Denied"
)]
#[case::function_call(
    "function helper() internal {}",
    "helper();",
    NodeKind::FunctionDefinition,
    "helper"
)]
#[case::enum_type("enum Mode { On, Off }", "Mode m;", NodeKind::EnumDefinition, "Mode")]
fn test_forward_reference_to_contract_member(
    #[case] declaration: &str,
    #[case] statement: &str,
    #[case] kind: NodeKind,
    #[case] name: &str,
) {
    // usage first, declaration later in the same contract
    let source = format!(
        "contract C {{\n    function f() public {{ {statement} }}\n    {declaration}\n}}\n"
    );
    let (host, _) = analysis_from_solidity(&source);
    let analysis = host.analysis();

    let file = analysis.file_id("test.sol").expect("file");
    let tree = analysis.tree(file).expect("tree");
    let (decl_id, _) = tree
        .nodes()
        .find(|(_, n)| n.kind() == kind && n.name() == Some(name))
        .expect("declaration");
    let usage = tree
        .nodes()
        .find(|(_, n)| n.is_usage() && n.name() == Some(name))
        .map(|(id, _)| tree.node_ref(id))
        .expect("usage");

    assert_resolves_to(&analysis, usage, tree.node_ref(decl_id));
    assert_eq!(tree.pending_len(), 0);
}

#[test]
fn test_derived_member_shadows_base_member() {
    let source = r#"contract Base {
    function fee() public pure virtual returns (uint) { return 1; }
}

contract Derived is Base {
    function fee() public pure override returns (uint) { return 2; }

    function total() public pure returns (uint) {
        return fee();
    }
}
"#;
    let (host, _) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let usage = find_node(&analysis, "test.sol", NodeKind::Identifier, "fee", 0);
    let derived = find_node(&analysis, "test.sol", NodeKind::FunctionDefinition, "fee", 1);
    assert_resolves_to(&analysis, usage, derived);
}

#[test]
fn test_inherited_state_variable_from_grandparent() {
    let source = r#"contract A { uint shared; }
contract B is A {}
contract C is B {
    function read() public view returns (uint) { return shared; }
}
"#;
    let (host, _) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let usage = find_node(&analysis, "test.sol", NodeKind::Identifier, "shared", 0);
    let decl = find_node(&analysis, "test.sol", NodeKind::VariableDeclaration, "shared", 0);
    assert_resolves_to(&analysis, usage, decl);
}

#[test]
fn test_case_sensitive_names() {
    let source = "contract C { uint total; function f() public { Total; } }";
    let (host, _) = analysis_from_solidity(source);
    let analysis = host.analysis();

    let usage = find_node(&analysis, "test.sol", NodeKind::Identifier, "Total", 0);
    assert_eq!(analysis.node(usage).and_then(|n| n.resolved_declaration), None);
}

#[test]
fn test_rebuild_yields_identical_links() {
    let first = analysis_from_solidity(TOKEN_SOL).0.analysis();
    let second = analysis_from_solidity(TOKEN_SOL).0.analysis();

    let links = |analysis: &solstice::ide::Analysis| {
        let file = analysis.file_id("test.sol").expect("file");
        analysis
            .tree(file)
            .expect("tree")
            .nodes()
            .map(|(id, n)| (id, n.resolved_declaration.map(|d| d.node)))
            .collect::<Vec<_>>()
    };
    assert_eq!(links(&first), links(&second));
}
