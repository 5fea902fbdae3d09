//! Pending pool behavior: what stays unresolved and in which order.

use solstice::hir::{NodeKind, build_tree};
use solstice::parser::parse;
use solstice::{FileId, LineIndex};

fn names_pending(source: &str) -> Vec<String> {
    let parse = parse(source);
    assert!(parse.ok(), "parse errors: {:?}", parse.errors);
    let tree = build_tree(&parse.syntax(), FileId::new(0), 1, &LineIndex::new(source));
    tree.pending()
        .filter_map(|id| tree.node(id))
        .filter_map(|n| n.name().map(str::to_string))
        .collect()
}

#[test]
fn test_unknown_names_stay_pending_in_source_order() {
    let source = "contract C { function f() public { first(); second(); third(); } }";
    assert_eq!(names_pending(source), ["first", "second", "third"]);
}

#[test]
fn test_imported_names_stay_pending_without_workspace() {
    let source = r#"import "./Base.sol";
contract Child is Base {
    function f() public { ping(); }
}
"#;
    let pending = names_pending(source);
    assert!(pending.iter().any(|n| n == "Base"));
    assert!(pending.iter().any(|n| n == "ping"));
}

#[test]
fn test_builtins_never_enter_the_pool() {
    let source = r#"contract C {
    function f() public view {
        require(block.timestamp > 0, "early");
        assert(this == this);
    }
}
"#;
    let pending = names_pending(source);
    for builtin in ["require", "assert", "this", "block"] {
        assert!(!pending.iter().any(|n| n == builtin), "{builtin} pending");
    }
}

#[test]
fn test_syntax_error_still_builds_partial_tree() {
    let source = "contract A { uint x; function f( }";
    let parse = parse(source);
    assert!(!parse.ok());
    let tree = build_tree(&parse.syntax(), FileId::new(0), 1, &LineIndex::new(source));
    assert!(
        tree.nodes()
            .any(|(_, n)| n.kind() == NodeKind::VariableDeclaration && n.name() == Some("x"))
    );
}
