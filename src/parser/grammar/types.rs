//! Type names.

use super::expressions::parse_expression;
use super::items::{parse_parameter_list, parse_return_parameters};
use super::{Parser, SyntaxKind};
use crate::parser::parser::is_name_kind;

/// TypeName = (Elementary | UserDefined | Mapping | FunctionType) ('[' Expression? ']')*
///
/// Returns false without consuming anything when no type name starts here.
pub(super) fn parse_type_name(p: &mut Parser<'_>) -> bool {
    let checkpoint = p.checkpoint();
    match p.current_kind() {
        SyntaxKind::ELEMENTARY_TYPE_KW => parse_elementary_type_name(p),
        SyntaxKind::MAPPING_KW => parse_mapping(p),
        SyntaxKind::FUNCTION_KW => parse_function_type_name(p),
        kind if is_name_kind(kind) => parse_user_defined_type_name(p),
        kind => {
            p.error(format!("expected type name, found {:?}", kind));
            return false;
        }
    }

    while p.at(SyntaxKind::L_BRACKET) {
        p.start_node_at(checkpoint, SyntaxKind::ARRAY_TYPE_NAME);
        p.bump();
        if !p.at(SyntaxKind::R_BRACKET) {
            parse_expression(p);
        }
        p.expect(SyntaxKind::R_BRACKET);
        p.finish_node();
    }
    true
}

/// ElementaryTypeName = ELEMENTARY_TYPE ('payable')?
pub(super) fn parse_elementary_type_name(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ELEMENTARY_TYPE_NAME);
    let is_address = p.current_text() == "address";
    p.bump();
    if is_address {
        p.eat(SyntaxKind::PAYABLE_KW);
    }
    p.finish_node();
}

/// UserDefinedTypeName = NAME ('.' NAME)*
pub(super) fn parse_user_defined_type_name(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USER_DEFINED_TYPE_NAME);
    p.expect_name();
    while p.at(SyntaxKind::DOT) && is_name_kind(p.nth(1)) {
        p.bump();
        p.expect_name();
    }
    p.finish_node();
}

/// Mapping = 'mapping' '(' TypeName NAME? '=>' TypeName NAME? ')'
fn parse_mapping(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::MAPPING);
    p.bump();
    p.expect(SyntaxKind::L_PAREN);
    parse_type_name(p);
    if p.at_name() {
        p.expect_name();
    }
    p.expect(SyntaxKind::FAT_ARROW);
    parse_type_name(p);
    if p.at_name() {
        p.expect_name();
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// FunctionTypeName = 'function' ParameterList
///                    ('internal' | 'external' | 'pure' | 'view' | 'payable')*
///                    ReturnParameters?
fn parse_function_type_name(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::FUNCTION_TYPE_NAME);
    p.bump();
    parse_parameter_list(p);
    while p.at_any(&[
        SyntaxKind::INTERNAL_KW,
        SyntaxKind::EXTERNAL_KW,
        SyntaxKind::PURE_KW,
        SyntaxKind::VIEW_KW,
        SyntaxKind::PAYABLE_KW,
    ]) {
        p.bump();
    }
    if p.at(SyntaxKind::RETURNS_KW) {
        parse_return_parameters(p);
    }
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    fn state_variable_type(text: &str) -> SyntaxKind {
        let parse = parse(&format!("contract C {{ {text} }}"));
        assert!(parse.ok(), "{:?}", parse.errors);
        parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATION)
            .and_then(|decl| decl.first_child())
            .map(|ty| ty.kind())
            .expect("type name")
    }

    #[test]
    fn test_type_name_shapes() {
        assert_eq!(state_variable_type("uint x;"), SyntaxKind::ELEMENTARY_TYPE_NAME);
        assert_eq!(state_variable_type("address payable x;"), SyntaxKind::ELEMENTARY_TYPE_NAME);
        assert_eq!(state_variable_type("Lib.S x;"), SyntaxKind::USER_DEFINED_TYPE_NAME);
        assert_eq!(state_variable_type("uint[2][] x;"), SyntaxKind::ARRAY_TYPE_NAME);
        assert_eq!(
            state_variable_type("mapping(address owner => uint) x;"),
            SyntaxKind::MAPPING
        );
        assert_eq!(
            state_variable_type("function (uint) external returns (bool) x;"),
            SyntaxKind::FUNCTION_TYPE_NAME
        );
    }

    #[test]
    fn test_nested_array_wraps_outward() {
        let parse = parse("contract C { uint[2][] x; }");
        let outer = parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ARRAY_TYPE_NAME)
            .expect("array");
        let inner = outer.first_child().expect("inner");
        assert_eq!(inner.kind(), SyntaxKind::ARRAY_TYPE_NAME);
        assert_eq!(
            inner.first_child().map(|n| n.kind()),
            Some(SyntaxKind::ELEMENTARY_TYPE_NAME)
        );
    }
}
