//! Expression parsing
//!
//! Pratt parser over the Solidity precedence ladder, lowest first:
//!
//! ```text
//! Assignment (right) → Conditional (right) → '||' → '&&' → '==' '!='
//!     → '<' '>' '<=' '>=' → '|' → '^' → '&' → '<<' '>>' '>>>'
//!     → '+' '-' → '*' '/' '%' → '**' (right) → prefix unary
//!     → postfix ('.', '[]', '()', '{}', '++', '--') → primary
//! ```
//!
//! Binary operators and assignments both produce `BINARY_OPERATION`;
//! wrapping uses rowan checkpoints so the left operand ends up as the first
//! child.

use super::types::{parse_elementary_type_name, parse_type_name};
use super::{Parser, SyntaxKind};
use crate::parser::keywords::NUMBER_UNITS;
use crate::parser::parser::is_name_kind;

const CONDITIONAL_BP: (u8, u8) = (4, 3);
const PREFIX_BP: u8 = 27;

fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    let bp = match kind {
        kind if kind.is_assignment_op() => (2, 1),
        SyntaxKind::PIPE_PIPE => (5, 6),
        SyntaxKind::AMP_AMP => (7, 8),
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => (9, 10),
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => (11, 12),
        SyntaxKind::PIPE => (13, 14),
        SyntaxKind::CARET => (15, 16),
        SyntaxKind::AMP => (17, 18),
        SyntaxKind::SHL | SyntaxKind::SHR | SyntaxKind::SAR => (19, 20),
        SyntaxKind::PLUS | SyntaxKind::MINUS => (21, 22),
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => (23, 24),
        SyntaxKind::STAR_STAR => (26, 25),
        _ => return None,
    };
    Some(bp)
}

/// Parse an expression, returning true if any tokens were consumed
pub(super) fn parse_expression(p: &mut Parser<'_>) -> bool {
    parse_expression_bp(p, 0)
}

fn parse_expression_bp(p: &mut Parser<'_>, min_bp: u8) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_unary(p) {
        return false;
    }

    loop {
        let op = p.current_kind();

        if op == SyntaxKind::QUESTION {
            let (l_bp, r_bp) = CONDITIONAL_BP;
            if l_bp < min_bp {
                break;
            }
            p.start_node_at(checkpoint, SyntaxKind::CONDITIONAL);
            p.bump();
            parse_expression_bp(p, 0);
            p.expect(SyntaxKind::COLON);
            parse_expression_bp(p, r_bp);
            p.finish_node();
            continue;
        }

        let Some((l_bp, r_bp)) = infix_binding_power(op) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }
        p.start_node_at(checkpoint, SyntaxKind::BINARY_OPERATION);
        p.bump();
        if !parse_expression_bp(p, r_bp) {
            p.error("expected right operand");
        }
        p.finish_node();
    }
    true
}

/// Unary = ('!' | '~' | '-' | '++' | '--' | 'delete') Unary | Postfix
fn parse_unary(p: &mut Parser<'_>) -> bool {
    match p.current_kind() {
        SyntaxKind::BANG
        | SyntaxKind::TILDE
        | SyntaxKind::MINUS
        | SyntaxKind::PLUS_PLUS
        | SyntaxKind::MINUS_MINUS
        | SyntaxKind::DELETE_KW => {
            p.start_node(SyntaxKind::UNARY_OPERATION);
            p.bump();
            if !parse_expression_bp(p, PREFIX_BP) {
                p.error("expected operand");
            }
            p.finish_node();
            true
        }
        _ => parse_postfix(p),
    }
}

fn parse_postfix(p: &mut Parser<'_>) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_primary(p) {
        return false;
    }

    let mut last = None;
    loop {
        let kind = match p.current_kind() {
            SyntaxKind::DOT => {
                p.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS);
                p.bump();
                let member = p.current_kind();
                if member == SyntaxKind::IDENT || is_name_kind(member) || member.is_keyword() {
                    p.bump_remap(SyntaxKind::IDENT);
                } else {
                    p.error("expected member name");
                }
                SyntaxKind::MEMBER_ACCESS
            }
            SyntaxKind::L_BRACKET => {
                p.bump();
                let mut kind = SyntaxKind::INDEX_ACCESS;
                if !p.at(SyntaxKind::COLON) && !p.at(SyntaxKind::R_BRACKET) {
                    parse_expression(p);
                }
                if p.eat(SyntaxKind::COLON) {
                    kind = SyntaxKind::INDEX_RANGE_ACCESS;
                    if !p.at(SyntaxKind::R_BRACKET) {
                        parse_expression(p);
                    }
                }
                p.expect(SyntaxKind::R_BRACKET);
                p.start_node_at(checkpoint, kind);
                kind
            }
            SyntaxKind::L_PAREN => {
                p.start_node_at(checkpoint, SyntaxKind::FUNCTION_CALL);
                parse_call_arguments(p);
                SyntaxKind::FUNCTION_CALL
            }
            SyntaxKind::L_BRACE
                if last != Some(SyntaxKind::FUNCTION_CALL)
                    && is_name_kind(p.nth(1))
                    && p.nth(2) == SyntaxKind::COLON =>
            {
                p.start_node_at(checkpoint, SyntaxKind::NAME_VALUE_EXPRESSION);
                parse_name_value_list(p);
                SyntaxKind::NAME_VALUE_EXPRESSION
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                p.start_node_at(checkpoint, SyntaxKind::UNARY_OPERATION);
                p.bump();
                SyntaxKind::UNARY_OPERATION
            }
            _ => break,
        };
        p.finish_node();
        last = Some(kind);
    }
    true
}

fn parse_primary(p: &mut Parser<'_>) -> bool {
    match p.current_kind() {
        kind if is_name_kind(kind) || kind == SyntaxKind::TYPE_KW => {
            p.start_node(SyntaxKind::IDENTIFIER);
            p.bump_remap(SyntaxKind::IDENT);
            p.finish_node();
        }
        SyntaxKind::DECIMAL_NUMBER | SyntaxKind::HEX_NUMBER => {
            p.start_node(SyntaxKind::NUMBER_LITERAL);
            p.bump();
            if p.at(SyntaxKind::IDENT) && NUMBER_UNITS.contains(&p.current_text()) {
                p.bump();
            }
            p.finish_node();
        }
        SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => {
            p.start_node(SyntaxKind::BOOLEAN_LITERAL);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::STRING => {
            p.start_node(SyntaxKind::STRING_LITERAL);
            while p.at(SyntaxKind::STRING) {
                p.bump();
            }
            p.finish_node();
        }
        SyntaxKind::HEX_STRING => {
            p.start_node(SyntaxKind::HEX_LITERAL);
            while p.at(SyntaxKind::HEX_STRING) {
                p.bump();
            }
            p.finish_node();
        }
        SyntaxKind::L_PAREN => parse_tuple(p, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN),
        SyntaxKind::L_BRACKET => parse_tuple(p, SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET),
        SyntaxKind::NEW_KW => {
            p.start_node(SyntaxKind::NEW_EXPRESSION);
            p.bump();
            parse_type_name(p);
            p.finish_node();
        }
        SyntaxKind::ELEMENTARY_TYPE_KW | SyntaxKind::PAYABLE_KW => {
            // `uint256(x)`, `payable(a)`, `(uint[], address)` in abi.decode
            p.start_node(SyntaxKind::TYPE_NAME_EXPRESSION);
            let checkpoint = p.checkpoint();
            parse_elementary_type_name(p);
            while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
                p.start_node_at(checkpoint, SyntaxKind::ARRAY_TYPE_NAME);
                p.bump();
                p.bump();
                p.finish_node();
            }
            p.finish_node();
        }
        kind => {
            p.error(format!("expected expression, found {:?}", kind));
            return false;
        }
    }
    true
}

/// Tuple = '(' Expression? (',' Expression?)* ')' ; InlineArray = '[' ... ']'
fn parse_tuple(p: &mut Parser<'_>, open: SyntaxKind, close: SyntaxKind) {
    p.start_node(SyntaxKind::TUPLE_EXPRESSION);
    p.bump();
    loop {
        if p.eat(SyntaxKind::COMMA) {
            continue;
        }
        if p.at(close) || p.at_eof() {
            break;
        }
        if !parse_expression(p) || !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(close) {
        p.error(format!("expected {:?} to close {:?}", close, open));
    }
    p.finish_node();
}

/// CallArguments = '(' (Expression (',' Expression)* | NameValueList)? ')'
pub(super) fn parse_call_arguments(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::CALL_ARGUMENTS);
    p.expect(SyntaxKind::L_PAREN);
    if p.at(SyntaxKind::L_BRACE) {
        parse_name_value_list(p);
    } else {
        while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
            if !parse_expression(p) || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// NameValueList = '{' (NAME ':' Expression (',' NAME ':' Expression)*)? '}'
fn parse_name_value_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::NAME_VALUE_LIST);
    p.bump();
    while p.at_name() {
        p.start_node(SyntaxKind::NAMED_ARGUMENT);
        p.expect_name();
        p.expect(SyntaxKind::COLON);
        parse_expression(p);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, SyntaxNode, parse};

    /// Parse `x = <expr>;` inside a function and return the right-hand side
    fn expression(text: &str) -> SyntaxNode {
        let parse = parse(&format!("contract C {{ function f() public {{ x = {text}; }} }}"));
        assert!(parse.ok(), "{text}: {:?}", parse.errors);
        let assignment = parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::BINARY_OPERATION)
            .expect("assignment");
        assignment.children().nth(1).expect("rhs")
    }

    fn shape(node: &SyntaxNode) -> String {
        let children: Vec<_> = node.children().map(|c| shape(&c)).collect();
        if children.is_empty() {
            format!("{:?}", node.kind())
        } else {
            format!("{:?}({})", node.kind(), children.join(" "))
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            shape(&expression("a + b * c")),
            "BINARY_OPERATION(IDENTIFIER BINARY_OPERATION(IDENTIFIER IDENTIFIER))"
        );
        assert_eq!(
            shape(&expression("a ** b ** c")),
            "BINARY_OPERATION(IDENTIFIER BINARY_OPERATION(IDENTIFIER IDENTIFIER))"
        );
        assert_eq!(
            shape(&expression("a - b - c")),
            "BINARY_OPERATION(BINARY_OPERATION(IDENTIFIER IDENTIFIER) IDENTIFIER)"
        );
    }

    #[test]
    fn test_conditional() {
        assert_eq!(
            shape(&expression("a ? b : c ? d : e")),
            "CONDITIONAL(IDENTIFIER IDENTIFIER CONDITIONAL(IDENTIFIER IDENTIFIER IDENTIFIER))"
        );
    }

    #[test]
    fn test_postfix_chain() {
        assert_eq!(
            shape(&expression("a.b(c)[d]")),
            "INDEX_ACCESS(FUNCTION_CALL(MEMBER_ACCESS(IDENTIFIER) CALL_ARGUMENTS(IDENTIFIER)) IDENTIFIER)"
        );
    }

    #[test]
    fn test_call_options_and_named_arguments() {
        assert_eq!(
            shape(&expression("t.f{value: 1}({to: a})")),
            "FUNCTION_CALL(NAME_VALUE_EXPRESSION(MEMBER_ACCESS(IDENTIFIER) \
             NAME_VALUE_LIST(NAMED_ARGUMENT(NUMBER_LITERAL))) \
             CALL_ARGUMENTS(NAME_VALUE_LIST(NAMED_ARGUMENT(IDENTIFIER))))"
        );
    }

    #[test]
    fn test_new_and_casts() {
        assert_eq!(
            shape(&expression("new Token(1)")),
            "FUNCTION_CALL(NEW_EXPRESSION(USER_DEFINED_TYPE_NAME) CALL_ARGUMENTS(NUMBER_LITERAL))"
        );
        assert_eq!(
            shape(&expression("uint8(y)")),
            "FUNCTION_CALL(TYPE_NAME_EXPRESSION(ELEMENTARY_TYPE_NAME) CALL_ARGUMENTS(IDENTIFIER))"
        );
    }

    #[test]
    fn test_literals_and_units() {
        assert_eq!(shape(&expression("1 ether")), "NUMBER_LITERAL");
        assert_eq!(shape(&expression("\"a\" \"b\"")), "STRING_LITERAL");
        assert_eq!(
            shape(&expression("[1, 2]")),
            "TUPLE_EXPRESSION(NUMBER_LITERAL NUMBER_LITERAL)"
        );
    }

    #[test]
    fn test_index_range() {
        assert_eq!(
            shape(&expression("data[4:]")),
            "INDEX_RANGE_ACCESS(IDENTIFIER NUMBER_LITERAL)"
        );
    }

    #[test]
    fn test_member_named_like_keyword() {
        assert_eq!(
            shape(&expression("type(I).interfaceId")),
            "MEMBER_ACCESS(FUNCTION_CALL(IDENTIFIER CALL_ARGUMENTS(IDENTIFIER)))"
        );
        assert_eq!(shape(&expression("a.address")), "MEMBER_ACCESS(IDENTIFIER)");
    }
}
