//! Blocks and statements.

use super::expressions::parse_expression;
use super::items::parse_parameter_list;
use super::types::parse_type_name;
use super::{Parser, SyntaxKind};
use crate::parser::parser::{Lookahead, is_name_kind};

const STATEMENT_RECOVERY: &[SyntaxKind] = &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE];

/// Block = '{' Statement* '}'
pub(super) fn parse_block(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BLOCK);
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let pos_before = p.pos();
            parse_statement(p);
            if p.pos() == pos_before && !p.at_eof() {
                p.error_recover("expected statement", STATEMENT_RECOVERY);
                p.eat(SyntaxKind::SEMICOLON);
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

fn parse_statement(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::L_BRACE => parse_block(p),
        SyntaxKind::UNCHECKED_KW if p.nth(1) == SyntaxKind::L_BRACE => {
            p.start_node(SyntaxKind::UNCHECKED_STATEMENT);
            p.bump();
            parse_block(p);
            p.finish_node();
        }
        SyntaxKind::IF_KW => parse_if(p),
        SyntaxKind::WHILE_KW => parse_while(p),
        SyntaxKind::DO_KW => parse_do_while(p),
        SyntaxKind::FOR_KW => parse_for(p),
        SyntaxKind::CONTINUE_KW => parse_keyword_statement(p, SyntaxKind::CONTINUE_STATEMENT),
        SyntaxKind::BREAK_KW => parse_keyword_statement(p, SyntaxKind::BREAK_STATEMENT),
        SyntaxKind::RETURN_KW => parse_return(p),
        SyntaxKind::EMIT_KW => parse_emit(p),
        SyntaxKind::TRY_KW => parse_try(p),
        SyntaxKind::ASSEMBLY_KW => parse_inline_assembly(p),
        SyntaxKind::IDENT if p.current_text() == "revert" && is_name_kind(p.nth(1)) => {
            parse_revert(p)
        }
        _ if looks_like_variable_declaration(p.lookahead()) => {
            parse_variable_declaration_statement(p)
        }
        _ => parse_expression_statement(p),
    }
}

/// Decide between `T x = ...;` and an expression statement without
/// consuming anything.
fn looks_like_variable_declaration(mut la: Lookahead<'_, '_>) -> bool {
    if la.at(SyntaxKind::L_PAREN) {
        la.bump();
        while la.at(SyntaxKind::COMMA) {
            la.bump();
        }
    }

    match la.kind() {
        SyntaxKind::MAPPING_KW | SyntaxKind::FUNCTION_KW => return true,
        SyntaxKind::ELEMENTARY_TYPE_KW => {
            la.bump();
            if la.at(SyntaxKind::PAYABLE_KW) {
                la.bump();
            }
        }
        kind if is_name_kind(kind) => {
            la.bump();
            while la.at(SyntaxKind::DOT) {
                la.bump();
                if !is_name_kind(la.kind()) {
                    return false;
                }
                la.bump();
            }
        }
        _ => return false,
    }

    while la.at(SyntaxKind::L_BRACKET) {
        la.skip_balanced();
    }

    let next = la.kind();
    is_name_kind(next) || next.is_data_location()
}

/// VariableDeclarationStatement =
///     (VariableDeclaration | '(' VariableDeclaration? (',' VariableDeclaration?)* ')')
///     ('=' Expression)? ';'
fn parse_variable_declaration_statement(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::VARIABLE_DECLARATION_STATEMENT);
    if p.eat(SyntaxKind::L_PAREN) {
        loop {
            if p.eat(SyntaxKind::COMMA) {
                continue;
            }
            if p.at(SyntaxKind::R_PAREN) || p.at_eof() {
                break;
            }
            let pos_before = p.pos();
            parse_local_variable(p);
            if p.pos() == pos_before || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    } else {
        parse_local_variable(p);
    }

    if p.eat(SyntaxKind::EQ) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn parse_local_variable(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::VARIABLE_DECLARATION);
    parse_type_name(p);
    while p.current_kind().is_data_location() {
        p.bump();
    }
    p.expect_name();
    p.finish_node();
}

fn parse_expression_statement(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EXPRESSION_STATEMENT);
    if parse_expression(p) {
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.finish_node();
}

/// If = 'if' '(' Expression ')' Statement ('else' Statement)?
fn parse_if(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IF_STATEMENT);
    p.bump();
    parse_condition(p);
    parse_nested_statement(p);
    if p.eat(SyntaxKind::ELSE_KW) {
        parse_nested_statement(p);
    }
    p.finish_node();
}

/// While = 'while' '(' Expression ')' Statement
fn parse_while(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::WHILE_STATEMENT);
    p.bump();
    parse_condition(p);
    parse_nested_statement(p);
    p.finish_node();
}

/// DoWhile = 'do' Statement 'while' '(' Expression ')' ';'
fn parse_do_while(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::DO_WHILE_STATEMENT);
    p.bump();
    parse_nested_statement(p);
    p.expect(SyntaxKind::WHILE_KW);
    parse_condition(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// For = 'for' '(' (VariableDeclarationStatement | ExpressionStatement | ';')
///       Expression? ';' Expression? ')' Statement
fn parse_for(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::FOR_STATEMENT);
    p.bump();
    p.expect(SyntaxKind::L_PAREN);

    if !p.eat(SyntaxKind::SEMICOLON) {
        if looks_like_variable_declaration(p.lookahead()) {
            parse_variable_declaration_statement(p);
        } else {
            parse_expression_statement(p);
        }
    }

    if !p.at(SyntaxKind::SEMICOLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);

    if !p.at(SyntaxKind::R_PAREN) {
        p.start_node(SyntaxKind::EXPRESSION_STATEMENT);
        parse_expression(p);
        p.finish_node();
    }
    p.expect(SyntaxKind::R_PAREN);

    parse_nested_statement(p);
    p.finish_node();
}

fn parse_condition(p: &mut Parser<'_>) {
    p.expect(SyntaxKind::L_PAREN);
    parse_expression(p);
    p.expect(SyntaxKind::R_PAREN);
}

fn parse_nested_statement(p: &mut Parser<'_>) {
    let pos_before = p.pos();
    parse_statement(p);
    if p.pos() == pos_before && !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        p.error_recover("expected statement", STATEMENT_RECOVERY);
        p.eat(SyntaxKind::SEMICOLON);
    }
}

fn parse_keyword_statement(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Return = 'return' Expression? ';'
fn parse_return(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::RETURN_STATEMENT);
    p.bump();
    if !p.at(SyntaxKind::SEMICOLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Emit = 'emit' FunctionCall ';'
fn parse_emit(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EMIT_STATEMENT);
    p.bump();
    parse_expression(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Revert = 'revert' FunctionCall ';'
///
/// Only the custom-error form; `revert("msg")` is an ordinary call.
fn parse_revert(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::REVERT_STATEMENT);
    p.bump();
    parse_expression(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Try = 'try' Expression ('returns' ParameterList)? Block CatchClause+
fn parse_try(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TRY_STATEMENT);
    p.bump();
    parse_expression(p);
    if p.eat(SyntaxKind::RETURNS_KW) {
        parse_parameter_list(p);
    }
    parse_block(p);
    while p.at(SyntaxKind::CATCH_KW) {
        p.start_node(SyntaxKind::CATCH_CLAUSE);
        p.bump();
        if p.at_name() {
            p.expect_name();
        }
        if p.at(SyntaxKind::L_PAREN) {
            parse_parameter_list(p);
        }
        parse_block(p);
        p.finish_node();
    }
    p.finish_node();
}

/// InlineAssembly = 'assembly' STRING? ('(' flags ')')? AssemblyBlock
///
/// The Yul body is kept as an opaque token run.
fn parse_inline_assembly(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::INLINE_ASSEMBLY_STATEMENT);
    p.bump();
    p.eat(SyntaxKind::STRING);
    if p.at(SyntaxKind::L_PAREN) {
        p.bump_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
    }
    if p.at(SyntaxKind::L_BRACE) {
        p.start_node(SyntaxKind::ASSEMBLY_BLOCK);
        p.bump_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
        p.finish_node();
    } else {
        p.error("expected assembly block");
    }
    p.finish_node();
}
