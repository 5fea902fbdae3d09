//! Source unit and contract members.

use super::expressions::{parse_call_arguments, parse_expression};
use super::statements::parse_block;
use super::types::{parse_type_name, parse_user_defined_type_name};
use super::{Parser, SyntaxKind, skip_until};
use crate::parser::parser::is_name_kind;

/// Tokens that can start a source unit member
pub(crate) const ITEM_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::PRAGMA_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::CONTRACT_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::LIBRARY_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::EVENT_KW,
    SyntaxKind::ERROR_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::USING_KW,
];

/// Tokens that can start a contract member, plus the closing brace
const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::R_BRACE,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::CONSTRUCTOR_KW,
    SyntaxKind::MODIFIER_KW,
    SyntaxKind::EVENT_KW,
    SyntaxKind::ERROR_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::USING_KW,
    SyntaxKind::SEMICOLON,
];

/// SourceUnitMember = Pragma | Import | Contract | ContractMember
pub(crate) fn parse_source_unit_member(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::PRAGMA_KW => parse_pragma(p),
        SyntaxKind::IMPORT_KW => parse_import(p),
        SyntaxKind::ABSTRACT_KW
        | SyntaxKind::CONTRACT_KW
        | SyntaxKind::INTERFACE_KW
        | SyntaxKind::LIBRARY_KW => parse_contract(p),
        SyntaxKind::SEMICOLON => p.bump(),
        _ => parse_contract_member(p, ITEM_RECOVERY),
    }
}

/// Pragma = 'pragma' token* ';'
fn parse_pragma(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PRAGMA_DIRECTIVE);
    p.bump();
    skip_until(p, &[SyntaxKind::SEMICOLON]);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Import =
///     'import' STRING ('as' NAME)? ';'
///   | 'import' '*' 'as' NAME 'from' STRING ';'
///   | 'import' '{' ImportSymbol (',' ImportSymbol)* '}' 'from' STRING ';'
fn parse_import(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IMPORT_DIRECTIVE);
    p.bump(); // import

    match p.current_kind() {
        SyntaxKind::STRING => {
            p.bump();
            if p.eat(SyntaxKind::AS_KW) {
                p.expect_name();
            }
        }
        SyntaxKind::STAR => {
            p.bump();
            p.expect(SyntaxKind::AS_KW);
            p.expect_name();
            p.expect(SyntaxKind::FROM_KW);
            p.expect(SyntaxKind::STRING);
        }
        SyntaxKind::L_BRACE => {
            p.bump();
            while p.at_name() {
                p.start_node(SyntaxKind::IMPORT_SYMBOL);
                p.expect_name();
                if p.eat(SyntaxKind::AS_KW) {
                    p.expect_name();
                }
                p.finish_node();
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            p.expect(SyntaxKind::R_BRACE);
            p.expect(SyntaxKind::FROM_KW);
            p.expect(SyntaxKind::STRING);
        }
        _ => p.error("expected import path, '*' or '{'"),
    }

    if !p.eat(SyntaxKind::SEMICOLON) {
        p.error("expected ';' after import");
        skip_until(p, ITEM_RECOVERY);
    }
    p.finish_node();
}

/// Contract = 'abstract'? ('contract' | 'interface' | 'library') NAME
///            ('is' InheritanceSpecifier (',' InheritanceSpecifier)*)?
///            '{' ContractMember* '}'
fn parse_contract(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::CONTRACT_DEFINITION);
    p.eat(SyntaxKind::ABSTRACT_KW);
    if p.at_any(&[
        SyntaxKind::CONTRACT_KW,
        SyntaxKind::INTERFACE_KW,
        SyntaxKind::LIBRARY_KW,
    ]) {
        p.bump();
    } else {
        p.error("expected 'contract'");
    }
    p.expect_name();

    if p.eat(SyntaxKind::IS_KW) {
        loop {
            p.start_node(SyntaxKind::INHERITANCE_SPECIFIER);
            parse_user_defined_type_name(p);
            if p.at(SyntaxKind::L_PAREN) {
                parse_call_arguments(p);
            }
            p.finish_node();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let pos_before = p.pos();
            parse_contract_member(p, MEMBER_RECOVERY);
            if p.pos() == pos_before && !p.at_eof() {
                p.error_recover("unexpected token in contract body", MEMBER_RECOVERY);
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

/// ContractMember = Struct | Enum | Event | Error | Modifier | Function
///                | UserDefinedValueType | UsingFor | StateVariable
fn parse_contract_member(p: &mut Parser<'_>, recovery: &[SyntaxKind]) {
    match p.current_kind() {
        SyntaxKind::STRUCT_KW => parse_struct(p),
        SyntaxKind::ENUM_KW => parse_enum(p),
        SyntaxKind::EVENT_KW => parse_event(p),
        SyntaxKind::ERROR_KW if is_name_kind(p.nth(1)) && p.nth(2) == SyntaxKind::L_PAREN => {
            parse_custom_error(p)
        }
        SyntaxKind::MODIFIER_KW => parse_modifier(p),
        SyntaxKind::FUNCTION_KW if p.nth(1) != SyntaxKind::L_PAREN => parse_function(p),
        SyntaxKind::CONSTRUCTOR_KW | SyntaxKind::FALLBACK_KW | SyntaxKind::RECEIVE_KW
            if p.nth(1) == SyntaxKind::L_PAREN =>
        {
            parse_function(p)
        }
        SyntaxKind::TYPE_KW => parse_user_defined_value_type(p),
        SyntaxKind::USING_KW => parse_using_for(p),
        SyntaxKind::SEMICOLON => p.bump(),
        kind if starts_type_name(kind) => parse_state_variable(p),
        _ => p.error_recover(
            format!("expected contract member, found {:?}", p.current_kind()),
            recovery,
        ),
    }
}

fn starts_type_name(kind: SyntaxKind) -> bool {
    is_name_kind(kind)
        || matches!(
            kind,
            SyntaxKind::ELEMENTARY_TYPE_KW | SyntaxKind::MAPPING_KW | SyntaxKind::FUNCTION_KW
        )
}

/// StateVariable = VariableDeclaration ('=' Expression)? ';'
fn parse_state_variable(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::STATE_VARIABLE_DECLARATION);

    p.start_node(SyntaxKind::VARIABLE_DECLARATION);
    parse_type_name(p);
    loop {
        match p.current_kind() {
            SyntaxKind::PUBLIC_KW
            | SyntaxKind::PRIVATE_KW
            | SyntaxKind::INTERNAL_KW
            | SyntaxKind::CONSTANT_KW
            | SyntaxKind::IMMUTABLE_KW => p.bump(),
            SyntaxKind::OVERRIDE_KW => parse_override_specifier(p),
            // `transient` is a contextual keyword
            SyntaxKind::IDENT if p.current_text() == "transient" && is_name_kind(p.nth(1)) => {
                p.bump()
            }
            _ => break,
        }
    }
    p.expect_name();
    p.finish_node();

    if p.eat(SyntaxKind::EQ) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Struct = 'struct' NAME '{' (VariableDeclaration ';')* '}'
fn parse_struct(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::STRUCT_DEFINITION);
    p.bump();
    p.expect_name();
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let pos_before = p.pos();
            p.start_node(SyntaxKind::VARIABLE_DECLARATION);
            parse_type_name(p);
            p.expect_name();
            p.finish_node();
            p.expect(SyntaxKind::SEMICOLON);
            if p.pos() == pos_before {
                p.error_recover(
                    "unexpected token in struct",
                    &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                );
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

/// Enum = 'enum' NAME '{' EnumValue (',' EnumValue)* '}'
fn parse_enum(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ENUM_DEFINITION);
    p.bump();
    p.expect_name();
    if p.expect(SyntaxKind::L_BRACE) {
        while p.at_name() {
            p.start_node(SyntaxKind::ENUM_VALUE);
            p.expect_name();
            p.finish_node();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

/// Event = 'event' NAME ParameterList 'anonymous'? ';'
fn parse_event(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EVENT_DEFINITION);
    p.bump();
    p.expect_name();
    parse_parameter_list(p);
    p.eat(SyntaxKind::ANONYMOUS_KW);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// CustomError = 'error' NAME ParameterList ';'
fn parse_custom_error(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::CUSTOM_ERROR_DEFINITION);
    p.bump();
    p.expect_name();
    parse_parameter_list(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// UserDefinedValueType = 'type' NAME 'is' ElementaryTypeName ';'
fn parse_user_defined_value_type(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USER_DEFINED_VALUE_TYPE_DEFINITION);
    p.bump();
    p.expect_name();
    p.expect(SyntaxKind::IS_KW);
    parse_type_name(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// UsingFor = 'using' (TypeName | '{' TypeName ('as' OP)? (',' ...)* '}')
///            'for' ('*' | TypeName) 'global'? ';'
fn parse_using_for(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USING_FOR_DECLARATION);
    p.bump();

    if p.eat(SyntaxKind::L_BRACE) {
        while p.at_name() {
            parse_user_defined_type_name(p);
            if p.eat(SyntaxKind::AS_KW) {
                // user-defined operator
                p.bump();
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    } else {
        parse_user_defined_type_name(p);
    }

    p.expect(SyntaxKind::FOR_KW);
    if !p.eat(SyntaxKind::STAR) {
        parse_type_name(p);
    }
    if p.at(SyntaxKind::IDENT) && p.current_text() == "global" {
        p.bump();
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Modifier = 'modifier' NAME ParameterList? ('virtual' | Override)* (Block | ';')
fn parse_modifier(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::MODIFIER_DEFINITION);
    p.bump();
    p.expect_name();
    if p.at(SyntaxKind::L_PAREN) {
        parse_parameter_list(p);
    }
    loop {
        match p.current_kind() {
            SyntaxKind::VIRTUAL_KW => p.bump(),
            SyntaxKind::OVERRIDE_KW => parse_override_specifier(p),
            _ => break,
        }
    }
    parse_body_or_semicolon(p);
    p.finish_node();
}

/// Function = ('function' NAME? | 'constructor' | 'fallback' | 'receive')
///            ParameterList FunctionAttribute* ReturnParameters? (Block | ';')
fn parse_function(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::FUNCTION_DEFINITION);
    if p.eat(SyntaxKind::FUNCTION_KW) {
        if p.at_name() {
            p.expect_name();
        }
    } else {
        p.bump(); // constructor | fallback | receive
    }

    parse_parameter_list(p);

    loop {
        match p.current_kind() {
            SyntaxKind::PUBLIC_KW
            | SyntaxKind::PRIVATE_KW
            | SyntaxKind::INTERNAL_KW
            | SyntaxKind::EXTERNAL_KW
            | SyntaxKind::PURE_KW
            | SyntaxKind::VIEW_KW
            | SyntaxKind::PAYABLE_KW
            | SyntaxKind::CONSTANT_KW
            | SyntaxKind::VIRTUAL_KW => p.bump(),
            SyntaxKind::OVERRIDE_KW => parse_override_specifier(p),
            SyntaxKind::RETURNS_KW => parse_return_parameters(p),
            kind if is_name_kind(kind) => parse_modifier_invocation(p),
            _ => break,
        }
    }

    parse_body_or_semicolon(p);
    p.finish_node();
}

fn parse_body_or_semicolon(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
    } else {
        p.expect(SyntaxKind::SEMICOLON);
    }
}

/// ModifierInvocation = NAME ('.' NAME)* CallArguments?
fn parse_modifier_invocation(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::MODIFIER_INVOCATION);
    p.expect_name();
    while p.at(SyntaxKind::DOT) && is_name_kind(p.nth(1)) {
        p.bump();
        p.expect_name();
    }
    if p.at(SyntaxKind::L_PAREN) {
        parse_call_arguments(p);
    }
    p.finish_node();
}

/// Override = 'override' ('(' UserDefinedTypeName (',' ...)* ')')?
fn parse_override_specifier(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::OVERRIDE_SPECIFIER);
    p.bump();
    if p.eat(SyntaxKind::L_PAREN) {
        while p.at_name() {
            parse_user_defined_type_name(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.finish_node();
}

/// ReturnParameters = 'returns' ParameterList
pub(super) fn parse_return_parameters(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::RETURN_PARAMETERS);
    p.bump();
    parse_parameter_list(p);
    p.finish_node();
}

/// ParameterList = '(' (Parameter (',' Parameter)*)? ')'
pub(super) fn parse_parameter_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PARAMETER_LIST);
    if p.expect(SyntaxKind::L_PAREN) {
        while !p.at_eof() && !p.at(SyntaxKind::R_PAREN) {
            let pos_before = p.pos();
            parse_parameter(p);
            if p.pos() == pos_before {
                p.error_recover(
                    "expected parameter",
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::L_BRACE],
                );
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.finish_node();
}

/// Parameter = TypeName ('indexed' | DataLocation)* NAME?
fn parse_parameter(p: &mut Parser<'_>) {
    if !starts_type_name(p.current_kind()) {
        return;
    }
    p.start_node(SyntaxKind::VARIABLE_DECLARATION);
    parse_type_name(p);
    while p.current_kind().is_data_location() || p.at(SyntaxKind::INDEXED_KW) {
        p.bump();
    }
    if p.at_name() {
        p.expect_name();
    }
    p.finish_node();
}
