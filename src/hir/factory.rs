//! Syntax node → [`SymbolNode`] dispatch.

use smol_str::SmolStr;
use tracing::debug;

use super::kind::{NodeKind, is_builtin};
use super::node::{NodeData, SymbolNode};
use crate::base::{FileId, LineIndex};
use crate::parser::{
    AstNode, BinaryOperation, BooleanLiteral, CatchClause, ContractDefinition, ElementaryTypeName,
    EventDefinition, FunctionDefinition, HexLiteral, Identifier, ImportDirective, ImportSymbol,
    MemberAccess, ModifierDefinition, ModifierInvocation, NamedArgument, NumberLiteral,
    PragmaDirective, StringLiteral, SyntaxNode, SyntaxToken, TupleExpression, UnaryOperation,
    UserDefinedTypeName, UsingForDeclaration, VariableDeclaration, ident_tokens,
};

/// Build the wrapper for one raw syntax node.
///
/// Total over syntax kinds: kinds without a mapping produce an
/// [`NodeData::Opaque`] node that never takes part in name resolution.
/// Tree links (`parent`, `children`, `context`) are left empty for the
/// builder to fill in.
pub fn make_node(raw: &SyntaxNode, file: FileId, line_index: &LineIndex) -> SymbolNode {
    let (data, name_token) = match NodeKind::from_syntax(raw.kind()) {
        Some(kind) => node_data(kind, raw),
        None => {
            debug!(kind = ?raw.kind(), "unsupported syntax, building opaque node");
            (
                NodeData::Opaque {
                    syntax_kind: raw.kind(),
                },
                None,
            )
        }
    };

    SymbolNode {
        file,
        range: line_index.span(raw.text_range()),
        name: name_token.as_ref().map(|t| SmolStr::new(t.text())),
        name_range: name_token.as_ref().map(|t| line_index.span(t.text_range())),
        parent: None,
        children: Vec::new(),
        declared_type: Vec::new(),
        resolved_declaration: None,
        references: Vec::new(),
        context: None,
        data,
    }
}

fn text(token: Option<SyntaxToken>) -> Option<SmolStr> {
    token.map(|t| SmolStr::new(t.text()))
}

fn first_ident(raw: &SyntaxNode) -> Option<SyntaxToken> {
    ident_tokens(raw).next()
}

fn node_data(kind: NodeKind, raw: &SyntaxNode) -> (NodeData, Option<SyntaxToken>) {
    // A failed cast degrades to opaque.
    let opaque = || {
        (
            NodeData::Opaque {
                syntax_kind: raw.kind(),
            },
            None,
        )
    };
    let raw = raw.clone();

    match kind {
        NodeKind::SourceUnit => (NodeData::SourceUnit, None),
        NodeKind::PragmaDirective => match PragmaDirective::cast(raw) {
            Some(pragma) => (
                NodeData::PragmaDirective {
                    value: pragma.value(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::ImportDirective => match ImportDirective::cast(raw) {
            Some(import) => {
                let alias = import.unit_alias();
                (
                    NodeData::ImportDirective {
                        path: import.path().map(SmolStr::from).unwrap_or_default(),
                        unit_alias: text(alias.clone()),
                        wildcard: import.is_wildcard(),
                    },
                    alias,
                )
            }
            None => opaque(),
        },
        NodeKind::ImportSymbol => match ImportSymbol::cast(raw) {
            Some(symbol) => (
                NodeData::ImportSymbol {
                    alias: text(symbol.alias()),
                },
                symbol.symbol(),
            ),
            None => opaque(),
        },
        NodeKind::ContractDefinition => match ContractDefinition::cast(raw) {
            Some(contract) => (
                NodeData::ContractDefinition {
                    kind: contract.contract_kind(),
                    is_abstract: contract.is_abstract(),
                },
                contract.name_token(),
            ),
            None => opaque(),
        },
        NodeKind::UsingForDeclaration => match UsingForDeclaration::cast(raw) {
            Some(using) => (
                NodeData::UsingForDeclaration {
                    global: using.is_global(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::ModifierDefinition => match ModifierDefinition::cast(raw.clone()) {
            Some(modifier) => (
                NodeData::ModifierDefinition {
                    is_virtual: modifier.is_virtual(),
                },
                first_ident(&raw),
            ),
            None => opaque(),
        },
        NodeKind::ModifierInvocation => match ModifierInvocation::cast(raw) {
            Some(invocation) => (NodeData::ModifierInvocation, invocation.name_token()),
            None => opaque(),
        },
        NodeKind::FunctionDefinition => match FunctionDefinition::cast(raw) {
            Some(function) => (
                NodeData::FunctionDefinition {
                    kind: function.function_kind(),
                    visibility: function.visibility(),
                    mutability: function.mutability(),
                    is_virtual: function.is_virtual(),
                },
                function.name_token(),
            ),
            None => opaque(),
        },
        NodeKind::EventDefinition => match EventDefinition::cast(raw.clone()) {
            Some(event) => (
                NodeData::EventDefinition {
                    anonymous: event.is_anonymous(),
                },
                first_ident(&raw),
            ),
            None => opaque(),
        },
        NodeKind::StructDefinition => (NodeData::StructDefinition, first_ident(&raw)),
        NodeKind::EnumDefinition => (NodeData::EnumDefinition, first_ident(&raw)),
        NodeKind::EnumValue => (NodeData::EnumValue, first_ident(&raw)),
        NodeKind::CustomErrorDefinition => (NodeData::CustomErrorDefinition, first_ident(&raw)),
        NodeKind::UserDefinedValueTypeDefinition => (
            NodeData::UserDefinedValueTypeDefinition,
            first_ident(&raw),
        ),
        NodeKind::VariableDeclaration => match VariableDeclaration::cast(raw) {
            Some(variable) => (
                NodeData::VariableDeclaration {
                    visibility: variable.visibility(),
                    storage_location: variable.storage_location(),
                    is_constant: variable.is_constant(),
                    is_immutable: variable.is_immutable(),
                    is_indexed: variable.is_indexed(),
                    is_state_variable: variable.is_state_variable(),
                },
                variable.name_token(),
            ),
            None => opaque(),
        },
        NodeKind::UserDefinedTypeName => match UserDefinedTypeName::cast(raw) {
            Some(type_name) => (
                NodeData::UserDefinedTypeName {
                    path: SmolStr::from(type_name.path()),
                },
                type_name.name_token(),
            ),
            None => opaque(),
        },
        NodeKind::ElementaryTypeName => match ElementaryTypeName::cast(raw) {
            Some(elementary) => {
                let name = match elementary.type_token() {
                    Some(token) if elementary.is_payable() && token.text() == "address" => {
                        SmolStr::new("address payable")
                    }
                    Some(token) => SmolStr::new(token.text()),
                    None => SmolStr::default(),
                };
                (NodeData::ElementaryTypeName { name }, None)
            }
            None => opaque(),
        },
        NodeKind::CatchClause => match CatchClause::cast(raw) {
            Some(clause) => (
                NodeData::CatchClause {
                    kind: text(clause.kind_token()),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::NamedArgument => match NamedArgument::cast(raw) {
            Some(argument) => (
                NodeData::NamedArgument {
                    name: text(argument.name_token()),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::TupleExpression => match TupleExpression::cast(raw) {
            Some(tuple) => (
                NodeData::TupleExpression {
                    is_array: tuple.is_inline_array(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::NumberLiteral => match NumberLiteral::cast(raw) {
            Some(number) => (
                NodeData::NumberLiteral {
                    value: text(number.value()).unwrap_or_default(),
                    unit: text(number.unit()),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::BooleanLiteral => match BooleanLiteral::cast(raw) {
            Some(boolean) => (
                NodeData::BooleanLiteral {
                    value: boolean.value(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::HexLiteral => match HexLiteral::cast(raw) {
            Some(hex) => (NodeData::HexLiteral { value: hex.value() }, None),
            None => opaque(),
        },
        NodeKind::StringLiteral => match StringLiteral::cast(raw) {
            Some(string) => (
                NodeData::StringLiteral {
                    value: string.value(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::Identifier => match Identifier::cast(raw) {
            Some(identifier) => {
                let token = identifier.name_token();
                let builtin = token.as_ref().is_some_and(|t| is_builtin(t.text()));
                (NodeData::Identifier { builtin }, token)
            }
            None => opaque(),
        },
        NodeKind::MemberAccess => match MemberAccess::cast(raw) {
            Some(access) => (NodeData::MemberAccess, access.member_token()),
            None => opaque(),
        },
        NodeKind::BinaryOperation => match BinaryOperation::cast(raw) {
            Some(operation) => (
                NodeData::BinaryOperation {
                    operator: text(operation.operator()).unwrap_or_default(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::UnaryOperation => match UnaryOperation::cast(raw) {
            Some(operation) => (
                NodeData::UnaryOperation {
                    operator: text(operation.operator()).unwrap_or_default(),
                    is_prefix: operation.is_prefix(),
                },
                None,
            ),
            None => opaque(),
        },
        NodeKind::InheritanceSpecifier => (NodeData::InheritanceSpecifier, None),
        NodeKind::StateVariableDeclaration => (NodeData::StateVariableDeclaration, None),
        NodeKind::OverrideSpecifier => (NodeData::OverrideSpecifier, None),
        NodeKind::ParameterList => (NodeData::ParameterList, None),
        NodeKind::ReturnParameters => (NodeData::ReturnParameters, None),
        NodeKind::ArrayTypeName => (NodeData::ArrayTypeName, None),
        NodeKind::Mapping => (NodeData::Mapping, None),
        NodeKind::FunctionTypeName => (NodeData::FunctionTypeName, None),
        NodeKind::Block => (NodeData::Block, None),
        NodeKind::ExpressionStatement => (NodeData::ExpressionStatement, None),
        NodeKind::IfStatement => (NodeData::IfStatement, None),
        NodeKind::UncheckedStatement => (NodeData::UncheckedStatement, None),
        NodeKind::WhileStatement => (NodeData::WhileStatement, None),
        NodeKind::ForStatement => (NodeData::ForStatement, None),
        NodeKind::InlineAssemblyStatement => (NodeData::InlineAssemblyStatement, None),
        NodeKind::AssemblyBlock => (NodeData::AssemblyBlock, None),
        NodeKind::DoWhileStatement => (NodeData::DoWhileStatement, None),
        NodeKind::ContinueStatement => (NodeData::ContinueStatement, None),
        NodeKind::BreakStatement => (NodeData::BreakStatement, None),
        NodeKind::ReturnStatement => (NodeData::ReturnStatement, None),
        NodeKind::EmitStatement => (NodeData::EmitStatement, None),
        NodeKind::RevertStatement => (NodeData::RevertStatement, None),
        NodeKind::TryStatement => (NodeData::TryStatement, None),
        NodeKind::VariableDeclarationStatement => (NodeData::VariableDeclarationStatement, None),
        NodeKind::FunctionCall => (NodeData::FunctionCall, None),
        NodeKind::CallArguments => (NodeData::CallArguments, None),
        NodeKind::NameValueExpression => (NodeData::NameValueExpression, None),
        NodeKind::NameValueList => (NodeData::NameValueList, None),
        NodeKind::NewExpression => (NodeData::NewExpression, None),
        NodeKind::TypeNameExpression => (NodeData::TypeNameExpression, None),
        NodeKind::Conditional => (NodeData::Conditional, None),
        NodeKind::IndexAccess => (NodeData::IndexAccess, None),
        NodeKind::IndexRangeAccess => (NodeData::IndexRangeAccess, None),
        NodeKind::Opaque => opaque(),
    }
}
