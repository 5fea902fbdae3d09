//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Solidity syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Names are `IDENT` tokens owned directly by the node they belong to.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    tokens(node).any(|t| t.kind() == kind)
}

/// Direct `IDENT` children of a node, in source order
pub fn ident_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    tokens(node).filter(|t| t.kind() == SyntaxKind::IDENT)
}

fn first_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    ident_tokens(node).next()
}

fn last_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    ident_tokens(node).last()
}

/// Strip the quotes (and a `unicode`/`hex` prefix) from a string token
pub fn unquote(text: &str) -> &str {
    let text = text
        .strip_prefix("unicode")
        .or_else(|| text.strip_prefix("hex"))
        .unwrap_or(text);
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

// ============================================================================
// Attribute enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Constructor,
    Fallback,
    Receive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    fn from_node(node: &SyntaxNode) -> Option<Self> {
        tokens(node).find_map(|t| match t.kind() {
            SyntaxKind::PUBLIC_KW => Some(Self::Public),
            SyntaxKind::PRIVATE_KW => Some(Self::Private),
            SyntaxKind::INTERNAL_KW => Some(Self::Internal),
            SyntaxKind::EXTERNAL_KW => Some(Self::External),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMutability {
    Pure,
    View,
    Payable,
    NonPayable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageLocation {
    Memory,
    Storage,
    Calldata,
}

// ============================================================================
// Source unit and directives
// ============================================================================

ast_node!(SourceUnit, SOURCE_UNIT);

ast_node!(PragmaDirective, PRAGMA_DIRECTIVE);

impl PragmaDirective {
    /// Everything between `pragma` and `;`, whitespace-normalized
    pub fn value(&self) -> String {
        tokens(&self.0)
            .filter(|t| {
                !t.kind().is_trivia()
                    && !matches!(t.kind(), SyntaxKind::PRAGMA_KW | SyntaxKind::SEMICOLON)
            })
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

ast_node!(ImportDirective, IMPORT_DIRECTIVE);

impl ImportDirective {
    pub fn path_token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::STRING)
    }

    /// The imported path without quotes
    pub fn path(&self) -> Option<String> {
        self.path_token().map(|t| unquote(t.text()).to_string())
    }

    /// `import "x" as U;` / `import * as U from "x";`
    pub fn unit_alias(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }

    pub fn is_wildcard(&self) -> bool {
        has_token(&self.0, SyntaxKind::STAR)
    }

    pub fn symbols(&self) -> impl Iterator<Item = ImportSymbol> + '_ {
        self.0.children().filter_map(ImportSymbol::cast)
    }
}

ast_node!(ImportSymbol, IMPORT_SYMBOL);

impl ImportSymbol {
    /// Name of the declaration in the imported file
    pub fn symbol(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).nth(1)
    }

    /// Name the symbol is bound to in the importing file
    pub fn local_name(&self) -> Option<SyntaxToken> {
        last_ident(&self.0)
    }
}

// ============================================================================
// Contracts
// ============================================================================

ast_node!(ContractDefinition, CONTRACT_DEFINITION);

impl ContractDefinition {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }

    pub fn contract_kind(&self) -> ContractKind {
        if has_token(&self.0, SyntaxKind::INTERFACE_KW) {
            ContractKind::Interface
        } else if has_token(&self.0, SyntaxKind::LIBRARY_KW) {
            ContractKind::Library
        } else {
            ContractKind::Contract
        }
    }

    pub fn is_abstract(&self) -> bool {
        has_token(&self.0, SyntaxKind::ABSTRACT_KW)
    }

    pub fn bases(&self) -> impl Iterator<Item = InheritanceSpecifier> + '_ {
        self.0.children().filter_map(InheritanceSpecifier::cast)
    }
}

ast_node!(InheritanceSpecifier, INHERITANCE_SPECIFIER);

impl InheritanceSpecifier {
    pub fn base_name(&self) -> Option<UserDefinedTypeName> {
        self.0.children().find_map(UserDefinedTypeName::cast)
    }
}

ast_node!(StateVariableDeclaration, STATE_VARIABLE_DECLARATION);

impl StateVariableDeclaration {
    pub fn variable(&self) -> Option<VariableDeclaration> {
        self.0.children().find_map(VariableDeclaration::cast)
    }
}

ast_node!(UsingForDeclaration, USING_FOR_DECLARATION);

impl UsingForDeclaration {
    pub fn is_global(&self) -> bool {
        ident_tokens(&self.0).any(|t| t.text() == "global")
    }
}

ast_node!(StructDefinition, STRUCT_DEFINITION);
ast_node!(EnumDefinition, ENUM_DEFINITION);
ast_node!(EnumValue, ENUM_VALUE);
ast_node!(CustomErrorDefinition, CUSTOM_ERROR_DEFINITION);
ast_node!(UserDefinedValueTypeDefinition, USER_DEFINED_VALUE_TYPE_DEFINITION);

ast_node!(EventDefinition, EVENT_DEFINITION);

impl EventDefinition {
    pub fn is_anonymous(&self) -> bool {
        has_token(&self.0, SyntaxKind::ANONYMOUS_KW)
    }
}

ast_node!(ModifierDefinition, MODIFIER_DEFINITION);

impl ModifierDefinition {
    pub fn is_virtual(&self) -> bool {
        has_token(&self.0, SyntaxKind::VIRTUAL_KW)
    }
}

ast_node!(ModifierInvocation, MODIFIER_INVOCATION);

impl ModifierInvocation {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident(&self.0)
    }
}

ast_node!(FunctionDefinition, FUNCTION_DEFINITION);

impl FunctionDefinition {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }

    pub fn function_kind(&self) -> FunctionKind {
        tokens(&self.0)
            .find_map(|t| match t.kind() {
                SyntaxKind::FUNCTION_KW => Some(FunctionKind::Function),
                SyntaxKind::CONSTRUCTOR_KW => Some(FunctionKind::Constructor),
                SyntaxKind::FALLBACK_KW => Some(FunctionKind::Fallback),
                SyntaxKind::RECEIVE_KW => Some(FunctionKind::Receive),
                _ => None,
            })
            .unwrap_or(FunctionKind::Function)
    }

    pub fn visibility(&self) -> Option<Visibility> {
        Visibility::from_node(&self.0)
    }

    pub fn mutability(&self) -> StateMutability {
        tokens(&self.0)
            .find_map(|t| match t.kind() {
                SyntaxKind::PURE_KW => Some(StateMutability::Pure),
                SyntaxKind::VIEW_KW | SyntaxKind::CONSTANT_KW => Some(StateMutability::View),
                SyntaxKind::PAYABLE_KW => Some(StateMutability::Payable),
                _ => None,
            })
            .unwrap_or(StateMutability::NonPayable)
    }

    pub fn is_virtual(&self) -> bool {
        has_token(&self.0, SyntaxKind::VIRTUAL_KW)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }

    pub fn return_parameters(&self) -> Option<ParameterList> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::RETURN_PARAMETERS)
            .and_then(|n| n.children().find_map(ParameterList::cast))
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::BLOCK)
    }
}

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = VariableDeclaration> + '_ {
        self.0.children().filter_map(VariableDeclaration::cast)
    }
}

ast_node!(VariableDeclaration, VARIABLE_DECLARATION);

impl VariableDeclaration {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }

    /// The declared type, always the first child node
    pub fn type_name(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn visibility(&self) -> Option<Visibility> {
        Visibility::from_node(&self.0)
    }

    pub fn storage_location(&self) -> Option<StorageLocation> {
        tokens(&self.0).find_map(|t| match t.kind() {
            SyntaxKind::MEMORY_KW => Some(StorageLocation::Memory),
            SyntaxKind::STORAGE_KW => Some(StorageLocation::Storage),
            SyntaxKind::CALLDATA_KW => Some(StorageLocation::Calldata),
            _ => None,
        })
    }

    pub fn is_constant(&self) -> bool {
        has_token(&self.0, SyntaxKind::CONSTANT_KW)
    }

    pub fn is_immutable(&self) -> bool {
        has_token(&self.0, SyntaxKind::IMMUTABLE_KW)
    }

    pub fn is_indexed(&self) -> bool {
        has_token(&self.0, SyntaxKind::INDEXED_KW)
    }

    pub fn is_state_variable(&self) -> bool {
        self.0
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::STATE_VARIABLE_DECLARATION)
    }
}

// ============================================================================
// Type names
// ============================================================================

ast_node!(UserDefinedTypeName, USER_DEFINED_TYPE_NAME);

impl UserDefinedTypeName {
    /// The segment that names the referenced declaration (`B` in `A.B`)
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident(&self.0)
    }

    /// Dotted path as written
    pub fn path(&self) -> String {
        ident_tokens(&self.0)
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

ast_node!(ElementaryTypeName, ELEMENTARY_TYPE_NAME);

impl ElementaryTypeName {
    pub fn type_token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::ELEMENTARY_TYPE_KW | SyntaxKind::PAYABLE_KW
            )
        })
    }

    pub fn is_payable(&self) -> bool {
        has_token(&self.0, SyntaxKind::PAYABLE_KW)
    }
}

ast_node!(Mapping, MAPPING);

impl Mapping {
    pub fn key_type(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    pub fn value_type(&self) -> Option<SyntaxNode> {
        self.0.children().nth(1)
    }
}

ast_node!(ArrayTypeName, ARRAY_TYPE_NAME);

impl ArrayTypeName {
    pub fn base_type(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(Identifier, IDENTIFIER);

impl Identifier {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }
}

ast_node!(MemberAccess, MEMBER_ACCESS);

impl MemberAccess {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn member_token(&self) -> Option<SyntaxToken> {
        last_ident(&self.0)
    }
}

ast_node!(FunctionCall, FUNCTION_CALL);

impl FunctionCall {
    pub fn callee(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn arguments(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CALL_ARGUMENTS)
    }
}

ast_node!(IndexAccess, INDEX_ACCESS);

impl IndexAccess {
    pub fn base(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn index(&self) -> Option<SyntaxNode> {
        self.0.children().nth(1)
    }
}

ast_node!(BinaryOperation, BINARY_OPERATION);

impl BinaryOperation {
    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_punct())
    }
}

ast_node!(UnaryOperation, UNARY_OPERATION);

impl UnaryOperation {
    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_punct() || t.kind() == SyntaxKind::DELETE_KW)
    }

    /// `++x` rather than `x++`
    pub fn is_prefix(&self) -> bool {
        self.0
            .first_child_or_token()
            .is_some_and(|e| e.as_token().is_some())
    }
}

ast_node!(NewExpression, NEW_EXPRESSION);

impl NewExpression {
    pub fn type_name(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }
}

ast_node!(TupleExpression, TUPLE_EXPRESSION);

impl TupleExpression {
    pub fn is_inline_array(&self) -> bool {
        has_token(&self.0, SyntaxKind::L_BRACKET)
    }

    pub fn elements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }
}

ast_node!(NamedArgument, NAMED_ARGUMENT);

impl NamedArgument {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }
}

ast_node!(CatchClause, CATCH_CLAUSE);

impl CatchClause {
    /// `Error` / `Panic` in `catch Error(string memory reason)`
    pub fn kind_token(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }
}

ast_node!(NumberLiteral, NUMBER_LITERAL);

impl NumberLiteral {
    pub fn value(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::DECIMAL_NUMBER | SyntaxKind::HEX_NUMBER
            )
        })
    }

    pub fn unit(&self) -> Option<SyntaxToken> {
        first_ident(&self.0)
    }
}

ast_node!(BooleanLiteral, BOOLEAN_LITERAL);

impl BooleanLiteral {
    pub fn value(&self) -> bool {
        has_token(&self.0, SyntaxKind::TRUE_KW)
    }
}

ast_node!(StringLiteral, STRING_LITERAL);

impl StringLiteral {
    /// Concatenated contents of all adjacent string parts
    pub fn value(&self) -> String {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::STRING)
            .map(|t| unquote(t.text()).to_string())
            .collect()
    }
}

ast_node!(HexLiteral, HEX_LITERAL);

impl HexLiteral {
    pub fn value(&self) -> String {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::HEX_STRING)
            .map(|t| unquote(t.text()).to_string())
            .collect()
    }
}
