//! Node kind tags and the static role tables hung off them.

use crate::parser::SyntaxKind;

/// Tag of a [`SymbolNode`](super::SymbolNode).
///
/// One variant per composite syntax kind, plus [`NodeKind::Opaque`] for
/// anything the factory does not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Source unit level
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ImportSymbol,
    ContractDefinition,
    InheritanceSpecifier,
    StateVariableDeclaration,
    UsingForDeclaration,
    StructDefinition,
    ModifierDefinition,
    ModifierInvocation,
    OverrideSpecifier,
    FunctionDefinition,
    ParameterList,
    ReturnParameters,
    EventDefinition,
    CustomErrorDefinition,
    EnumDefinition,
    EnumValue,
    UserDefinedValueTypeDefinition,
    VariableDeclaration,
    // Type names
    UserDefinedTypeName,
    ArrayTypeName,
    Mapping,
    ElementaryTypeName,
    FunctionTypeName,
    // Statements
    Block,
    ExpressionStatement,
    IfStatement,
    UncheckedStatement,
    WhileStatement,
    ForStatement,
    InlineAssemblyStatement,
    AssemblyBlock,
    DoWhileStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    EmitStatement,
    RevertStatement,
    TryStatement,
    CatchClause,
    VariableDeclarationStatement,
    // Expressions
    FunctionCall,
    CallArguments,
    NameValueExpression,
    NameValueList,
    NamedArgument,
    NewExpression,
    TupleExpression,
    TypeNameExpression,
    NumberLiteral,
    BooleanLiteral,
    HexLiteral,
    StringLiteral,
    Identifier,
    BinaryOperation,
    UnaryOperation,
    Conditional,
    IndexAccess,
    IndexRangeAccess,
    MemberAccess,
    /// Unsupported or malformed syntax. Takes part in the tree shape only.
    Opaque,
}

impl NodeKind {
    /// Map a composite syntax kind to its node kind.
    ///
    /// Returns `None` for tokens and for `ERROR`; the factory turns those
    /// into [`NodeKind::Opaque`].
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        use SyntaxKind as S;
        let kind = match kind {
            S::SOURCE_UNIT => Self::SourceUnit,
            S::PRAGMA_DIRECTIVE => Self::PragmaDirective,
            S::IMPORT_DIRECTIVE => Self::ImportDirective,
            S::IMPORT_SYMBOL => Self::ImportSymbol,
            S::CONTRACT_DEFINITION => Self::ContractDefinition,
            S::INHERITANCE_SPECIFIER => Self::InheritanceSpecifier,
            S::STATE_VARIABLE_DECLARATION => Self::StateVariableDeclaration,
            S::USING_FOR_DECLARATION => Self::UsingForDeclaration,
            S::STRUCT_DEFINITION => Self::StructDefinition,
            S::MODIFIER_DEFINITION => Self::ModifierDefinition,
            S::MODIFIER_INVOCATION => Self::ModifierInvocation,
            S::OVERRIDE_SPECIFIER => Self::OverrideSpecifier,
            S::FUNCTION_DEFINITION => Self::FunctionDefinition,
            S::PARAMETER_LIST => Self::ParameterList,
            S::RETURN_PARAMETERS => Self::ReturnParameters,
            S::EVENT_DEFINITION => Self::EventDefinition,
            S::CUSTOM_ERROR_DEFINITION => Self::CustomErrorDefinition,
            S::ENUM_DEFINITION => Self::EnumDefinition,
            S::ENUM_VALUE => Self::EnumValue,
            S::USER_DEFINED_VALUE_TYPE_DEFINITION => Self::UserDefinedValueTypeDefinition,
            S::VARIABLE_DECLARATION => Self::VariableDeclaration,
            S::USER_DEFINED_TYPE_NAME => Self::UserDefinedTypeName,
            S::ARRAY_TYPE_NAME => Self::ArrayTypeName,
            S::MAPPING => Self::Mapping,
            S::ELEMENTARY_TYPE_NAME => Self::ElementaryTypeName,
            S::FUNCTION_TYPE_NAME => Self::FunctionTypeName,
            S::BLOCK => Self::Block,
            S::EXPRESSION_STATEMENT => Self::ExpressionStatement,
            S::IF_STATEMENT => Self::IfStatement,
            S::UNCHECKED_STATEMENT => Self::UncheckedStatement,
            S::WHILE_STATEMENT => Self::WhileStatement,
            S::FOR_STATEMENT => Self::ForStatement,
            S::INLINE_ASSEMBLY_STATEMENT => Self::InlineAssemblyStatement,
            S::ASSEMBLY_BLOCK => Self::AssemblyBlock,
            S::DO_WHILE_STATEMENT => Self::DoWhileStatement,
            S::CONTINUE_STATEMENT => Self::ContinueStatement,
            S::BREAK_STATEMENT => Self::BreakStatement,
            S::RETURN_STATEMENT => Self::ReturnStatement,
            S::EMIT_STATEMENT => Self::EmitStatement,
            S::REVERT_STATEMENT => Self::RevertStatement,
            S::TRY_STATEMENT => Self::TryStatement,
            S::CATCH_CLAUSE => Self::CatchClause,
            S::VARIABLE_DECLARATION_STATEMENT => Self::VariableDeclarationStatement,
            S::FUNCTION_CALL => Self::FunctionCall,
            S::CALL_ARGUMENTS => Self::CallArguments,
            S::NAME_VALUE_EXPRESSION => Self::NameValueExpression,
            S::NAME_VALUE_LIST => Self::NameValueList,
            S::NAMED_ARGUMENT => Self::NamedArgument,
            S::NEW_EXPRESSION => Self::NewExpression,
            S::TUPLE_EXPRESSION => Self::TupleExpression,
            S::TYPE_NAME_EXPRESSION => Self::TypeNameExpression,
            S::NUMBER_LITERAL => Self::NumberLiteral,
            S::BOOLEAN_LITERAL => Self::BooleanLiteral,
            S::HEX_LITERAL => Self::HexLiteral,
            S::STRING_LITERAL => Self::StringLiteral,
            S::IDENTIFIER => Self::Identifier,
            S::BINARY_OPERATION => Self::BinaryOperation,
            S::UNARY_OPERATION => Self::UnaryOperation,
            S::CONDITIONAL => Self::Conditional,
            S::INDEX_ACCESS => Self::IndexAccess,
            S::INDEX_RANGE_ACCESS => Self::IndexRangeAccess,
            S::MEMBER_ACCESS => Self::MemberAccess,
            _ => return None,
        };
        Some(kind)
    }

    /// Nodes that open a naming scope.
    ///
    /// A declaration is visible inside its nearest enclosing scope node.
    pub fn is_scope(self) -> bool {
        matches!(
            self,
            Self::SourceUnit
                | Self::ContractDefinition
                | Self::FunctionDefinition
                | Self::ModifierDefinition
                | Self::Block
                | Self::UncheckedStatement
                | Self::ForStatement
                | Self::TryStatement
                | Self::CatchClause
                | Self::StructDefinition
                | Self::EnumDefinition
                | Self::EventDefinition
                | Self::CustomErrorDefinition
                | Self::FunctionTypeName
        )
    }

    /// Nodes whose declarations belong to the enclosing scope.
    ///
    /// Lookups walking a scope's children look through these.
    pub fn is_declaration_holder(self) -> bool {
        matches!(
            self,
            Self::StateVariableDeclaration
                | Self::VariableDeclarationStatement
                | Self::ParameterList
                | Self::ReturnParameters
        )
    }

    /// Kinds that can hold members reachable through `X.member`.
    pub fn is_member_container(self) -> bool {
        matches!(
            self,
            Self::ContractDefinition
                | Self::StructDefinition
                | Self::EnumDefinition
                | Self::UserDefinedValueTypeDefinition
                | Self::ImportDirective
        )
    }

    /// Pending kinds (or usage contexts) a declaration of this kind may claim.
    pub fn connection_kinds(self) -> &'static [NodeKind] {
        match self {
            Self::ContractDefinition => &[
                Self::UserDefinedTypeName,
                Self::FunctionCall,
                Self::MemberAccess,
                Self::ModifierInvocation,
            ],
            Self::StructDefinition => &[Self::UserDefinedTypeName, Self::FunctionCall],
            Self::EnumDefinition | Self::UserDefinedValueTypeDefinition => {
                &[Self::UserDefinedTypeName, Self::MemberAccess]
            }
            Self::FunctionDefinition
            | Self::EventDefinition
            | Self::CustomErrorDefinition
            | Self::VariableDeclaration => &[Self::Identifier],
            Self::ModifierDefinition => &[Self::ModifierInvocation],
            Self::ImportDirective => &[Self::MemberAccess],
            _ => &[],
        }
    }
}

/// Names provided by the language itself.
///
/// Identifiers with these names are never usages: they do not enter the
/// pending pool and never resolve. `_` is the modifier body placeholder.
pub const BUILTINS: &[&str] = &[
    "_",
    "abi",
    "addmod",
    "assert",
    "block",
    "blockhash",
    "ecrecover",
    "gasleft",
    "keccak256",
    "msg",
    "mulmod",
    "now",
    "require",
    "revert",
    "ripemd160",
    "selfdestruct",
    "sha256",
    "super",
    "this",
    "tx",
    "type",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.binary_search(&name).is_ok()
}
