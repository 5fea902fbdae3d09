//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Composite node kinds mirror the node types of the Solidity AST.

/// All syntax kinds (tokens and nodes) in Solidity
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (contracts, functions, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    DECIMAL_NUMBER,     // 42, 1.5e3
    HEX_NUMBER,         // 0xff
    STRING,             // "hello" or 'hello' or unicode"hello"
    HEX_STRING,         // hex"00ff"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COLON_EQ,           // := (assembly)
    COMMA,              // ,
    DOT,                // .
    QUESTION,           // ?
    FAT_ARROW,          // =>
    ARROW,              // -> (assembly)
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    STAR_STAR,          // **
    BANG,               // !
    TILDE,              // ~
    AMP,                // &
    PIPE,               // |
    CARET,              // ^
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||
    SHL,                // <<
    SHR,                // >>
    SAR,                // >>>
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    STAR_EQ,            // *=
    SLASH_EQ,           // /=
    PERCENT_EQ,         // %=
    PIPE_EQ,            // |=
    AMP_EQ,             // &=
    CARET_EQ,           // ^=
    SHL_EQ,             // <<=
    SHR_EQ,             // >>=
    SAR_EQ,             // >>>=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    PRAGMA_KW,
    IMPORT_KW,
    AS_KW,
    FROM_KW,
    CONTRACT_KW,
    INTERFACE_KW,
    LIBRARY_KW,
    ABSTRACT_KW,
    IS_KW,
    STRUCT_KW,
    ENUM_KW,
    EVENT_KW,
    ERROR_KW,
    MODIFIER_KW,
    FUNCTION_KW,
    CONSTRUCTOR_KW,
    FALLBACK_KW,
    RECEIVE_KW,
    RETURNS_KW,
    RETURN_KW,
    MAPPING_KW,
    USING_KW,
    FOR_KW,
    TYPE_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    DO_KW,
    BREAK_KW,
    CONTINUE_KW,
    EMIT_KW,
    NEW_KW,
    DELETE_KW,
    TRUE_KW,
    FALSE_KW,
    MEMORY_KW,
    STORAGE_KW,
    CALLDATA_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    INTERNAL_KW,
    EXTERNAL_KW,
    PURE_KW,
    VIEW_KW,
    PAYABLE_KW,
    CONSTANT_KW,
    IMMUTABLE_KW,
    OVERRIDE_KW,
    VIRTUAL_KW,
    INDEXED_KW,
    ANONYMOUS_KW,
    UNCHECKED_KW,
    ASSEMBLY_KW,
    TRY_KW,
    CATCH_KW,
    /// `uint256`, `address`, `bytes32`, `bool`, `string`, ...
    ELEMENTARY_TYPE_KW,

    // =========================================================================
    // NODES - source unit level
    // =========================================================================
    SOURCE_UNIT,
    PRAGMA_DIRECTIVE,
    IMPORT_DIRECTIVE,
    IMPORT_SYMBOL,
    CONTRACT_DEFINITION,
    INHERITANCE_SPECIFIER,
    STATE_VARIABLE_DECLARATION,
    USING_FOR_DECLARATION,
    STRUCT_DEFINITION,
    MODIFIER_DEFINITION,
    MODIFIER_INVOCATION,
    OVERRIDE_SPECIFIER,
    FUNCTION_DEFINITION,
    PARAMETER_LIST,
    RETURN_PARAMETERS,
    EVENT_DEFINITION,
    CUSTOM_ERROR_DEFINITION,
    ENUM_DEFINITION,
    ENUM_VALUE,
    USER_DEFINED_VALUE_TYPE_DEFINITION,
    VARIABLE_DECLARATION,

    // =========================================================================
    // NODES - type names
    // =========================================================================
    USER_DEFINED_TYPE_NAME,
    ARRAY_TYPE_NAME,
    MAPPING,
    ELEMENTARY_TYPE_NAME,
    FUNCTION_TYPE_NAME,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    BLOCK,
    EXPRESSION_STATEMENT,
    IF_STATEMENT,
    UNCHECKED_STATEMENT,
    WHILE_STATEMENT,
    FOR_STATEMENT,
    INLINE_ASSEMBLY_STATEMENT,
    ASSEMBLY_BLOCK,
    DO_WHILE_STATEMENT,
    CONTINUE_STATEMENT,
    BREAK_STATEMENT,
    RETURN_STATEMENT,
    EMIT_STATEMENT,
    REVERT_STATEMENT,
    TRY_STATEMENT,
    CATCH_CLAUSE,
    VARIABLE_DECLARATION_STATEMENT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    FUNCTION_CALL,
    CALL_ARGUMENTS,
    NAME_VALUE_EXPRESSION,
    NAME_VALUE_LIST,
    NAMED_ARGUMENT,
    NEW_EXPRESSION,
    TUPLE_EXPRESSION,
    TYPE_NAME_EXPRESSION,
    NUMBER_LITERAL,
    BOOLEAN_LITERAL,
    HEX_LITERAL,
    STRING_LITERAL,
    IDENTIFIER,
    BINARY_OPERATION,
    UNARY_OPERATION,
    CONDITIONAL,
    INDEX_ACCESS,
    INDEX_RANGE_ACCESS,
    MEMBER_ACCESS,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PRAGMA_KW as u16)
            && (self as u16) <= (Self::ELEMENTARY_TYPE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::SAR_EQ as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::DECIMAL_NUMBER | Self::HEX_NUMBER | Self::STRING | Self::HEX_STRING
        )
    }

    /// Check if this is a composite node kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::SOURCE_UNIT as u16) && (self as u16) < (Self::__LAST as u16)
    }

    /// Assignment operators (`=`, `+=`, ... `>>>=`)
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::PIPE_EQ
                | Self::AMP_EQ
                | Self::CARET_EQ
                | Self::SHL_EQ
                | Self::SHR_EQ
                | Self::SAR_EQ
        )
    }

    /// Data location keywords (`memory`, `storage`, `calldata`)
    pub fn is_data_location(self) -> bool {
        matches!(self, Self::MEMORY_KW | Self::STORAGE_KW | Self::CALLDATA_KW)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolidityLanguage {}

impl rowan::Language for SolidityLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SolidityLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SolidityLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SolidityLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<SolidityLanguage>;
