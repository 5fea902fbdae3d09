//! The symbol node model.
//!
//! Every composite syntax node becomes one [`SymbolNode`]: shared fields
//! (location, tree structure, links) are hoisted out, and the kind-specific
//! payload lives in [`NodeData`].

use smol_str::SmolStr;

use super::kind::NodeKind;
use crate::base::{FileId, Span};
use crate::parser::{
    ContractKind, FunctionKind, StateMutability, StorageLocation, SyntaxKind, Visibility,
};

/// Slot of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a node in a specific tree generation.
///
/// A `NodeRef` stays meaningful only while the installed tree of `file`
/// carries the same `generation`; lookups check this instead of following
/// a pointer into a discarded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub generation: u64,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(file: FileId, generation: u64, node: NodeId) -> Self {
        Self {
            file,
            generation,
            node,
        }
    }

    /// Another node of the same tree.
    pub fn with_node(self, node: NodeId) -> Self {
        Self { node, ..self }
    }
}

/// Kind-specific payload of a [`SymbolNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    SourceUnit,
    PragmaDirective {
        value: String,
    },
    ImportDirective {
        path: SmolStr,
        /// `import "x" as U;` or `import * as U from "x";`
        unit_alias: Option<SmolStr>,
        wildcard: bool,
    },
    /// The node's name is the imported symbol; `alias` the local rename.
    ImportSymbol {
        alias: Option<SmolStr>,
    },
    ContractDefinition {
        kind: ContractKind,
        is_abstract: bool,
    },
    InheritanceSpecifier,
    StateVariableDeclaration,
    UsingForDeclaration {
        global: bool,
    },
    StructDefinition,
    ModifierDefinition {
        is_virtual: bool,
    },
    ModifierInvocation,
    OverrideSpecifier,
    FunctionDefinition {
        kind: FunctionKind,
        visibility: Option<Visibility>,
        mutability: StateMutability,
        is_virtual: bool,
    },
    ParameterList,
    ReturnParameters,
    EventDefinition {
        anonymous: bool,
    },
    CustomErrorDefinition,
    EnumDefinition,
    EnumValue,
    UserDefinedValueTypeDefinition,
    VariableDeclaration {
        visibility: Option<Visibility>,
        storage_location: Option<StorageLocation>,
        is_constant: bool,
        is_immutable: bool,
        is_indexed: bool,
        is_state_variable: bool,
    },
    UserDefinedTypeName {
        /// Dotted path as written, `L.S` for a qualified name.
        path: SmolStr,
    },
    ArrayTypeName,
    Mapping,
    ElementaryTypeName {
        name: SmolStr,
    },
    FunctionTypeName,
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
    CatchClause {
        /// `Error` / `Panic`
        kind: Option<SmolStr>,
    },
    VariableDeclarationStatement,
    FunctionCall,
    CallArguments,
    NameValueExpression,
    NameValueList,
    NamedArgument {
        name: Option<SmolStr>,
    },
    NewExpression,
    TupleExpression {
        is_array: bool,
    },
    TypeNameExpression,
    NumberLiteral {
        value: SmolStr,
        unit: Option<SmolStr>,
    },
    BooleanLiteral {
        value: bool,
    },
    HexLiteral {
        value: String,
    },
    StringLiteral {
        value: String,
    },
    Identifier {
        builtin: bool,
    },
    BinaryOperation {
        operator: SmolStr,
    },
    UnaryOperation {
        operator: SmolStr,
        is_prefix: bool,
    },
    Conditional,
    IndexAccess,
    IndexRangeAccess,
    MemberAccess,
    Opaque {
        syntax_kind: SyntaxKind,
    },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::SourceUnit => NodeKind::SourceUnit,
            Self::PragmaDirective { .. } => NodeKind::PragmaDirective,
            Self::ImportDirective { .. } => NodeKind::ImportDirective,
            Self::ImportSymbol { .. } => NodeKind::ImportSymbol,
            Self::ContractDefinition { .. } => NodeKind::ContractDefinition,
            Self::InheritanceSpecifier => NodeKind::InheritanceSpecifier,
            Self::StateVariableDeclaration => NodeKind::StateVariableDeclaration,
            Self::UsingForDeclaration { .. } => NodeKind::UsingForDeclaration,
            Self::StructDefinition => NodeKind::StructDefinition,
            Self::ModifierDefinition { .. } => NodeKind::ModifierDefinition,
            Self::ModifierInvocation => NodeKind::ModifierInvocation,
            Self::OverrideSpecifier => NodeKind::OverrideSpecifier,
            Self::FunctionDefinition { .. } => NodeKind::FunctionDefinition,
            Self::ParameterList => NodeKind::ParameterList,
            Self::ReturnParameters => NodeKind::ReturnParameters,
            Self::EventDefinition { .. } => NodeKind::EventDefinition,
            Self::CustomErrorDefinition => NodeKind::CustomErrorDefinition,
            Self::EnumDefinition => NodeKind::EnumDefinition,
            Self::EnumValue => NodeKind::EnumValue,
            Self::UserDefinedValueTypeDefinition => NodeKind::UserDefinedValueTypeDefinition,
            Self::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Self::UserDefinedTypeName { .. } => NodeKind::UserDefinedTypeName,
            Self::ArrayTypeName => NodeKind::ArrayTypeName,
            Self::Mapping => NodeKind::Mapping,
            Self::ElementaryTypeName { .. } => NodeKind::ElementaryTypeName,
            Self::FunctionTypeName => NodeKind::FunctionTypeName,
            Self::Block => NodeKind::Block,
            Self::ExpressionStatement => NodeKind::ExpressionStatement,
            Self::IfStatement => NodeKind::IfStatement,
            Self::UncheckedStatement => NodeKind::UncheckedStatement,
            Self::WhileStatement => NodeKind::WhileStatement,
            Self::ForStatement => NodeKind::ForStatement,
            Self::InlineAssemblyStatement => NodeKind::InlineAssemblyStatement,
            Self::AssemblyBlock => NodeKind::AssemblyBlock,
            Self::DoWhileStatement => NodeKind::DoWhileStatement,
            Self::ContinueStatement => NodeKind::ContinueStatement,
            Self::BreakStatement => NodeKind::BreakStatement,
            Self::ReturnStatement => NodeKind::ReturnStatement,
            Self::EmitStatement => NodeKind::EmitStatement,
            Self::RevertStatement => NodeKind::RevertStatement,
            Self::TryStatement => NodeKind::TryStatement,
            Self::CatchClause { .. } => NodeKind::CatchClause,
            Self::VariableDeclarationStatement => NodeKind::VariableDeclarationStatement,
            Self::FunctionCall => NodeKind::FunctionCall,
            Self::CallArguments => NodeKind::CallArguments,
            Self::NameValueExpression => NodeKind::NameValueExpression,
            Self::NameValueList => NodeKind::NameValueList,
            Self::NamedArgument { .. } => NodeKind::NamedArgument,
            Self::NewExpression => NodeKind::NewExpression,
            Self::TupleExpression { .. } => NodeKind::TupleExpression,
            Self::TypeNameExpression => NodeKind::TypeNameExpression,
            Self::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Self::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            Self::HexLiteral { .. } => NodeKind::HexLiteral,
            Self::StringLiteral { .. } => NodeKind::StringLiteral,
            Self::Identifier { .. } => NodeKind::Identifier,
            Self::BinaryOperation { .. } => NodeKind::BinaryOperation,
            Self::UnaryOperation { .. } => NodeKind::UnaryOperation,
            Self::Conditional => NodeKind::Conditional,
            Self::IndexAccess => NodeKind::IndexAccess,
            Self::IndexRangeAccess => NodeKind::IndexRangeAccess,
            Self::MemberAccess => NodeKind::MemberAccess,
            Self::Opaque { .. } => NodeKind::Opaque,
        }
    }
}

/// One node of a file's symbol tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNode {
    pub file: FileId,
    pub range: Span,
    /// Declared or referenced name; `None` for nodes that do not take part
    /// in name resolution.
    pub name: Option<SmolStr>,
    pub name_range: Option<Span>,
    pub parent: Option<NodeId>,
    /// Owned children in source order.
    pub children: Vec<NodeId>,
    /// Nodes describing this node's type. Declarations list themselves.
    pub declared_type: Vec<NodeRef>,
    pub resolved_declaration: Option<NodeRef>,
    /// Usages claimed by this declaration (non-owning back links).
    pub references: Vec<NodeRef>,
    /// Kind of the expression this node is the head of, e.g. the call whose
    /// callee it is.
    pub context: Option<NodeKind>,
    pub data: NodeData,
}

impl SymbolNode {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Nodes that reference a declaration by name.
    pub fn is_usage(&self) -> bool {
        if self.name.is_none() {
            return false;
        }
        match &self.data {
            NodeData::Identifier { builtin } => !builtin,
            NodeData::MemberAccess
            | NodeData::UserDefinedTypeName { .. }
            | NodeData::ModifierInvocation
            | NodeData::ImportSymbol { .. } => true,
            _ => false,
        }
    }

    /// Nodes that introduce a name into their scope.
    pub fn is_declaration(&self) -> bool {
        if self.name.is_none() {
            return false;
        }
        matches!(
            self.kind(),
            NodeKind::ContractDefinition
                | NodeKind::StructDefinition
                | NodeKind::EnumDefinition
                | NodeKind::EnumValue
                | NodeKind::UserDefinedValueTypeDefinition
                | NodeKind::FunctionDefinition
                | NodeKind::ModifierDefinition
                | NodeKind::EventDefinition
                | NodeKind::CustomErrorDefinition
                | NodeKind::VariableDeclaration
                | NodeKind::ImportDirective
        )
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_declaration.is_some()
    }

    /// A `UserDefinedTypeName` written with a dotted path (`L.S`).
    pub fn is_qualified_type_name(&self) -> bool {
        matches!(&self.data, NodeData::UserDefinedTypeName { path } if path.contains('.'))
    }

    /// Whether this declaration may claim `usage`, ignoring scope.
    ///
    /// Names must match exactly and either the usage's kind or its context
    /// must be in this declaration's connection kinds. Member accesses are
    /// never claimed by name; they resolve through their base expression.
    pub fn accepts(&self, usage: &SymbolNode) -> bool {
        self.name.is_some() && self.name == usage.name && self.accepts_kind(usage)
    }

    /// The kind half of [`accepts`](Self::accepts), for usages that reach a
    /// declaration under another name (`import {A as B}`).
    pub fn accepts_kind(&self, usage: &SymbolNode) -> bool {
        if !self.is_declaration() || usage.kind() == NodeKind::MemberAccess {
            return false;
        }
        let allowed = self.kind().connection_kinds();
        allowed.contains(&usage.kind()) || usage.context.is_some_and(|c| allowed.contains(&c))
    }

    /// Name the node binds locally: the alias of an import symbol, or the
    /// plain name otherwise.
    pub fn local_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::ImportSymbol { alias: Some(alias) } => Some(alias.as_str()),
            _ => self.name(),
        }
    }
}
