//! Tree builder and the orphan (pending usage) resolution engine.
//!
//! The builder walks the CST depth-first in source order. Every node is
//! allocated with its parent link, its children are built, then the node is
//! *accepted* before it is attached to its parent:
//!
//! - a usage first tries its ancestor chain; if that fails it joins the
//!   pending pool;
//! - a declaration scans the pool once, oldest first, and claims every
//!   pending usage it is eligible for;
//! - a contract, before its own claim, resolves pending usages inside it
//!   against its bases and then the enclosing scopes. When a base is not
//!   declared yet, the contract waits for the end of the file and outer
//!   declarations may not claim inside it meanwhile;
//! - the source unit closes the waiting contracts, then runs the member
//!   access fixpoint.
//!
//! Because acceptance is post-order, the innermost and earliest scope gets
//! the first chance to claim a name.

use tracing::{debug, trace};

use super::factory::make_node;
use super::kind::NodeKind;
use super::members::{self, NodeLookup};
use super::node::{NodeData, NodeId, NodeRef, SymbolNode};
use super::tree::FileSymbolTree;
use crate::base::{FileId, LineIndex};
use crate::parser::SyntaxNode;

/// Default cap on inheritance hierarchy depth.
pub const DEFAULT_MAX_INHERITANCE_DEPTH: usize = 64;

/// Builds one [`FileSymbolTree`] from a parsed source unit.
pub struct TreeBuilder<'a> {
    tree: FileSymbolTree,
    line_index: &'a LineIndex,
    max_inheritance_depth: usize,
    /// Contracts closed before all their bases were declared.
    waiting: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(file: FileId, generation: u64, line_index: &'a LineIndex) -> Self {
        Self {
            tree: FileSymbolTree::new(file, generation),
            line_index,
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
            waiting: Vec::new(),
        }
    }

    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }

    pub fn build(mut self, root: &SyntaxNode) -> FileSymbolTree {
        let root = self.build_node(root, None, None);
        self.tree.set_root(root);
        debug!(
            file = ?self.tree.file(),
            nodes = self.tree.len(),
            pending = self.tree.pending_len(),
            "built symbol tree"
        );
        self.tree
    }

    fn build_node(
        &mut self,
        raw: &SyntaxNode,
        parent: Option<NodeId>,
        context: Option<NodeKind>,
    ) -> NodeId {
        let mut node = make_node(raw, self.tree.file(), self.line_index);
        node.parent = parent;
        node.context = context;
        let kind = node.kind();
        let id = self.tree.push(node);

        for (index, child) in raw.children().enumerate() {
            let child_context = child_context(kind, index, context);
            self.build_node(&child, Some(id), child_context);
        }

        self.accept(id);
        if let Some(parent) = parent {
            self.tree.push_child(parent, id);
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&SymbolNode> {
        self.tree.node(id)
    }

    // ------------------------------------------------------------------
    // Acceptance
    // ------------------------------------------------------------------

    fn accept(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let kind = node.kind();
        let is_declaration = node.is_declaration();
        let is_usage = node.is_usage();

        if kind == NodeKind::ContractDefinition {
            self.close_contract(id);
        }
        if is_declaration {
            let own = self.tree.node_ref(id);
            if let Some(node) = self.tree.node_mut(id) {
                node.declared_type.push(own);
            }
            self.claim(id);
        }
        if is_usage {
            self.accept_usage(id);
        }
        if kind == NodeKind::SourceUnit {
            self.close_waiting_contracts();
            self.resolve_member_accesses();
        }
    }

    fn accept_usage(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let deferred = matches!(node.kind(), NodeKind::MemberAccess | NodeKind::ImportSymbol)
            || node.is_qualified_type_name();
        if !deferred {
            if let Some(decl) = self.lookup_enclosing(id) {
                self.link(id, decl);
                return;
            }
        }
        trace!(usage = ?id, name = ?node.name, "usage deferred to pending pool");
        self.tree.enqueue(id);
    }

    /// Immediate lookup against the ancestor chain.
    ///
    /// Each ancestor is tried itself, then its already built declarations.
    /// The walk stops after the innermost contract: names from outside it
    /// are only consulted once the contract is closed and its bases had
    /// their turn.
    fn lookup_enclosing(&self, usage: NodeId) -> Option<NodeId> {
        let usage_node = self.node(usage)?;
        for ancestor in self.tree.ancestors(usage) {
            let ancestor_node = self.node(ancestor)?;
            if ancestor_node.accepts(usage_node) {
                return Some(ancestor);
            }
            if let Some(found) = self.find_member_accepting(ancestor, usage_node) {
                return Some(found);
            }
            if ancestor_node.kind() == NodeKind::ContractDefinition {
                break;
            }
        }
        None
    }

    /// Lookup through every scope enclosing `from`, excluding `from`.
    fn lookup_outer(&self, from: NodeId, usage_node: &SymbolNode) -> Option<NodeId> {
        for ancestor in self.tree.ancestors(from) {
            let ancestor_node = self.node(ancestor)?;
            if ancestor_node.accepts(usage_node) {
                return Some(ancestor);
            }
            if let Some(found) = self.find_member_accepting(ancestor, usage_node) {
                return Some(found);
            }
        }
        None
    }

    fn find_member_accepting(&self, scope: NodeId, usage_node: &SymbolNode) -> Option<NodeId> {
        self.tree
            .members(scope)
            .into_iter()
            .find(|&m| self.node(m).is_some_and(|decl| decl.accepts(usage_node)))
    }

    /// Claim scan: link every pending usage this declaration may claim.
    fn claim(&mut self, decl: NodeId) {
        let Some(scope) = self.tree.enclosing_scope(decl) else {
            return;
        };
        let Some(decl_node) = self.node(decl) else {
            return;
        };
        let claimed: Vec<NodeId> = self
            .tree
            .pending()
            .filter(|&usage| {
                self.node(usage).is_some_and(|usage_node| {
                    is_name_resolved(usage_node) && decl_node.accepts(usage_node)
                }) && self.tree.is_inside(usage, scope)
                    && !self.is_held_for_bases(usage)
            })
            .collect();

        for usage in claimed {
            self.link(usage, decl);
        }
    }

    /// Resolve what is still pending inside `contract` before it claims.
    ///
    /// Inheritance specifiers go first against the outer scope, then the
    /// remaining usages against inherited members, then against the
    /// enclosing scopes. A contract with a base not declared yet waits.
    fn close_contract(&mut self, contract: NodeId) {
        if self.resolve_base_names(contract) {
            self.resolve_inherited_then_outer(contract);
        } else {
            trace!(?contract, "contract waits for a later base");
            self.waiting.push(contract);
        }
    }

    /// Second chance for waiting contracts, once every declaration of the
    /// file is built. Bases still missing are left to the workspace.
    fn close_waiting_contracts(&mut self) {
        for contract in std::mem::take(&mut self.waiting) {
            self.resolve_base_names(contract);
            self.resolve_inherited_then_outer(contract);
        }
    }

    /// Pending usages inside `contract`, split into inheritance base names
    /// and the rest.
    fn pending_inside(&self, contract: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
        self.tree
            .pending()
            .filter(|&usage| self.tree.is_inside(usage, contract))
            .filter(|&usage| self.node(usage).is_some_and(is_name_resolved))
            .partition(|&usage| self.is_inheritance_base_name(usage))
    }

    /// Link the contract's base names against the outer scope. Returns
    /// whether every base name is linked.
    fn resolve_base_names(&mut self, contract: NodeId) -> bool {
        let (specifiers, _) = self.pending_inside(contract);
        let mut all_linked = true;
        for usage in specifiers {
            match self
                .node(usage)
                .and_then(|usage_node| self.lookup_outer(contract, usage_node))
            {
                Some(decl) => self.link(usage, decl),
                None => all_linked = false,
            }
        }
        all_linked
    }

    fn resolve_inherited_then_outer(&mut self, contract: NodeId) {
        let (_, rest) = self.pending_inside(contract);
        let contract_ref = self.tree.node_ref(contract);
        let mut unresolved = Vec::new();
        for usage in rest {
            let inherited = self.node(usage).and_then(|usage_node| {
                members::find_inherited(
                    &self.tree,
                    contract_ref,
                    usage_node,
                    self.max_inheritance_depth,
                )
            });
            match inherited {
                Some(decl) => self.link(usage, decl.node),
                None => unresolved.push(usage),
            }
        }

        for usage in unresolved {
            if let Some(decl) = self
                .node(usage)
                .and_then(|usage_node| self.lookup_outer(contract, usage_node))
            {
                self.link(usage, decl);
            }
        }
    }

    /// Whether `usage` sits in a waiting contract, where only its base names
    /// may be claimed.
    fn is_held_for_bases(&self, usage: NodeId) -> bool {
        !self.is_inheritance_base_name(usage)
            && self
                .waiting
                .iter()
                .any(|&contract| self.tree.is_inside(usage, contract))
    }

    fn is_inheritance_base_name(&self, usage: NodeId) -> bool {
        self.node(usage)
            .and_then(|n| n.parent)
            .and_then(|p| self.node(p))
            .is_some_and(|p| p.kind() == NodeKind::InheritanceSpecifier)
    }

    /// Link member accesses and qualified type names until nothing changes.
    fn resolve_member_accesses(&mut self) {
        loop {
            let resolved: Vec<(NodeId, NodeRef)> = self
                .tree
                .pending()
                .filter_map(|usage| {
                    let usage_ref = self.tree.node_ref(usage);
                    let node = self.node(usage)?;
                    let target = match node.kind() {
                        NodeKind::MemberAccess => members::resolve_member_access(
                            &self.tree,
                            usage_ref,
                            self.max_inheritance_depth,
                        ),
                        NodeKind::UserDefinedTypeName if node.is_qualified_type_name() => {
                            self.resolve_qualified(usage, node)
                        }
                        _ => None,
                    }?;
                    Some((usage, target))
                })
                .collect();

            if resolved.is_empty() {
                break;
            }
            for (usage, target) in resolved {
                self.link_ref(usage, target);
            }
        }
    }

    /// `A.B.C`: resolve `A` through the enclosing scopes, then walk members.
    fn resolve_qualified(&self, usage: NodeId, node: &SymbolNode) -> Option<NodeRef> {
        let NodeData::UserDefinedTypeName { path } = &node.data else {
            return None;
        };
        let segments: Vec<&str> = path.split('.').collect();
        let (first, rest) = segments.split_first()?;

        let first_decl = self.tree.ancestors(usage).find_map(|ancestor| {
            let contract_bases = self
                .node(ancestor)
                .filter(|a| a.kind() == NodeKind::ContractDefinition)
                .map(|_| {
                    members::linearize(
                        &self.tree,
                        self.tree.node_ref(ancestor),
                        self.max_inheritance_depth,
                    )
                })
                .unwrap_or_else(|| vec![self.tree.node_ref(ancestor)]);
            contract_bases.into_iter().find_map(|scope| {
                members::members(&self.tree, scope).into_iter().find(|&m| {
                    self.tree
                        .lookup(m)
                        .is_some_and(|d| d.name() == Some(*first) && d.kind().is_member_container())
                })
            })
        })?;

        members::resolve_path(&self.tree, first_decl, rest, self.max_inheritance_depth)
    }

    // ------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------

    fn link(&mut self, usage: NodeId, decl: NodeId) {
        let decl = self.tree.node_ref(decl);
        self.link_ref(usage, decl);
    }

    fn link_ref(&mut self, usage: NodeId, decl: NodeRef) {
        let Some(usage_node) = self.node(usage) else {
            return;
        };
        let target = members::claim_target(&self.tree, usage_node, decl);
        let usage_ref = self.tree.node_ref(usage);
        self.tree.link(usage, target);
        self.tree.add_reference(target.node, usage_ref);
    }
}

/// Usages resolved by plain name lookup, as opposed to member lookup.
fn is_name_resolved(node: &SymbolNode) -> bool {
    !matches!(node.kind(), NodeKind::MemberAccess | NodeKind::ImportSymbol)
        && !node.is_qualified_type_name()
}

/// Context handed to the `index`-th child of a node of kind `parent`.
///
/// The head of a call, member access or index access learns what it is
/// the head of; call options (`f{value: 1}`) pass their own context on.
fn child_context(
    parent: NodeKind,
    index: usize,
    parent_context: Option<NodeKind>,
) -> Option<NodeKind> {
    if index != 0 {
        return None;
    }
    match parent {
        NodeKind::FunctionCall | NodeKind::MemberAccess | NodeKind::IndexAccess => Some(parent),
        NodeKind::NameValueExpression => parent_context,
        _ => None,
    }
}

/// Build a file's symbol tree with the default inheritance depth.
pub fn build_tree(
    root: &SyntaxNode,
    file: FileId,
    generation: u64,
    line_index: &LineIndex,
) -> FileSymbolTree {
    TreeBuilder::new(file, generation, line_index).build(root)
}
