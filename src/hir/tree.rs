//! Per-file symbol tree.

use indexmap::IndexSet;
use tracing::trace;

use super::kind::NodeKind;
use super::members::NodeLookup;
use super::node::{NodeId, NodeRef, SymbolNode};
use crate::base::FileId;

/// One file's built symbol tree plus its residual pending pool.
///
/// Nodes live in a flat arena; `NodeId`s index into it. The pending pool
/// holds usages not yet linked to a declaration, oldest first.
#[derive(Debug, Clone)]
pub struct FileSymbolTree {
    file: FileId,
    generation: u64,
    nodes: Vec<SymbolNode>,
    root: NodeId,
    pending: IndexSet<NodeId>,
    /// Usages linked by the workspace rather than by the builder.
    external: IndexSet<NodeId>,
}

impl FileSymbolTree {
    pub(crate) fn new(file: FileId, generation: u64) -> Self {
        Self {
            file,
            generation,
            nodes: Vec::new(),
            root: NodeId::new(0),
            pending: IndexSet::new(),
            external: IndexSet::new(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SymbolNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut SymbolNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SymbolNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }

    /// Handle to a node of this tree generation.
    pub fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.file, self.generation, id)
    }

    /// Whether `node` points into this exact tree generation.
    pub fn owns(&self, node: NodeRef) -> bool {
        node.file == self.file
            && node.generation == self.generation
            && node.node.index() < self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Pending pool
    // ------------------------------------------------------------------

    pub fn pending(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: NodeId) -> bool {
        self.pending.contains(&id)
    }

    pub(crate) fn enqueue(&mut self, id: NodeId) {
        self.pending.insert(id);
    }

    /// Number of usage nodes in the tree.
    pub fn usage_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_usage()).count()
    }

    /// Number of usage nodes linked to a declaration.
    pub fn resolved_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.is_usage() && n.is_resolved())
            .count()
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    pub(crate) fn push(&mut self, node: SymbolNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(|n| n.parent), move |&current| {
            self.node(current).and_then(|n| n.parent)
        })
    }

    pub fn is_inside(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Nearest strict ancestor that opens a scope.
    pub fn enclosing_scope(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&a| self.node(a).is_some_and(|n| n.kind().is_scope()))
    }

    pub fn enclosing_contract(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| {
            self.node(a)
                .is_some_and(|n| n.kind() == NodeKind::ContractDefinition)
        })
    }

    /// Declarations directly owned by `scope`, looking through holders.
    pub fn members(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_members(scope, &mut out);
        out
    }

    fn collect_members(&self, scope: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(scope) else {
            return;
        };
        for &child in &node.children {
            let Some(child_node) = self.node(child) else {
                continue;
            };
            if child_node.kind().is_declaration_holder() {
                self.collect_members(child, out);
            } else if child_node.is_declaration() {
                out.push(child);
            }
        }
    }

    /// Top-level declarations visible to importing files.
    pub fn exported_declarations(&self) -> Vec<NodeId> {
        self.members(self.root)
            .into_iter()
            .filter(|&id| {
                self.node(id)
                    .is_some_and(|n| n.kind() != NodeKind::ImportDirective)
            })
            .collect()
    }

    /// Import directives in source order.
    pub fn imports(&self) -> Vec<NodeId> {
        self.node(self.root)
            .map(|root| {
                root.children
                    .iter()
                    .copied()
                    .filter(|&c| {
                        self.node(c)
                            .is_some_and(|n| n.kind() == NodeKind::ImportDirective)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------

    /// Link a usage of this tree to its declaration and take it out of the
    /// pending pool. The declaration side is updated with
    /// [`add_reference`](Self::add_reference).
    pub(crate) fn link(&mut self, usage: NodeId, declaration: NodeRef) {
        if let Some(node) = self.node_mut(usage) {
            node.resolved_declaration = Some(declaration);
            node.declared_type.push(declaration);
        }
        self.pending.shift_remove(&usage);
        trace!(file = ?self.file, ?usage, ?declaration, "linked usage");
    }

    pub(crate) fn add_reference(&mut self, declaration: NodeId, usage: NodeRef) {
        if let Some(node) = self.node_mut(declaration) {
            if !node.references.contains(&usage) {
                node.references.push(usage);
            }
        }
    }

    /// Link a usage resolved against other files. Such links are undone
    /// together by [`unlink_external`](Self::unlink_external).
    pub(crate) fn link_external(&mut self, usage: NodeId, declaration: NodeRef) {
        self.link(usage, declaration);
        self.external.insert(usage);
    }

    /// Return every externally linked usage to the pending pool, keeping
    /// the pool in source order. Returns how many usages were unlinked.
    pub(crate) fn unlink_external(&mut self) -> usize {
        let external = std::mem::take(&mut self.external);
        for &usage in &external {
            if let Some(node) = self.node_mut(usage) {
                if let Some(declaration) = node.resolved_declaration.take() {
                    node.declared_type.retain(|&t| t != declaration);
                }
            }
            self.pending.insert(usage);
        }
        self.pending.sort_unstable();
        external.len()
    }

    /// Drop back links held for usages in `file`.
    pub(crate) fn drop_references_from(&mut self, file: FileId) -> usize {
        let mut dropped = 0;
        for node in &mut self.nodes {
            let before = node.references.len();
            node.references.retain(|r| r.file != file);
            dropped += before - node.references.len();
        }
        dropped
    }

    /// Files this tree's usages currently link into, other than itself.
    pub fn linked_files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = self
            .nodes
            .iter()
            .filter_map(|n| n.resolved_declaration)
            .map(|d| d.file)
            .filter(|&f| f != self.file)
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }
}

impl NodeLookup for FileSymbolTree {
    fn lookup(&self, node: NodeRef) -> Option<&SymbolNode> {
        if self.owns(node) {
            self.nodes.get(node.node.index())
        } else {
            None
        }
    }
}
