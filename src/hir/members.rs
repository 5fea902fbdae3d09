//! Member lookup: inheritance linearization, `X.member` resolution, and
//! qualified type paths.
//!
//! Everything here is generic over [`NodeLookup`], so the same rules run
//! inside the tree builder (one file, local links only) and inside the
//! workspace linker (all installed files).

use tracing::warn;

use super::kind::NodeKind;
use super::node::{NodeData, NodeRef, SymbolNode};
use crate::parser::{ContractKind, FunctionKind};

/// Read access to nodes by handle.
pub trait NodeLookup {
    /// The node behind `node`, if its tree generation is still live.
    fn lookup(&self, node: NodeRef) -> Option<&SymbolNode>;

    /// Resolve `name` in the file imported by a unit-alias import
    /// (`import "x" as U;` → `U.name`).
    fn import_member(&self, _import: NodeRef, _name: &str) -> Option<NodeRef> {
        None
    }
}

fn children<L: NodeLookup + ?Sized>(db: &L, node: NodeRef) -> Vec<NodeRef> {
    db.lookup(node)
        .map(|n| n.children.iter().map(|&c| node.with_node(c)).collect())
        .unwrap_or_default()
}

fn first_child<L: NodeLookup + ?Sized>(db: &L, node: NodeRef) -> Option<NodeRef> {
    let child = *db.lookup(node)?.children.first()?;
    Some(node.with_node(child))
}

fn kind_of<L: NodeLookup + ?Sized>(db: &L, node: NodeRef) -> Option<NodeKind> {
    db.lookup(node).map(SymbolNode::kind)
}

/// Nearest strict ancestor of the given kind.
pub fn enclosing<L: NodeLookup + ?Sized>(db: &L, node: NodeRef, kind: NodeKind) -> Option<NodeRef> {
    let mut current = db.lookup(node)?.parent;
    while let Some(id) = current {
        let ancestor = node.with_node(id);
        let ancestor_node = db.lookup(ancestor)?;
        if ancestor_node.kind() == kind {
            return Some(ancestor);
        }
        current = ancestor_node.parent;
    }
    None
}

/// Declarations owned by `scope`, looking through declaration holders.
pub fn members<L: NodeLookup + ?Sized>(db: &L, scope: NodeRef) -> Vec<NodeRef> {
    let mut out = Vec::new();
    for child in children(db, scope) {
        let Some(node) = db.lookup(child) else {
            continue;
        };
        if node.kind().is_declaration_holder() {
            out.extend(members(db, child));
        } else if node.is_declaration() {
            out.push(child);
        }
    }
    out
}

/// Resolved base contracts of `contract`, in the order they are written.
pub fn inheritance_bases<L: NodeLookup + ?Sized>(db: &L, contract: NodeRef) -> Vec<NodeRef> {
    children(db, contract)
        .into_iter()
        .filter(|&c| kind_of(db, c) == Some(NodeKind::InheritanceSpecifier))
        .filter_map(|spec| first_child(db, spec))
        .filter_map(|name| db.lookup(name)?.resolved_declaration)
        .filter(|&base| kind_of(db, base) == Some(NodeKind::ContractDefinition))
        .collect()
}

/// C3 linearization of `contract`, most derived first (the contract itself
/// leads the list).
///
/// Cycles and hierarchies deeper than `max_depth` are cut off with a
/// warning; an inconsistent hierarchy falls back to declaration order.
pub fn linearize<L: NodeLookup + ?Sized>(
    db: &L,
    contract: NodeRef,
    max_depth: usize,
) -> Vec<NodeRef> {
    let mut stack = Vec::new();
    linearize_inner(db, contract, 0, max_depth, &mut stack)
}

fn linearize_inner<L: NodeLookup + ?Sized>(
    db: &L,
    contract: NodeRef,
    depth: usize,
    max_depth: usize,
    stack: &mut Vec<NodeRef>,
) -> Vec<NodeRef> {
    if stack.contains(&contract) {
        warn!(?contract, "cyclic inheritance, cutting off linearization");
        return vec![contract];
    }
    if depth >= max_depth {
        warn!(?contract, max_depth, "inheritance too deep, cutting off linearization");
        return vec![contract];
    }

    stack.push(contract);
    // Bases are written most-base-like first; linearization reads them
    // right to left.
    let bases: Vec<NodeRef> = inheritance_bases(db, contract).into_iter().rev().collect();
    let mut sequences: Vec<Vec<NodeRef>> = bases
        .iter()
        .map(|&base| linearize_inner(db, base, depth + 1, max_depth, stack))
        .collect();
    sequences.push(bases);
    stack.pop();

    let mut out = vec![contract];
    merge(&mut sequences, &mut out);
    out
}

fn merge(sequences: &mut Vec<Vec<NodeRef>>, out: &mut Vec<NodeRef>) {
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return;
        }
        let head = sequences
            .iter()
            .map(|s| s[0])
            .find(|h| !sequences.iter().any(|s| s[1..].contains(h)));

        let Some(head) = head else {
            for sequence in sequences.drain(..) {
                for contract in sequence {
                    if !out.contains(&contract) {
                        out.push(contract);
                    }
                }
            }
            return;
        };

        if !out.contains(&head) {
            out.push(head);
        }
        for sequence in sequences.iter_mut() {
            if sequence.first() == Some(&head) {
                sequence.remove(0);
            }
        }
    }
}

/// First member of an inherited contract that may claim `usage`.
///
/// Walks the linearized bases of `contract`, skipping the contract itself.
pub fn find_inherited<L: NodeLookup + ?Sized>(
    db: &L,
    contract: NodeRef,
    usage: &SymbolNode,
    max_depth: usize,
) -> Option<NodeRef> {
    linearize(db, contract, max_depth)
        .into_iter()
        .skip(1)
        .find_map(|base| {
            members(db, base)
                .into_iter()
                .find(|&m| db.lookup(m).is_some_and(|decl| decl.accepts(usage)))
        })
}

/// Named member of a container declaration.
pub fn find_member<L: NodeLookup + ?Sized>(
    db: &L,
    container: NodeRef,
    name: &str,
    max_depth: usize,
) -> Option<NodeRef> {
    let named = |candidate: &NodeRef| db.lookup(*candidate).and_then(|n| n.name()) == Some(name);
    match kind_of(db, container)? {
        NodeKind::StructDefinition | NodeKind::EnumDefinition => {
            children(db, container).into_iter().find(named)
        }
        NodeKind::ContractDefinition => linearize(db, container, max_depth)
            .into_iter()
            .find_map(|c| members(db, c).into_iter().find(named)),
        NodeKind::ImportDirective => db.import_member(container, name),
        _ => None,
    }
}

/// The declaration whose members `X.` reaches when `X` resolves to `decl`.
pub fn declaration_container<L: NodeLookup + ?Sized>(db: &L, decl: NodeRef) -> Option<NodeRef> {
    let node = db.lookup(decl)?;
    match node.kind() {
        kind if kind.is_member_container() => Some(decl),
        NodeKind::VariableDeclaration => type_name_container(db, first_child(db, decl)?),
        _ => None,
    }
}

/// The container declaration a type name refers to.
pub fn type_name_container<L: NodeLookup + ?Sized>(db: &L, type_name: NodeRef) -> Option<NodeRef> {
    let node = db.lookup(type_name)?;
    if node.kind() != NodeKind::UserDefinedTypeName {
        return None;
    }
    let decl = node.resolved_declaration?;
    kind_of(db, decl)
        .is_some_and(NodeKind::is_member_container)
        .then_some(decl)
}

/// The type name node describing the value of `expr`, when one is written
/// down somewhere.
pub fn expression_type_name<L: NodeLookup + ?Sized>(db: &L, expr: NodeRef) -> Option<NodeRef> {
    let node = db.lookup(expr)?;
    match node.kind() {
        NodeKind::Identifier | NodeKind::MemberAccess => {
            let decl = node.resolved_declaration?;
            match kind_of(db, decl)? {
                NodeKind::VariableDeclaration => first_child(db, decl),
                _ => None,
            }
        }
        NodeKind::IndexAccess => {
            let base_type = expression_type_name(db, first_child(db, expr)?)?;
            match kind_of(db, base_type)? {
                NodeKind::Mapping => children(db, base_type).get(1).copied(),
                NodeKind::ArrayTypeName => first_child(db, base_type),
                _ => None,
            }
        }
        NodeKind::FunctionCall => {
            let callee = unwrap_call_options(db, first_child(db, expr)?)?;
            match kind_of(db, callee)? {
                NodeKind::NewExpression => first_child(db, callee),
                _ => {
                    let decl = db.lookup(callee)?.resolved_declaration?;
                    first_return_type(db, decl)
                }
            }
        }
        NodeKind::TupleExpression => {
            single_element(db, expr).and_then(|e| expression_type_name(db, e))
        }
        _ => None,
    }
}

/// The declaration whose members `expr.` reaches.
pub fn member_container<L: NodeLookup + ?Sized>(db: &L, expr: NodeRef) -> Option<NodeRef> {
    let node = db.lookup(expr)?;
    match node.kind() {
        NodeKind::Identifier if node.name() == Some("this") => {
            enclosing(db, expr, NodeKind::ContractDefinition)
        }
        NodeKind::Identifier | NodeKind::MemberAccess => {
            declaration_container(db, node.resolved_declaration?)
        }
        NodeKind::FunctionCall => {
            let callee = unwrap_call_options(db, first_child(db, expr)?)?;
            let callee_decl = db.lookup(callee).and_then(|c| c.resolved_declaration);
            match callee_decl.and_then(|d| kind_of(db, d)) {
                // `Token(addr).` and `S(..).`
                Some(NodeKind::ContractDefinition | NodeKind::StructDefinition) => callee_decl,
                _ => type_name_container(db, expression_type_name(db, expr)?),
            }
        }
        NodeKind::IndexAccess => type_name_container(db, expression_type_name(db, expr)?),
        NodeKind::TupleExpression => member_container(db, single_element(db, expr)?),
        _ => None,
    }
}

fn unwrap_call_options<L: NodeLookup + ?Sized>(db: &L, callee: NodeRef) -> Option<NodeRef> {
    if kind_of(db, callee)? == NodeKind::NameValueExpression {
        first_child(db, callee)
    } else {
        Some(callee)
    }
}

fn single_element<L: NodeLookup + ?Sized>(db: &L, tuple: NodeRef) -> Option<NodeRef> {
    match children(db, tuple).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn first_return_type<L: NodeLookup + ?Sized>(db: &L, function: NodeRef) -> Option<NodeRef> {
    if kind_of(db, function)? != NodeKind::FunctionDefinition {
        return None;
    }
    let returns = children(db, function)
        .into_iter()
        .find(|&c| kind_of(db, c) == Some(NodeKind::ReturnParameters))?;
    let list = first_child(db, returns)?;
    let first = first_child(db, list)?;
    first_child(db, first)
}

/// Resolve a `MemberAccess` once its base expression is understood.
///
/// `super.f` searches the bases of the enclosing contract; everything else
/// goes through [`member_container`]. Functions attached with
/// `using L for T` are tried last.
pub fn resolve_member_access<L: NodeLookup + ?Sized>(
    db: &L,
    access: NodeRef,
    max_depth: usize,
) -> Option<NodeRef> {
    let node = db.lookup(access)?;
    if node.kind() != NodeKind::MemberAccess {
        return None;
    }
    let name = node.name()?;
    let base = first_child(db, access)?;
    let base_node = db.lookup(base)?;

    if base_node.kind() == NodeKind::Identifier && base_node.name() == Some("super") {
        let contract = enclosing(db, access, NodeKind::ContractDefinition)?;
        return linearize(db, contract, max_depth)
            .into_iter()
            .skip(1)
            .find_map(|c| {
                members(db, c)
                    .into_iter()
                    .find(|&m| db.lookup(m).and_then(|n| n.name()) == Some(name))
            });
    }

    if let Some(container) = member_container(db, base) {
        if let Some(found) = find_member(db, container, name, max_depth) {
            return Some(found);
        }
    }

    using_for_member(db, access, name, max_depth)
}

fn using_for_member<L: NodeLookup + ?Sized>(
    db: &L,
    access: NodeRef,
    name: &str,
    max_depth: usize,
) -> Option<NodeRef> {
    let mut scopes = Vec::new();
    if let Some(contract) = enclosing(db, access, NodeKind::ContractDefinition) {
        scopes.push(contract);
    }
    if let Some(unit) = enclosing(db, access, NodeKind::SourceUnit) {
        scopes.push(unit);
    }

    scopes
        .into_iter()
        .flat_map(|scope| children(db, scope))
        .filter(|&c| kind_of(db, c) == Some(NodeKind::UsingForDeclaration))
        .flat_map(|using| children(db, using))
        .filter_map(|type_name| db.lookup(type_name)?.resolved_declaration)
        .filter(|&decl| {
            matches!(
                db.lookup(decl).map(|n| &n.data),
                Some(NodeData::ContractDefinition {
                    kind: ContractKind::Library,
                    ..
                })
            )
        })
        .find_map(|library| find_member(db, library, name, max_depth))
}

/// Follow the remaining segments of a dotted type path from the
/// declaration its first segment resolved to.
pub fn resolve_path<L: NodeLookup + ?Sized>(
    db: &L,
    first: NodeRef,
    rest: &[&str],
    max_depth: usize,
) -> Option<NodeRef> {
    let mut current = first;
    for segment in rest {
        let container = declaration_container(db, current)?;
        current = find_member(db, container, segment, max_depth)?;
    }
    Some(current)
}

/// Where a claim by `decl` should point for `usage`.
///
/// A modifier invocation naming a contract is a base constructor call; it
/// points at that contract's constructor when one is declared.
pub fn claim_target<L: NodeLookup + ?Sized>(db: &L, usage: &SymbolNode, decl: NodeRef) -> NodeRef {
    if usage.kind() != NodeKind::ModifierInvocation
        || kind_of(db, decl) != Some(NodeKind::ContractDefinition)
    {
        return decl;
    }
    constructor_of(db, decl).unwrap_or(decl)
}

pub fn constructor_of<L: NodeLookup + ?Sized>(db: &L, contract: NodeRef) -> Option<NodeRef> {
    children(db, contract).into_iter().find(|&c| {
        matches!(
            db.lookup(c).map(|n| &n.data),
            Some(NodeData::FunctionDefinition {
                kind: FunctionKind::Constructor,
                ..
            })
        )
    })
}
