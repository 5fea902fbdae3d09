//! Immutable view of the installed trees.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{FileId, FileSet};
use crate::hir::{FileSymbolTree, NodeData, NodeId, NodeKind, NodeLookup, NodeRef, SymbolNode};

use super::config::Remapping;
use super::imports::{candidate_path, import_matches, resolve_import};

/// A consistent set of installed trees.
///
/// Queries run against a snapshot and never observe a half-installed
/// tree: the workspace builds the next snapshot on the side and swaps it
/// in whole. Trees are shared between snapshots until one is modified.
#[derive(Debug, Clone)]
pub struct Snapshot {
    files: FileSet,
    trees: FxHashMap<FileId, Arc<FileSymbolTree>>,
    /// Installed files each installed file imports directly, in source
    /// order.
    import_edges: FxHashMap<FileId, Arc<[FileId]>>,
    remappings: Arc<[Remapping]>,
}

impl Snapshot {
    pub(crate) fn new(remappings: Vec<Remapping>) -> Self {
        Self {
            files: FileSet::new(),
            trees: FxHashMap::default(),
            import_edges: FxHashMap::default(),
            remappings: remappings.into(),
        }
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.file_id(path)
    }

    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.path(file)
    }

    pub fn tree(&self, file: FileId) -> Option<&FileSymbolTree> {
        self.trees.get(&file).map(Arc::as_ref)
    }

    /// Installed trees, in no particular order.
    pub fn trees(&self) -> impl Iterator<Item = &FileSymbolTree> + '_ {
        self.trees.values().map(Arc::as_ref)
    }

    pub fn file_count(&self) -> usize {
        self.trees.len()
    }

    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    /// The node behind `node`, or `None` when its tree generation is gone.
    pub fn node(&self, node: NodeRef) -> Option<&SymbolNode> {
        self.tree(node.file)?.lookup(node)
    }

    /// File an import directive of `file` resolves to, if it is installed.
    pub fn import_target(&self, file: FileId, import: NodeId) -> Option<FileId> {
        let tree = self.tree(file)?;
        let NodeData::ImportDirective { path, .. } = &tree.node(import)?.data else {
            return None;
        };
        let importer = self.path(file)?;
        resolve_import(&self.files, &self.remappings, importer, path, |f| {
            self.trees.contains_key(&f)
        })
    }

    /// Files `file` imports directly, in source order.
    pub fn imported_files(&self, file: FileId) -> Vec<FileId> {
        self.import_edges
            .get(&file)
            .map(|edges| edges.to_vec())
            .unwrap_or_default()
    }

    /// Files that import `file`, directly or through other imports, nearest
    /// first.
    pub fn importers_of(&self, file: FileId) -> Vec<FileId> {
        let mut direct: FxHashMap<FileId, Vec<FileId>> = FxHashMap::default();
        let mut sources: Vec<FileId> = self.import_edges.keys().copied().collect();
        sources.sort_unstable();
        for source in sources {
            for &target in self.import_edges[&source].iter() {
                direct.entry(target).or_default().push(source);
            }
        }

        let mut seen = FxHashSet::default();
        seen.insert(file);
        let mut order = Vec::new();
        let mut frontier = vec![file];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for current in frontier {
                for &importer in direct.get(&current).into_iter().flatten() {
                    if seen.insert(importer) {
                        order.push(importer);
                        next.push(importer);
                    }
                }
            }
            frontier = next;
        }
        order
    }

    /// Declaration named `name` that `file` offers to its importers: its own
    /// top-level declarations first, then whatever it imports.
    pub fn exported(
        &self,
        file: FileId,
        name: &str,
        accept: &dyn Fn(&SymbolNode) -> bool,
        visited: &mut FxHashSet<FileId>,
    ) -> Option<NodeRef> {
        if !visited.insert(file) {
            return None;
        }
        let tree = self.tree(file)?;
        let own = tree.exported_declarations().into_iter().find(|&id| {
            tree.node(id)
                .is_some_and(|decl| decl.name() == Some(name) && accept(decl))
        });
        match own {
            Some(id) => Some(tree.node_ref(id)),
            None => self.imported(file, name, accept, visited),
        }
    }

    /// Declaration named `name` that reaches `file` through its imports,
    /// first match in import order.
    ///
    /// Symbol imports match by local name (the alias when there is one).
    /// Unit aliases bind the import directive itself. Plain imports bring
    /// in everything the imported file exports, transitively.
    pub fn imported(
        &self,
        file: FileId,
        name: &str,
        accept: &dyn Fn(&SymbolNode) -> bool,
        visited: &mut FxHashSet<FileId>,
    ) -> Option<NodeRef> {
        let tree = self.tree(file)?;
        for import in tree.imports() {
            let Some(directive) = tree.node(import) else {
                continue;
            };
            let NodeData::ImportDirective { unit_alias, .. } = &directive.data else {
                continue;
            };

            let symbols: Vec<NodeId> = directive
                .children
                .iter()
                .copied()
                .filter(|&c| tree.node(c).is_some_and(|n| n.kind() == NodeKind::ImportSymbol))
                .collect();
            if !symbols.is_empty() {
                let found = symbols
                    .into_iter()
                    .filter_map(|s| tree.node(s).map(|node| (s, node)))
                    .filter(|(_, symbol)| symbol.local_name() == Some(name))
                    .find_map(|(s, symbol)| {
                        let decl = symbol
                            .resolved_declaration
                            .or_else(|| self.import_symbol_target(file, import, s))?;
                        self.node(decl).filter(|&d| accept(d)).map(|_| decl)
                    });
                if found.is_some() {
                    return found;
                }
                continue;
            }

            if let Some(alias) = unit_alias {
                if alias == name && accept(directive) {
                    return Some(tree.node_ref(import));
                }
                continue;
            }

            let Some(target) = self.import_target(file, import) else {
                continue;
            };
            if let Some(found) = self.exported(target, name, accept, visited) {
                return Some(found);
            }
        }
        None
    }

    /// The declaration an `import {X} from "..."` symbol names.
    pub fn import_symbol_target(
        &self,
        file: FileId,
        import: NodeId,
        symbol: NodeId,
    ) -> Option<NodeRef> {
        let name = self.tree(file)?.node(symbol)?.name()?;
        let target = self.import_target(file, import)?;
        self.exported(target, name, &|_| true, &mut FxHashSet::default())
    }

    pub(crate) fn set_files(&mut self, files: FileSet) {
        self.files = files;
    }

    pub(crate) fn set_remappings(&mut self, remappings: Vec<Remapping>) {
        self.remappings = remappings.into();
        let files: Vec<FileId> = self.trees.keys().copied().collect();
        for file in files {
            self.update_import_edges(file);
        }
    }

    pub(crate) fn insert_tree(&mut self, tree: FileSymbolTree) {
        let file = tree.file();
        self.trees.insert(file, Arc::new(tree));
        self.refresh_import_edges(file);
    }

    pub(crate) fn remove_tree(&mut self, file: FileId) -> Option<Arc<FileSymbolTree>> {
        let removed = self.trees.remove(&file);
        self.refresh_import_edges(file);
        removed
    }

    /// Update cached import edges after `file`'s tree changed: its own, and
    /// those of files with an import that could resolve to its path.
    fn refresh_import_edges(&mut self, file: FileId) {
        let affected: Vec<FileId> = match self.path(file) {
            Some(path) => self
                .trees
                .keys()
                .copied()
                .filter(|&other| other != file && self.may_import(other, path))
                .collect(),
            None => Vec::new(),
        };
        self.update_import_edges(file);
        for other in affected {
            self.update_import_edges(other);
        }
    }

    /// Whether any import of `file` names a path `path` would satisfy.
    fn may_import(&self, file: FileId, path: &str) -> bool {
        let (Some(tree), Some(importer)) = (self.tree(file), self.path(file)) else {
            return false;
        };
        tree.imports().into_iter().any(|import| {
            let Some(NodeData::ImportDirective { path: import_path, .. }) =
                tree.node(import).map(|n| &n.data)
            else {
                return false;
            };
            let candidate = candidate_path(&self.remappings, importer, import_path);
            import_matches(&candidate, path)
        })
    }

    fn update_import_edges(&mut self, file: FileId) {
        let edges: Option<Arc<[FileId]>> = self.tree(file).map(|tree| {
            tree.imports()
                .into_iter()
                .filter_map(|import| self.import_target(file, import))
                .collect()
        });
        match edges {
            Some(edges) => {
                self.import_edges.insert(file, edges);
            }
            None => {
                self.import_edges.remove(&file);
            }
        }
    }

    /// Copy-on-write access to an installed tree.
    pub(crate) fn tree_mut(&mut self, file: FileId) -> Option<&mut FileSymbolTree> {
        self.trees.get_mut(&file).map(Arc::make_mut)
    }
}

impl NodeLookup for Snapshot {
    fn lookup(&self, node: NodeRef) -> Option<&SymbolNode> {
        self.node(node)
    }

    fn import_member(&self, import: NodeRef, name: &str) -> Option<NodeRef> {
        self.node(import)?;
        let target = self.import_target(import.file, import.node)?;
        self.exported(target, name, &|_| true, &mut FxHashSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineIndex;
    use crate::hir::build_tree;
    use crate::parser::parse;

    fn insert(snapshot: &mut Snapshot, files: &mut FileSet, path: &str, text: &str) -> FileId {
        let file = files.intern(path);
        snapshot.set_files(files.clone());
        let parse = parse(text);
        snapshot.insert_tree(build_tree(&parse.syntax(), file, 1, &LineIndex::new(text)));
        file
    }

    #[test]
    fn test_import_edges_follow_installs() {
        let mut snapshot = Snapshot::new(Vec::new());
        let mut files = FileSet::new();
        let c = insert(&mut snapshot, &mut files, "src/C.sol", "import \"./B.sol\";");
        let b = insert(&mut snapshot, &mut files, "src/B.sol", "import \"lib/A.sol\";");
        assert_eq!(snapshot.imported_files(c), vec![b]);
        assert!(snapshot.imported_files(b).is_empty());

        // arrives later and satisfies B's import by suffix
        let a = insert(&mut snapshot, &mut files, "deps/lib/A.sol", "contract A {}");
        assert_eq!(snapshot.imported_files(b), vec![a]);
        assert_eq!(snapshot.importers_of(a), vec![b, c]);

        snapshot.remove_tree(b);
        assert_eq!(snapshot.imported_files(c), Vec::<FileId>::new());
        assert!(snapshot.importers_of(a).is_empty());
    }
}
