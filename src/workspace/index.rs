//! The workspace index: installed trees plus the cross-file link graph.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::base::{FileId, FileSet, LineIndex};
use crate::error::{AnalysisError, Result};
use crate::hir::{FileSymbolTree, TreeBuilder};
use crate::parser::{SyntaxError, parse};

use super::config::{Remapping, WorkspaceConfig};
use super::linker::link_file;
use super::snapshot::Snapshot;

/// What happened to a build handed to [`Workspace::install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    Installed { file: FileId, generation: u64 },
    /// A newer build of the same file was requested first; this one was
    /// dropped.
    Stale { file: FileId, generation: u64 },
}

impl IndexOutcome {
    pub fn file(&self) -> FileId {
        match *self {
            Self::Installed { file, .. } | Self::Stale { file, .. } => file,
        }
    }

    pub fn generation(&self) -> u64 {
        match *self {
            Self::Installed { generation, .. } | Self::Stale { generation, .. } => generation,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

/// A built, not yet installed tree.
#[derive(Debug)]
pub struct PreparedFile {
    file: FileId,
    path: String,
    generation: u64,
    tree: FileSymbolTree,
    errors: Vec<SyntaxError>,
}

impl PreparedFile {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn tree(&self) -> &FileSymbolTree {
        &self.tree
    }
}

/// Forward and reverse cross-file link sets.
#[derive(Debug, Default)]
struct LinkGraph {
    /// Files a file's usages link into.
    links_out: FxHashMap<FileId, FxHashSet<FileId>>,
    /// Files whose usages link into a file.
    reverse_deps: FxHashMap<FileId, FxHashSet<FileId>>,
}

impl LinkGraph {
    /// Files whose usages link into `file`, sorted, forgetting the reverse
    /// set.
    fn take_dependents(&mut self, file: FileId) -> Vec<FileId> {
        let mut dependents: Vec<FileId> = self
            .reverse_deps
            .remove(&file)
            .unwrap_or_default()
            .into_iter()
            .filter(|&d| d != file)
            .collect();
        dependents.sort_unstable();
        dependents
    }

    /// Undo every cross-file link `file` holds: its usages go back to the
    /// pending pool and the back links they left elsewhere are dropped.
    fn detach(&mut self, next: &mut Snapshot, file: FileId) -> (usize, usize) {
        let unlinked = next.tree_mut(file).map_or(0, FileSymbolTree::unlink_external);
        let mut dropped = 0;
        for target in self.links_out.remove(&file).unwrap_or_default() {
            if let Some(sources) = self.reverse_deps.get_mut(&target) {
                sources.remove(&file);
            }
            if let Some(tree) = next.tree_mut(target) {
                dropped += tree.drop_references_from(file);
            }
        }
        (unlinked, dropped)
    }

    /// Recompute the link sets of `files` from their current trees.
    fn record(&mut self, snapshot: &Snapshot, files: &[FileId]) {
        for &file in files {
            for target in self.links_out.remove(&file).unwrap_or_default() {
                if let Some(sources) = self.reverse_deps.get_mut(&target) {
                    sources.remove(&file);
                }
            }
            let Some(tree) = snapshot.tree(file) else {
                continue;
            };
            let targets: FxHashSet<FileId> = tree.linked_files().into_iter().collect();
            for &target in &targets {
                self.reverse_deps.entry(target).or_default().insert(file);
            }
            if !targets.is_empty() {
                self.links_out.insert(file, targets);
            }
        }
    }
}

/// The cross-file index.
///
/// Building a tree ([`prepare`](Self::prepare)) needs no lock and may run
/// for many files in parallel. Installing one ([`install`](Self::install))
/// takes the link lock for invalidation, re-linking and the snapshot swap,
/// so installs are applied one at a time and readers only ever see whole
/// snapshots.
pub struct Workspace {
    config: WorkspaceConfig,
    next_generation: AtomicU64,
    files: Mutex<FileSet>,
    /// Latest generation requested per file.
    requested: Mutex<FxHashMap<FileId, u64>>,
    links: Mutex<LinkGraph>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl Workspace {
    pub fn new(config: WorkspaceConfig) -> Self {
        let snapshot = Snapshot::new(config.remappings.clone());
        Self {
            config,
            next_generation: AtomicU64::new(1),
            files: Mutex::new(FileSet::new()),
            requested: Mutex::new(FxHashMap::default()),
            links: Mutex::new(LinkGraph::default()),
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// The current snapshot. Cheap; later installs do not affect it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.lock().file_id(path)
    }

    /// Parse, build and install one file.
    pub fn index_file(&self, path: &str, text: &str) -> Result<IndexOutcome> {
        let prepared = self.prepare(path, text);
        self.install(prepared)
    }

    /// Index a batch: trees are built in parallel, then installed in input
    /// order. One result per input.
    pub fn index_files(&self, batch: &[(String, String)]) -> Vec<Result<IndexOutcome>> {
        let tickets: Vec<(FileId, String, u64)> =
            batch.iter().map(|(path, _)| self.reserve(path)).collect();
        let prepared: Vec<PreparedFile> = batch
            .par_iter()
            .zip(tickets.into_par_iter())
            .map(|((_, text), (file, path, generation))| self.build(file, path, generation, text))
            .collect();
        prepared.into_iter().map(|p| self.install(p)).collect()
    }

    /// Build a tree for `path` under a fresh generation without installing
    /// it. Any earlier, not yet installed build of the same file becomes
    /// stale.
    pub fn prepare(&self, path: &str, text: &str) -> PreparedFile {
        let (file, path, generation) = self.reserve(path);
        self.build(file, path, generation, text)
    }

    /// Install a prepared tree, unless a newer build of its file was
    /// requested in the meantime.
    ///
    /// A file with syntax errors is left absent and reported as
    /// [`AnalysisError::Syntax`], unless the workspace tolerates them.
    pub fn install(&self, prepared: PreparedFile) -> Result<IndexOutcome> {
        let PreparedFile {
            file,
            path,
            generation,
            tree,
            errors,
        } = prepared;

        let mut graph = self.links.lock();
        if self.requested.lock().get(&file) != Some(&generation) {
            debug!(%path, generation, "discarding stale build");
            return Ok(IndexOutcome::Stale { file, generation });
        }

        let keep = errors.is_empty() || self.config.tolerate_syntax_errors;
        if !errors.is_empty() {
            debug!(%path, errors = errors.len(), keep, "file has syntax errors");
        }
        self.replace(&mut graph, file, keep.then_some(tree));

        if keep {
            Ok(IndexOutcome::Installed { file, generation })
        } else {
            Err(AnalysisError::Syntax { path, errors })
        }
    }

    /// Drop a file's tree and every link into it.
    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file = self
            .file_id(path)
            .ok_or_else(|| AnalysisError::UnknownFile(path.to_string()))?;
        let mut graph = self.links.lock();
        self.request(file);
        self.replace(&mut graph, file, None);
        Ok(())
    }

    /// Add remappings for imports linked from now on.
    pub fn add_remappings(&self, remappings: impl IntoIterator<Item = Remapping>) {
        let _graph = self.links.lock();
        let mut next = Snapshot::clone(&self.snapshot.read());
        let mut all = next.remappings().to_vec();
        all.extend(remappings);
        next.set_remappings(all);
        *self.snapshot.write() = Arc::new(next);
    }

    fn reserve(&self, path: &str) -> (FileId, String, u64) {
        let (file, normalized) = {
            let mut files = self.files.lock();
            let file = files.intern(path);
            let normalized = files.path(file).unwrap_or(path).to_string();
            (file, normalized)
        };
        let generation = self.request(file);
        (file, normalized, generation)
    }

    /// Hand out the next generation for `file` and record it as the latest
    /// requested, atomically with respect to other requests.
    fn request(&self, file: FileId) -> u64 {
        let mut requested = self.requested.lock();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        requested.insert(file, generation);
        generation
    }

    fn build(&self, file: FileId, path: String, generation: u64, text: &str) -> PreparedFile {
        let parse = parse(text);
        let line_index = LineIndex::new(text);
        let tree = TreeBuilder::new(file, generation, &line_index)
            .with_max_inheritance_depth(self.config.max_inheritance_depth)
            .build(&parse.syntax());
        PreparedFile {
            file,
            path,
            generation,
            tree,
            errors: parse.errors,
        }
    }

    /// Swap `file`'s tree (or its absence) into a new snapshot. Caller holds
    /// the link lock.
    ///
    /// Any file that imports `file`, directly or not, or links into it may
    /// hold links resolved through the old tree, e.g. a member inherited via
    /// one of its contracts. All of their cross-file links are redone.
    fn replace(&self, graph: &mut LinkGraph, file: FileId, tree: Option<FileSymbolTree>) {
        let mut next = Snapshot::clone(&self.snapshot.read());
        next.set_files(self.files.lock().clone());

        let dependents = graph.take_dependents(file);
        match tree {
            Some(tree) => next.insert_tree(tree),
            None => {
                next.remove_tree(file);
            }
        }
        let (_, dropped) = graph.detach(&mut next, file);

        let mut relink = next.importers_of(file);
        for dependent in dependents {
            if !relink.contains(&dependent) {
                relink.push(dependent);
            }
        }
        relink.retain(|&other| other != file);

        let mut unlinked = 0;
        for &other in &relink {
            unlinked += graph.detach(&mut next, other).0;
        }
        debug!(
            ?file,
            relink = relink.len(),
            unlinked,
            dropped,
            "invalidated links through replaced tree"
        );

        let depth = self.config.max_inheritance_depth;
        link_file(&mut next, file, depth);
        for &other in &relink {
            link_file(&mut next, other, depth);
        }

        relink.push(file);
        graph.record(&next, &relink);
        *self.snapshot.write() = Arc::new(next);
    }
}
