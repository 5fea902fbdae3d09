//! AnalysisHost and Analysis: state ownership for IDE features.
//!
//! The `AnalysisHost` owns the workspace and applies edits; `Analysis` is
//! an immutable snapshot every query runs against, so several queries see
//! the same state even while the host keeps indexing.
//!
//! ## Usage
//!
//! ```
//! use solstice::Position;
//! use solstice::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("A.sol", "contract A { uint x; function f() public { x; } }")
//!     .expect("no syntax errors");
//!
//! let analysis = host.analysis();
//! let file = analysis.file_id("A.sol").expect("indexed");
//! let target = analysis.resolve_hover_target(file, Position::new(0, 43));
//! assert!(target.is_some());
//! ```

use std::sync::Arc;

use crate::base::{FileId, Position};
use crate::error::Result;
use crate::hir::{FileSymbolTree, NodeRef, SymbolNode};
use crate::workspace::{IndexOutcome, Snapshot, Workspace, WorkspaceConfig};

use super::{GotoResult, HoverResult, Location, ReferenceResult};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
#[derive(Default)]
pub struct AnalysisHost {
    workspace: Workspace,
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorkspaceConfig) -> Self {
        Self {
            workspace: Workspace::new(config),
        }
    }

    /// Set the content of a file and re-link everything it affects.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Result<IndexOutcome> {
        self.workspace.index_file(path, content)
    }

    pub fn remove_file(&mut self, path: &str) -> Result<()> {
        self.workspace.remove_file(path)
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            snapshot: self.workspace.snapshot(),
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
#[derive(Clone)]
pub struct Analysis {
    snapshot: Arc<Snapshot>,
}

impl Analysis {
    // ==================== Feature boundary ====================

    /// The usage node under the cursor.
    pub fn resolve_hover_target(&self, file: FileId, position: Position) -> Option<NodeRef> {
        super::resolve_hover_target(&self.snapshot, file, position)
    }

    /// Name range of the declaration `node` resolved to.
    pub fn resolve_definition(&self, node: NodeRef) -> Option<Location> {
        super::resolve_definition(&self.snapshot, node)
    }

    pub fn declared_type_of(&self, node: NodeRef) -> Option<NodeRef> {
        super::declared_type_of(&self.snapshot, node)
    }

    pub fn identifier_name(&self, node: NodeRef) -> Option<&str> {
        super::identifier_name(&self.snapshot, node)
    }

    // ==================== Position-based features ====================

    pub fn hover(&self, file: FileId, position: Position) -> Option<HoverResult> {
        super::hover(&self.snapshot, file, position)
    }

    pub fn goto_definition(&self, file: FileId, position: Position) -> GotoResult {
        super::goto_definition(&self.snapshot, file, position)
    }

    pub fn find_references(
        &self,
        file: FileId,
        position: Position,
        include_declaration: bool,
    ) -> ReferenceResult {
        super::find_references(&self.snapshot, file, position, include_declaration)
    }

    // ==================== Accessors ====================

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn node(&self, node: NodeRef) -> Option<&SymbolNode> {
        self.snapshot.node(node)
    }

    pub fn tree(&self, file: FileId) -> Option<&FileSymbolTree> {
        self.snapshot.tree(file)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.snapshot.file_id(path)
    }

    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.snapshot.path(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::NodeKind;

    #[test]
    fn test_analysis_host_basic() {
        let mut host = AnalysisHost::new();
        host.set_file_content("test.sol", "contract Test {}")
            .expect("indexed");

        let analysis = host.analysis();
        assert!(analysis.file_id("test.sol").is_some());
    }

    #[test]
    fn test_file_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("test.sol", "contract Test {}")
            .expect("indexed");
        host.remove_file("test.sol").expect("removed");

        let analysis = host.analysis();
        let file = analysis.file_id("test.sol").expect("path stays interned");
        assert!(analysis.tree(file).is_none());
    }

    #[test]
    fn test_queries_on_one_snapshot() {
        let mut host = AnalysisHost::new();
        let text = "contract C {\n    uint total;\n    function f() public { total; }\n}";
        host.set_file_content("C.sol", text).expect("indexed");
        let analysis = host.analysis();
        let file = analysis.file_id("C.sol").expect("file");

        // `total` in the function body
        let usage = analysis
            .resolve_hover_target(file, Position::new(2, 27))
            .expect("usage");
        assert_eq!(analysis.identifier_name(usage), Some("total"));

        let location = analysis.resolve_definition(usage).expect("resolved");
        assert_eq!(location.span.start, Position::new(1, 9));

        let declared = analysis.declared_type_of(usage).expect("typed");
        assert_eq!(
            analysis.node(declared).map(|n| n.kind()),
            Some(NodeKind::VariableDeclaration)
        );

        host.set_file_content("C.sol", "contract C {}").expect("re-indexed");
        // the old snapshot still answers
        assert!(analysis.node(usage).is_some());
        assert!(host.analysis().node(usage).is_none());
    }

    #[test]
    fn test_hover_on_declaration_is_none() {
        let mut host = AnalysisHost::new();
        host.set_file_content("C.sol", "contract C { uint total; }")
            .expect("indexed");
        let analysis = host.analysis();
        let file = analysis.file_id("C.sol").expect("file");
        assert_eq!(analysis.resolve_hover_target(file, Position::new(0, 19)), None);
        assert!(analysis.hover(file, Position::new(0, 19)).is_none());
    }
}
