//! HIR test helpers for setting up analysis hosts and locating nodes.

use solstice::Position;
use solstice::base::FileId;
use solstice::hir::{NodeKind, NodeRef};
use solstice::ide::{Analysis, AnalysisHost};

/// Creates an AnalysisHost with a single Solidity file.
pub fn analysis_from_solidity(source: &str) -> (AnalysisHost, FileId) {
    analysis_from_source(source, "test.sol")
}

/// Creates an AnalysisHost with a single file.
pub fn analysis_from_source(source: &str, filename: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::new();
    let outcome = host.set_file_content(filename, source);
    assert!(
        outcome.is_ok(),
        "Parse errors in '{}': {:?}",
        filename,
        outcome.err()
    );
    let file_id = host
        .analysis()
        .file_id(filename)
        .expect("indexed file has an id");
    (host, file_id)
}

/// Creates an AnalysisHost with several files, indexed in the given order.
pub fn analysis_from_files(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, source) in files {
        host.set_file_content(path, source)
            .unwrap_or_else(|e| panic!("failed to index '{path}': {e}"));
    }
    host
}

/// Zero-based position of the `nth` occurrence of `needle` in `source`,
/// shifted `offset` characters into the match.
pub fn position_of(source: &str, needle: &str, nth: usize, offset: usize) -> Position {
    let start = source
        .match_indices(needle)
        .nth(nth)
        .map(|(i, _)| i + offset)
        .unwrap_or_else(|| panic!("occurrence {nth} of {needle:?} not found"));
    let before = &source[..start];
    let line = before.matches('\n').count();
    let column = before.len() - before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, column)
}

/// The `nth` node of `kind` named `name` in `path`, in tree order.
pub fn find_node(
    analysis: &Analysis,
    path: &str,
    kind: NodeKind,
    name: &str,
    nth: usize,
) -> NodeRef {
    let file = analysis.file_id(path).expect("file is known");
    let tree = analysis.tree(file).expect("file has a tree");
    let (id, _) = tree
        .nodes()
        .filter(|(_, n)| n.kind() == kind && n.name() == Some(name))
        .nth(nth)
        .unwrap_or_else(|| panic!("{kind:?} '{name}' #{nth} not found in {path}"));
    tree.node_ref(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of_counts_lines_and_columns() {
        let source = "contract A {\n    uint x;\n}";
        assert_eq!(position_of(source, "x", 0, 0), Position::new(1, 9));
        assert_eq!(position_of(source, "contract", 0, 2), Position::new(0, 2));
    }
}
