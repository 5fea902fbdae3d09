//! Re-analysis consistency across interdependent files.

use std::sync::Arc;
use std::thread;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;
use solstice::AnalysisError;
use solstice::hir::NodeKind;
use solstice::workspace::{IndexOutcome, Remapping, Workspace, WorkspaceConfig};

#[test]
fn test_parent_reindexed_twice_keeps_child_links() {
    let mut host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);

    for _ in 0..2 {
        host.set_file_content("Parent.sol", PARENT_SOL)
            .expect("re-index parent");
        let analysis = host.analysis();

        let base = find_node(&analysis, "Parent.sol", NodeKind::ContractDefinition, "Base", 0);
        let base_use = find_node(&analysis, "Child.sol", NodeKind::UserDefinedTypeName, "Base", 0);
        assert_resolves_to(&analysis, base_use, base);

        // exactly one back link, from the current Child tree
        let references = analysis.node(base).map(|n| n.references.clone());
        assert_eq!(references, Some(vec![base_use]));
        assert_no_dangling_links(&analysis);
        assert_pools_conserved(&analysis);
    }
}

#[test]
fn test_links_follow_renamed_declaration() {
    let mut host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);

    let renamed = PARENT_SOL.replace("function ping()", "function pingRenamed()");
    host.set_file_content("Parent.sol", &renamed)
        .expect("re-index parent");
    let analysis = host.analysis();
    let ping_use = find_node(&analysis, "Child.sol", NodeKind::Identifier, "ping", 0);
    assert_eq!(analysis.node(ping_use).and_then(|n| n.resolved_declaration), None);

    host.set_file_content("Parent.sol", PARENT_SOL)
        .expect("restore parent");
    let analysis = host.analysis();
    let ping = find_node(&analysis, "Parent.sol", NodeKind::FunctionDefinition, "ping", 0);
    assert_resolves_to(&analysis, ping_use, ping);
    assert_no_dangling_links(&analysis);
}

#[test]
fn test_links_through_intermediate_file_follow_its_edits() {
    let grandparent = "contract GBase { function ping() internal {} }";
    let parent = "import \"./G.sol\";\ncontract Base is GBase {}";
    let child = "import \"./F.sol\";\ncontract Child is Base { function f() public { ping(); } }";
    let mut host = analysis_from_files(&[
        ("G.sol", grandparent),
        ("F.sol", parent),
        ("D.sol", child),
    ]);

    let analysis = host.analysis();
    let ping = find_node(&analysis, "G.sol", NodeKind::FunctionDefinition, "ping", 0);
    let ping_use = find_node(&analysis, "D.sol", NodeKind::Identifier, "ping", 0);
    assert_resolves_to(&analysis, ping_use, ping);

    // Base no longer inherits GBase: the link made through it must go
    host.set_file_content("F.sol", "import \"./G.sol\";\ncontract Base {}")
        .expect("re-index parent");
    let analysis = host.analysis();
    assert_eq!(analysis.node(ping_use).and_then(|n| n.resolved_declaration), None);
    assert_eq!(analysis.node(ping).map(|n| n.references.len()), Some(0));
    assert_no_dangling_links(&analysis);
    assert_pools_conserved(&analysis);

    // re-analyzing the unchanged child decides the same way
    host.set_file_content("D.sol", child).expect("re-index child");
    let analysis = host.analysis();
    let ping_use = find_node(&analysis, "D.sol", NodeKind::Identifier, "ping", 0);
    assert_eq!(analysis.node(ping_use).and_then(|n| n.resolved_declaration), None);

    host.set_file_content("F.sol", parent).expect("restore parent");
    let analysis = host.analysis();
    assert_resolves_to(&analysis, ping_use, ping);
    assert_eq!(
        analysis.node(ping).map(|n| n.references.clone()),
        Some(vec![ping_use])
    );
    assert_no_dangling_links(&analysis);
}

#[test]
fn test_removing_parent_returns_usages_to_pool() {
    let mut host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);
    host.remove_file("Parent.sol").expect("known file");

    let analysis = host.analysis();
    let child = analysis.file_id("Child.sol").expect("child");
    let tree = analysis.tree(child).expect("child tree");
    let ping_use = find_node(&analysis, "Child.sol", NodeKind::Identifier, "ping", 0);
    assert!(tree.is_pending(ping_use.node));
    assert_no_dangling_links(&analysis);
    assert_pools_conserved(&analysis);
}

#[test]
fn test_broken_parent_is_absent_until_fixed() {
    let mut host = analysis_from_files(&[("Parent.sol", PARENT_SOL), ("Child.sol", CHILD_SOL)]);

    let err = host
        .set_file_content("Parent.sol", "contract Base {")
        .expect_err("syntax error");
    assert!(matches!(err, AnalysisError::Syntax { ref path, .. } if path == "Parent.sol"));
    let analysis = host.analysis();
    let parent = analysis.file_id("Parent.sol").expect("path stays known");
    assert!(analysis.tree(parent).is_none());
    assert_no_dangling_links(&analysis);

    host.set_file_content("Parent.sol", PARENT_SOL).expect("fixed");
    let analysis = host.analysis();
    let base = find_node(&analysis, "Parent.sol", NodeKind::ContractDefinition, "Base", 0);
    let base_use = find_node(&analysis, "Child.sol", NodeKind::UserDefinedTypeName, "Base", 0);
    assert_resolves_to(&analysis, base_use, base);
}

#[test]
fn test_out_of_order_install_is_dropped() {
    let workspace = Workspace::default();
    let older = workspace.prepare("Parent.sol", "contract Old {}");
    let newer = workspace.prepare("Parent.sol", PARENT_SOL);
    assert!(newer.generation() > older.generation());

    assert!(workspace.install(newer).expect("newer").is_installed());
    let outcome = workspace.install(older).expect("stale is not an error");
    assert!(matches!(outcome, IndexOutcome::Stale { .. }));

    let snapshot = workspace.snapshot();
    let file = snapshot.file_id("Parent.sol").expect("file");
    let tree = snapshot.tree(file).expect("tree");
    assert!(tree.nodes().any(|(_, n)| n.name() == Some("Base")));
    assert!(!tree.nodes().any(|(_, n)| n.name() == Some("Old")));
}

#[test]
fn test_concurrent_builds_install_latest() {
    let workspace = Arc::new(Workspace::default());
    workspace.index_file("Child.sol", CHILD_SOL).expect("child");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let workspace = Arc::clone(&workspace);
            thread::spawn(move || {
                let text = format!("{PARENT_SOL}\ncontract Extra{i} {{}}\n");
                workspace.index_file("Parent.sol", &text)
            })
        })
        .collect();
    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread").expect("no syntax errors"))
        .collect();

    let newest = outcomes
        .iter()
        .map(IndexOutcome::generation)
        .max()
        .expect("four outcomes");
    let snapshot = workspace.snapshot();
    let parent = snapshot.file_id("Parent.sol").expect("parent");
    assert_eq!(snapshot.tree(parent).map(|t| t.generation()), Some(newest));

    let ping_links = snapshot
        .trees()
        .flat_map(|t| t.nodes().map(move |(_, n)| n))
        .filter(|n| n.kind() == NodeKind::Identifier && n.name() == Some("ping"))
        .filter_map(|n| n.resolved_declaration)
        .collect::<Vec<_>>();
    assert_eq!(ping_links.len(), 1);
    assert!(snapshot.node(ping_links[0]).is_some());
}

#[test]
fn test_remapped_import_links() {
    let config = WorkspaceConfig::new().with_remapping(Remapping::new("@base/", "lib/base/"));
    let workspace = Workspace::new(config);
    let child = CHILD_SOL.replace("./Parent.sol", "@base/Parent.sol");

    workspace.index_file("src/Child.sol", &child).expect("child");
    workspace
        .index_file("lib/base/Parent.sol", PARENT_SOL)
        .expect("parent");

    let snapshot = workspace.snapshot();
    let file = snapshot.file_id("src/Child.sol").expect("child");
    let tree = snapshot.tree(file).expect("tree");
    let (_, ping_use) = tree
        .nodes()
        .find(|(_, n)| n.kind() == NodeKind::Identifier && n.name() == Some("ping"))
        .expect("ping usage");
    let target = ping_use.resolved_declaration.expect("linked through remapping");
    assert_eq!(snapshot.path(target.file), Some("lib/base/Parent.sol"));
}
