//! Loading a project directory from disk.

use std::fs;

use tempfile::TempDir;

use crate::helpers::hir_helpers::position_of;
use crate::helpers::source_fixtures::*;
use solstice::ide::AnalysisHost;
use solstice::project::{REMAPPINGS_FILE, WorkspaceLoader};

#[test]
fn test_loaded_project_answers_definition_queries() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    fs::create_dir_all(root.join("src")).expect("src");
    fs::create_dir_all(root.join("lib/base")).expect("lib");
    fs::write(root.join(REMAPPINGS_FILE), "@base/=lib/base/\n").expect("remappings");
    fs::write(root.join("lib/base/Parent.sol"), PARENT_SOL).expect("parent");
    let child = CHILD_SOL.replace("./Parent.sol", "@base/Parent.sol");
    fs::write(root.join("src/Child.sol"), &child).expect("child");

    let host = AnalysisHost::new();
    let report = WorkspaceLoader::new()
        .load_directory(root, host.workspace())
        .expect("load");
    assert!(report.is_clean(), "failures: {:?}", report.failed);
    assert_eq!(report.installed.len(), 2);

    let analysis = host.analysis();
    let file = analysis.file_id("src/Child.sol").expect("child indexed");
    let result = analysis.goto_definition(file, position_of(&child, "ping()", 0, 0));
    assert_eq!(result.targets.len(), 1);
    let target_file = result.targets[0].location.file;
    assert_eq!(analysis.file_path(target_file), Some("lib/base/Parent.sol"));
}

#[test]
fn test_broken_file_is_reported_not_fatal() {
    let temp = TempDir::new().expect("temp dir");
    fs::write(temp.path().join("Good.sol"), "contract Good {}").expect("good");
    fs::write(temp.path().join("Bad.sol"), "contract Bad {").expect("bad");

    let host = AnalysisHost::new();
    let report = WorkspaceLoader::new()
        .load_directory(temp.path(), host.workspace())
        .expect("load");

    assert_eq!(report.installed.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("Bad.sol"));
}
