use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{AnalysisError, Result};
use crate::workspace::{IndexOutcome, Workspace, parse_remappings};

/// File name of the remapping list read from a project root.
pub const REMAPPINGS_FILE: &str = "remappings.txt";

/// Per-file results of loading a directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub installed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, AnalysisError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loads Solidity sources from disk into a [`Workspace`].
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Index every `*.sol` file under `root` as one batch.
    ///
    /// Remappings from `root/remappings.txt` are added first. Files that
    /// cannot be read or do not parse are reported, not fatal; an invalid
    /// remapping list or a missing root is.
    pub fn load_directory<P: AsRef<Path>>(
        &self,
        root: P,
        workspace: &Workspace,
    ) -> Result<LoadReport> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AnalysisError::io(
                root.display().to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            ));
        }

        let remappings_path = root.join(REMAPPINGS_FILE);
        if remappings_path.is_file() {
            let text = fs::read_to_string(&remappings_path)
                .map_err(|e| AnalysisError::io(remappings_path.display().to_string(), e))?;
            let remappings = parse_remappings(&text)?;
            debug!(count = remappings.len(), "loaded remappings");
            workspace.add_remappings(remappings);
        }

        let mut report = LoadReport::default();
        let mut paths = Vec::new();
        let mut batch = Vec::new();
        for path in collect_solidity_files(root) {
            match fs::read_to_string(&path) {
                Ok(text) => {
                    batch.push((workspace_path(root, &path), text));
                    paths.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    let err = AnalysisError::io(path.display().to_string(), e);
                    report.failed.push((path, err));
                }
            }
        }

        for (path, result) in paths.into_iter().zip(workspace.index_files(&batch)) {
            match result {
                Ok(IndexOutcome::Installed { .. }) => report.installed.push(path),
                Ok(IndexOutcome::Stale { .. }) => {}
                Err(err) => report.failed.push((path, err)),
            }
        }
        debug!(
            installed = report.installed.len(),
            failed = report.failed.len(),
            "loaded directory"
        );
        Ok(report)
    }

    /// Index a single file, keyed by its path relative to `root`.
    pub fn load_file(
        &self,
        root: impl AsRef<Path>,
        path: impl AsRef<Path>,
        workspace: &Workspace,
    ) -> Result<IndexOutcome> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| AnalysisError::io(path.display().to_string(), e))?;
        workspace.index_file(&workspace_path(root.as_ref(), path), &text)
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `*.sol` files under `root`, sorted.
pub fn collect_solidity_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "sol"))
        .collect();
    files.sort();
    files
}

/// Key a file by its path relative to the project root, `/`-separated.
fn workspace_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
