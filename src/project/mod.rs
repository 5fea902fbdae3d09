//! Project loading: discovering sources and remappings on disk.

pub mod workspace_loader;

pub use workspace_loader::{LoadReport, REMAPPINGS_FILE, WorkspaceLoader, collect_solidity_files};
