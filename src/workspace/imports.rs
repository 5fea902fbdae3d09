//! Import path resolution.

use crate::base::{FileId, FileSet, normalize_path, parent_dir};

use super::config::Remapping;

/// The path an import string refers to, before looking it up.
///
/// Remappings win (longest matching prefix); `./` and `../` paths are taken
/// relative to the importer's directory; anything else is used as written.
pub fn candidate_path(remappings: &[Remapping], importer: &str, import_path: &str) -> String {
    let remapped = remappings
        .iter()
        .filter(|r| r.applies_to(importer))
        .filter_map(|r| Some((r.prefix.len(), r.context.is_some(), r.apply(import_path)?)))
        .max_by_key(|(len, has_context, _)| (*len, *has_context))
        .map(|(_, _, path)| path);
    if let Some(path) = remapped {
        return normalize_path(&path);
    }

    if import_path.starts_with("./") || import_path.starts_with("../") {
        let dir = parent_dir(importer);
        if dir.is_empty() {
            return normalize_path(import_path);
        }
        return normalize_path(&format!("{dir}/{import_path}"));
    }
    normalize_path(import_path)
}

/// Whether a file at `path` could satisfy an import whose candidate path is
/// `candidate`, exactly or as a suffix.
pub fn import_matches(candidate: &str, path: &str) -> bool {
    if path == candidate {
        return true;
    }
    let suffix = candidate.trim_start_matches("../").trim_start_matches('/');
    !suffix.is_empty()
        && (path == suffix
            || path
                .strip_suffix(suffix)
                .is_some_and(|head| head.ends_with('/')))
}

/// Resolve an import to a known file.
///
/// Tries the exact candidate path first, then any live file whose path ends
/// with it (shortest such path wins). `is_live` filters out files that are
/// known but currently have no tree.
pub fn resolve_import(
    files: &FileSet,
    remappings: &[Remapping],
    importer: &str,
    import_path: &str,
    is_live: impl Fn(FileId) -> bool,
) -> Option<FileId> {
    let candidate = candidate_path(remappings, importer, import_path);
    if let Some(file) = files.file_id(&candidate).filter(|&f| is_live(f)) {
        return Some(file);
    }

    files
        .iter()
        .filter(|&(file, path)| import_matches(&candidate, path) && is_live(file))
        .min_by_key(|(_, path)| (path.len(), path.to_string()))
        .map(|(file, _)| file)
}
