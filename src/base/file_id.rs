//! Interned file identifiers.

use rustc_hash::FxHashMap;

use super::path::normalize_path;

/// Identifier of a source file within one workspace.
///
/// Cheap to copy and hash; the path behind it lives in a [`FileSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Bidirectional path ↔ [`FileId`] interner.
///
/// Paths are normalized before interning, so `./a/../B.sol` and `B.sol`
/// map to the same id.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    ids: FxHashMap<String, FileId>,
    paths: Vec<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its existing id if already known.
    pub fn intern(&mut self, path: &str) -> FileId {
        let normalized = normalize_path(path);
        if let Some(&id) = self.ids.get(&normalized) {
            return id;
        }
        let id = FileId::new(self.paths.len() as u32);
        self.paths.push(normalized.clone());
        self.ids.insert(normalized, id);
        id
    }

    /// Look up a path without interning it.
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.ids.get(&normalize_path(path)).copied()
    }

    /// The normalized path for an id.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.paths.get(file.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str)> + '_ {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| (FileId::new(i as u32), p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut files = FileSet::new();
        let a = files.intern("contracts/Token.sol");
        let b = files.intern("contracts/./Token.sol");
        assert_eq!(a, b);
        assert_eq!(files.len(), 1);
        assert_eq!(files.path(a), Some("contracts/Token.sol"));
    }

    #[test]
    fn test_lookup_without_interning() {
        let mut files = FileSet::new();
        files.intern("A.sol");
        assert!(files.file_id("A.sol").is_some());
        assert!(files.file_id("B.sol").is_none());
        assert_eq!(files.len(), 1);
    }
}
