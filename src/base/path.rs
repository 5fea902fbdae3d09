//! Path normalization utilities for consistent file path handling.
//!
//! Import strings and FileSet keys must compare equal regardless of how a
//! path was spelled, so normalization here is purely lexical: it never
//! touches the filesystem.

/// Normalize a file path for consistent storage and lookup.
///
/// Folds `.` and `..` components, converts `\` separators to `/`, and drops
/// duplicate separators. A leading `/` is preserved; `..` above a relative
/// root is kept.
///
/// ```
/// use solstice::base::normalize_path;
///
/// assert_eq!(normalize_path("contracts/./lib/../Token.sol"), "contracts/Token.sol");
/// assert_eq!(normalize_path("/src//A.sol"), "/src/A.sol");
/// ```
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The directory part of a normalized path (empty for bare file names).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}
