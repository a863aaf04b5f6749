//! Path normalization utilities
//!
//! Ensures all displayed paths use '/' as separator and are relative to the display base.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Compute the display path of `path` relative to `base`.
///
/// Tries a plain prefix strip first, then the canonical forms of both paths,
/// climbing out of `base` with `..` when `path` lives beside it. Falls back to
/// the normalized path itself when no relation can be established.
pub fn relative_path(path: &Path, base: &Path) -> String {
    if let Ok(rel) = path.strip_prefix(base) {
        return normalize_path(rel);
    }

    match (path.canonicalize(), base.canonicalize()) {
        (Ok(path_abs), Ok(base_abs)) => normalize_path(&diff_paths(&path_abs, &base_abs)),
        _ => normalize_path(path),
    }
}

/// Lexical difference of two absolute paths
fn diff_paths(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_parts.len() {
        result.push("..");
    }
    for part in &path_parts[common..] {
        result.push(part.as_os_str());
    }
    result
}

/// Check if a file name is hidden (starts with '.')
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Final component of a '/'-separated path
pub fn base_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}

/// Component-aligned suffixes of a '/'-separated path, longest first.
///
/// `a/b/c.py` yields `a/b/c.py`, `b/c.py`, `c.py`.
pub fn path_suffixes(rel_path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(rel_path).chain(
        rel_path
            .char_indices()
            .filter(|(_, c)| *c == '/')
            .map(move |(i, _)| &rel_path[i + 1..])
            .filter(|s| !s.is_empty()),
    )
}
