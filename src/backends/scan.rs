//! File scanning backend
//!
//! Walks the tree with an explicit work stack instead of recursion, so depth is
//! bounded and cancellation is checked between directories.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backends::binary::BinaryDetector;
use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::model::{CatlsError, FileRecord};
use crate::core::paths::{is_hidden, normalize_path, relative_path};

/// A directory waiting to be listed
struct PendingDir {
    path: PathBuf,
    depth: usize,
}

/// Discovers files and classifies them
pub struct Scanner {
    detector: Box<dyn BinaryDetector>,
}

impl Scanner {
    pub fn new(detector: Box<dyn BinaryDetector>) -> Self {
        Self { detector }
    }

    /// Scan `cfg.root` and return the inventory sorted by relative path
    pub fn scan(
        &self,
        cfg: &PipelineConfig,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileRecord>, CatlsError> {
        // Non-recursive scans list only the root itself
        let max_depth = if cfg.recursive { None } else { Some(1) };

        let mut stack = vec![PendingDir {
            path: cfg.root.clone(),
            depth: 0,
        }];
        let mut files = Vec::new();

        while let Some(current) = stack.pop() {
            cancel.check()?;

            if max_depth.is_some_and(|max| current.depth >= max) {
                continue;
            }

            self.scan_directory(cfg, &current, &mut stack, &mut files);
        }

        files.sort_by(|a: &FileRecord, b: &FileRecord| a.rel_path.cmp(&b.rel_path));
        Ok(files)
    }

    fn scan_directory(
        &self,
        cfg: &PipelineConfig,
        dir: &PendingDir,
        stack: &mut Vec<PendingDir>,
        files: &mut Vec<FileRecord>,
    ) {
        let entries = match fs::read_dir(&dir.path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir.path.display(), error = %e, "error accessing directory");
                return;
            }
        };

        let mut children = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push(entry),
                Err(e) => {
                    debug!(path = %dir.path.display(), error = %e, "error reading directory entry");
                }
            }
        }

        // Sort for consistent output regardless of filesystem order
        children.sort_by_key(|entry| entry.file_name());

        for entry in children {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name == "." || name == ".." {
                continue;
            }

            if !cfg.show_hidden && is_hidden(&name) {
                continue;
            }

            self.process_entry(cfg, &entry.path(), &name, dir.depth, stack, files);
        }
    }

    fn process_entry(
        &self,
        cfg: &PipelineConfig,
        full_path: &Path,
        name: &str,
        depth: usize,
        stack: &mut Vec<PendingDir>,
        files: &mut Vec<FileRecord>,
    ) {
        // Symlinks are not followed
        let file_type = match fs::symlink_metadata(full_path) {
            Ok(meta) => meta.file_type(),
            Err(e) => {
                debug!(path = %full_path.display(), error = %e, "error reading metadata");
                return;
            }
        };

        if file_type.is_dir() {
            if should_ignore_dir(full_path, name, cfg) {
                debug!(path = %full_path.display(), "ignoring directory");
            } else {
                stack.push(PendingDir {
                    path: full_path.to_path_buf(),
                    depth: depth + 1,
                });
            }
        } else if file_type.is_file() {
            let rel_path = relative_path(full_path, cfg.display_base());
            let is_binary = self.detector.is_binary(full_path);
            files.push(FileRecord::new(full_path, rel_path, is_binary));
        }
    }
}

/// A directory is ignored when its name or its path relative to the root
/// equals an ignore-dir entry
fn should_ignore_dir(full_path: &Path, name: &str, cfg: &PipelineConfig) -> bool {
    let rel = full_path
        .strip_prefix(&cfg.root)
        .map(normalize_path)
        .unwrap_or_default();

    cfg.ignore_dirs.iter().any(|ignored| {
        let ignored = ignored.trim_end_matches(|c| c == '/' || c == '\\');
        ignored == name || (!rel.is_empty() && ignored == rel)
    })
}
