//! Pipeline configuration
//!
//! `PipelineConfig` is resolved once per run by the CLI layer and then only read.
//! Built-in ignore lists live in `IgnoreDefaults` so tests can swap them out.

use std::path::{Path, PathBuf};

use crate::core::render::OutputFormat;

/// Directories skipped during traversal unless overridden
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".direnv",
    "build",
    "dist",
    "target",
    "venv",
    "env",
    ".env",
    "vendor",
    ".bundle",
    "coverage",
    "static",
];

/// Globs always merged into the exclude list
pub const DEFAULT_IGNORE_GLOBS: &[&str] = &[
    ".git/*",
    ".svn/*",
    ".hg/*",
    "__pycache__/*",
    ".pytest_cache/*",
    ".mypy_cache/*",
    ".tox/*",
    ".venv/*",
    ".coverage",
    ".DS_Store",
    ".idea/*",
    ".vscode/*",
    "*_templ.go",
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
];

/// Built-in ignore data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreDefaults {
    pub dirs: Vec<String>,
    pub globs: Vec<String>,
}

impl Default for IgnoreDefaults {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            globs: DEFAULT_IGNORE_GLOBS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreDefaults {
    /// No built-in ignores at all
    #[allow(dead_code)]
    pub fn none() -> Self {
        Self {
            dirs: Vec::new(),
            globs: Vec::new(),
        }
    }
}

/// Resolved options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory to scan
    pub root: PathBuf,

    /// Extra path arguments (converted into include globs)
    pub files: Vec<String>,

    /// Include dotfiles and dot-directories
    pub show_hidden: bool,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Directory names (or relative paths) never descended into
    pub ignore_dirs: Vec<String>,

    /// Only files matching one of these are rendered (empty means all)
    pub include_globs: Vec<String>,

    /// User-supplied exclude globs; merged with the built-in set
    pub exclude_globs: Vec<String>,

    /// Built-in exclude globs
    pub default_exclude_globs: Vec<String>,

    /// Glob applied to each line of content
    pub content_pattern: Option<String>,

    pub show_line_numbers: bool,

    /// Drop binary files from the output entirely
    pub omit_binaries: bool,

    pub format: OutputFormat,

    /// Base for displayed relative paths (defaults to `root`)
    pub relative_to: Option<PathBuf>,

    /// Consult the external `file` classifier before the null-byte heuristic
    pub use_file_command: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".", IgnoreDefaults::default())
    }
}

impl PipelineConfig {
    /// A config with every option off, seeded with the given ignore data
    pub fn new(root: impl Into<PathBuf>, defaults: IgnoreDefaults) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
            show_hidden: false,
            recursive: false,
            ignore_dirs: defaults.dirs,
            include_globs: Vec::new(),
            exclude_globs: Vec::new(),
            default_exclude_globs: defaults.globs,
            content_pattern: None,
            show_line_numbers: false,
            omit_binaries: false,
            format: OutputFormat::Xml,
            relative_to: None,
            use_file_command: true,
        }
    }

    /// Built-in exclude globs followed by the user's
    pub fn all_exclude_globs(&self) -> Vec<String> {
        self.default_exclude_globs
            .iter()
            .chain(self.exclude_globs.iter())
            .cloned()
            .collect()
    }

    /// Base directory for relative paths
    pub fn display_base(&self) -> &Path {
        self.relative_to.as_deref().unwrap_or(&self.root)
    }

    /// Strip trailing separators from the ignore-dir list
    pub fn normalize_ignore_dirs(&mut self) {
        for dir in &mut self.ignore_dirs {
            let trimmed = dir.trim_end_matches(|c| c == '/' || c == '\\');
            if trimmed.len() != dir.len() {
                *dir = trimmed.to_string();
            }
        }
    }

    /// Turn file arguments into include globs.
    ///
    /// An existing path contributes its file name; anything else is taken as a glob.
    pub fn add_files_to_globs(&mut self) {
        for file in std::mem::take(&mut self.files) {
            let path = Path::new(&file);
            let glob = if path.exists() {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.clone())
            } else {
                file.clone()
            };
            self.include_globs.push(glob);
            self.files.push(file);
        }
    }
}
