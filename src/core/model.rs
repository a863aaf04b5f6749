//! Pipeline data model
//!
//! Every stage hands the next one these types: the scanner produces
//! `FileRecord`s, the processor turns each into a `ProcessedFile`, and the
//! formatters consume `ProcessedFile`s exactly once.

use std::path::PathBuf;
use thiserror::Error;

/// A discovered file, identified by its absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path used to open the file
    pub path: PathBuf,

    /// Path relative to the display base, using '/' as separator
    pub rel_path: String,

    /// Binary classification made at discovery time
    pub is_binary: bool,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, rel_path: impl Into<String>, is_binary: bool) -> Self {
        Self {
            path: path.into(),
            rel_path: rel_path.into(),
            is_binary,
        }
    }
}

/// A line that survived content filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredLine {
    /// 1-based line number in the original file
    pub number: usize,
    pub content: String,
}

impl FilteredLine {
    pub fn new(number: usize, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }
}

/// A file after type detection, filtering and truncation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub record: FileRecord,

    /// Detected type, empty when the extension is unknown
    pub file_type: String,

    pub lines: Vec<FilteredLine>,

    /// Line count of the file before filtering
    pub total_lines: usize,

    pub is_truncated: bool,

    /// Read failure, rendered in place of content
    pub error: Option<String>,
}

impl ProcessedFile {
    /// An empty result for the record (used for binaries)
    pub fn empty(record: FileRecord) -> Self {
        Self {
            record,
            file_type: String::new(),
            lines: Vec::new(),
            total_lines: 0,
            is_truncated: false,
            error: None,
        }
    }

    /// Lines dropped by truncation
    pub fn remaining_lines(&self) -> usize {
        self.total_lines.saturating_sub(self.lines.len())
    }
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum CatlsError {
    #[error("directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("unsupported output format: {0} (supported: xml, json, markdown)")]
    UnsupportedFormat(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
