//! File content processing
//!
//! Reads a text file, detects its type, applies the content filter and the
//! display truncation policy.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::backends::filter::FileFilter;
use crate::core::lang::LanguageTable;
use crate::core::model::{FileRecord, ProcessedFile};

/// Files with more displayable lines than this are truncated
pub const MAX_DISPLAY_LINES: usize = 1000;

/// Lines kept when a file is truncated
pub const TRUNCATE_TO_LINES: usize = 100;

/// Detects the type of a file from its path
pub trait TypeDetector {
    /// Detected type, empty when unknown
    fn detect_type(&self, path: &Path) -> String;
}

/// Extension lookup through a [`LanguageTable`]
#[derive(Debug, Clone, Default)]
pub struct ExtensionTypeDetector {
    table: LanguageTable,
}

impl ExtensionTypeDetector {
    pub fn new(table: LanguageTable) -> Self {
        Self { table }
    }
}

impl TypeDetector for ExtensionTypeDetector {
    fn detect_type(&self, path: &Path) -> String {
        self.table.type_for_path(path)
    }
}

/// Turns file records into processed files
pub struct FileProcessor {
    type_detector: Box<dyn TypeDetector>,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(Box::new(ExtensionTypeDetector::default()))
    }
}

impl FileProcessor {
    pub fn new(type_detector: Box<dyn TypeDetector>) -> Self {
        Self { type_detector }
    }

    /// Process one record. Read failures land in `error`, never in a panic or `Err`.
    pub fn process(&self, record: &FileRecord, filter: &FileFilter) -> ProcessedFile {
        let mut result = ProcessedFile::empty(record.clone());

        if record.is_binary {
            return result;
        }

        result.file_type = self.type_detector.detect_type(&record.path);

        let lines = match read_lines(&record.path) {
            Ok(lines) => lines,
            Err(e) => {
                debug!(path = %record.path.display(), error = %e, "failed to read file");
                result.error = Some(e.to_string());
                return result;
            }
        };

        result.total_lines = lines.len();

        let mut filtered = filter.filter_content(lines);

        // A content pattern already bounds the output; truncating would hide matches
        if filtered.len() > MAX_DISPLAY_LINES && !filter.has_content_pattern() {
            filtered.truncate(TRUNCATE_TO_LINES);
            result.is_truncated = true;
        }

        result.lines = filtered;
        result
    }
}

/// Read all lines of a file, stripping `\n` / `\r\n` terminators.
/// Invalid UTF-8 is replaced rather than rejected.
fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    Ok(String::from_utf8_lossy(&buffer)
        .lines()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{IgnoreDefaults, PipelineConfig};
    use std::fs;
    use tempfile::tempdir;

    fn numbered_lines(count: usize) -> String {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    fn filter(pattern: Option<&str>) -> FileFilter {
        let mut cfg = PipelineConfig::new("/", IgnoreDefaults::none());
        cfg.content_pattern = pattern.map(str::to_string);
        FileFilter::new(&cfg).unwrap()
    }

    #[test]
    fn test_process_text_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, numbered_lines(10)).unwrap();

        let record = FileRecord::new(&path, "a.py", false);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert_eq!(processed.file_type, "python");
        assert_eq!(processed.total_lines, 10);
        assert_eq!(processed.lines.len(), 10);
        assert_eq!(processed.lines[0].number, 1);
        assert_eq!(processed.lines[9].content, "line 10");
        assert!(!processed.is_truncated);
        assert!(processed.error.is_none());
    }

    #[test]
    fn test_binary_short_circuits() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("b.bin");
        fs::write(&path, b"\x00\x01").unwrap();

        let record = FileRecord::new(&path, "b.bin", true);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert_eq!(processed, ProcessedFile::empty(record));
    }

    #[test]
    fn test_truncates_large_files() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("big.txt");
        fs::write(&path, numbered_lines(1001)).unwrap();

        let record = FileRecord::new(&path, "big.txt", false);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert!(processed.is_truncated);
        assert_eq!(processed.lines.len(), TRUNCATE_TO_LINES);
        assert_eq!(processed.total_lines, 1001);
        assert_eq!(processed.remaining_lines(), 901);
    }

    #[test]
    fn test_exactly_threshold_not_truncated() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("edge.txt");
        fs::write(&path, numbered_lines(MAX_DISPLAY_LINES)).unwrap();

        let record = FileRecord::new(&path, "edge.txt", false);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert!(!processed.is_truncated);
        assert_eq!(processed.lines.len(), MAX_DISPLAY_LINES);
    }

    #[test]
    fn test_pattern_suppresses_truncation() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("big.txt");
        fs::write(&path, numbered_lines(1001)).unwrap();

        let record = FileRecord::new(&path, "big.txt", false);
        let processed = FileProcessor::default().process(&record, &filter(Some("line *")));

        assert!(!processed.is_truncated);
        assert_eq!(processed.lines.len(), 1001);
    }

    #[test]
    fn test_read_error_is_captured() {
        let temp = tempdir().unwrap();
        let record = FileRecord::new(temp.path().join("vanished.rs"), "vanished.rs", false);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert!(processed.error.is_some());
        assert!(processed.lines.is_empty());
        assert_eq!(processed.file_type, "rust");
    }

    #[test]
    fn test_crlf_and_invalid_utf8() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("mixed.txt");
        fs::write(&path, b"one\r\ntw\xffo\n").unwrap();

        let record = FileRecord::new(&path, "mixed.txt", false);
        let processed = FileProcessor::default().process(&record, &filter(None));

        assert_eq!(processed.lines[0].content, "one");
        assert_eq!(processed.lines[1].content, "tw\u{FFFD}o");
    }

    #[test]
    fn test_custom_type_detector() {
        struct Fixed;
        impl TypeDetector for Fixed {
            fn detect_type(&self, _path: &Path) -> String {
                "fixed".to_string()
            }
        }

        let temp = tempdir().unwrap();
        let path = temp.path().join("x.unknown");
        fs::write(&path, "x\n").unwrap();

        let record = FileRecord::new(&path, "x.unknown", false);
        let processed = FileProcessor::new(Box::new(Fixed)).process(&record, &filter(None));
        assert_eq!(processed.file_type, "fixed");
    }
}
