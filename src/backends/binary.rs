//! Binary file detection
//!
//! The external `file` classifier is authoritative whenever it runs; the
//! null-byte heuristic is used only when it cannot be executed.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Bytes inspected by the null-byte heuristic
pub const SNIFF_LEN: usize = 1024;

/// Classifies a file as binary or text. Never fails: unreadable files are binary.
pub trait BinaryDetector {
    fn is_binary(&self, path: &Path) -> bool;
}

/// Runs `file <path>` and treats output without "text" as binary,
/// falling back to [`NullByteDetector`] when the command cannot run
#[derive(Debug, Clone)]
pub struct FileCommandDetector {
    program: String,
}

impl Default for FileCommandDetector {
    fn default() -> Self {
        Self {
            program: "file".to_string(),
        }
    }
}

impl FileCommandDetector {
    /// Use a different classifier executable
    #[allow(dead_code)]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn classify(&self, path: &Path) -> Option<bool> {
        let output = Command::new(&self.program).arg(path).output().ok()?;
        if !output.status.success() {
            return None;
        }

        let description = String::from_utf8_lossy(&output.stdout).to_lowercase();
        Some(!description.contains("text"))
    }
}

impl BinaryDetector for FileCommandDetector {
    fn is_binary(&self, path: &Path) -> bool {
        match self.classify(path) {
            Some(is_binary) => is_binary,
            None => {
                debug!(
                    program = %self.program,
                    path = %path.display(),
                    "classifier unavailable, using null-byte heuristic"
                );
                NullByteDetector.is_binary(path)
            }
        }
    }
}

/// Binary when a NUL byte appears in the first [`SNIFF_LEN`] bytes,
/// or when nothing can be read
#[derive(Debug, Clone, Copy, Default)]
pub struct NullByteDetector;

impl BinaryDetector for NullByteDetector {
    fn is_binary(&self, path: &Path) -> bool {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return true,
        };

        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        match file.take(SNIFF_LEN as u64).read_to_end(&mut prefix) {
            // An empty file has nothing to classify as text
            Ok(0) => true,
            Ok(_) => prefix.contains(&0),
            Err(_) => true,
        }
    }
}

/// Pick the detector for a run
pub fn detector_for(use_file_command: bool) -> Box<dyn BinaryDetector> {
    if use_file_command {
        Box::new(FileCommandDetector::default())
    } else {
        Box::new(NullByteDetector)
    }
}
