//! Markdown output
//!
//! One `## path` section per file with the content in a fenced code block.
//! The fence language comes from the detected type, then the extension.

use std::io::Write;

use super::{ContentRenderer, Formatter};
use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::lang::LanguageTable;
use crate::core::model::{CatlsError, ProcessedFile};
use crate::core::paths::base_name;

pub struct MarkdownFormatter {
    languages: LanguageTable,
    /// No separator before the first section
    first_file: bool,
}

impl MarkdownFormatter {
    pub fn new(languages: LanguageTable) -> Self {
        Self {
            languages,
            first_file: true,
        }
    }
}

impl Formatter for MarkdownFormatter {
    fn write_header(
        &mut self,
        _out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        self.first_file = true;
        Ok(())
    }

    fn write_file(
        &mut self,
        out: &mut dyn Write,
        file: &ProcessedFile,
        cfg: &PipelineConfig,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;

        if !self.first_file {
            writeln!(out)?;
        }
        self.first_file = false;

        let rel_path = &file.record.rel_path;
        writeln!(out, "## {}\n", rel_path)?;

        if let Some(error) = &file.error {
            writeln!(out, "**Error:** {}", escape_markdown(error))?;
            return Ok(());
        }

        if file.record.is_binary {
            writeln!(out, "*Binary file - contents not displayed*")?;
            return Ok(());
        }

        let language = self.languages.language_for(&file.file_type, &file.record.path);
        writeln!(out, "```{} name=\"{}\"", language, base_name(rel_path))?;
        ContentRenderer::new(cfg.show_line_numbers).write_lines(out, file)?;
        writeln!(out, "```")?;

        Ok(())
    }

    fn write_footer(
        &mut self,
        _out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        Ok(())
    }
}

/// Backslash-escape characters that Markdown would otherwise interpret inline
fn escape_markdown(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
