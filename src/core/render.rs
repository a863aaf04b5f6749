//! Renderer module
//!
//! Streams processed files in one of three formats: xml, json, markdown.
//! Every format shares [`ContentRenderer`] for line numbering and the
//! truncation notice, and differs only in how it wraps and escapes.

mod json;
mod markdown;
mod xml;

use std::io::Write;

use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::lang::LanguageTable;
use crate::core::model::{CatlsError, ProcessedFile};

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use xml::XmlFormatter;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
    Markdown,
}

impl OutputFormat {
    #[allow(dead_code)]
    pub const SUPPORTED: &'static [&'static str] = &["xml", "json", "markdown"];
}

impl std::str::FromStr for OutputFormat {
    type Err = CatlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(CatlsError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// A streaming output format.
///
/// Each call checks the cancellation token first and writes straight to `out`.
pub trait Formatter {
    fn write_header(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError>;

    fn write_file(
        &mut self,
        out: &mut dyn Write,
        file: &ProcessedFile,
        cfg: &PipelineConfig,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError>;

    fn write_footer(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError>;
}

/// Build the formatter for a format
pub fn formatter_for(format: OutputFormat, languages: LanguageTable) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Xml => Box::new(XmlFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(languages)),
    }
}

/// Renders the content lines of a file, shared by every format
#[derive(Debug, Clone, Copy)]
pub struct ContentRenderer {
    pub show_line_numbers: bool,
}

impl ContentRenderer {
    pub fn new(show_line_numbers: bool) -> Self {
        Self { show_line_numbers }
    }

    /// Display lines, followed by the truncation notice when one applies
    pub fn render_lines(&self, file: &ProcessedFile) -> Vec<String> {
        let mut rendered: Vec<String> = file
            .lines
            .iter()
            .map(|line| {
                if self.show_line_numbers {
                    format!("{:4}| {}", line.number, line.content)
                } else {
                    line.content.clone()
                }
            })
            .collect();

        if let Some(notice) = truncation_notice(file) {
            rendered.push(notice);
        }

        rendered
    }

    /// Write each display line to `out`, newline-terminated
    pub fn write_lines(&self, out: &mut dyn Write, file: &ProcessedFile) -> std::io::Result<()> {
        for line in self.render_lines(file) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// `... (N more lines)` for truncated files with something left to show
pub fn truncation_notice(file: &ProcessedFile) -> Option<String> {
    let remaining = file.remaining_lines();
    (file.is_truncated && remaining > 0).then(|| format!("... ({} more lines)", remaining))
}

/// Escape text for XML attributes and character data
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
