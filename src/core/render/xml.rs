//! XML output
//!
//! ```text
//! <files>
//! <file path="src/main.rs">
//! <type>rust</type>
//! <content>
//! fn main() {}
//! </content>
//! </file>
//! </files>
//! ```

use std::io::Write;

use super::{escape_xml, ContentRenderer, Formatter};
use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::model::{CatlsError, ProcessedFile};

#[derive(Debug, Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for XmlFormatter {
    fn write_header(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        writeln!(out, "<files>")?;
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

        writeln!(out, "<file path=\"{}\">", escape_xml(&file.record.rel_path))?;

        if let Some(error) = &file.error {
            writeln!(out, "<error>{}</error>", escape_xml(error))?;
        } else if file.record.is_binary {
            writeln!(out, "<binary>true</binary>")?;
        } else {
            if !file.file_type.is_empty() {
                writeln!(out, "<type>{}</type>", escape_xml(&file.file_type))?;
            }
            writeln!(out, "<content>")?;
            ContentRenderer::new(cfg.show_line_numbers).write_lines(out, file)?;
            writeln!(out, "</content>")?;
        }

        writeln!(out, "</file>")?;
        Ok(())
    }

    fn write_footer(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        writeln!(out, "</files>")?;
        Ok(())
    }
}
