//! JSON output
//!
//! A streamed array of pretty-printed file objects. Escaping is left to serde_json.

use serde::Serialize;
use std::io::Write;

use super::{ContentRenderer, Formatter};
use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::model::{CatlsError, ProcessedFile};

/// One element of the output array
#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    path: &'a str,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    file_type: Option<&'a str>,

    binary: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,

    total_lines: usize,

    truncated: bool,
}

impl<'a> JsonFile<'a> {
    fn from_processed(file: &'a ProcessedFile, renderer: ContentRenderer) -> Self {
        let renders_content = file.error.is_none() && !file.record.is_binary;

        Self {
            path: &file.record.rel_path,
            file_type: (renders_content && !file.file_type.is_empty())
                .then_some(file.file_type.as_str()),
            binary: file.record.is_binary,
            error: file.error.as_deref(),
            content: renders_content.then(|| renderer.render_lines(file).join("\n")),
            total_lines: file.total_lines,
            truncated: file.is_truncated,
        }
    }
}

#[derive(Debug, Default)]
pub struct JsonFormatter {
    written: usize,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Formatter for JsonFormatter {
    fn write_header(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        self.written = 0;
        write!(out, "[")?;
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

        let entry = JsonFile::from_processed(file, ContentRenderer::new(cfg.show_line_numbers));
        let json = serde_json::to_string_pretty(&entry).map_err(std::io::Error::from)?;

        if self.written > 0 {
            write!(out, ",")?;
        }
        writeln!(out)?;
        for (i, line) in json.lines().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            write!(out, "  {}", line)?;
        }

        self.written += 1;
        Ok(())
    }

    fn write_footer(
        &mut self,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> Result<(), CatlsError> {
        cancel.check()?;
        if self.written > 0 {
            writeln!(out)?;
        }
        writeln!(out, "]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use serde_json::Value;

    fn render(files: &[ProcessedFile], show_line_numbers: bool) -> String {
        let cancel = CancellationToken::new();
        let cfg = config(show_line_numbers);
        let mut formatter = JsonFormatter::new();
        let mut out = Vec::new();

        formatter.write_header(&mut out, &cancel).unwrap();
        for file in files {
            formatter.write_file(&mut out, file, &cfg, &cancel).unwrap();
        }
        formatter.write_footer(&mut out, &cancel).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn parse(output: &str) -> Vec<Value> {
        serde_json::from_str::<Vec<Value>>(output).expect("valid json array")
    }

    #[test]
    fn test_empty_array() {
        let output = render(&[], false);
        assert_eq!(output, "[]\n");
        assert!(parse(&output).is_empty());
    }

    #[test]
    fn test_mixed_files() {
        let output = render(
            &[
                text_file("a.py", "python", &["x = \"1\"", "y = 2"]),
                binary_file("b.bin"),
                errored_file("c.txt", "permission denied"),
            ],
            false,
        );
        let items = parse(&output);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0]["path"], "a.py");
        assert_eq!(items[0]["type"], "python");
        assert_eq!(items[0]["binary"], false);
        assert_eq!(items[0]["content"], "x = \"1\"\ny = 2");
        assert_eq!(items[0]["total_lines"], 2);

        assert_eq!(items[1]["binary"], true);
        assert!(items[1].get("content").is_none());
        assert!(items[1].get("type").is_none());

        assert_eq!(items[2]["error"], "permission denied");
        assert!(items[2].get("content").is_none());
    }

    #[test]
    fn test_truncated_with_line_numbers() {
        let mut file = text_file("big.txt", "", &["a"]);
        file.total_lines = 1001;
        file.is_truncated = true;

        let items = parse(&render(&[file], true));
        assert_eq!(items[0]["content"], "   1| a\n... (1000 more lines)");
        assert_eq!(items[0]["truncated"], true);
        assert!(items[0].get("type").is_none());
    }
}
