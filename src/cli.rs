//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::debug;

use crate::core::config::{IgnoreDefaults, PipelineConfig, DEFAULT_IGNORE_DIRS};
use crate::core::lang::LanguageTable;
use crate::core::model::CatlsError;
use crate::core::render::OutputFormat;
use crate::flows::catalog::Catalog;

/// catls - list files and their contents as XML, JSON or Markdown.
#[derive(Parser, Debug)]
#[command(name = "catls")]
#[command(
    author,
    version,
    about,
    long_about = r#"catls lists the files under a directory and prints their contents in a
structured format that is easy to paste into an LLM prompt.

Output formats:
- xml (default): <files> root with one <file path="..."> per entry
- json: an array of file objects
- markdown: a heading and fenced code block per file

Examples:
    catls
    catls -r src
    catls -r . main.rs "*.toml"
    catls -r --globs "*.py" --pattern "*import*" -n
    catls -r -f markdown --omit-bins
"#
)]
pub struct Cli {
    /// Directory to list.
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Specific files to include (existing paths or glob patterns).
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Include hidden files.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Recursively list files in subdirectories.
    #[arg(short, long)]
    pub recursive: bool,

    /// Ignore directory DIR (can be used multiple times).
    #[arg(
        long = "ignore-dir",
        value_name = "DIR",
        value_delimiter = ',',
        default_values_t = DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub ignore_dir: Vec<String>,

    /// Only include files matching glob pattern (can be used multiple times).
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    pub globs: Vec<String>,

    /// Ignore files matching glob pattern (can be used multiple times).
    #[arg(long = "ignore-globs", value_name = "GLOB", value_delimiter = ',')]
    pub ignore_globs: Vec<String>,

    /// Only show lines matching glob PATTERN.
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Show line numbers.
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Skip binary files in output.
    #[arg(long)]
    pub omit_bins: bool,

    /// Output format: xml, json, markdown.
    #[arg(short, long, default_value = "xml", value_name = "FORMAT")]
    pub format: String,

    /// Display paths relative to this directory (default: scan directory).
    #[arg(long, value_name = "DIR")]
    pub relative_to: Option<PathBuf>,

    /// Detect binaries by null bytes only, without running `file`.
    #[arg(long)]
    pub no_file_command: bool,

    /// Enable debug output on stderr.
    #[arg(long, env = "CATLS_DEBUG")]
    pub debug: bool,

    /// Verbose mode (more diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve flags into a pipeline configuration
    pub fn to_config(&self) -> Result<PipelineConfig, CatlsError> {
        let format: OutputFormat = self.format.parse()?;

        let defaults = IgnoreDefaults {
            dirs: self.ignore_dir.clone(),
            ..IgnoreDefaults::default()
        };
        let mut cfg = PipelineConfig::new(&self.directory, defaults);

        cfg.files = self.files.clone();
        cfg.show_hidden = self.all;
        cfg.recursive = self.recursive;
        cfg.include_globs = self.globs.clone();
        cfg.exclude_globs = self.ignore_globs.clone();
        cfg.content_pattern = self.pattern.clone().filter(|p| !p.is_empty());
        cfg.show_line_numbers = self.line_numbers;
        cfg.omit_binaries = self.omit_bins;
        cfg.format = format;
        cfg.relative_to = self.relative_to.clone();
        cfg.use_file_command = !self.no_file_command;

        Ok(cfg)
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let cfg = cli.to_config()?;
    let mut catalog = Catalog::new(cfg, LanguageTable::default())?;
    debug!(root = %catalog.config().root.display(), format = %catalog.config().format, "starting catalog");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    catalog.run(&mut out)?;

    Ok(())
}
