//! Catalog flow
//!
//! Validates the configuration, scans the root, then streams every admitted
//! file through the processor and the active formatter.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

use crate::backends::binary::detector_for;
use crate::backends::filter::FileFilter;
use crate::backends::process::{ExtensionTypeDetector, FileProcessor};
use crate::backends::scan::Scanner;
use crate::core::cancel::CancellationToken;
use crate::core::config::PipelineConfig;
use crate::core::lang::LanguageTable;
use crate::core::model::{CatlsError, FileRecord};
use crate::core::render::{formatter_for, Formatter};

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogSummary {
    /// Files found by the scan (or handed in)
    pub discovered: usize,
    /// Files that passed the filter and were rendered
    pub rendered: usize,
}

/// The scan → filter → process → render pipeline
pub struct Catalog {
    cfg: PipelineConfig,
    scanner: Scanner,
    filter: FileFilter,
    processor: FileProcessor,
    formatter: Box<dyn Formatter>,
    cancel: CancellationToken,
}

impl Catalog {
    /// Resolve file arguments and compile the filter. Bad globs fail here,
    /// before anything is written.
    pub fn new(mut cfg: PipelineConfig, languages: LanguageTable) -> Result<Self, CatlsError> {
        cfg.normalize_ignore_dirs();
        cfg.add_files_to_globs();

        let filter = FileFilter::new(&cfg)?;

        Ok(Self {
            scanner: Scanner::new(detector_for(cfg.use_file_command)),
            filter,
            processor: FileProcessor::new(Box::new(ExtensionTypeDetector::new(languages.clone()))),
            formatter: formatter_for(cfg.format, languages),
            cancel: CancellationToken::new(),
            cfg,
        })
    }

    /// Replace the scanner (e.g. to use a different binary detector)
    #[allow(dead_code)]
    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Token observed by every loop of the pipeline
    #[allow(dead_code)]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Scan the root and render everything that qualifies
    pub fn run(&mut self, out: &mut dyn Write) -> Result<CatalogSummary> {
        self.validate()?;

        debug!(ignore_dirs = ?self.cfg.ignore_dirs, "ignoring directories");

        let files = self
            .scanner
            .scan(&self.cfg, &self.cancel)
            .context("failed to scan files")?;

        if files.is_empty() {
            writeln!(out, "No files found in directory: {}", self.cfg.root.display())?;
            return Ok(CatalogSummary::default());
        }

        self.render(&files, out)
    }

    /// Render a pre-selected set of files, skipping the scan
    #[allow(dead_code)]
    pub fn run_with_files(
        &mut self,
        files: &[FileRecord],
        out: &mut dyn Write,
    ) -> Result<CatalogSummary> {
        if files.is_empty() {
            writeln!(out, "No files selected.")?;
            return Ok(CatalogSummary::default());
        }

        self.render(files, out)
    }

    fn validate(&self) -> Result<(), CatlsError> {
        let root = &self.cfg.root;
        if !root.exists() {
            return Err(CatlsError::DirectoryNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(CatlsError::NotADirectory(root.clone()));
        }
        Ok(())
    }

    fn render(&mut self, files: &[FileRecord], out: &mut dyn Write) -> Result<CatalogSummary> {
        let mut summary = CatalogSummary {
            discovered: files.len(),
            rendered: 0,
        };

        self.formatter
            .write_header(out, &self.cancel)
            .context("failed to write output header")?;

        for file in files {
            self.cancel.check()?;

            if !self.filter.should_include(file) {
                continue;
            }

            let processed = self.processor.process(file, &self.filter);

            self.formatter
                .write_file(out, &processed, &self.cfg, &self.cancel)
                .with_context(|| format!("failed to write file {}", file.rel_path))?;
            summary.rendered += 1;
        }

        self.formatter
            .write_footer(out, &self.cancel)
            .context("failed to write output footer")?;
        out.flush()?;

        info!(
            discovered = summary.discovered,
            rendered = summary.rendered,
            "catalog complete"
        );
        Ok(summary)
    }
}
