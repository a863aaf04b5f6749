//! File and content filtering
//!
//! Path admission uses include/exclude glob sets matched against relative paths;
//! content admission keeps lines matching an optional whole-line glob.

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::core::config::PipelineConfig;
use crate::core::model::{CatlsError, FileRecord, FilteredLine};
use crate::core::paths::path_suffixes;

/// Compiled filter rules for one run
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
    content_pattern: Option<GlobMatcher>,
    omit_binaries: bool,
}

impl FileFilter {
    /// Compile the config's globs; an invalid glob is a configuration error
    pub fn new(cfg: &PipelineConfig) -> Result<Self, CatlsError> {
        let include = if cfg.include_globs.is_empty() {
            None
        } else {
            Some(build_globset(&cfg.include_globs)?)
        };
        let exclude = build_globset(&cfg.all_exclude_globs())?;

        let content_pattern = cfg
            .content_pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|pattern| {
                GlobBuilder::new(pattern)
                    .literal_separator(false)
                    .build()
                    .map(|glob| glob.compile_matcher())
                    .map_err(|source| CatlsError::InvalidGlob {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .transpose()?;

        Ok(Self {
            include,
            exclude,
            content_pattern,
            omit_binaries: cfg.omit_binaries,
        })
    }

    /// Whether a content pattern is active
    pub fn has_content_pattern(&self) -> bool {
        self.content_pattern.is_some()
    }

    /// Include-globs admit, exclude-globs veto, and binaries drop out under omit-binaries
    pub fn should_include(&self, record: &FileRecord) -> bool {
        if let Some(include) = &self.include {
            if !matches_any_suffix(include, &record.rel_path) {
                debug!(path = %record.rel_path, "no include glob matched");
                return false;
            }
        }

        if matches_any_suffix(&self.exclude, &record.rel_path) {
            debug!(path = %record.rel_path, "excluded by glob");
            return false;
        }

        if self.omit_binaries && record.is_binary {
            debug!(path = %record.rel_path, "omitting binary file");
            return false;
        }

        true
    }

    /// Keep lines matching the content pattern, numbered from 1 in original order
    pub fn filter_content(&self, lines: Vec<String>) -> Vec<FilteredLine> {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| match &self.content_pattern {
                Some(matcher) => matcher.is_match(line.as_str()),
                None => true,
            })
            .map(|(i, line)| FilteredLine::new(i + 1, line))
            .collect()
    }
}

/// Path globs where `*` stays within one path component
fn build_globset(patterns: &[String]) -> Result<GlobSet, CatlsError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| CatlsError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }

    builder.build().map_err(|source| CatlsError::InvalidGlob {
        pattern: patterns.join(","),
        source,
    })
}

/// Match the relative path or any component-aligned suffix of it
fn matches_any_suffix(set: &GlobSet, rel_path: &str) -> bool {
    path_suffixes(rel_path).any(|suffix| set.is_match(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::IgnoreDefaults;

    fn record(rel: &str, is_binary: bool) -> FileRecord {
        FileRecord::new(format!("/root/{}", rel), rel, is_binary)
    }

    fn config() -> PipelineConfig {
        PipelineConfig::new("/root", IgnoreDefaults::default())
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_globs_admits_everything_but_defaults() {
        let filter = FileFilter::new(&config()).unwrap();
        assert!(filter.should_include(&record("src/main.rs", false)));
        assert!(filter.should_include(&record("b.bin", true)));
        assert!(!filter.should_include(&record("LICENSE", false)));
        assert!(!filter.should_include(&record("pkg/LICENSE.md", false)));
        assert!(!filter.should_include(&record(".git/config", false)));
        assert!(!filter.should_include(&record("app/__pycache__/mod.pyc", true)));
        assert!(!filter.should_include(&record("views/page_templ.go", false)));
    }

    #[test]
    fn test_include_globs() {
        let mut cfg = config();
        cfg.include_globs = vec!["*.py".to_string()];
        let filter = FileFilter::new(&cfg).unwrap();

        assert!(filter.should_include(&record("a.py", false)));
        assert!(filter.should_include(&record("pkg/b.py", false)));
        assert!(!filter.should_include(&record("a.rs", false)));
    }

    #[test]
    fn test_include_glob_with_directory() {
        let mut cfg = config();
        cfg.include_globs = vec!["src/*.rs".to_string()];
        let filter = FileFilter::new(&cfg).unwrap();

        assert!(filter.should_include(&record("src/main.rs", false)));
        assert!(!filter.should_include(&record("src/core/model.rs", false)));
        assert!(!filter.should_include(&record("main.rs", false)));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let mut cfg = config();
        cfg.include_globs = vec!["*.py".to_string()];
        cfg.exclude_globs = vec!["test_*.py".to_string()];
        let filter = FileFilter::new(&cfg).unwrap();

        assert!(filter.should_include(&record("app.py", false)));
        assert!(!filter.should_include(&record("test_app.py", false)));
    }

    #[test]
    fn test_omit_binaries() {
        let mut cfg = config();
        cfg.omit_binaries = true;
        let filter = FileFilter::new(&cfg).unwrap();

        assert!(filter.should_include(&record("a.py", false)));
        assert!(!filter.should_include(&record("b.bin", true)));
    }

    #[test]
    fn test_invalid_glob_is_error() {
        let mut cfg = config();
        cfg.include_globs = vec!["[unclosed".to_string()];
        let err = FileFilter::new(&cfg).unwrap_err();
        assert!(matches!(err, CatlsError::InvalidGlob { .. }));
    }

    #[test]
    fn test_filter_content_without_pattern_keeps_all() {
        let filter = FileFilter::new(&config()).unwrap();
        let result = filter.filter_content(lines(&["one", "two", "three"]));

        assert_eq!(
            result,
            vec![
                FilteredLine::new(1, "one"),
                FilteredLine::new(2, "two"),
                FilteredLine::new(3, "three"),
            ]
        );
    }

    #[test]
    fn test_filter_content_keeps_original_numbers() {
        let mut cfg = config();
        cfg.content_pattern = Some("*TODO*".to_string());
        let filter = FileFilter::new(&cfg).unwrap();
        assert!(filter.has_content_pattern());

        let result = filter.filter_content(lines(&[
            "fn main() {",
            "    // TODO: fix",
            "}",
            "// TODO/FIXME: later",
        ]));

        assert_eq!(
            result,
            vec![
                FilteredLine::new(2, "    // TODO: fix"),
                FilteredLine::new(4, "// TODO/FIXME: later"),
            ]
        );
    }

    #[test]
    fn test_filter_content_whole_line_match() {
        let mut cfg = config();
        cfg.content_pattern = Some("import *".to_string());
        let filter = FileFilter::new(&cfg).unwrap();

        let result = filter.filter_content(lines(&["import os", "  import sys", "x = 1"]));
        assert_eq!(result, vec![FilteredLine::new(1, "import os")]);
    }

    #[test]
    fn test_empty_pattern_is_inactive() {
        let mut cfg = config();
        cfg.content_pattern = Some(String::new());
        let filter = FileFilter::new(&cfg).unwrap();
        assert!(!filter.has_content_pattern());
    }
}
