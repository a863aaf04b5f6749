//! Language lookup tables
//!
//! Maps file extensions to detected types and detected types to the language
//! identifiers used for Markdown code fences. The tables are plain data handed
//! to the processor and the Markdown formatter, so callers may substitute them.

use std::collections::HashMap;
use std::path::Path;

/// Fence language used when nothing else resolves
pub const PLAIN_TEXT: &str = "text";

/// Extension → detected type
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("sh", "bash"),
    ("bash", "bash"),
    ("rb", "ruby"),
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("html", "html"),
    ("htm", "html"),
    ("nix", "nix"),
    ("css", "css"),
    ("scss", "scss"),
    ("sass", "scss"),
    ("json", "json"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("xml", "xml"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cxx", "cpp"),
    ("cc", "cpp"),
    ("hpp", "cpp"),
    ("hxx", "cpp"),
    ("toml", "toml"),
    ("java", "java"),
    ("rs", "rust"),
    ("go", "go"),
    ("php", "php"),
    ("pl", "perl"),
    ("sql", "sql"),
    ("templ", "go"),
    ("yml", "yaml"),
    ("yaml", "yaml"),
    ("dockerfile", "dockerfile"),
    ("makefile", "makefile"),
];

/// Detected type → fence language
const TYPE_LANGUAGES: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("ruby", "ruby"),
    ("python", "python"),
    ("javascript", "javascript"),
    ("typescript", "typescript"),
    ("html", "html"),
    ("nix", "nix"),
    ("css", "css"),
    ("scss", "scss"),
    ("sass", "scss"),
    ("json", "json"),
    ("markdown", "markdown"),
    ("xml", "xml"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("toml", "toml"),
    ("java", "java"),
    ("rust", "rust"),
    ("go", "go"),
    ("php", "php"),
    ("perl", "perl"),
    ("sql", "sql"),
    ("templ", "go"),
    ("yaml", "yaml"),
    ("dockerfile", "dockerfile"),
    ("makefile", "makefile"),
];

/// Extension → fence language, consulted when the type is unknown
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("rb", "ruby"),
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("html", "html"),
    ("htm", "html"),
    ("nix", "nix"),
    ("css", "css"),
    ("scss", "scss"),
    ("sass", "scss"),
    ("json", "json"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("xml", "xml"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cxx", "cpp"),
    ("cc", "cpp"),
    ("hpp", "cpp"),
    ("hxx", "cpp"),
    ("toml", "toml"),
    ("java", "java"),
    ("rs", "rust"),
    ("go", "go"),
    ("php", "php"),
    ("pl", "perl"),
    ("sql", "sql"),
    ("templ", "go"),
    ("yml", "yaml"),
    ("yaml", "yaml"),
    ("dockerfile", "dockerfile"),
    ("makefile", "makefile"),
    ("txt", "text"),
    ("", "text"),
];

/// Lower-cased extension without the dot, empty when there is none
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Lookup tables for type detection and highlight language resolution
#[derive(Debug, Clone)]
pub struct LanguageTable {
    extension_types: HashMap<String, String>,
    type_languages: HashMap<String, String>,
    extension_languages: HashMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::from_pairs(EXTENSION_TYPES, TYPE_LANGUAGES, EXTENSION_LANGUAGES)
    }
}

impl LanguageTable {
    pub fn from_pairs(
        extension_types: &[(&str, &str)],
        type_languages: &[(&str, &str)],
        extension_languages: &[(&str, &str)],
    ) -> Self {
        fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        Self {
            extension_types: to_map(extension_types),
            type_languages: to_map(type_languages),
            extension_languages: to_map(extension_languages),
        }
    }

    /// Detected type for a path, empty string when unrecognized
    pub fn type_for_path(&self, path: &Path) -> String {
        self.extension_types
            .get(&extension_of(path))
            .cloned()
            .unwrap_or_default()
    }

    /// Fence language: detected type first, then extension, then plain text
    pub fn language_for(&self, file_type: &str, path: &Path) -> &str {
        if !file_type.is_empty() {
            if let Some(lang) = self.type_languages.get(file_type) {
                return lang;
            }
        }

        self.extension_languages
            .get(&extension_of(path))
            .map(String::as_str)
            .unwrap_or(PLAIN_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_for_path_case_insensitive() {
        let table = LanguageTable::default();
        assert_eq!(table.type_for_path(Path::new("a.py")), "python");
        assert_eq!(table.type_for_path(Path::new("A.PY")), "python");
        assert_eq!(table.type_for_path(Path::new("src/lib.rs")), "rust");
        assert_eq!(table.type_for_path(Path::new("view.templ")), "go");
    }

    #[test]
    fn test_type_for_path_unknown() {
        let table = LanguageTable::default();
        assert_eq!(table.type_for_path(Path::new("b.bin")), "");
        assert_eq!(table.type_for_path(Path::new("README")), "");
    }

    #[test]
    fn test_language_prefers_detected_type() {
        let table = LanguageTable::default();
        assert_eq!(table.language_for("python", Path::new("weird.txt")), "python");
    }

    #[test]
    fn test_language_falls_back_to_extension() {
        let table = LanguageTable::default();
        assert_eq!(table.language_for("", Path::new("run.zsh")), "bash");
        assert_eq!(table.language_for("unmapped", Path::new("notes.txt")), "text");
        assert_eq!(table.language_for("", Path::new("Makefile")), "text");
    }

    #[test]
    fn test_language_default_plain_text() {
        let table = LanguageTable::default();
        assert_eq!(table.language_for("", Path::new("data.xyz")), PLAIN_TEXT);
    }

    #[test]
    fn test_substituted_table() {
        let table = LanguageTable::from_pairs(&[("foo", "foolang")], &[("foolang", "foo")], &[]);
        assert_eq!(table.type_for_path(Path::new("x.foo")), "foolang");
        assert_eq!(table.language_for("foolang", Path::new("x.foo")), "foo");
        assert_eq!(table.language_for("", Path::new("x.py")), PLAIN_TEXT);
    }
}
