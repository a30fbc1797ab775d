//! Tolerant import extraction.
//!
//! No grammar is parsed. A single regex finds `import '<path>'` statements
//! (single or double quotes), optionally stripping the project's own
//! `package:<name>/` marker so that package imports and lib-relative paths
//! compare equal. Imports in comments or strings are picked up too; the
//! analysis tolerates those false positives.
//!
//! Extraction never fails the scan. A file that cannot be read or decoded
//! yields [`ExtractOutcome::Skipped`] and contributes zero edges.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{SweepError, SweepResult};

/// Files larger than this are skipped instead of read (10 MB).
const MAX_FILE_SIZE: u64 = 10_000_000;

/// Normalize an import identifier to the host's canonical separator.
///
/// Both `/` and `\` are mapped, so a path written either way compares
/// equal to the relative paths produced by the directory walk.
#[inline]
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Result of extracting imports from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Imports in first-seen order, duplicates preserved
    Imports(Vec<String>),
    /// File could not be read or decoded; reason for the warning
    Skipped { path: PathBuf, reason: String },
}

/// Regex-backed import extractor, compiled once per run.
#[derive(Debug, Clone)]
pub struct ImportExtractor {
    pattern: Regex,
    package: Option<String>,
}

impl ImportExtractor {
    /// Create an extractor. `package` is the project's own package name;
    /// when set, a leading `package:<name>/` is stripped from identifiers.
    pub fn new(package: Option<&str>) -> SweepResult<Self> {
        let package = package.map(str::trim).filter(|p| !p.is_empty());
        let source = match package {
            Some(name) => format!(
                r#"import\s+['"](?:package:{}/)?([^'"]+)['"]"#,
                regex::escape(name)
            ),
            None => r#"import\s+['"]([^'"]+)['"]"#.to_string(),
        };
        let pattern = Regex::new(&source)
            .map_err(|e| SweepError::invalid_argument(format!("import pattern: {}", e)))?;

        Ok(Self {
            pattern,
            package: package.map(String::from),
        })
    }

    /// The package name whose prefix is stripped, if any.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Extract normalized imported identifiers from file contents.
    pub fn extract_imports(&self, contents: &str) -> Vec<String> {
        self.pattern
            .captures_iter(contents)
            .filter_map(|c| c.get(1))
            .map(|m| normalize_identifier(m.as_str()))
            .collect()
    }

    /// Read a file and extract its imports. All-or-nothing: on any read or
    /// decode failure the outcome is `Skipped` and no identifiers are
    /// returned.
    pub fn extract_file(&self, path: &Path) -> ExtractOutcome {
        let skipped = |reason: String| ExtractOutcome::Skipped {
            path: path.to_path_buf(),
            reason,
        };

        match fs::metadata(path) {
            Ok(meta) if meta.len() > MAX_FILE_SIZE => {
                return skipped(format!(
                    "file too large ({} bytes, max {})",
                    meta.len(),
                    MAX_FILE_SIZE
                ));
            }
            Ok(_) => {}
            Err(e) => return skipped(format!("I/O error: {}", e)),
        }

        match fs::read_to_string(path) {
            Ok(contents) => ExtractOutcome::Imports(self.extract_imports(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                skipped("content is not valid UTF-8".to_string())
            }
            Err(e) => skipped(format!("I/O error: {}", e)),
        }
    }
}

impl Default for ImportExtractor {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r#"import\s+['"]([^'"]+)['"]"#)
                .expect("Hardcoded regex pattern is valid"),
            package: None,
        }
    }
}
