//! Bidirectional import graph.
//!
//! Edges live in one append-only arena. The `imports` and `imported_by`
//! views only store arena indices, and both are updated by the same
//! [`DependencyGraph::record`] call, so the two directions cannot drift
//! apart. Imported identifiers are kept verbatim (normalized separators);
//! they need not name a scanned file.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::classify::{FileCategory, FileClassifier};
use crate::extract::{ExtractOutcome, ImportExtractor};
use crate::scan::DiscoveredFile;

/// Directed reference from a scanned file to an imported identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub importer: String,
    pub imported: String,
}

/// Import graph with both directions indexed over a shared edge arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: Vec<ImportEdge>,
    imports: BTreeMap<String, Vec<usize>>,
    imported_by: BTreeMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Build a graph from an edge stream. Order of the stream is the order
    /// both views report.
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut graph = Self::default();
        for (importer, imported) in edges {
            graph.record(importer.into(), imported.into());
        }
        graph
    }

    fn record(&mut self, importer: String, imported: String) {
        let idx = self.edges.len();
        self.imports.entry(importer.clone()).or_default().push(idx);
        self.imported_by.entry(imported.clone()).or_default().push(idx);
        self.edges.push(ImportEdge { importer, imported });
    }

    /// Record every import of one file. Callers pass the complete list, so
    /// a file never contributes a partial edge set.
    fn record_file(&mut self, importer: &str, imports: Vec<String>) {
        for imported in imports {
            self.record(importer.to_string(), imported);
        }
    }

    /// Identifiers imported by `path`, in first-seen order with duplicates.
    pub fn imports_of(&self, path: &str) -> Vec<&str> {
        self.imports
            .get(path)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].imported.as_str()).collect())
            .unwrap_or_default()
    }

    /// Paths importing `identifier`, in scan order, once per import statement.
    pub fn importers_of(&self, identifier: &str) -> Vec<&str> {
        self.imported_by
            .get(identifier)
            .map(|idxs| idxs.iter().map(|&i| self.edges[i].importer.as_str()).collect())
            .unwrap_or_default()
    }

    /// All edges in recording order.
    pub fn edges(&self) -> &[ImportEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Materialized `path -> imports` view.
    pub fn imports_map(&self) -> BTreeMap<&str, Vec<&str>> {
        self.imports
            .keys()
            .map(|k| (k.as_str(), self.imports_of(k)))
            .collect()
    }

    /// Materialized `identifier -> importers` view.
    pub fn imported_by_map(&self) -> BTreeMap<&str, Vec<&str>> {
        self.imported_by
            .keys()
            .map(|k| (k.as_str(), self.importers_of(k)))
            .collect()
    }
}

/// A scanned file with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source root
    pub path: String,
    pub filename: String,
    pub category: FileCategory,
}

/// Scanned files bucketed by category, each bucket in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedFiles {
    pub debug: Vec<String>,
    pub test: Vec<String>,
    pub fix: Vec<String>,
    pub other: Vec<String>,
    pub production: Vec<String>,
}

impl CategorizedFiles {
    fn push(&mut self, file: &SourceFile) {
        self.bucket_mut(file.category).push(file.path.clone());
    }

    fn bucket_mut(&mut self, category: FileCategory) -> &mut Vec<String> {
        match category {
            FileCategory::Debug => &mut self.debug,
            FileCategory::Test => &mut self.test,
            FileCategory::Fix => &mut self.fix,
            FileCategory::OtherTemporary => &mut self.other,
            FileCategory::Production => &mut self.production,
        }
    }

    /// Files of one category.
    pub fn bucket(&self, category: FileCategory) -> &[String] {
        match category {
            FileCategory::Debug => &self.debug,
            FileCategory::Test => &self.test,
            FileCategory::Fix => &self.fix,
            FileCategory::OtherTemporary => &self.other,
            FileCategory::Production => &self.production,
        }
    }

    /// Temporary files: debug, then test, then fix, then other.
    pub fn temporary(&self) -> impl Iterator<Item = &str> {
        self.debug
            .iter()
            .chain(&self.test)
            .chain(&self.fix)
            .chain(&self.other)
            .map(String::as_str)
    }

    pub fn temporary_count(&self) -> usize {
        self.debug.len() + self.test.len() + self.fix.len() + self.other.len()
    }

    pub fn count(&self, category: FileCategory) -> usize {
        self.bucket(category).len()
    }
}

/// A file the scan could not read; it contributed no edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Everything produced by one pass over the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub graph: DependencyGraph,
    pub files: CategorizedFiles,
    pub skipped: Vec<SkippedFile>,
    pub scanned: usize,
}

/// Single sequential pass: classify each file by name, extract its imports
/// and record them. Unreadable files are still categorized (the category
/// depends only on the name) but add no edges.
pub fn build_graph(
    files: &[DiscoveredFile],
    classifier: &FileClassifier,
    extractor: &ImportExtractor,
) -> ScanOutput {
    let mut out = ScanOutput::default();

    for discovered in files {
        let file = SourceFile {
            path: discovered.relative.clone(),
            filename: discovered.filename.clone(),
            category: classifier.classify(&discovered.filename),
        };
        out.files.push(&file);
        out.scanned += 1;

        match extractor.extract_file(&discovered.path) {
            ExtractOutcome::Imports(imports) => {
                debug!(
                    path = %file.path,
                    category = %file.category,
                    imports = imports.len(),
                    "scanned"
                );
                out.graph.record_file(&file.path, imports);
            }
            ExtractOutcome::Skipped { path, reason } => {
                warn!(
                    path = %path.display(),
                    reason = %reason,
                    "skipping file during import analysis"
                );
                out.skipped.push(SkippedFile {
                    path: file.path.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        scanned = out.scanned,
        temporary = out.files.temporary_count(),
        edges = out.graph.edge_count(),
        skipped = out.skipped.len(),
        "scan complete"
    );

    out
}

/// Final path component of a relative path, as used for classification
/// and critical-file lookups.
pub fn file_name_of(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
