//! Builder pattern API for a tempsweep run.
//!
//! ```rust,ignore
//! use tempsweep_core::prelude::*;
//!
//! let result = Tempsweep::new("/path/to/app")
//!     .package("chat_app")
//!     .critical_files(["main.dart", "session.dart"])
//!     .analyze()?;
//!
//! for a in result.by_tier(RiskTier::Safe) {
//!     println!("safe to delete: {}", a.path);
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::classify::FileCategory;
use crate::config::{detect_package_name, SweepConfig};
use crate::extract::ImportExtractor;
use crate::graph::{build_graph, CategorizedFiles, DependencyGraph, SkippedFile};
use crate::plan::{build_plan, DeletionPlan};
use crate::risk::{RiskAssessment, RiskClassifier, RiskTier};
use crate::scan::{gather_source_files_with_excludes, resolve_source_root};

/// Builder for configuring an analysis run.
#[derive(Debug, Clone)]
pub struct Tempsweep {
    /// Project root (the directory containing the source subdirectory)
    root: PathBuf,

    /// Resolved configuration
    config: SweepConfig,

    /// Read `pubspec.yaml` when no package name is configured
    detect_package: bool,
}

impl Tempsweep {
    /// Create a new analysis builder with default configuration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: SweepConfig::default(),
            detect_package: true,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    /// Source subdirectory under the root (default `lib`).
    pub fn source_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    /// Source file extension (default `dart`).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extension = ext.into();
        self
    }

    /// The project's own package name, stripped from `package:` imports.
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.config.package = Some(name.into());
        self
    }

    /// Enable or disable reading the package name from `pubspec.yaml`.
    pub fn detect_package(mut self, enabled: bool) -> Self {
        self.detect_package = enabled;
        self
    }

    /// Replace the ordered temporary-name patterns.
    pub fn temp_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.temp_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the critical filename set.
    pub fn critical_files(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.critical_files = names.into_iter().map(Into::into).collect();
        self
    }

    /// Production importers above which a file is High risk.
    pub fn high_threshold(mut self, threshold: usize) -> Self {
        self.config.policy.high_threshold = threshold;
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.exclude_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the analysis: validate, scan once, classify every temporary file.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Preconditions (the only fatal checks)
        self.config.validate()?;
        let source_root = resolve_source_root(&self.root, &self.config.source_dir)?;

        let package = self.config.package.clone().or_else(|| {
            if self.detect_package {
                detect_package_name(&self.root)
            } else {
                None
            }
        });

        // 2. Discover files
        let excludes: Vec<&str> = self.config.exclude_dirs.iter().map(String::as_str).collect();
        let discovered =
            gather_source_files_with_excludes(&source_root, &self.config.extension, &excludes);
        info!(root = %source_root.display(), files = discovered.len(), "discovered source files");

        // 3. Build the graph in one pass
        let classifier = self.config.classifier();
        let extractor = ImportExtractor::new(package.as_deref())
            .context("Failed to compile import pattern")?;
        let scan = build_graph(&discovered, &classifier, &extractor);

        // 4. Classify every temporary file
        let critical = self.config.critical_set();
        let risk = RiskClassifier::new(&classifier, &critical, self.config.policy);
        let assessments: Vec<RiskAssessment> = scan
            .files
            .temporary()
            .map(|path| risk.assess(path, &scan.graph))
            .collect();

        Ok(AnalysisResult {
            root: self.root.clone(),
            source_root,
            package,
            files: scan.files,
            graph: scan.graph,
            assessments,
            skipped: scan.skipped,
            scanned: scan.scanned,
            config: self.config.clone(),
        })
    }
}

/// Result of one analysis run. Read-only once built.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Project root that was analyzed
    pub root: PathBuf,

    /// Directory that was walked
    pub source_root: PathBuf,

    /// Package prefix stripped from imports, if any
    pub package: Option<String>,

    /// Scanned files by category
    pub files: CategorizedFiles,

    /// Import graph
    pub graph: DependencyGraph,

    /// One entry per temporary file, in category-then-scan order
    pub assessments: Vec<RiskAssessment>,

    /// Files that could not be read
    pub skipped: Vec<SkippedFile>,

    /// Number of source files visited
    pub scanned: usize,

    /// Configuration the run used
    pub config: SweepConfig,
}

impl AnalysisResult {
    /// Assessments of one tier, in assessment order.
    pub fn by_tier(&self, tier: RiskTier) -> Vec<&RiskAssessment> {
        self.assessments.iter().filter(|a| a.tier == tier).collect()
    }

    /// Assessment for a path, if it is a temporary file.
    pub fn assessment(&self, path: &str) -> Option<&RiskAssessment> {
        self.assessments.iter().find(|a| a.path == path)
    }

    /// Count of files per tier; every tier present, zero when empty.
    pub fn tier_counts(&self) -> BTreeMap<RiskTier, usize> {
        let mut counts: BTreeMap<RiskTier, usize> = RiskTier::ALL.iter().map(|&t| (t, 0)).collect();
        for a in &self.assessments {
            *counts.entry(a.tier).or_default() += 1;
        }
        counts
    }

    /// Count of temporary files per category.
    pub fn category_counts(&self) -> BTreeMap<FileCategory, usize> {
        FileCategory::TEMPORARY
            .iter()
            .map(|&c| (c, self.files.count(c)))
            .collect()
    }

    pub fn temporary_count(&self) -> usize {
        self.assessments.len()
    }

    /// Phased deletion plan using the run's verify command.
    pub fn plan(&self) -> DeletionPlan {
        build_plan(&self.assessments, &self.config.verify_command)
    }

    /// Whether any temporary file can go without touching other code.
    pub fn has_safe_deletions(&self) -> bool {
        self.assessments.iter().any(|a| a.tier == RiskTier::Safe)
    }
}
