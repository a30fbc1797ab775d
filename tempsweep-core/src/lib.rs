//! tempsweep-core: decide which temporary source files can be deleted.
//!
//! Temporary files are recognized by name (`debug_`, `test_`, `fix_`, ...).
//! The library scans a source tree once, builds a cross-file import graph
//! from textual `import` statements, and assigns every temporary file a
//! deletion-risk tier from its direct importers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tempsweep_core::prelude::*;
//!
//! let result = Tempsweep::new("/path/to/app").analyze()?;
//! let plan = result.plan();
//! print!("{}", render_console(&result, &plan, &result.config.limits));
//! ```
//!
//! # Module Organization
//!
//! - [`classify`]: ordered filename rule table
//! - [`extract`]: regex-based import extraction
//! - [`scan`]: deterministic file discovery
//! - [`graph`]: edge arena with imports / imported-by views
//! - [`risk`]: risk tiers and the classifier
//! - [`plan`]: phased deletion plan
//! - [`report`]: console, JSON and markdown output
//! - [`builder`]: fluent entry point tying the pieces together
//!
//! # Cargo Features
//!
//! - `dot` (default): Graphviz DOT export

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod logging;
pub mod plan;
pub mod prelude;
pub mod report;
pub mod risk;
pub mod scan;

#[cfg(feature = "dot")]
pub mod visualize;

// Error types
pub use error::{IoResultExt, SweepError, SweepResult};

// Builder API
pub use builder::{AnalysisResult, Tempsweep};

// Classification
pub use classify::{CategoryRule, FileCategory, FileClassifier, MatchKind, DEFAULT_TEMP_PATTERNS};

// Configuration
pub use config::{
    detect_package_name, load_config, OutputConfig, ReportLimits, RiskConfig, SweepConfig,
    TempsweepConfig, CONFIG_FILE,
};

// Extraction
pub use extract::{normalize_identifier, ExtractOutcome, ImportExtractor};

// Graph building
pub use graph::{
    build_graph, file_name_of, CategorizedFiles, DependencyGraph, ImportEdge, ScanOutput,
    SkippedFile, SourceFile,
};

// Logging
pub use logging::{init_structured_logging, LogFormat};

// Planning
pub use plan::{build_plan, verification_for, DeletionPlan, Phase, PHASE_TIERS};

// Reporting
pub use report::{
    render_console, render_json, render_markdown, render_scan_summary, write_reports, JsonReport,
    WrittenReports, REPORT_BASENAME,
};

// Risk
pub use risk::{
    CriticalFileSet, RiskAssessment, RiskClassifier, RiskPolicy, RiskTier, DEFAULT_CRITICAL_FILES,
};

// File scanning
pub use scan::{
    gather_source_files, gather_source_files_with_excludes, resolve_source_root, DiscoveredFile,
};

#[cfg(feature = "dot")]
pub use visualize::generate_dot;

#[cfg(test)]
mod tests;
