//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use tempsweep_core::prelude::*;
//! ```

// Entry point and results
pub use crate::builder::{AnalysisResult, Tempsweep};
pub use crate::error::{SweepError, SweepResult};

// Core model
pub use crate::classify::{FileCategory, FileClassifier};
pub use crate::graph::DependencyGraph;
pub use crate::risk::{CriticalFileSet, RiskAssessment, RiskClassifier, RiskPolicy, RiskTier};

// Configuration
pub use crate::config::{ReportLimits, SweepConfig};

// Planning and output
pub use crate::plan::{DeletionPlan, Phase};
pub use crate::report::{render_console, render_json, render_markdown, write_reports};
