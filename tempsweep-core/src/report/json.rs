//! Machine-readable report document.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::builder::AnalysisResult;
use crate::classify::FileCategory;
use crate::graph::DependencyGraph;
use crate::plan::DeletionPlan;
use crate::risk::{RiskAssessment, RiskTier};

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub root: String,
    pub source_root: String,
    pub package: Option<String>,
    pub summary: JsonSummary,
    /// Keyed by tier label (`SAFE` .. `CRITICAL`), every tier present
    pub files_by_risk: BTreeMap<&'static str, Vec<JsonFile>>,
    pub skipped: Vec<JsonSkipped>,
    pub plan: DeletionPlan,
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Temporary files analyzed
    pub total_files: usize,
    pub scanned_files: usize,
    pub production_files: usize,
    pub by_category: BTreeMap<&'static str, usize>,
    pub by_risk: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Serialize)]
pub struct JsonFile {
    pub path: String,
    pub imported_by: Vec<String>,
    pub imports: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonSkipped {
    pub path: String,
    pub reason: String,
}

impl JsonFile {
    fn from_assessment(a: &RiskAssessment, graph: &DependencyGraph) -> Self {
        Self {
            path: a.path.clone(),
            imported_by: a.importers.clone(),
            imports: graph.imports_of(&a.path).into_iter().map(String::from).collect(),
        }
    }
}

impl JsonReport {
    pub fn new(result: &AnalysisResult, plan: &DeletionPlan, generated_at: String) -> Self {
        let by_category: BTreeMap<&'static str, usize> = FileCategory::TEMPORARY
            .iter()
            .map(|&c| (c.key(), result.files.count(c)))
            .collect();
        let by_risk: BTreeMap<&'static str, usize> = result
            .tier_counts()
            .into_iter()
            .map(|(tier, n)| (tier.key(), n))
            .collect();

        let files_by_risk: BTreeMap<&'static str, Vec<JsonFile>> = RiskTier::ALL
            .iter()
            .map(|&tier| {
                let files: Vec<JsonFile> = result
                    .by_tier(tier)
                    .into_iter()
                    .map(|a| JsonFile::from_assessment(a, &result.graph))
                    .collect();
                (tier.label(), files)
            })
            .collect();

        Self {
            generated_at,
            root: result.root.display().to_string(),
            source_root: result.source_root.display().to_string(),
            package: result.package.clone(),
            summary: JsonSummary {
                total_files: result.temporary_count(),
                scanned_files: result.scanned,
                production_files: result.files.count(FileCategory::Production),
                by_category,
                by_risk,
            },
            files_by_risk,
            skipped: result
                .skipped
                .iter()
                .map(|s| JsonSkipped {
                    path: s.path.clone(),
                    reason: s.reason.clone(),
                })
                .collect(),
            plan: plan.clone(),
        }
    }
}

/// Render the report as pretty-printed JSON.
pub fn render_json(result: &AnalysisResult, plan: &DeletionPlan) -> serde_json::Result<String> {
    let report = JsonReport::new(result, plan, chrono::Utc::now().to_rfc3339());
    serde_json::to_string_pretty(&report)
}
