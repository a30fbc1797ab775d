//! Output formatting: console text, JSON document, markdown document.
//!
//! Renderers return strings; only [`write_reports`] touches the filesystem.

mod console;
mod json;
mod markdown;

pub use console::{render_console, render_scan_summary};
pub use json::{render_json, JsonFile, JsonReport, JsonSkipped, JsonSummary};
pub use markdown::render_markdown;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::AnalysisResult;
use crate::plan::DeletionPlan;

/// Base name shared by the written report files.
pub const REPORT_BASENAME: &str = "DEPENDENCY_ANALYSIS";

/// Paths of the report files written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Write `DEPENDENCY_ANALYSIS.json` and `DEPENDENCY_ANALYSIS.md` into `dir`,
/// creating it if needed.
pub fn write_reports(
    result: &AnalysisResult,
    plan: &DeletionPlan,
    dir: &Path,
) -> Result<WrittenReports> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let json_path = dir.join(format!("{}.json", REPORT_BASENAME));
    let json = render_json(result, plan).context("Failed to serialize JSON report")?;
    fs::write(&json_path, json)
        .with_context(|| format!("Failed to write: {}", json_path.display()))?;

    let md_path = dir.join(format!("{}.md", REPORT_BASENAME));
    fs::write(&md_path, render_markdown(result, plan))
        .with_context(|| format!("Failed to write: {}", md_path.display()))?;

    tracing::info!(json = %json_path.display(), markdown = %md_path.display(), "reports written");

    Ok(WrittenReports {
        json: json_path,
        markdown: md_path,
    })
}
