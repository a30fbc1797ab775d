//! Console report: scan summary, per-tier detail, deletion plan.

use std::fmt::Write;

use crate::builder::AnalysisResult;
use crate::classify::FileCategory;
use crate::config::ReportLimits;
use crate::plan::DeletionPlan;
use crate::risk::RiskTier;

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

/// Counts printed right after the scan.
pub fn render_scan_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();
    if let Err(e) = write_scan_summary(&mut out, result) {
        tracing::error!(error = %e, "failed to format scan summary");
    }
    out
}

fn write_scan_summary(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "Scan complete: {} file(s) in {}", result.scanned, result.source_root.display())?;
    for category in FileCategory::TEMPORARY {
        writeln!(out, "   - {} files: {}", category, result.files.count(category))?;
    }
    writeln!(out, "   - production files: {}", result.files.count(FileCategory::Production))?;
    if !result.skipped.is_empty() {
        writeln!(out, "   - unreadable (skipped): {}", result.skipped.len())?;
    }
    Ok(())
}

/// Full console report: risk summary, per-file detail and the plan.
pub fn render_console(
    result: &AnalysisResult,
    plan: &DeletionPlan,
    limits: &ReportLimits,
) -> String {
    let mut out = String::with_capacity(8192);
    if let Err(e) = write_console(&mut out, result, plan, limits) {
        tracing::error!(error = %e, "failed to format console report");
    }
    out
}

fn write_console(
    out: &mut String,
    result: &AnalysisResult,
    plan: &DeletionPlan,
    limits: &ReportLimits,
) -> std::fmt::Result {
    writeln!(out, "\n{}\nDEPENDENCY ANALYSIS REPORT\n{}", RULE, RULE)?;

    writeln!(out, "\nSummary by risk tier:")?;
    for (tier, n) in result.tier_counts() {
        writeln!(out, "   {:<9} {:<16} {} file(s)", tier.label(), tier.description(), n)?;
    }

    for tier in RiskTier::ALL {
        let files = {
            let mut v = result.by_tier(tier);
            v.sort_by(|a, b| a.path.cmp(&b.path));
            v
        };
        if files.is_empty() {
            continue;
        }
        writeln!(out, "\n[{}] {} file(s):\n{}", tier, files.len(), THIN_RULE)?;

        for a in files {
            writeln!(out, "\n   {}", a.path)?;
            if a.is_isolated() {
                writeln!(out, "      not imported by any file (isolated)")?;
                continue;
            }
            writeln!(out, "      imported by {} file(s):", a.importers.len())?;
            for imp in a.importers.iter().take(limits.importer_preview) {
                let marker = if a.critical_importers.contains(imp) {
                    "  [CRITICAL]"
                } else if a.production_importers.contains(imp) {
                    "  [PRODUCTION]"
                } else {
                    ""
                };
                writeln!(out, "         - {}{}", imp, marker)?;
            }
            if a.importers.len() > limits.importer_preview {
                writeln!(
                    out,
                    "         ... and {} more",
                    a.importers.len() - limits.importer_preview
                )?;
            }
        }
    }

    writeln!(out, "\n{}\nRECOMMENDED DELETION PLAN\n{}", RULE, RULE)?;
    for phase in &plan.phases {
        writeln!(out, "\nPHASE {}: {}", phase.number, phase.title.to_uppercase())?;
        writeln!(out, "Risk: {} | Verify: {}", phase.tier, phase.verification)?;
        writeln!(out, "Total: {} file(s)", phase.files.len())?;
        let (shown, rest) = phase.preview(limits.phase_preview);
        for f in shown {
            writeln!(out, "   * {}", f)?;
        }
        if rest > 0 {
            writeln!(out, "   ... and {} more file(s)", rest)?;
        }
    }

    if !plan.do_not_delete.is_empty() {
        writeln!(out, "\n{}\nCRITICAL FILES - DO NOT DELETE\n{}", RULE, RULE)?;
        for f in &plan.do_not_delete {
            writeln!(out, "   {}", f)?;
        }
    }

    if !result.skipped.is_empty() {
        writeln!(out, "\nUnreadable files (no imports recorded):")?;
        for s in &result.skipped {
            writeln!(out, "   - {}: {}", s.path, s.reason)?;
        }
    }

    Ok(())
}
