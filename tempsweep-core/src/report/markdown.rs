//! Human-readable markdown report mirroring the JSON document.

use std::fmt::Write;

use crate::builder::AnalysisResult;
use crate::classify::FileCategory;
use crate::plan::DeletionPlan;
use crate::risk::RiskTier;

/// Render the markdown report.
pub fn render_markdown(result: &AnalysisResult, plan: &DeletionPlan) -> String {
    let mut md = String::with_capacity(4096 + result.assessments.len() * 200);
    if let Err(e) = write_markdown(&mut md, result, plan) {
        tracing::error!(error = %e, "failed to format markdown report");
    }
    md
}

fn write_markdown(
    md: &mut String,
    result: &AnalysisResult,
    plan: &DeletionPlan,
) -> std::fmt::Result {
    writeln!(md, "# Dependency Analysis\n")?;
    writeln!(md, "Source root: `{}`\n", result.source_root.display())?;

    writeln!(md, "## Summary\n")?;
    writeln!(md, "- **Temporary files:** {}", result.temporary_count())?;
    for category in FileCategory::TEMPORARY {
        writeln!(md, "- **{} files:** {}", category, result.files.count(category))?;
    }
    writeln!(md, "- **Production files:** {}", result.files.count(FileCategory::Production))?;
    writeln!(md, "- **Unreadable files:** {}\n", result.skipped.len())?;

    writeln!(md, "## Risk distribution\n")?;
    for (tier, n) in result.tier_counts() {
        writeln!(md, "- **{}** ({}): {} files", tier, tier.description(), n)?;
    }
    writeln!(md)?;

    for tier in RiskTier::ALL {
        let files = result.by_tier(tier);
        if files.is_empty() {
            continue;
        }
        writeln!(md, "## {}\n", tier)?;
        for a in files {
            writeln!(md, "### `{}`\n", a.path)?;
            if a.is_isolated() {
                writeln!(md, "Not imported by any file (isolated).\n")?;
            } else {
                writeln!(md, "**Imported by {} file(s):**\n", a.importers.len())?;
                for imp in &a.importers {
                    writeln!(md, "- `{}`", imp)?;
                }
                writeln!(md)?;
            }

            let imports = result.graph.imports_of(&a.path);
            if !imports.is_empty() {
                writeln!(md, "**Imports:**\n")?;
                for imp in imports {
                    writeln!(md, "- `{}`", imp)?;
                }
                writeln!(md)?;
            }
        }
    }

    writeln!(md, "## Deletion plan\n")?;
    for phase in &plan.phases {
        writeln!(md, "### Phase {}: {}\n", phase.number, phase.title)?;
        writeln!(md, "- Risk: {}", phase.tier)?;
        writeln!(md, "- Verification: {}", phase.verification)?;
        writeln!(md, "- Files: {}\n", phase.files.len())?;
        for f in &phase.files {
            writeln!(md, "- [ ] `{}`", f)?;
        }
        if !phase.files.is_empty() {
            writeln!(md)?;
        }
    }

    if !plan.do_not_delete.is_empty() {
        writeln!(md, "## Do not delete\n")?;
        for f in &plan.do_not_delete {
            writeln!(md, "- `{}`", f)?;
        }
        writeln!(md)?;
    }

    if !result.skipped.is_empty() {
        writeln!(md, "## Unreadable files\n")?;
        for s in &result.skipped {
            writeln!(md, "- `{}`: {}", s.path, s.reason)?;
        }
    }

    Ok(())
}
