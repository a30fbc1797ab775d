//! Graphviz DOT export of the import graph.
//!
//! Only edges between scanned files are drawn; dangling identifiers such
//! as external packages are left out. Temporary files are coloured by risk
//! tier, production files are neutral.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::builder::AnalysisResult;
use crate::classify::FileCategory;
use crate::risk::RiskTier;

fn tier_color(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Safe => "palegreen",
        RiskTier::Low => "khaki",
        RiskTier::Medium => "orange",
        RiskTier::High => "lightcoral",
        RiskTier::Critical => "firebrick1",
    }
}

/// Generate a Graphviz DOT representation of the analyzed import graph.
pub fn generate_dot(result: &AnalysisResult) -> String {
    let estimated_capacity = result.scanned * 80 + result.graph.edge_count() * 60 + 200;
    let mut dot = String::with_capacity(estimated_capacity);

    if let Err(e) = write_dot_content(&mut dot, result) {
        tracing::error!(error = %e, "failed to generate DOT string");
        return "digraph tempsweep {\n}\n".to_string();
    }

    dot
}

fn write_dot_content(dot: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(dot, "digraph tempsweep {{")?;
    writeln!(dot, "  rankdir=LR;")?;
    writeln!(dot, "  node [shape=box, style=filled, fontname=\"JetBrains Mono\"];")?;
    writeln!(dot)?;

    let tiers: BTreeMap<&str, RiskTier> = result
        .assessments
        .iter()
        .map(|a| (a.path.as_str(), a.tier))
        .collect();

    let mut known: BTreeSet<&str> = result
        .files
        .production
        .iter()
        .map(String::as_str)
        .collect();
    known.extend(result.files.temporary());

    for path in result.files.bucket(FileCategory::Production) {
        writeln!(dot, "  \"{}\" [fillcolor=white];", escape(path))?;
    }
    for (path, tier) in &tiers {
        writeln!(
            dot,
            "  \"{}\" [fillcolor={}, tooltip=\"{}\"];",
            escape(path),
            tier_color(*tier),
            tier
        )?;
    }

    writeln!(dot)?;

    // Parallel statements collapse to one drawn edge
    let edges: BTreeSet<(&str, &str)> = result
        .graph
        .edges()
        .iter()
        .filter(|e| known.contains(e.imported.as_str()))
        .map(|e| (e.importer.as_str(), e.imported.as_str()))
        .collect();
    for (from, to) in edges {
        writeln!(dot, "  \"{}\" -> \"{}\";", escape(from), escape(to))?;
    }

    writeln!(dot, "}}")?;
    Ok(())
}

/// DOT quoted-string escaping; Windows separators would otherwise read as escapes.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
