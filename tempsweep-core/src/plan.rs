//! Phased deletion plan.
//!
//! Four phases, least risky first. Critical files never enter a phase;
//! they are carried separately as "do not delete".

use serde::Serialize;

use crate::risk::{RiskAssessment, RiskTier};

/// Tiers that get a deletion phase, in execution order.
pub const PHASE_TIERS: [RiskTier; 4] = [
    RiskTier::Safe,
    RiskTier::Low,
    RiskTier::Medium,
    RiskTier::High,
];

/// One step of the deletion plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub number: usize,
    pub tier: RiskTier,
    pub title: String,
    /// How to verify the project still works after this phase's deletions
    pub verification: String,
    /// Sorted relative paths
    pub files: Vec<String>,
}

impl Phase {
    /// First `limit` files plus the number left out.
    pub fn preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.files.len().min(limit);
        (&self.files[..shown], self.files.len() - shown)
    }
}

/// Ordered phases plus the files that must be kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    pub phases: Vec<Phase>,
    pub do_not_delete: Vec<String>,
}

fn phase_title(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Safe => "Isolated files (zero risk)",
        RiskTier::Low => "Low risk",
        RiskTier::Medium => "Medium risk",
        RiskTier::High | RiskTier::Critical => "High risk",
    }
}

/// Verification step for a tier, phrased around `verify_command`.
pub fn verification_for(tier: RiskTier, verify_command: &str) -> String {
    match tier {
        RiskTier::Safe => "optional".to_string(),
        RiskTier::Low => format!("`{}` after every group of 10 deletions", verify_command),
        RiskTier::Medium => format!("`{}` after every deletion", verify_command),
        RiskTier::High | RiskTier::Critical => {
            format!("manual review + `{}` + individual commit", verify_command)
        }
    }
}

/// Group assessments into phases.
pub fn build_plan(assessments: &[RiskAssessment], verify_command: &str) -> DeletionPlan {
    let sorted_paths = |tier: RiskTier| {
        let mut files: Vec<String> = assessments
            .iter()
            .filter(|a| a.tier == tier)
            .map(|a| a.path.clone())
            .collect();
        files.sort();
        files
    };

    let phases = PHASE_TIERS
        .iter()
        .enumerate()
        .map(|(i, &tier)| Phase {
            number: i + 1,
            tier,
            title: phase_title(tier).to_string(),
            verification: verification_for(tier, verify_command),
            files: sorted_paths(tier),
        })
        .collect();

    DeletionPlan {
        phases,
        do_not_delete: sorted_paths(RiskTier::Critical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(path: &str, tier: RiskTier) -> RiskAssessment {
        RiskAssessment {
            path: path.to_string(),
            tier,
            importers: Vec::new(),
            critical_importers: Vec::new(),
            production_importers: Vec::new(),
        }
    }

    #[test]
    fn test_phases_in_order_and_sorted() {
        let plan = build_plan(
            &[
                assessment("debug_b.dart", RiskTier::Safe),
                assessment("debug_a.dart", RiskTier::Safe),
                assessment("fix_c.dart", RiskTier::High),
                assessment("test_d.dart", RiskTier::Low),
            ],
            "flutter run",
        );

        let tiers: Vec<_> = plan.phases.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, PHASE_TIERS.to_vec());
        assert_eq!(plan.phases[0].files, vec!["debug_a.dart", "debug_b.dart"]);
        assert_eq!(plan.phases[0].number, 1);
        assert!(plan.phases[2].files.is_empty());
        assert_eq!(plan.phases[3].files, vec!["fix_c.dart"]);
    }

    #[test]
    fn test_critical_never_in_a_phase() {
        let plan = build_plan(&[assessment("debug_keep.dart", RiskTier::Critical)], "flutter run");
        assert!(plan.phases.iter().all(|p| p.files.is_empty()));
        assert_eq!(plan.do_not_delete, vec!["debug_keep.dart"]);
    }

    #[test]
    fn test_preview_caps_and_counts_remainder() {
        let files: Vec<_> = (0..13)
            .map(|i| assessment(&format!("debug_{:02}.dart", i), RiskTier::Safe))
            .collect();
        let plan = build_plan(&files, "flutter run");
        let (shown, rest) = plan.phases[0].preview(10);
        assert_eq!(shown.len(), 10);
        assert_eq!(rest, 3);
        let (shown, rest) = plan.phases[1].preview(10);
        assert!(shown.is_empty());
        assert_eq!(rest, 0);
    }

    #[test]
    fn test_verification_mentions_command() {
        assert_eq!(verification_for(RiskTier::Safe, "make"), "optional");
        assert!(verification_for(RiskTier::Medium, "cargo test").contains("`cargo test`"));
        assert!(verification_for(RiskTier::High, "x").starts_with("manual review"));
    }
}
