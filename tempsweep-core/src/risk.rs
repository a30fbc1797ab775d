//! Deletion-risk classification.
//!
//! Only direct importers are considered. Precedence, first hit wins:
//!
//! 1. the file itself is critical: `Critical`
//! 2. a critical file imports it: `High`
//! 3. more than `high_threshold` distinct production importers: `High`
//! 4. more than `medium_threshold` distinct production importers: `Medium`
//! 5. more than `low_threshold` importers of any kind: `Low`
//! 6. otherwise: `Safe`

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::classify::FileClassifier;
use crate::graph::{file_name_of, DependencyGraph};

/// Filenames considered indispensable when no configuration overrides them.
pub const DEFAULT_CRITICAL_FILES: &[&str] = &["main.dart", "firebase_options.dart"];

/// Deletion risk, ordered by increasing reluctance to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Safe,
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
    ];

    /// Upper-case label used in reports and JSON keys.
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Lower-case key used in JSON summaries.
    pub fn key(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Safe => "safe to delete",
            Self::Low => "low risk",
            Self::Medium => "medium risk",
            Self::High => "high risk",
            Self::Critical => "do not delete",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact-filename set of files that must never be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalFileSet(BTreeSet<String>);

impl CriticalFileSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Membership test on a bare filename.
    pub fn contains(&self, filename: &str) -> bool {
        self.0.contains(filename)
    }

    /// Membership test on a relative path, by its final component.
    pub fn contains_path(&self, path: &str) -> bool {
        self.contains(file_name_of(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CriticalFileSet {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_FILES.iter().copied())
    }
}

/// Risk-tolerance thresholds. Each tier applies when the count is strictly
/// greater than its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskPolicy {
    /// Distinct production importers above which a file is High
    pub high_threshold: usize,
    /// Distinct production importers above which a file is Medium
    pub medium_threshold: usize,
    /// Importers of any kind above which a file is Low
    pub low_threshold: usize,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            high_threshold: 5,
            medium_threshold: 0,
            low_threshold: 0,
        }
    }
}

/// Why a file landed in its tier, with the importer lists behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub path: String,
    pub tier: RiskTier,
    /// Importers in scan order, one entry per import statement
    pub importers: Vec<String>,
    /// Distinct importers whose filename is critical
    pub critical_importers: Vec<String>,
    /// Distinct importers classified as production
    pub production_importers: Vec<String>,
}

impl RiskAssessment {
    pub fn is_isolated(&self) -> bool {
        self.importers.is_empty()
    }
}

/// Assigns risk tiers from direct-importer information in the graph.
#[derive(Debug, Clone, Copy)]
pub struct RiskClassifier<'a> {
    files: &'a FileClassifier,
    critical: &'a CriticalFileSet,
    policy: RiskPolicy,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(
        files: &'a FileClassifier,
        critical: &'a CriticalFileSet,
        policy: RiskPolicy,
    ) -> Self {
        Self {
            files,
            critical,
            policy,
        }
    }

    /// Tier for one file. Total over every path, scanned or not.
    pub fn classify(&self, path: &str, graph: &DependencyGraph) -> RiskTier {
        self.assess(path, graph).tier
    }

    /// Tier plus the importer breakdown that produced it.
    pub fn assess(&self, path: &str, graph: &DependencyGraph) -> RiskAssessment {
        let importers: Vec<String> = graph
            .importers_of(path)
            .into_iter()
            .map(String::from)
            .collect();

        let distinct: BTreeSet<&str> = importers.iter().map(String::as_str).collect();
        let critical_importers: Vec<String> = distinct
            .iter()
            .filter(|imp| self.critical.contains_path(imp))
            .map(|s| s.to_string())
            .collect();
        let production_importers: Vec<String> = distinct
            .iter()
            .filter(|imp| !self.files.is_temporary(file_name_of(imp)))
            .map(|s| s.to_string())
            .collect();

        let tier = if self.critical.contains_path(path) {
            RiskTier::Critical
        } else if !critical_importers.is_empty()
            || production_importers.len() > self.policy.high_threshold
        {
            RiskTier::High
        } else if production_importers.len() > self.policy.medium_threshold {
            RiskTier::Medium
        } else if importers.len() > self.policy.low_threshold {
            RiskTier::Low
        } else {
            RiskTier::Safe
        };

        RiskAssessment {
            path: path.to_string(),
            tier,
            importers,
            critical_importers,
            production_importers,
        }
    }
}
