//! Filename classification into temporary-file categories.
//!
//! Categorization is an ordered rule table, evaluated top to bottom. The
//! first rule that matches decides the category; a filename no rule matches
//! is [`FileCategory::Production`]. Rule order is data, so it can be
//! inspected and tested directly.

use serde::Serialize;
use std::fmt;

/// Patterns recognized as temporary files when no configuration overrides them.
pub const DEFAULT_TEMP_PATTERNS: &[&str] = &[
    "debug_",
    "test_",
    "fix_",
    "force_",
    "simulate_",
    "populate_",
    "quick_",
    "emergency_",
    "execute_",
    "deep_",
    "simple_",
    "dual_",
    "diagnose_",
    "navigate_to_fix",
];

/// Prefix rules that give a temporary file its specific category.
/// Checked before the generic "contains any pattern" rules.
const CATEGORY_PREFIXES: &[(&str, FileCategory)] = &[
    ("debug_", FileCategory::Debug),
    ("test_", FileCategory::Test),
    ("fix_", FileCategory::Fix),
    ("force_", FileCategory::Fix),
];

/// Category of a source file, derived from its filename alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Debug,
    Test,
    Fix,
    OtherTemporary,
    Production,
}

impl FileCategory {
    /// All temporary categories, in reporting order.
    pub const TEMPORARY: [FileCategory; 4] = [
        FileCategory::Debug,
        FileCategory::Test,
        FileCategory::Fix,
        FileCategory::OtherTemporary,
    ];

    /// Whether this category marks a deletion candidate.
    pub fn is_temporary(self) -> bool {
        !matches!(self, Self::Production)
    }

    /// Short key used in JSON summaries.
    pub fn key(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Test => "test",
            Self::Fix => "fix",
            Self::OtherTemporary => "other",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Test => write!(f, "test"),
            Self::Fix => write!(f, "fix"),
            Self::OtherTemporary => write!(f, "other temporary"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// How a rule's pattern is matched against a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Filename starts with the pattern
    Prefix,
    /// Pattern occurs anywhere in the filename
    Contains,
}

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub pattern: String,
    pub kind: MatchKind,
    pub category: FileCategory,
}

impl CategoryRule {
    pub fn new(pattern: impl Into<String>, kind: MatchKind, category: FileCategory) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            category,
        }
    }

    /// Check whether this rule applies to a filename.
    #[inline]
    pub fn matches(&self, filename: &str) -> bool {
        match self.kind {
            MatchKind::Prefix => filename.starts_with(&self.pattern),
            MatchKind::Contains => filename.contains(&self.pattern),
        }
    }
}

/// Ordered first-match-wins filename classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClassifier {
    rules: Vec<CategoryRule>,
}

impl FileClassifier {
    /// Build a classifier from an explicit rule table.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Build the standard table from a list of temporary-name patterns.
    ///
    /// Category prefixes (`debug_`, `test_`, `fix_`, `force_`) come first,
    /// but only those that are themselves listed as patterns. Every pattern
    /// then becomes a `Contains` rule mapping to `OtherTemporary`.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();

        let mut rules: Vec<CategoryRule> = CATEGORY_PREFIXES
            .iter()
            .filter(|(prefix, _)| patterns.iter().any(|p| p == prefix))
            .map(|(prefix, category)| CategoryRule::new(*prefix, MatchKind::Prefix, *category))
            .collect();

        rules.extend(
            patterns
                .into_iter()
                .map(|p| CategoryRule::new(p, MatchKind::Contains, FileCategory::OtherTemporary)),
        );

        Self { rules }
    }

    /// The rule table, in evaluation order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Classify a filename. Total: anything no rule matches is Production.
    pub fn classify(&self, filename: &str) -> FileCategory {
        self.rules
            .iter()
            .find(|rule| rule.matches(filename))
            .map_or(FileCategory::Production, |rule| rule.category)
    }

    /// Whether a filename matches any temporary rule.
    #[inline]
    pub fn is_temporary(&self, filename: &str) -> bool {
        self.classify(filename).is_temporary()
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::from_patterns(DEFAULT_TEMP_PATTERNS.iter().copied())
    }
}
