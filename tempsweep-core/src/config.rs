//! Configuration loading from tempsweep.toml.
//!
//! Precedence, lowest to highest: built-in defaults, `tempsweep.toml` at the
//! project root, then whatever the caller (usually the CLI) sets on the
//! resolved [`SweepConfig`].

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{FileClassifier, DEFAULT_TEMP_PATTERNS};
use crate::error::{IoResultExt, SweepError, SweepResult};
use crate::risk::{CriticalFileSet, RiskPolicy, DEFAULT_CRITICAL_FILES};

/// File name looked up at the project root.
pub const CONFIG_FILE: &str = "tempsweep.toml";

/// Raw contents of tempsweep.toml. Every field is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TempsweepConfig {
    /// Subdirectory holding the sources, relative to the root.
    pub source_dir: Option<String>,
    /// Source file extension, without the dot.
    pub extension: Option<String>,
    /// The project's own package name, stripped from `package:` imports.
    pub package: Option<String>,
    /// Ordered temporary-name patterns.
    pub temp_patterns: Option<Vec<String>>,
    /// Filenames that must never be deleted.
    pub critical_files: Option<Vec<String>>,
    /// Directory names to skip while walking.
    pub exclude_dirs: Option<Vec<String>>,
    /// Risk thresholds.
    pub risk: Option<RiskConfig>,
    /// Report output settings.
    pub output: Option<OutputConfig>,
}

/// `[risk]` table.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RiskConfig {
    pub high_threshold: Option<usize>,
    pub medium_threshold: Option<usize>,
    pub low_threshold: Option<usize>,
}

/// `[output]` table.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for the JSON and markdown reports, relative to the root.
    pub dir: Option<String>,
    /// Importers listed per file before summarizing the rest.
    pub importer_preview: Option<usize>,
    /// Files listed per deletion phase before summarizing the rest.
    pub phase_preview: Option<usize>,
    /// Command named in the verification steps of each phase.
    pub verify_command: Option<String>,
}

/// Loads configuration from tempsweep.toml if it exists.
pub fn load_config(root: &Path) -> SweepResult<Option<TempsweepConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content).map_err(|e| SweepError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}

/// Reads the `name:` field of `pubspec.yaml` at the project root.
pub fn detect_package_name(root: &Path) -> Option<String> {
    let content = fs::read_to_string(root.join("pubspec.yaml")).ok()?;
    let re = Regex::new(r"(?m)^name:\s*['\x22]?([A-Za-z0-9_]+)").ok()?;
    re.captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Display limits for the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub importer_preview: usize,
    pub phase_preview: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            importer_preview: 5,
            phase_preview: 10,
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub source_dir: String,
    pub extension: String,
    pub package: Option<String>,
    pub temp_patterns: Vec<String>,
    pub critical_files: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub policy: RiskPolicy,
    /// Report directory; `None` means the project root
    pub output_dir: Option<PathBuf>,
    pub limits: ReportLimits,
    pub verify_command: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            source_dir: "lib".to_string(),
            extension: "dart".to_string(),
            package: None,
            temp_patterns: DEFAULT_TEMP_PATTERNS.iter().map(|s| s.to_string()).collect(),
            critical_files: DEFAULT_CRITICAL_FILES.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: Vec::new(),
            policy: RiskPolicy::default(),
            output_dir: None,
            limits: ReportLimits::default(),
            verify_command: "flutter run".to_string(),
        }
    }
}

impl SweepConfig {
    /// Overlay values present in a config file.
    pub fn merge(mut self, file: TempsweepConfig) -> Self {
        if let Some(v) = file.source_dir {
            self.source_dir = v;
        }
        if let Some(v) = file.extension {
            self.extension = v;
        }
        if let Some(v) = file.package {
            self.package = Some(v);
        }
        if let Some(v) = file.temp_patterns {
            self.temp_patterns = v;
        }
        if let Some(v) = file.critical_files {
            self.critical_files = v;
        }
        if let Some(v) = file.exclude_dirs {
            self.exclude_dirs = v;
        }
        if let Some(risk) = file.risk {
            if let Some(v) = risk.high_threshold {
                self.policy.high_threshold = v;
            }
            if let Some(v) = risk.medium_threshold {
                self.policy.medium_threshold = v;
            }
            if let Some(v) = risk.low_threshold {
                self.policy.low_threshold = v;
            }
        }
        if let Some(out) = file.output {
            if let Some(v) = out.dir {
                self.output_dir = Some(PathBuf::from(v));
            }
            if let Some(v) = out.importer_preview {
                self.limits.importer_preview = v;
            }
            if let Some(v) = out.phase_preview {
                self.limits.phase_preview = v;
            }
            if let Some(v) = out.verify_command {
                self.verify_command = v;
            }
        }
        self
    }

    /// Defaults overlaid with `tempsweep.toml` from `root`, if present.
    pub fn load(root: &Path) -> SweepResult<Self> {
        let cfg = match load_config(root)? {
            Some(file) => Self::default().merge(file),
            None => Self::default(),
        };
        Ok(cfg)
    }

    /// Reject settings that would make the analysis meaningless.
    pub fn validate(&self) -> SweepResult<()> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(SweepError::invalid_argument("source extension must not be empty"));
        }
        if self.temp_patterns.iter().all(|p| p.is_empty()) {
            return Err(SweepError::invalid_argument(
                "at least one non-empty temporary pattern is required",
            ));
        }
        if self.policy.medium_threshold > self.policy.high_threshold {
            return Err(SweepError::invalid_argument(format!(
                "medium threshold ({}) exceeds high threshold ({})",
                self.policy.medium_threshold, self.policy.high_threshold
            )));
        }
        Ok(())
    }

    pub fn classifier(&self) -> FileClassifier {
        FileClassifier::from_patterns(self.temp_patterns.iter().cloned())
    }

    pub fn critical_set(&self) -> CriticalFileSet {
        CriticalFileSet::new(self.critical_files.iter().cloned())
    }

    /// Where reports go for a given project root.
    pub fn report_dir(&self, root: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }
}
