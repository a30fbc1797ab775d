//! tempsweep CLI - find temporary source files that are safe to delete.
//!
//! Scans `<PATH>/lib` (configurable), builds the import graph, prints a
//! risk report and a phased deletion plan, and writes
//! `DEPENDENCY_ANALYSIS.json` / `.md` next to the project.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use tempsweep_core::{
    generate_dot, init_structured_logging, render_console, render_json, render_scan_summary,
    write_reports, LogFormat, SweepConfig, Tempsweep,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find temporary source files that are safe to delete")]
pub struct Cli {
    /// Path to the project root
    #[arg(default_value = ".")]
    path: String,

    /// Source subdirectory to scan, relative to the root
    #[arg(long)]
    source_dir: Option<String>,

    /// Source file extension
    #[arg(long = "ext")]
    extension: Option<String>,

    /// Package name stripped from `package:<name>/` imports (default: pubspec.yaml name)
    #[arg(long)]
    package: Option<String>,

    /// Temporary filename patterns, in priority order (replaces the defaults)
    #[arg(long = "pattern", num_args = 1..)]
    patterns: Vec<String>,

    /// Filenames that must never be deleted (replaces the defaults)
    #[arg(long = "critical", num_args = 1..)]
    critical: Vec<String>,

    /// Production importers above which a file is HIGH risk
    #[arg(long)]
    high_threshold: Option<usize>,

    /// Directory names to skip while scanning
    #[arg(long = "exclude", num_args = 1..)]
    exclude: Vec<String>,

    /// Directory for the JSON and markdown reports (default: project root)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    no_write: bool,

    /// Print the JSON document to stdout instead of the console report
    #[arg(long)]
    json: bool,

    /// Print Graphviz DOT output of the import graph
    #[arg(long)]
    dot: bool,

    /// Write DOT output to a specified file instead of stdout
    #[arg(long)]
    dot_file: Option<String>,

    /// Emit log events as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Flags override tempsweep.toml, which overrides built-in defaults.
    fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if let Some(dir) = &self.source_dir {
            config.source_dir = dir.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if let Some(pkg) = &self.package {
            config.package = Some(pkg.clone());
        }
        if !self.patterns.is_empty() {
            config.temp_patterns = self.patterns.clone();
        }
        if !self.critical.is_empty() {
            config.critical_files = self.critical.clone();
        }
        if let Some(n) = self.high_threshold {
            config.policy.high_threshold = n;
        }
        config.exclude_dirs.extend(self.exclude.iter().cloned());
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        config
    }
}

/// Exit status used when the panic hook fires.
const PANIC_EXIT_CODE: i32 = 2;

fn panic_notice(info: &dyn std::fmt::Display) -> String {
    format!(
        "[PANIC] tempsweep internal error: {}\n[PANIC] The process will exit with code {}.",
        info, PANIC_EXIT_CODE
    )
}

/// Rejects output paths with null bytes or `..` components.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);
    if p.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(anyhow!("Path traversal (..) not allowed in output paths: {}", path));
    }

    Ok(p)
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", panic_notice(info));
        std::process::exit(PANIC_EXIT_CODE);
    }));

    let cli = Cli::parse();

    init_structured_logging(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    });

    let root = Path::new(&cli.path);
    let config = cli.apply(
        SweepConfig::load(root)
            .with_context(|| format!("Failed to load configuration from: {}", root.display()))?,
    );

    if !cli.json {
        println!("TEMPSWEEP - temporary file dependency analysis");
        println!("Scanning {} ...", root.join(&config.source_dir).display());
    }

    let result = Tempsweep::new(root)
        .with_config(config)
        .analyze()
        .context("Analysis aborted")?;
    let plan = result.plan();

    if cli.dot || cli.dot_file.is_some() {
        let dot = generate_dot(&result);
        match &cli.dot_file {
            Some(file) => {
                let path = validate_output_path(file)?;
                fs::write(&path, dot)
                    .with_context(|| format!("Failed to write DOT file: {}", path.display()))?;
                eprintln!("DOT graph written to: {}", path.display());
            }
            None => println!("{}", dot),
        }
        return Ok(());
    }

    if cli.json {
        println!("{}", render_json(&result, &plan).context("Failed to serialize JSON report")?);
    } else {
        print!("{}", render_scan_summary(&result));
        print!("{}", render_console(&result, &plan, &result.config.limits));
    }

    if cli.no_write {
        return Ok(());
    }

    let dir = result.config.report_dir(&result.root);
    let written = write_reports(&result, &plan, &dir)?;

    if !cli.json {
        println!("\nReports saved:");
        println!("   {}", written.json.display());
        println!("   {}", written.markdown.display());
        println!("\nNext steps:");
        println!("1. Review {} and the JSON report", written.markdown.display());
        println!("2. Confirm the risk classification matches your expectations");
        println!("3. Start with phase 1 (SAFE files)");
    }

    tracing::info!(
        temporary = result.temporary_count(),
        skipped = result.skipped.len(),
        "analysis complete"
    );

    Ok(())
}
