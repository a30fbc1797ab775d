//! Structured logging using **tracing**.
//!
//! Library code only emits events (`warn!` for skipped files, `info!` for
//! scan milestones, `debug!` per file). The binary installs the subscriber
//! once via [`init_structured_logging`]. All log output goes to stderr so
//! stdout stays clean for reports.

use tracing_subscriber::EnvFilter;

/// Log line format for the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// One JSON object per event, for log shippers
    Json,
}

/// Default filter when `RUST_LOG` is unset: warnings only, so skipped
/// files are visible without drowning the console report.
const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup. A second call is ignored rather than panicking.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=tempsweep_core=debug`)
pub fn init_structured_logging(format: LogFormat) {
    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_level(true)
            .with_target(true)
            .with_current_span(true)
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("[WARN] logging already initialized: {}", e);
    }
}
