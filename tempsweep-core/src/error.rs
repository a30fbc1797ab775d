//! Typed error handling for tempsweep.
//!
//! Only precondition failures are fatal. Per-file read problems are not
//! errors at all; they surface as [`crate::extract::ExtractOutcome::Skipped`]
//! values so one bad file can never abort a scan.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tempsweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// The project root does not exist or is not a directory
    #[error("Project root not found: {path}")]
    MissingRoot { path: PathBuf },

    /// The source subdirectory (e.g. `lib/`) is missing under the root
    #[error("Source directory '{dir}' not found in {}", .root.display())]
    MissingSourceDir { root: PathBuf, dir: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl SweepError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error must stop the run before any scanning happens.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingRoot { .. }
                | Self::MissingSourceDir { .. }
                | Self::Config { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::MissingRoot { path } => Some(path),
            Self::MissingSourceDir { root, .. } => Some(root),
            Self::Config { path, .. } => Some(path),
            Self::Io { path, .. } => Some(path),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// Convenience type alias for tempsweep results.
pub type SweepResult<T> = Result<T, SweepError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> SweepResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> SweepResult<T> {
        self.map_err(|e| SweepError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = SweepError::io(
            PathBuf::from("/proj/lib/a.dart"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, SweepError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/proj/lib/a.dart")));
        assert!(err.to_string().contains("/proj/lib/a.dart"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_missing_source_dir_message() {
        let err = SweepError::MissingSourceDir {
            root: PathBuf::from("/proj"),
            dir: "lib".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Source directory 'lib' not found in /proj");
    }

    #[test]
    fn test_config_errors_are_fatal() {
        assert!(SweepError::config("/proj/tempsweep.toml", "bad key").is_fatal());
        assert!(SweepError::invalid_argument("empty pattern").is_fatal());
        assert!(SweepError::MissingRoot {
            path: PathBuf::from("/nope")
        }
        .is_fatal());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let swept = result.with_path("/missing/file.dart");
        assert!(matches!(swept, Err(SweepError::Io { .. })));
    }
}
