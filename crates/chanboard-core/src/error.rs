//! Error types for chanboard-core
//!
//! One fatal error (`DataUnavailable`) stops the dashboard before anything is
//! drawn. Everything else degrades a single widget.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chanboard operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    // ===================
    // Data Errors
    // ===================
    #[error("Data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("Resampling failed: {message}")]
    ResampleError { message: String },

    // ===================
    // Presentation Errors
    // ===================
    #[error("Style resource unavailable at {path}: {reason}")]
    StyleResourceMissing { path: PathBuf, reason: String },

    // ===================
    // IO / Config Errors
    // ===================
    #[error("Failed to write file {path}: {message}")]
    FileWrite { path: PathBuf, message: String },

    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

impl CoreError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    pub fn resample(message: impl Into<String>) -> Self {
        Self::ResampleError {
            message: message.into(),
        }
    }

    pub fn style_missing(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::StyleResourceMissing {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Fatal errors halt processing; the rest degrade one widget
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::DataUnavailable { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::DataUnavailable { .. } => ErrorSeverity::Fatal,
            CoreError::StyleResourceMissing { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Severity level for errors surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, rendering continues unchanged
    Warning,
    /// One widget degraded
    Error,
    /// Cannot continue
    Fatal,
}

/// Individual error entry in a load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Error,
            suggestion: None,
        }
    }

    pub fn fatal(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Fatal,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let suggestion = match error {
            CoreError::DataUnavailable { path, .. } => Some(format!(
                "Place the channel CSV at {} or pass --data <PATH>",
                path.display()
            )),
            CoreError::ColumnNotFound { .. } => Some(
                "Known columns: NET_SUBSCRIBERS, VIEWS, WATCH_HOURS, LIKES, SHARES, COMMENTS, \
                 SUBSCRIBERS_GAINED, SUBSCRIBERS_LOST"
                    .to_string(),
            ),
            CoreError::ResampleError { .. } => {
                Some("Press 'r' to reset the date range".to_string())
            }
            CoreError::StyleResourceMissing { path, .. } => Some(format!(
                "Create {} or pass --styles <DIR>",
                path.display()
            )),
            CoreError::InvalidConfig { path, .. } => {
                Some(format!("Check TOML syntax in {}", path.display()))
            }
            CoreError::FileWrite { .. } => None,
        };

        Self {
            source,
            message: error.to_string(),
            severity: error.severity(),
            suggestion,
        }
    }
}

/// Report of errors encountered while loading the dashboard
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub dataset_loaded: bool,
    pub rows_loaded: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    pub fn add_fatal(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::fatal(source, message));
    }

    /// Returns true if there are any fatal errors
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns only warnings
    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Returns count by severity
    pub fn error_count(&self) -> (usize, usize, usize) {
        let count = |severity| self.errors.iter().filter(|e| e.severity == severity).count();
        (
            count(ErrorSeverity::Warning),
            count(ErrorSeverity::Error),
            count(ErrorSeverity::Fatal),
        )
    }
}
