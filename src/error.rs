//! Error types for Companion configuration compilation.

use thiserror::Error;

/// Primary error type for loading and compiling a configuration set.
///
/// Validation findings are not errors in this sense: they are collected in a
/// [`ValidationReport`](crate::validate::ValidationReport). Only structural
/// problems that prevent reading the input end up here.
#[derive(Error, Debug)]
pub enum CompileError {
    // Input errors
    #[error("Configuration directory not found: {path}")]
    ConfigDirNotFound { path: String },

    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Unknown document format for '{path}': expected .yaml, .yml, .toml, or .json")]
    UnknownFormat { path: String },

    #[error("{path}: missing required section '{section}'")]
    MissingSection { path: String, section: String },

    #[error("No page files (page*.yaml) found in {path}")]
    NoPages { path: String },

    // Gate errors
    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },

    #[error("Strict mode: {warnings} warning(s) treated as errors")]
    StrictWarnings { warnings: usize },

    // Output errors
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CompileError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigDirNotFound { .. }
                | Self::FileNotFound { .. }
                | Self::Parse { .. }
                | Self::MissingSection { .. }
                | Self::NoPages { .. }
                | Self::ValidationFailed { .. }
                | Self::StrictWarnings { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigDirNotFound { .. } => Some("Pass --config-dir pointing at the config/ directory"),
            Self::NoPages { .. } => Some("Add page files named like page01-main.yaml under pages/"),
            Self::ValidationFailed { .. } => Some("Run: cb validate, then fix the reported errors"),
            Self::StrictWarnings { .. } => Some("Fix the warnings or rerun without --strict"),
            Self::UnknownFormat { .. } => Some("Rename the file with a .yaml, .toml, or .json extension"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using CompileError.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CompileError::Other(format!("{}: {e}", f().into())))
    }
}
