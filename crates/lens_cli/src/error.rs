//! Error types for the lens CLI.

use lens_core::types::{FitError, SplineError};
use thiserror::Error;

/// Errors raised while loading jobs or running commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Spline error: {0}")]
    Spline(#[from] SplineError),

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Failed to parse job file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
