use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Warnings found during an assessment are not failures: a completed
/// report always exits with `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The report was produced (with or without warnings)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// The dependency listing could not be produced
    SetupFailure = 3,
    /// The policy file could not be read, parsed or created
    ConfigFailure = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error chain to the exit code of its first typed cause.
    ///
    /// Errors that carry no `TrustError` are treated as setup failures.
    pub fn for_error(error: &anyhow::Error) -> Self {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<TrustError>())
            .map(TrustError::exit_code)
            .unwrap_or(ExitCode::SetupFailure)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::SetupFailure => write!(f, "Setup Failure (3)"),
            ExitCode::ConfigFailure => write!(f, "Config Failure (4)"),
        }
    }
}

/// Application-specific errors for dependency trust assessment.
///
/// Only the listing and policy variants are fatal. Metric and resolution
/// failures are recovered where they happen and only ever logged.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("Failed to list project dependencies in: {path}\nDetails: {details}\n\n💡 Hint: Run this tool from the root of an npm project and make sure `npm` is on your PATH")]
    DependencyListingFailed { path: PathBuf, details: String },

    #[error("Failed to read policy file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    PolicyReadError { path: PathBuf, details: String },

    #[error("Failed to parse policy file: {path}\nDetails: {details}\n\n💡 Hint: Fix the JSON syntax, or delete the file to recreate it with default thresholds")]
    PolicyParseError { path: PathBuf, details: String },

    #[error("Failed to write default policy file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that you have write permissions in the project directory")]
    PolicyWriteError { path: PathBuf, details: String },

    #[error("Failed to fetch {metric} for {package}: {details}")]
    MetricFetchFailed {
        metric: &'static str,
        package: String,
        details: String,
    },

    #[error("Failed to resolve version range '{range}' of {package}: {details}")]
    ResolutionFailed {
        package: String,
        range: String,
        details: String,
    },

    /// Validation error for domain value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl TrustError {
    /// Exit code used when this error terminates the run.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TrustError::PolicyReadError { .. }
            | TrustError::PolicyParseError { .. }
            | TrustError::PolicyWriteError { .. } => ExitCode::ConfigFailure,
            _ => ExitCode::SetupFailure,
        }
    }
}
