//! Unified error types for oss-hooks.
//!
//! Every fallible hook stage returns [`HookError`]. Only `main` turns these
//! into process exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hook operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HookError {
    /// The external program could not be started at all
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The scanner's `scan` subcommand exited non-zero
    #[error("Scan failed with exit code {code}: {stderr}")]
    ScanFailed { code: i32, stderr: String },

    /// The pending-results payload was not valid JSON
    #[error("Failed to parse JSON response from scanner: {0}")]
    InvalidPayload(String),

    /// No settings or SBOM file while the policy requires one
    #[error("No identification file found (looked for {looked_for})")]
    MissingBom { looked_for: String },

    /// IO errors with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The merged results could not be serialized
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenient Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

impl HookError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a spawn error for `program`
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

impl From<std::io::Error> for HookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            source: err,
        }
    }
}
