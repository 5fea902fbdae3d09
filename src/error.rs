//! Error types for analysis operations.
//!
//! Only failures that the caller must react to are errors. A reference that
//! never resolves is `None`, and an out-of-order install is reported as
//! [`IndexOutcome::Stale`](crate::workspace::IndexOutcome::Stale).

use thiserror::Error;

use crate::parser::SyntaxError;

/// Errors that can occur while indexing or loading files.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file did not parse; its tree is left absent.
    #[error("{path}: {} syntax error(s), first: {}", .errors.len(), first_message(.errors))]
    Syntax {
        path: String,
        errors: Vec<SyntaxError>,
    },

    /// IO error while reading a source file or project configuration.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A remapping entry that is not of the form `prefix=target`.
    #[error("Invalid remapping: {0}")]
    InvalidRemapping(String),

    /// A query named a path the workspace has never seen.
    #[error("Unknown file: {0}")]
    UnknownFile(String),
}

impl AnalysisError {
    /// Create an IO error for a path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn first_message(errors: &[SyntaxError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
