//! Shared error type across jstat crates.

use std::time::Duration;

use thiserror::Error;

/// Stable error kinds (used in logs and self-metrics labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// jstat could not be run or exited abnormally.
    Execution,
    /// jstat output did not match the schema.
    Format,
    /// Invalid configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Execution => "EXECUTION_ERROR",
            ErrorKind::Format => "FORMAT_ERROR",
            ErrorKind::Config => "CONFIG_ERROR",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Lowercase label value for the scrape result counter.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Execution => "execution_error",
            ErrorKind::Format => "format_error",
            ErrorKind::Config => "config_error",
            ErrorKind::Internal => "internal",
        }
    }
}

/// The external tool could not be run or did not finish cleanly.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to run {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// `detail` is the captured stderr, or stdout when stderr was empty.
    #[error("{path} exited with {}: {detail}", display_code(.code))]
    Exited {
        path: String,
        code: Option<i32>,
        detail: String,
    },
    #[error("{path} did not finish within {timeout:?}")]
    TimedOut { path: String, timeout: Duration },
    #[error("reading output of {path} failed: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("waiting for {path} failed: {source}")]
    Wait {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (killed by signal)".into(),
    }
}

/// The tool ran, but its output does not fit the schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing data row: expected a header and one data line, got {lines} line(s)")]
    MissingDataRow { lines: usize },
    #[error("missing column {index} ({field}) in data row")]
    MissingColumn { index: usize, field: &'static str },
    #[error("field {field}: token {token:?} is not a number")]
    NotNumeric { field: &'static str, token: String },
    #[error("header column {index}: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, JstatError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum JstatError {
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl JstatError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JstatError::Execution(_) => ErrorKind::Execution,
            JstatError::Format(_) => ErrorKind::Format,
            JstatError::Config(_) => ErrorKind::Config,
            JstatError::Internal(_) => ErrorKind::Internal,
        }
    }
}
