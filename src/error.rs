//! Error types for track-dl
//!
//! This module provides the error taxonomy for the library:
//! - Catalog errors (transport vs. structural extraction failures)
//! - Pipeline errors (payload transport, remux tool, filesystem)
//! - A flat [`ErrorKind`] classification with machine-readable codes, used by
//!   [`PipelineOutcome`](crate::types::PipelineOutcome) to report per-track failures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for track-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for track-dl
///
/// Each variant carries enough context (URL, raw provider response, tool
/// stderr) to diagnose a failure without re-running the request.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "catalog.base_url")
        key: Option<String>,
    },

    /// Caller supplied an argument that violates an operation's preconditions
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catalog search or detail lookup failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Payload transfer failed (transport, timeout or non-success status)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remux tool is not available on this host
    #[error("remux tool unavailable: {0}")]
    ToolMissing(String),

    /// The remux tool ran and reported failure
    #[error("remux of {input} failed (exit code {exit_code:?}): {stderr}")]
    Transcode {
        /// The staged input the tool was reading
        input: PathBuf,
        /// Exit code of the tool, if it exited normally
        exit_code: Option<i32>,
        /// Diagnostic output captured from the tool
        stderr: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Catalog-related errors
///
/// Transport failures and structural extraction failures are kept apart: only
/// the latter can indicate that the provider changed its page or API format.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request could not be sent or the response could not be read
    #[error("request to {url} failed: {source}")]
    Network {
        /// The URL that was requested
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success HTTP status
    #[error("request to {url} returned status {status}")]
    Status {
        /// The URL that was requested
        url: String,
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// Response body did not have the expected structure
    #[error("unexpected catalog response: {message}")]
    Parse {
        /// What could not be extracted
        message: String,
        /// Raw response body, kept for diagnostics
        raw: Option<String>,
    },
}

impl CatalogError {
    /// Shorthand for a [`CatalogError::Parse`] without a raw body
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        CatalogError::Parse {
            message: message.into(),
            raw: None,
        }
    }
}

/// Flat classification of pipeline failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport or status failure on any outbound call
    Network,
    /// Catalog response did not match the expected structure
    Parse,
    /// Remux tool unavailable
    ToolMissing,
    /// Remux tool ran and failed
    Transcode,
    /// Local I/O failure
    Filesystem,
    /// Caller-side precondition violation or bad configuration
    InvalidInput,
    /// Worker failure unrelated to the track itself
    Internal,
}

impl ErrorKind {
    /// Machine-readable error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network_error",
            ErrorKind::Parse => "parse_error",
            ErrorKind::ToolMissing => "tool_missing",
            ErrorKind::Transcode => "transcode_error",
            ErrorKind::Filesystem => "filesystem_error",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error for outcome reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Catalog(CatalogError::Network { .. } | CatalogError::Status { .. }) => {
                ErrorKind::Network
            }
            Error::Catalog(CatalogError::Parse { .. }) => ErrorKind::Parse,
            Error::Network(_) => ErrorKind::Network,
            Error::ToolMissing(_) => ErrorKind::ToolMissing,
            Error::Transcode { .. } => ErrorKind::Transcode,
            Error::Io(_) => ErrorKind::Filesystem,
            Error::Config { .. } | Error::InvalidInput(_) | Error::Serialization(_) => {
                ErrorKind::InvalidInput
            }
            Error::Other(_) => ErrorKind::Internal,
        }
    }

    /// Diagnostic detail for outcome reporting
    ///
    /// Includes the provider's raw response for parse failures, so a failed
    /// track can be diagnosed from the report alone.
    pub fn detail(&self) -> String {
        match self {
            Error::Catalog(CatalogError::Parse {
                message,
                raw: Some(raw),
            }) => format!("{message}; response: {raw}"),
            other => other.to_string(),
        }
    }
}
