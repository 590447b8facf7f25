//! Error types for movie-discovery
//!
//! The taxonomy mirrors the failure modes of the upstream API client:
//! - Non-2xx responses carry the response's status text
//! - Network and body-decoding failures before a usable response
//! - Invalid client configuration detected at construction
//! - A catch-all for anything else (including producer panics)
//!
//! Consumers of the fetch container never see these variants directly;
//! [`ErrorInfo`] is the normalized, presentation-facing form stored in
//! fetch state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for movie-discovery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for movie-discovery
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream API answered with a non-2xx status
    #[error("upstream request failed: {status_text}")]
    Status {
        /// Status text of the failing response (e.g. "404 Not Found")
        status_text: String,
    },

    /// Network or body-decoding failure before a usable response was obtained
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid client configuration
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the invalid setting
        message: String,
    },

    /// Any other failure, wrapped with a generic message
    #[error("{0}")]
    Unknown(String),
}

impl Error {
    /// Builds an [`Error::Status`] from a response status code.
    ///
    /// The stored text matches the upstream status line, e.g.
    /// `"404 Not Found"`.
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status_text: status.to_string(),
        }
    }
}

/// Normalized error snapshot stored in fetch state and shown to consumers.
///
/// Every failure reaching the fetch container is flattened into this
/// shape; the original error is logged but not retained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Human-readable error message
    pub message: String,
}

impl ErrorInfo {
    /// Creates an `ErrorInfo` from any displayable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&Error> for ErrorInfo {
    fn from(err: &Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<Error> for ErrorInfo {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
