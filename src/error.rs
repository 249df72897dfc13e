//! Error types for the browselib library.

use thiserror::Error;

use crate::api::ErrorBody;

/// Main error type for browselib operations.
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The service answered with a non-success status.
    ///
    /// `body` holds the parsed JSON error body when the service sent one.
    #[error("HTTP error: {status}")]
    HttpError {
        status: u16,
        body: Option<ErrorBody>,
    },

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local I/O error (upload sources, download targets).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The browser actor is no longer running.
    #[error("Browser stopped")]
    Stopped,

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl BrowseError {
    /// Human-readable description supplied by the service, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            BrowseError::HttpError { body: Some(body), .. } => body.description(),
            _ => None,
        }
    }
}

/// Result type alias for browselib operations.
pub type Result<T> = std::result::Result<T, BrowseError>;
