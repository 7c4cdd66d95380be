//! Error types for the frame client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the frame server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status.
    #[error("HTTP {status} at {url}")]
    Status { status: u16, url: String },

    /// Invalid base URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Response body is neither JSON nor text; panes can only hold markup.
    #[error("Unsupported body type {content_type:?} at {url}")]
    BinaryBody { content_type: String, url: String },

    /// The frame listing was not a JSON array of names.
    #[error("Invalid frame list: {0}")]
    InvalidFrameList(#[source] serde_json::Error),
}

impl ClientError {
    /// Whether the server responded with the given status.
    #[must_use]
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, Self::Status { status, .. } if *status == code)
    }
}
