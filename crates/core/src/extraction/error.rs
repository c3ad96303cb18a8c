//! Extraction error types.

use thiserror::Error;

/// Errors from the AI extraction service.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Client misconfiguration, e.g. missing API key.
    #[error("extraction configuration error: {0}")]
    Configuration(String),

    /// Transport failure or timeout.
    #[error("extraction request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("extraction service returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The reply carried no text.
    #[error("extraction service returned no content")]
    EmptyResponse,

    /// The reply text was not the expected JSON.
    #[error("could not parse extraction result: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
