//! Error types for the completion module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for completion operations
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// The API responded without a usable completion
    #[error("Completion response contained no text")]
    EmptyResponse,

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl From<CompletionError> for CrateError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Http(e) => CrateError::Http(e),
            _ => CrateError::Generation(err.to_string()),
        }
    }
}
