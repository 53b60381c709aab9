//! Error types for the scraping module

use thiserror::Error;

/// Error type for scraping operations
///
/// `Map` and `Fetch` carry the reason the collaborator reported, without
/// extra prefix text; the pipeline wraps them in the user-facing message.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// The mapping call reported failure
    #[error("{0}")]
    Map(String),

    /// The batch fetch reported failure
    #[error("{0}")]
    Fetch(String),

    /// The batch fetch did not finish within the polling window
    #[error("batch fetch timed out: {0}")]
    Timeout(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}
