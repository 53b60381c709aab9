//! Error types for the tweetforge crate

use thiserror::Error;

/// Result type for tweetforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tweetforge operations
#[derive(Debug, Error)]
pub enum Error {
    /// The caller-supplied URL could not be parsed
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// A required credential or setting is absent
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    /// The scraping collaborator failed to map the site
    #[error("Failed to map URL: {0}")]
    Map(String),

    /// The scraping collaborator failed to fetch page content
    #[error("Failed to fetch content: {0}")]
    Fetch(String),

    /// Draft generation or validation produced no usable result
    #[error("Failed to generate drafts: {0}")]
    Generation(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
