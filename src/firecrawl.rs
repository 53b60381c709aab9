//! # Site Scraping Module
//!
//! Crawling is delegated to the Firecrawl API; this module provides the seam
//! for that collaborator and the concrete client.
//!
//! ## Key Components
//!
//! - `Scraper`: the abstract capability pair "map site to URLs" and
//!   "batch-fetch page text"
//! - `FirecrawlClient`: reqwest-based client for the Firecrawl v1 API
//! - `PageContent`: the markdown content of one fetched page
//!
//! The API key is passed per call rather than held by the client, because the
//! key may be supplied per-request by the caller or fall back to the
//! process-wide default.

use async_trait::async_trait;
use serde::Deserialize;

pub mod client;
pub mod error;

pub use client::FirecrawlClient;
pub use error::ScrapeError;

/// Content of a single fetched page
#[derive(Debug, Clone, Deserialize)]
pub struct PageContent {
    /// Main content of the page in Markdown format
    pub markdown: String,
}

/// Abstract scraping capability
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Map a site to the URLs of its pages, at most `limit` of them
    async fn map_site(
        &self,
        api_key: &str,
        root: &str,
        limit: u32,
    ) -> Result<Vec<String>, ScrapeError>;

    /// Fetch the main content of each URL as markdown
    async fn batch_fetch(
        &self,
        api_key: &str,
        urls: &[String],
    ) -> Result<Vec<PageContent>, ScrapeError>;
}
