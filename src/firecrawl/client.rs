//! Client for the Firecrawl v1 API
//!
//! Implements the two collaborator capabilities: site mapping
//! (`POST /v1/map`) and batch content fetching (`POST /v1/batch/scrape`
//! followed by polling the job until it completes). Requests carry a bearer
//! key supplied per call.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{PageContent, ScrapeError, Scraper};

/// Default base URL for the Firecrawl API
pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

/// Timeout for individual HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Interval between batch job status polls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum number of status polls before giving up on a batch job
const DEFAULT_MAX_POLLS: u32 = 90;

#[derive(Debug, Serialize)]
struct MapRequest<'a> {
    url: &'a str,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct MapResponse {
    success: bool,
    #[serde(default)]
    links: Vec<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchScrapeRequest<'a> {
    urls: &'a [String],
    formats: &'static [&'static str],
    only_main_content: bool,
}

#[derive(Debug, Deserialize)]
struct BatchScrapeStarted {
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchScrapeStatus {
    status: String,
    #[serde(default)]
    data: Vec<BatchPage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchPage {
    markdown: Option<String>,
}

/// HTTP client for the Firecrawl API
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    client: ReqwestClient,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl Default for FirecrawlClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl FirecrawlClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }

    /// Shorten the polling cadence (for testing only)
    pub fn set_poll_interval(&mut self, interval: Duration, max_polls: u32) {
        self.poll_interval = interval;
        self.max_polls = max_polls;
    }
}

impl FirecrawlClient {
    /// Create a new client for the public Firecrawl endpoint
    pub fn new() -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ScrapeError> {
        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("API error: {} - {}", status, response_text);

            let message = if status == StatusCode::UNAUTHORIZED {
                "Invalid API key or credentials".to_string()
            } else {
                response_text
            };
            return Err(ScrapeError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse response: {}", e);
            ScrapeError::UnexpectedResponse(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl Scraper for FirecrawlClient {
    #[instrument(skip(self, api_key), level = "debug")]
    async fn map_site(
        &self,
        api_key: &str,
        root: &str,
        limit: u32,
    ) -> Result<Vec<String>, ScrapeError> {
        let url = format!("{}/v1/map", self.base_url);
        let body = MapRequest { url: root, limit };

        debug!("Mapping site {} with limit {}", root, limit);
        let response: MapResponse = self
            .execute(self.client.post(url).bearer_auth(api_key).json(&body))
            .await?;

        if !response.success {
            return Err(ScrapeError::Map(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(response.links)
    }

    #[instrument(skip(self, api_key, urls), fields(url_count = urls.len()), level = "debug")]
    async fn batch_fetch(
        &self,
        api_key: &str,
        urls: &[String],
    ) -> Result<Vec<PageContent>, ScrapeError> {
        let url = format!("{}/v1/batch/scrape", self.base_url);
        let body = BatchScrapeRequest {
            urls,
            formats: &["markdown"],
            only_main_content: true,
        };

        debug!("Starting batch scrape of {} urls", urls.len());
        let started: BatchScrapeStarted = self
            .execute(self.client.post(url).bearer_auth(api_key).json(&body))
            .await?;

        if !started.success {
            return Err(ScrapeError::Fetch(
                started.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let job_id = started.id.ok_or_else(|| {
            ScrapeError::UnexpectedResponse("batch scrape response had no job id".to_string())
        })?;

        let status_url = format!("{}/v1/batch/scrape/{}", self.base_url, job_id);
        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let status: BatchScrapeStatus = self
                .execute(self.client.get(&status_url).bearer_auth(api_key))
                .await?;

            match status.status.as_str() {
                "completed" => {
                    let pages = status
                        .data
                        .into_iter()
                        .filter_map(|page| page.markdown)
                        .filter(|markdown| !markdown.is_empty())
                        .map(|markdown| PageContent { markdown })
                        .collect();
                    return Ok(pages);
                }
                "failed" | "cancelled" => {
                    return Err(ScrapeError::Fetch(
                        status.error.unwrap_or_else(|| status.status.clone()),
                    ));
                }
                other => debug!("Batch job {} still {}", job_id, other),
            }
        }

        Err(ScrapeError::Timeout(format!(
            "batch job {} did not complete after {} polls",
            job_id, self.max_polls
        )))
    }
}
