//! # Request Pipeline Module
//!
//! The end-to-end flow for a single request:
//!
//! ```text
//! normalize URL -> cache lookup -> (hit: return)
//!               -> map site -> batch fetch -> chunk
//!               -> generate drafts -> validate -> cache store -> return
//! ```
//!
//! Any step before generation that fails terminates the flow with a reported
//! error. Failures inside generation are absorbed per chunk and only escalate
//! if the aggregate is empty. A cache store failure is logged and does not
//! terminate the flow; the freshly computed drafts are still returned.
//!
//! Each request runs as a single sequential flow with no internal
//! parallelism; the only suspension points are the external calls and the
//! completion model's pacing.

use tracing::{error, info, instrument, warn};

use crate::cache::CacheStore;
use crate::chunker::chunk_text;
use crate::completion::CompletionModel;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::firecrawl::Scraper;
use crate::generator::DraftGenerator;
use crate::normalizer::normalize_site;
use crate::validator::{DraftSet, validate_drafts};

/// A single draft-generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Raw URL as supplied by the caller; also the cache key
    pub url: String,

    /// Caller-supplied Firecrawl key, overriding the process default
    pub firecrawl_key: Option<String>,

    /// Whether to crawl at the full page limit
    pub wants_full: bool,
}

/// The assembled request pipeline
pub struct Pipeline<M: CompletionModel, S: Scraper> {
    config: Config,
    generator: DraftGenerator<M>,
    scraper: S,
    cache: CacheStore,
}

impl<M: CompletionModel, S: Scraper> Pipeline<M, S> {
    /// Assemble a pipeline from its collaborators
    pub fn new(config: Config, generator: DraftGenerator<M>, scraper: S, cache: CacheStore) -> Self {
        Self {
            config,
            generator,
            scraper,
            cache,
        }
    }

    /// Resolve the scraping key for this request
    ///
    /// Full crawls require a caller-supplied key; quick crawls fall back to
    /// the process-wide default.
    fn resolve_scrape_key(&self, request: &GenerateRequest) -> Result<String> {
        if request.wants_full {
            request.firecrawl_key.clone().ok_or_else(|| {
                Error::ConfigMissing(
                    "a caller-supplied Firecrawl API key is required for full crawls".to_string(),
                )
            })
        } else {
            request
                .firecrawl_key
                .clone()
                .or_else(|| self.config.firecrawl_api_key.clone())
                .ok_or_else(|| Error::ConfigMissing("FIRECRAWL_API_KEY is not set".to_string()))
        }
    }

    /// Run the full flow for one request
    #[instrument(skip(self, request), fields(url = %request.url, full = request.wants_full))]
    pub async fn run(&self, request: &GenerateRequest) -> Result<DraftSet> {
        let site = normalize_site(&request.url)?;

        match self.cache.lookup(&request.url, request.wants_full).await {
            Ok(Some(drafts)) => {
                info!("Cache hit for {}", request.url);
                return Ok(drafts);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed, continuing without cache: {}", e),
        }

        let scrape_key = self.resolve_scrape_key(request)?;
        if !self.generator.model().is_configured() {
            return Err(Error::ConfigMissing(
                "completion service API key is not set".to_string(),
            ));
        }

        let limit = if request.wants_full {
            self.config.full_crawl_limit
        } else {
            self.config.quick_crawl_limit
        };

        let mut links = self
            .scraper
            .map_site(&scrape_key, site.stem(), limit)
            .await
            .map_err(|e| Error::Map(e.to_string()))?;
        links.truncate(limit as usize);
        if links.is_empty() {
            return Err(Error::Map("site map returned no pages".to_string()));
        }
        info!("Mapped {} to {} pages", site, links.len());

        let pages = self
            .scraper
            .batch_fetch(&scrape_key, &links)
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let combined = pages
            .iter()
            .map(|page| page.markdown.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunk_text(&combined, &self.config.chunk_options);
        info!("Split {} fetched pages into {} chunks", pages.len(), chunks.len());

        let report = self.generator.generate(&chunks).await;
        if report.candidates.is_empty() {
            let reason = report
                .failure_summary()
                .unwrap_or_else(|| "no chunk yielded usable drafts".to_string());
            return Err(Error::Generation(reason));
        }

        let drafts = validate_drafts(report.candidates)
            .map_err(|e| Error::Generation(e.to_string()))?;

        if let Err(e) = self
            .cache
            .store(&request.url, request.wants_full, &drafts)
            .await
        {
            // Non-fatal: the fresh result is still returned
            error!("Failed to store drafts in cache: {}", e);
        }

        info!("Generated {} drafts for {}", drafts.len(), request.url);
        Ok(drafts)
    }
}
