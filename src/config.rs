//! # Configuration Module
//!
//! Process-wide configuration for the draft pipeline, passed in explicitly at
//! construction time rather than read from ambient globals. Credentials may
//! legitimately be absent here: a missing scraping or completion key surfaces
//! as a request-level failure, not a startup failure.

use crate::chunker::ChunkOptions;
use crate::generator::GeneratorOptions;

/// Page limit for "quick" mode crawls
pub const QUICK_CRAWL_LIMIT: u32 = 10;

/// Page limit for "full" mode crawls
pub const FULL_CRAWL_LIMIT: u32 = 100;

/// Configuration for the draft pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Process-wide default Firecrawl key, used when the request brings none
    pub firecrawl_api_key: Option<String>,

    /// Options for chunking combined page content
    pub chunk_options: ChunkOptions,

    /// Options for draft generation
    pub generator_options: GeneratorOptions,

    /// Page limit for quick-mode crawls
    pub quick_crawl_limit: u32,

    /// Page limit for full-mode crawls
    pub full_crawl_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firecrawl_api_key: None,
            chunk_options: ChunkOptions::default(),
            generator_options: GeneratorOptions::default(),
            quick_crawl_limit: QUICK_CRAWL_LIMIT,
            full_crawl_limit: FULL_CRAWL_LIMIT,
        }
    }
}

impl Config {
    /// Create a new builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            firecrawl_api_key: std::env::var("FIRECRAWL_API_KEY").ok(),
            ..Self::default()
        }
    }
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the process-wide default Firecrawl key
    pub fn firecrawl_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.firecrawl_api_key = Some(key.into());
        self
    }

    /// Set the chunking options
    pub fn chunk_options(mut self, chunk_options: ChunkOptions) -> Self {
        self.config.chunk_options = chunk_options;
        self
    }

    /// Set the generator options
    pub fn generator_options(mut self, generator_options: GeneratorOptions) -> Self {
        self.config.generator_options = generator_options;
        self
    }

    /// Set the quick-mode crawl limit
    pub fn quick_crawl_limit(mut self, limit: u32) -> Self {
        self.config.quick_crawl_limit = limit;
        self
    }

    /// Set the full-mode crawl limit
    pub fn full_crawl_limit(mut self, limit: u32) -> Self {
        self.config.full_crawl_limit = limit;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_request_limits() {
        let config = Config::default();
        assert_eq!(config.quick_crawl_limit, 10);
        assert_eq!(config.full_crawl_limit, 100);
        assert_eq!(config.generator_options.target_count, 15);
        assert_eq!(config.chunk_options.max_chunk_chars, 4000);
        assert!(config.firecrawl_api_key.is_none());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = Config::builder()
            .firecrawl_api_key("fc-key")
            .quick_crawl_limit(3)
            .build();

        assert_eq!(config.firecrawl_api_key.as_deref(), Some("fc-key"));
        assert_eq!(config.quick_crawl_limit, 3);
        assert_eq!(config.full_crawl_limit, 100);
    }
}
