//! # tweetforge - Social Post Drafts from Websites
//!
//! This crate turns a website URL into a short list of social-media post
//! drafts. Crawling is delegated to the Firecrawl API, summarization to an
//! OpenAI-compatible completion API, and persistence to a libsql store; the
//! crate's own logic is the glue between them.
//!
//! ## Features
//!
//! - URL normalization into a crawl stem (repository-aware for code hosts)
//! - Sentence-respecting text chunking with a bounded chunk size
//! - Sequential, rate-paced draft generation with early stop at the target
//! - Marker-token parsing of free-form model output
//! - Shape validation of results before they are returned or cached
//! - Last-write-wins result caching keyed by (URL, fullness)
//! - Async API with Tokio, HTTP boundary with axum
//!
//! ## Example
//!
//! ```rust,no_run
//! use tweetforge::cache::CacheStore;
//! use tweetforge::completion::{OpenAiClient, PacedCompletionModel};
//! use tweetforge::config::Config;
//! use tweetforge::firecrawl::FirecrawlClient;
//! use tweetforge::generator::DraftGenerator;
//! use tweetforge::pipeline::{GenerateRequest, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder().firecrawl_api_key("fc-key").build();
//!     let model = PacedCompletionModel::per_second(
//!         OpenAiClient::new(Some("completion-key".to_string())),
//!         1,
//!     );
//!     let generator = DraftGenerator::new(model, config.generator_options.clone());
//!     let cache = CacheStore::new_local("cache.db").await?;
//!
//!     let pipeline = Pipeline::new(config, generator, FirecrawlClient::new(), cache);
//!     let drafts = pipeline
//!         .run(&GenerateRequest {
//!             url: "example.com".to_string(),
//!             firecrawl_key: None,
//!             wants_full: false,
//!         })
//!         .await?;
//!
//!     for draft in drafts.as_slice() {
//!         println!("{}", draft);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod cache;
pub mod chunker;
pub mod completion;
pub mod config;
pub mod firecrawl;
pub mod generator;
pub mod normalizer;
pub mod pipeline;
pub mod server;
pub mod validator;

pub use error::{Error, Result};

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::pipeline::{GenerateRequest, Pipeline};
    pub use crate::validator::DraftSet;
}
