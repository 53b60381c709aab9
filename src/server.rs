//! # HTTP Server Module
//!
//! The service boundary: a single `POST /api/generate-tweets` route accepting
//! `{ url, firecrawlKey?, wantsFull? }` and answering either
//! `{ success: true, tweets: [...] }` or `{ success: false, error: "..." }`.
//! The caller always receives one of those two shapes; pipeline errors are
//! flattened to their human-readable message.

use std::sync::Arc;

use axum::http::{Method, header};
use axum::routing::post;
use axum::{Json, Router, extract::State};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::completion::CompletionModel;
use crate::error::{Error, Result};
use crate::firecrawl::Scraper;
use crate::pipeline::{GenerateRequest, Pipeline};

/// Shared state for request handlers
pub struct AppState<M: CompletionModel, S: Scraper> {
    pipeline: Arc<Pipeline<M, S>>,
}

impl<M: CompletionModel, S: Scraper> Clone for AppState<M, S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Wire format of the request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTweetsBody {
    /// Website URL to generate drafts for
    pub url: String,

    /// Optional caller-supplied Firecrawl key
    pub firecrawl_key: Option<String>,

    /// Whether to crawl at the full page limit
    #[serde(default)]
    pub wants_full: bool,
}

/// Wire format of the response body
#[derive(Debug, Serialize)]
pub struct GenerateTweetsResponse {
    /// Whether generation succeeded
    pub success: bool,

    /// Generated drafts, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets: Option<Vec<String>>,

    /// Error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateTweetsResponse {
    fn ok(tweets: Vec<String>) -> Self {
        Self {
            success: true,
            tweets: Some(tweets),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            tweets: None,
            error: Some(message),
        }
    }
}

/// Handle one generation request
pub async fn generate_tweets<M, S>(
    State(state): State<AppState<M, S>>,
    Json(body): Json<GenerateTweetsBody>,
) -> Json<GenerateTweetsResponse>
where
    M: CompletionModel + 'static,
    S: Scraper + 'static,
{
    let request = GenerateRequest {
        url: body.url,
        firecrawl_key: body.firecrawl_key,
        wants_full: body.wants_full,
    };

    match state.pipeline.run(&request).await {
        Ok(drafts) => Json(GenerateTweetsResponse::ok(drafts.into_inner())),
        Err(e) => {
            error!("Request for {} failed: {}", request.url, e);
            Json(GenerateTweetsResponse::err(e.to_string()))
        }
    }
}

/// Build the application router around a pipeline
pub fn router<M, S>(pipeline: Arc<Pipeline<M, S>>) -> Router
where
    M: CompletionModel + 'static,
    S: Scraper + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/generate-tweets", post(generate_tweets::<M, S>))
        .layer(cors)
        .with_state(AppState { pipeline })
}

/// Bind and serve until the process is stopped
pub async fn serve<M, S>(bind: &str, pipeline: Arc<Pipeline<M, S>>) -> Result<()>
where
    M: CompletionModel + 'static,
    S: Scraper + 'static,
{
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| Error::Other(format!("Failed to bind {}: {}", bind, e)))?;
    info!("Listening on {}", bind);

    axum::serve(listener, router(pipeline))
        .await
        .map_err(|e| Error::Other(format!("Server error: {}", e)))
}
