//! # Completion Service Module
//!
//! This module provides the seam to the external completion API together with
//! a concrete client for OpenAI-compatible chat-completion endpoints and a
//! pacing wrapper that spaces out successive requests.
//!
//! ## Key Components
//!
//! - `CompletionModel`: the abstract "given a prompt, return text" capability
//! - `OpenAiClient`: reqwest-based client for OpenAI-compatible endpoints
//! - `PacedCompletionModel`: wrapper that rate-paces any completion model

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod paced;

#[cfg(test)]
pub mod mock;

pub use client::OpenAiClient;
pub use error::CompletionError;
pub use paced::PacedCompletionModel;

/// A single completion request: system prompt, user prompt, and output limits
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt establishing the assistant's role
    pub system: String,

    /// User prompt carrying the content to work on
    pub prompt: String,

    /// Maximum number of tokens the model may produce
    pub max_tokens: u32,
}

/// Abstract completion capability
///
/// Implementations issue exactly one request per call and return the raw text
/// of the first choice.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Request a completion for the given prompts
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Whether the model has the credentials it needs to issue requests
    ///
    /// A `false` here is surfaced to the caller as a request-level
    /// configuration failure before any chunk is processed.
    fn is_configured(&self) -> bool {
        true
    }
}
