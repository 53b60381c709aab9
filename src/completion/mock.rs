//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel`
//! trait for use in tests. It returns scripted responses (or errors) in order
//! and counts the requests it receives, so tests can assert how many calls a
//! flow actually issued without touching the network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CompletionError, CompletionModel, CompletionRequest};

/// A mock completion model returning scripted responses
#[derive(Clone)]
pub struct MockCompletionModel {
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    fallback: Option<String>,
    calls: Arc<AtomicUsize>,
    configured: bool,
}

impl MockCompletionModel {
    /// A model that answers every request with the same text
    pub fn with_text(text: &str) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Some(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
            configured: true,
        }
    }

    /// A model that replays the given responses in order
    ///
    /// `Err` entries become per-request failures. Once the script is
    /// exhausted, further requests fail.
    pub fn with_script(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            fallback: None,
            calls: Arc::new(AtomicUsize::new(0)),
            configured: true,
        }
    }

    /// A model that reports itself as lacking credentials
    pub fn unconfigured() -> Self {
        let mut mock = Self::with_text("");
        mock.configured = false;
        mock
    }

    /// Number of completion requests issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionModel for MockCompletionModel {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = { self.script.lock().await.pop_front() };
        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(CompletionError::UnexpectedResponse(reason)),
            None => match &self.fallback {
                Some(text) => Ok(text.clone()),
                None => Err(CompletionError::EmptyResponse),
            },
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
