//! Pacing wrapper for completion models
//!
//! Wraps any [`CompletionModel`] with a `governor` rate limiter so successive
//! requests are spaced out. With the default quota of one request per second,
//! the first call proceeds immediately and each later call waits for its slot,
//! which is the inter-chunk pacing the draft generator relies on.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tracing::{Instrument, debug_span, info_span};

use super::{CompletionError, CompletionModel, CompletionRequest};

/// A completion model that waits for a rate-limiter slot before each request
#[derive(Clone)]
pub struct PacedCompletionModel<M: CompletionModel> {
    model: M,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<M> PacedCompletionModel<M>
where
    M: CompletionModel,
{
    /// Wrap a model with a custom limiter
    pub fn new(model: M, limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            model,
            limiter: Arc::new(limiter),
        }
    }

    /// Wrap a model with a quota of `per_second` requests per second
    pub fn per_second(model: M, per_second: u32) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(per_second.max(1)).expect("must create rate limit"),
        );
        Self::new(model, RateLimiter::direct(quota))
    }
}

#[async_trait]
impl<M: CompletionModel> CompletionModel for PacedCompletionModel<M> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.limiter
            .until_ready()
            .instrument(debug_span!("limiter"))
            .await;
        self.model
            .complete(request)
            .instrument(info_span!("completion"))
            .await
    }

    fn is_configured(&self) -> bool {
        self.model.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::mock::MockCompletionModel;
    use std::time::Instant;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "system".to_string(),
            prompt: "prompt".to_string(),
            max_tokens: 10,
        }
    }

    #[tokio::test]
    async fn passes_responses_through() {
        let mock = MockCompletionModel::with_text("hello");
        let paced = PacedCompletionModel::per_second(mock, 100);

        let text = paced.complete(request()).await.unwrap();
        assert_eq!(text, "hello");
        assert!(paced.is_configured());
    }

    #[tokio::test]
    async fn second_call_waits_for_its_slot() {
        let mock = MockCompletionModel::with_text("hello");
        let paced = PacedCompletionModel::per_second(mock, 1);

        let start = Instant::now();
        paced.complete(request()).await.unwrap();
        let first_elapsed = start.elapsed();
        paced.complete(request()).await.unwrap();
        let second_elapsed = start.elapsed();

        // First call is immediate; the second waits roughly a full second.
        assert!(first_elapsed.as_millis() < 500);
        assert!(second_elapsed.as_millis() >= 900);
    }
}
