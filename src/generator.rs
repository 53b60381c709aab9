//! # Draft Generator Module
//!
//! Turns ordered content chunks into candidate post drafts. Each chunk gets
//! exactly one completion request asking for a fixed number of draft lines in
//! a constrained format (every candidate line prefixed with the
//! [`DRAFT_MARKER`](parser::DRAFT_MARKER) token). Chunks are processed
//! strictly in order and processing stops early once the running total
//! reaches the target count.
//!
//! Per-chunk failures are non-fatal: they are recorded as tagged
//! [`ChunkOutcome`]s, contribute zero lines, and the generator moves on to the
//! next chunk. Request pacing is the completion model's concern; wrap the
//! model in [`PacedCompletionModel`](crate::completion::PacedCompletionModel)
//! to space out the calls.

use tracing::{debug, instrument, warn};

pub mod parser;

use crate::chunker::ContentChunk;
use crate::completion::{CompletionModel, CompletionRequest};
use parser::{DRAFT_MARKER, parse_draft_lines};

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates tweets based on provided text content.";

/// Configuration for draft generation
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Stop processing chunks once this many candidates are collected
    pub target_count: usize,

    /// Number of draft lines requested per chunk
    pub drafts_per_chunk: usize,

    /// Token budget per completion request
    pub max_tokens: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            target_count: 15,
            drafts_per_chunk: 3,
            max_tokens: 1000,
        }
    }
}

/// The tagged result of processing a single chunk
#[derive(Debug, Clone)]
pub enum ChunkOutcome {
    /// The chunk's completion yielded the given candidate lines
    Drafted {
        /// Position of the chunk in the input sequence
        position: usize,
        /// Parsed candidate lines, possibly empty
        lines: Vec<String>,
    },

    /// The chunk's completion failed or was malformed
    Failed {
        /// Position of the chunk in the input sequence
        position: usize,
        /// Why the chunk contributed nothing
        reason: String,
    },
}

/// Everything the generation pass produced
#[derive(Debug)]
pub struct GenerationReport {
    /// Ordered raw candidates, not yet truncated to the target
    pub candidates: Vec<String>,

    /// One tagged outcome per processed chunk
    pub outcomes: Vec<ChunkOutcome>,

    /// How many chunks were processed before stopping
    pub chunks_processed: usize,
}

impl GenerationReport {
    /// Reasons from failed chunks, joined for diagnostics
    pub fn failure_summary(&self) -> Option<String> {
        let reasons: Vec<&str> = self
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ChunkOutcome::Failed { reason, .. } => Some(reason.as_str()),
                ChunkOutcome::Drafted { .. } => None,
            })
            .collect();

        if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        }
    }
}

/// Generates post drafts from content chunks via a completion model
pub struct DraftGenerator<M: CompletionModel> {
    model: M,
    options: GeneratorOptions,
}

impl<M: CompletionModel> DraftGenerator<M> {
    /// Create a generator over the given model
    pub fn new(model: M, options: GeneratorOptions) -> Self {
        Self { model, options }
    }

    /// The underlying completion model
    pub fn model(&self) -> &M {
        &self.model
    }

    fn prompt_for(&self, chunk: &ContentChunk) -> String {
        format!(
            "Generate {count} short, engaging tweets in American English, using a \
             conversational, everyday tone, based on this content. Write each tweet \
             on its own line, prefixed with \"{marker}\".\n\n{content}",
            count = self.options.drafts_per_chunk,
            marker = DRAFT_MARKER,
            content = chunk.text,
        )
    }

    /// Process chunks in order, one completion call per chunk
    ///
    /// Stops issuing calls as soon as the running candidate total reaches the
    /// target count. The returned candidates are raw and may exceed the
    /// target; truncation is the validator's job.
    #[instrument(skip(self, chunks), fields(chunk_count = chunks.len()))]
    pub async fn generate(&self, chunks: &[ContentChunk]) -> GenerationReport {
        let mut candidates = Vec::new();
        let mut outcomes = Vec::new();
        let mut chunks_processed = 0;

        for chunk in chunks {
            if candidates.len() >= self.options.target_count {
                debug!(
                    "Target of {} candidates reached, skipping remaining chunks",
                    self.options.target_count
                );
                break;
            }
            chunks_processed += 1;

            let request = CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt: self.prompt_for(chunk),
                max_tokens: self.options.max_tokens,
            };

            match self.model.complete(request).await {
                Ok(text) => {
                    let lines = parse_draft_lines(&text);
                    debug!(
                        "Chunk {} yielded {} candidate lines",
                        chunk.position,
                        lines.len()
                    );
                    candidates.extend(lines.iter().cloned());
                    outcomes.push(ChunkOutcome::Drafted {
                        position: chunk.position,
                        lines,
                    });
                }
                Err(e) => {
                    warn!("Chunk {} failed to generate drafts: {}", chunk.position, e);
                    outcomes.push(ChunkOutcome::Failed {
                        position: chunk.position,
                        reason: e.to_string(),
                    });
                }
            }
        }

        GenerationReport {
            candidates,
            outcomes,
            chunks_processed,
        }
    }
}
