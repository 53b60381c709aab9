//! # Text Chunking Module
//!
//! Splits arbitrary-length text into bounded-size segments for the completion
//! API without breaking sentences when avoidable.
//!
//! ## Chunking Strategy
//!
//! 1. The text is split into sentences (a sentence ends at `.`, `!`, or `?`
//!    followed by whitespace or end of input).
//! 2. Sentences are greedily accumulated into a chunk until adding the next
//!    sentence would exceed the maximum length, at which point the chunk is
//!    closed and a new one started.
//! 3. A single sentence longer than the maximum is itself split on word
//!    boundaries, greedily packing words up to the limit; the remainder seeds
//!    the next chunk.
//!
//! Chunks are trimmed, non-empty, and each at most the configured maximum
//! length, except when a single indivisible token exceeds it. Concatenating
//! all chunks reproduces the input's words in original order, with only
//! whitespace normalization as loss.

use serde::Serialize;
use tracing::{debug, instrument};

/// Configuration for chunking text
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Maximum length of each chunk in characters
    pub max_chunk_chars: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: 4000,
        }
    }
}

/// A contiguous, length-bounded piece of the combined scraped text
#[derive(Debug, Clone, Serialize)]
pub struct ContentChunk {
    /// The text of the chunk
    pub text: String,

    /// The position of the chunk in the original document
    pub position: usize,
}

/// Split a text blob into ordered, bounded-size chunks
#[instrument(skip(text), fields(input_len = text.len()))]
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Vec<ContentChunk> {
    let max = options.max_chunk_chars.max(1);

    let mut closed: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if sentence_len > max {
            if !current.is_empty() {
                closed.push(std::mem::take(&mut current));
            }
            current = pack_words(&sentence, max, &mut closed);
            current_len = current.chars().count();
        } else if current.is_empty() {
            current = sentence;
            current_len = sentence_len;
        } else if current_len + 1 + sentence_len > max {
            closed.push(std::mem::take(&mut current));
            current = sentence;
            current_len = sentence_len;
        } else {
            current.push(' ');
            current.push_str(&sentence);
            current_len += 1 + sentence_len;
        }
    }

    if !current.is_empty() {
        closed.push(current);
    }

    debug!("Created {} chunks", closed.len());

    closed
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .enumerate()
        .map(|(position, text)| ContentChunk { text, position })
        .collect()
}

/// Split text into sentences, keeping the terminator with the sentence
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|n| n.is_whitespace()) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }

    sentences
}

/// Pack the words of an overlong sentence into chunks of at most `max` characters
///
/// Full chunks are pushed onto `closed`; the trailing remainder is returned so
/// it can seed the next chunk. A single word longer than `max` is kept whole.
fn pack_words(sentence: &str, max: usize, closed: &mut Vec<String>) -> String {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in sentence.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > max {
            closed.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_of(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = chunk_text("One sentence. Another one!", &ChunkOptions::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "One sentence. Another one!");
        assert_eq!(chunks[0].position, 0);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_text("", &ChunkOptions::default()).is_empty());
        assert!(chunk_text("   \n\t ", &ChunkOptions::default()).is_empty());
    }

    #[test]
    fn splits_at_sentence_boundaries() {
        let text = "First sentence is here. Second sentence follows. Third one ends it.";
        let options = ChunkOptions {
            max_chunk_chars: 50,
        };

        let chunks = chunk_text(text, &options);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50, "chunk too long: {}", chunk.text);
            // No chunk starts or ends mid-sentence fragment
            assert!(!chunk.text.starts_with(' '));
        }
        assert!(chunks[0].text.ends_with('.'));
    }

    #[test]
    fn overlong_sentence_is_split_on_word_boundaries() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let options = ChunkOptions {
            max_chunk_chars: 20,
        };

        let chunks = chunk_text(text, &options);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 20);
            // Words are never broken in the middle
            for word in words_of(&chunk.text) {
                assert!(words_of(text).contains(&word));
            }
        }
    }

    #[test]
    fn remainder_of_overlong_sentence_seeds_next_chunk() {
        let text = "one two three four five six seven eight. Tail.";
        let options = ChunkOptions {
            max_chunk_chars: 20,
        };

        let chunks = chunk_text(text, &options);

        // The sentence remainder and the short trailing sentence share a chunk
        let last = &chunks[chunks.len() - 1].text;
        assert!(last.contains("Tail."));
        assert!(words_of(last).len() > 1);
    }

    #[test]
    fn single_overlong_token_is_kept_whole() {
        let token = "x".repeat(50);
        let chunks = chunk_text(
            &token,
            &ChunkOptions {
                max_chunk_chars: 10,
            },
        );

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, token);
    }

    #[test]
    fn concatenation_preserves_words_in_order() {
        let text = "The quick brown fox jumps over the lazy dog! Was it worth it? \
                    Nobody knows. Some say the fox still jumps to this day, chasing \
                    a horizon that never gets any closer.";
        let options = ChunkOptions {
            max_chunk_chars: 40,
        };

        let chunks = chunk_text(text, &options);
        let rejoined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        assert_eq!(words_of(&rejoined), words_of(text));
    }

    #[test]
    fn positions_are_sequential() {
        let text = "A. B. C. D. E. F. G. H.";
        let chunks = chunk_text(
            text,
            &ChunkOptions {
                max_chunk_chars: 5,
            },
        );

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position, i);
        }
    }

    #[test]
    fn terminator_at_end_of_input_closes_sentence() {
        let sentences = split_sentences("Done.");
        assert_eq!(sentences, vec!["Done.".to_string()]);
    }
}
