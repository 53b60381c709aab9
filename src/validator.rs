//! # Result Validator Module
//!
//! Enforces the output shape of generated drafts before they are returned or
//! cached: the candidate list is truncated to [`MAX_DRAFTS`] entries and every
//! entry must be a non-empty string. The validated result is an immutable
//! [`DraftSet`], the unit persisted to the cache and returned to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error as CrateError;

/// Maximum number of drafts in a result set
pub const MAX_DRAFTS: usize = 15;

/// Error type for draft validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The candidate list contained no entries
    #[error("no drafts to validate")]
    Empty,

    /// A candidate entry was empty or whitespace-only
    #[error("draft at index {index} is empty")]
    EmptyDraft {
        /// Position of the offending entry in the truncated list
        index: usize,
    },
}

impl From<ValidationError> for CrateError {
    fn from(err: ValidationError) -> Self {
        CrateError::Generation(err.to_string())
    }
}

/// An ordered, validated sequence of draft posts, capped at [`MAX_DRAFTS`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftSet(Vec<String>);

impl DraftSet {
    /// The drafts in order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of drafts in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set contains no drafts
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the set, yielding the drafts
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Validate raw candidates into a [`DraftSet`]
///
/// Truncates to the first [`MAX_DRAFTS`] entries, then rejects the list if it
/// is empty or contains an empty (or whitespace-only) entry.
pub fn validate_drafts(mut candidates: Vec<String>) -> Result<DraftSet, ValidationError> {
    candidates.truncate(MAX_DRAFTS);

    if candidates.is_empty() {
        return Err(ValidationError::Empty);
    }

    for (index, draft) in candidates.iter().enumerate() {
        if draft.trim().is_empty() {
            return Err(ValidationError::EmptyDraft { index });
        }
    }

    Ok(DraftSet(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("draft {}", i)).collect()
    }

    #[test]
    fn accepts_a_short_list() {
        let set = validate_drafts(candidates(3)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice()[0], "draft 0");
    }

    #[test]
    fn truncates_to_the_cap() {
        let set = validate_drafts(candidates(40)).unwrap();
        assert_eq!(set.len(), MAX_DRAFTS);
        assert_eq!(set.as_slice()[MAX_DRAFTS - 1], "draft 14");
    }

    #[test]
    fn rejects_an_empty_list() {
        assert!(matches!(
            validate_drafts(Vec::new()),
            Err(ValidationError::Empty)
        ));
    }

    #[test]
    fn rejects_empty_entries() {
        let mut list = candidates(3);
        list[1] = "   ".to_string();

        let err = validate_drafts(list).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyDraft { index: 1 }));
    }

    #[test]
    fn bad_entry_beyond_the_cap_is_ignored() {
        let mut list = candidates(MAX_DRAFTS);
        list.push(String::new());

        let set = validate_drafts(list).unwrap();
        assert_eq!(set.len(), MAX_DRAFTS);
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let set = validate_drafts(candidates(2)).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["draft 0","draft 1"]"#);

        let back: DraftSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
