//! Parser for marker-prefixed draft lines
//!
//! The completion model is asked to emit each candidate post on its own line,
//! prefixed with the [`DRAFT_MARKER`] token. This parser implements that
//! grammar:
//!
//! ```text
//! line        = [ numbering ] marker content
//! numbering   = digits ("." | ")") whitespace     ; list numbering models add
//! marker      = "TWEET:"
//! content     = any text, trimmed, non-empty
//! ```
//!
//! Lines that do not match are discarded, as is a line whose content is empty
//! after stripping the marker.

use regex::Regex;
use std::sync::LazyLock;

/// The fixed line prefix identifying a candidate post in model output
pub const DRAFT_MARKER: &str = "TWEET:";

/// Leading list numbering some models insert before the marker
static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("numbering regex must compile"));

/// Extract candidate lines from free-form model output
pub fn parse_draft_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = NUMBERING.replace(line, "");
            let content = line.strip_prefix(DRAFT_MARKER)?.trim();
            if content.is_empty() {
                None
            } else {
                Some(content.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_marker_lines() {
        let text = "TWEET: First draft\nTWEET: Second draft\n";
        assert_eq!(
            parse_draft_lines(text),
            vec!["First draft".to_string(), "Second draft".to_string()]
        );
    }

    #[test]
    fn ignores_lines_without_the_marker() {
        let text = "Here are your tweets:\nTWEET: Only this one\nHope you like them!";
        assert_eq!(parse_draft_lines(text), vec!["Only this one".to_string()]);
    }

    #[test]
    fn strips_list_numbering_before_the_marker() {
        let text = "1. TWEET: Numbered\n2) TWEET: Parenthesized\n";
        assert_eq!(
            parse_draft_lines(text),
            vec!["Numbered".to_string(), "Parenthesized".to_string()]
        );
    }

    #[test]
    fn drops_empty_content() {
        let text = "TWEET:\nTWEET:    \nTWEET: kept\n";
        assert_eq!(parse_draft_lines(text), vec!["kept".to_string()]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let text = "   TWEET:   padded out   ";
        assert_eq!(parse_draft_lines(text), vec!["padded out".to_string()]);
    }

    #[test]
    fn marker_mid_line_does_not_count() {
        let text = "This is not a TWEET: really";
        assert!(parse_draft_lines(text).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_draft_lines("").is_empty());
    }
}
