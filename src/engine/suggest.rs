//! Keystroke suggestions.
//!
//! Suggestions are regenerated on every edit and cursor move, so this is a
//! pure function of `(text, cursor, limit)` with no state between calls.
//!
//! ```text
//! "pe < 15 and mc|"        cursor at '|'
//!              ^^ last word = "mc"
//!
//! fields ──▶ comparison ops ──▶ logical ops ──▶ common values ──▶ take(limit)
//! (substring match on "mc", case-insensitive, declaration order)
//! ```
//!
//! There is no relevance ranking: the first `limit` hits in dictionary order
//! are returned.

use crate::dictionary::{COMMON_VALUES, COMPARISON_OPERATORS, EXAMPLE_QUERIES, FIELDS, LOGICAL_OPERATORS};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Field,
    Operator,
    Value,
    Example,
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Suggestion {
    pub fn example(text: &str) -> Self {
        Suggestion {
            text: text.to_string(),
            kind: SuggestionKind::Example,
            description: "Example query".to_string(),
            example: None,
        }
    }
}

/// Clamp a byte cursor into `text`, moving left onto a char boundary.
pub(crate) fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn is_word_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// Byte offset where the word ending at `cursor` starts.
pub(crate) fn word_start(text: &str, cursor: usize) -> usize {
    let before = &text[..clamp_cursor(text, cursor)];
    before.char_indices().rev().find(|(_, c)| is_word_delimiter(*c)).map(|(i, c)| i + c.len_utf8()).unwrap_or(0)
}

/// Generate at most `limit` suggestions for `text` with the cursor at byte
/// offset `cursor`.
pub(crate) fn generate(text: &str, cursor: usize, limit: usize) -> Vec<Suggestion> {
    if text.trim().is_empty() {
        return EXAMPLE_QUERIES.iter().map(|q| Suggestion::example(q)).collect();
    }

    let cursor = clamp_cursor(text, cursor);
    let last_word = text[word_start(text, cursor)..cursor].to_lowercase();
    let hit = |key: &str| key.to_lowercase().contains(&last_word);

    // An empty last word is a substring of every key, so a trailing space
    // lists every dictionary entry before truncation.
    let mut out: Vec<Suggestion> = FIELDS
        .iter()
        .filter(|f| hit(f.alias))
        .map(|f| Suggestion {
            text: f.alias.to_string(),
            kind: SuggestionKind::Field,
            description: f.description.to_string(),
            example: Some(f.example.to_string()),
        })
        .collect();

    out.extend(COMPARISON_OPERATORS.iter().chain(LOGICAL_OPERATORS).filter(|op| hit(op.token)).map(|op| Suggestion {
        text: op.token.to_string(),
        kind: SuggestionKind::Operator,
        description: op.description.to_string(),
        example: Some(op.example.to_string()),
    }));

    out.extend(COMMON_VALUES.iter().filter(|v| hit(v.token)).map(|v| Suggestion {
        text: v.token.to_string(),
        kind: SuggestionKind::Value,
        description: format!("{} ({})", v.description, v.value),
        example: None,
    }));

    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_returns_the_examples() {
        for text in ["", "   ", "\n\t"] {
            let out = generate(text, 0, 10);
            assert_eq!(out.len(), EXAMPLE_QUERIES.len());
            assert!(out.iter().all(|s| s.kind == SuggestionKind::Example));
            assert_eq!(out[1].text, "pe < 15 and market_cap > 1B");
        }
    }

    #[test]
    fn trailing_space_starts_with_fields() {
        let out = generate("price > 100 and ", 16, 10);
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|s| s.kind == SuggestionKind::Field));
        assert_eq!(out[0].text, "price");
    }

    #[test]
    fn trailing_space_lists_every_dictionary_when_uncapped() {
        let total = FIELDS.len() + COMPARISON_OPERATORS.len() + LOGICAL_OPERATORS.len() + COMMON_VALUES.len();
        let out = generate("price > 100 ", 12, 100);
        assert_eq!(out.len(), total);
        assert_eq!(out.iter().filter(|s| s.kind == SuggestionKind::Operator).count(), 14);
        assert_eq!(out.iter().filter(|s| s.kind == SuggestionKind::Value).count(), COMMON_VALUES.len());
        assert_eq!(out[FIELDS.len()].text, ">");
        assert_eq!(out.last().map(|s| s.text.as_str()), Some("NYSE"));
    }

    #[test]
    fn matches_substrings_across_dictionaries() {
        let out = generate("price > 100 AN", 14, 10);
        let texts: Vec<&str> = out.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["change", "exchange", "and", "Financial"]);
        assert_eq!(out[2].kind, SuggestionKind::Operator);
        assert_eq!(out[3].kind, SuggestionKind::Value);
    }

    #[test]
    fn shorthand_values_are_suggested() {
        let out = generate("mcap > 1b", 9, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, SuggestionKind::Value);
        assert_eq!(out[0].description, "One billion (1,000,000,000)");
    }

    #[test]
    fn last_word_stops_at_parentheses_and_cursor() {
        assert_eq!(word_start("(pe", 3), 1);
        assert_eq!(word_start("price > 10", 5), 0);
        let out = generate("(vol", 4, 10);
        assert_eq!(out.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["volume", "avg_volume"]);
    }

    #[test]
    fn cursor_is_clamped_to_char_boundaries() {
        assert_eq!(clamp_cursor("é", 1), 0);
        assert_eq!(clamp_cursor("abc", 99), 3);
    }

    #[test]
    fn unknown_words_yield_nothing() {
        assert!(generate("zzz", 3, 10).is_empty());
    }
}
