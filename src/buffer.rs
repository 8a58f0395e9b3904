use crate::engine::{Suggestion, SuggestionKind, clamp_cursor, word_start};
use serde::Serialize;

/// Editable rule text with a byte-offset cursor.
///
/// Applying a suggestion is plain text splicing: the buffer knows nothing about
/// the expression grammar and will happily produce malformed text when a
/// suggestion is applied in the middle of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    /// A buffer holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextBuffer { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping it into the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = clamp_cursor(&self.text, cursor);
    }

    /// Insert `s` at the cursor and move the cursor past it.
    pub fn insert(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// The word being typed: from the last whitespace or parenthesis up to
    /// the cursor.
    pub fn last_word(&self) -> &str {
        &self.text[word_start(&self.text, self.cursor)..self.cursor]
    }

    /// Suggestions for the current text and cursor.
    pub fn suggestions(&self, options: &crate::Options) -> Vec<Suggestion> {
        crate::generate_suggestions_with(&self.text, self.cursor, options)
    }

    /// Splice `suggestion` into the buffer.
    ///
    /// ```text
    /// example:   whole buffer replaced, cursor at end
    /// otherwise: "pe < 15 an|d rest"  + "and"
    ///         -> "pe < 15 and |d rest"
    /// ```
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        if suggestion.kind == SuggestionKind::Example {
            self.text = suggestion.text.clone();
            self.cursor = self.text.len();
            return;
        }

        let start = word_start(&self.text, self.cursor);
        let inserted = format!("{} ", suggestion.text);
        self.text.replace_range(start..self.cursor, &inserted);
        self.cursor = start + inserted.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_suggestions;

    fn suggestion(text: &str, kind: SuggestionKind) -> Suggestion {
        Suggestion { text: text.to_string(), kind, description: String::new(), example: None }
    }

    #[test]
    fn example_replaces_whole_buffer() {
        let mut buf = TextBuffer::new("price > ");
        buf.set_cursor(3);
        buf.apply_suggestion(&Suggestion::example("pe < 15 and market_cap > 1B"));
        assert_eq!(buf.text(), "pe < 15 and market_cap > 1B");
        assert_eq!(buf.cursor(), buf.text().len());
    }

    #[test]
    fn replaces_last_word_and_appends_space() {
        let mut buf = TextBuffer::new("price > 100 an");
        buf.apply_suggestion(&suggestion("and", SuggestionKind::Operator));
        assert_eq!(buf.text(), "price > 100 and ");
        assert_eq!(buf.cursor(), 16);
    }

    #[test]
    fn keeps_text_after_cursor() {
        let mut buf = TextBuffer::new("mc > 1B");
        buf.set_cursor(2);
        buf.apply_suggestion(&suggestion("mcap", SuggestionKind::Field));
        assert_eq!(buf.text(), "mcap  > 1B");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn splices_after_parenthesis() {
        let mut buf = TextBuffer::new("(vo");
        buf.apply_suggestion(&suggestion("volume", SuggestionKind::Field));
        assert_eq!(buf.text(), "(volume ");
    }

    #[test]
    fn mid_token_application_is_not_grammar_aware() {
        let mut buf = TextBuffer::new("price");
        buf.set_cursor(2);
        buf.apply_suggestion(&suggestion("pe", SuggestionKind::Field));
        assert_eq!(buf.text(), "pe ice");
    }

    #[test]
    fn typing_then_completing() {
        let mut buf = TextBuffer::default();
        buf.insert("pe < 15 ");
        buf.insert("an");
        assert_eq!(buf.last_word(), "an");

        let first = generate_suggestions(buf.text(), buf.cursor())
            .into_iter()
            .find(|s| s.kind == SuggestionKind::Operator)
            .unwrap();
        buf.apply_suggestion(&first);
        assert_eq!(buf.text(), "pe < 15 and ");
        assert_eq!(buf.last_word(), "");
    }
}
