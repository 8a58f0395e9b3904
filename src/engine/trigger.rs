//! Input pre-classification.
//!
//! A cheap scan of the raw line that records coarse features as bit flags.
//! The validator uses the symbol bits as a fast path and the verbose API
//! reports the full mask for debugging.
//!
//! The scan is a heuristic: false positives are fine because anything that
//! matters is confirmed by the validator's substring checks or by the parser.

use bitflags::bitflags;

bitflags! {
    /// Coarse features of a rule line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputClass: u32 {
        const HAS_DIGITS         = 1 << 0;
        /// Contains `<`, `>` or `=` (so every symbolic comparison operator).
        const HAS_COMPARISON     = 1 << 1;
        /// Contains `&&` or `||`.
        const HAS_LOGICAL_SYMBOL = 1 << 2;
        /// Contains `and`, `or` or `not` as a whole word.
        const HAS_LOGICAL_WORD   = 1 << 3;
        const HAS_PAREN          = 1 << 4;
        const HAS_QUOTE          = 1 << 5;
        /// Contains a suffixed number such as `1B` or `500k`.
        const HAS_SHORTHAND      = 1 << 6;
        const MULTI_LINE         = 1 << 7;
    }
}

impl InputClass {
    pub fn scan(input: &str) -> Self {
        let mut class = InputClass::empty();
        let lower = input.to_ascii_lowercase();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            class |= InputClass::HAS_DIGITS;
        }
        if input.bytes().any(|b| matches!(b, b'<' | b'>' | b'=')) {
            class |= InputClass::HAS_COMPARISON;
        }
        if input.contains("&&") || input.contains("||") {
            class |= InputClass::HAS_LOGICAL_SYMBOL;
        }
        if lower
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .any(|w| matches!(w, "and" | "or" | "not"))
        {
            class |= InputClass::HAS_LOGICAL_WORD;
        }
        if input.contains('(') || input.contains(')') {
            class |= InputClass::HAS_PAREN;
        }
        if input.contains('"') || input.contains('\'') {
            class |= InputClass::HAS_QUOTE;
        }
        if regex!(r"(?i)\d[kmbt]\b").is_match(input) {
            class |= InputClass::HAS_SHORTHAND;
        }
        if input.trim().contains('\n') {
            class |= InputClass::MULTI_LINE;
        }

        class
    }

    /// Flag names, for reports.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_detects_symbols_and_words() {
        let class = InputClass::scan("(pe < 15) and mcap > 1B");
        assert!(class.contains(InputClass::HAS_DIGITS));
        assert!(class.contains(InputClass::HAS_COMPARISON));
        assert!(class.contains(InputClass::HAS_LOGICAL_WORD));
        assert!(class.contains(InputClass::HAS_PAREN));
        assert!(class.contains(InputClass::HAS_SHORTHAND));
        assert!(!class.contains(InputClass::HAS_LOGICAL_SYMBOL));
    }

    #[test]
    fn logical_words_need_word_boundaries() {
        assert!(!InputClass::scan("just some words").contains(InputClass::HAS_LOGICAL_WORD));
        assert!(InputClass::scan("a || b").contains(InputClass::HAS_LOGICAL_SYMBOL));
    }

    #[test]
    fn names_lists_set_flags() {
        let names = InputClass::scan("price > 100").names();
        assert_eq!(names, vec!["HAS_DIGITS", "HAS_COMPARISON"]);
    }
}
