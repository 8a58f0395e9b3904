//! Heuristic rule validation.
//!
//! A line "looks like" a rule when it mentions a field alias and an operator
//! token anywhere, both as case-insensitive substrings. This is a necessary
//! condition only: `"priceless > nothing"` passes. Use the parser for a real
//! answer.

use super::trigger::InputClass;
use crate::dictionary::{COMPARISON_OPERATORS, FIELDS, LOGICAL_OPERATORS};

/// Substring check against the field and operator dictionaries.
pub(crate) fn looks_valid(line: &str) -> bool {
    let lower = line.to_lowercase();

    let has_field = FIELDS.iter().any(|f| lower.contains(f.alias));
    if !has_field {
        return false;
    }

    // Every symbolic operator contains '<', '>', '=' or is "&&"/"||", so the
    // class bits settle those without walking the tables.
    let classes = InputClass::scan(line);
    if classes.intersects(InputClass::HAS_COMPARISON | InputClass::HAS_LOGICAL_SYMBOL) {
        return true;
    }

    COMPARISON_OPERATORS.iter().chain(LOGICAL_OPERATORS).any(|op| lower.contains(op.token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_field_plus_operator() {
        assert!(looks_valid("price > 100"));
        assert!(looks_valid("PE<15"));
        assert!(looks_valid("name contains bank"));
        assert!(looks_valid("sector = Technology && beta <= 1"));
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(!looks_valid("just some words"));
        assert!(!looks_valid("priceless"));
        assert!(!looks_valid("> 100"));
        assert!(!looks_valid(""));
    }

    #[test]
    fn is_only_a_substring_heuristic() {
        assert!(looks_valid("priceless > nothing"));
        assert!(looks_valid("volume and"));
    }
}
