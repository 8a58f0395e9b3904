extern crate self as screener;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod buffer;
mod dictionary;
mod engine;
mod events;
mod expr;
mod settings;
mod store;

pub use api::{
    Context, Options, ParseDetails, ParseResultVerbose, TokenSummary, generate_suggestions,
    generate_suggestions_with, parse_rule, parse_verbose, screen, validate_rule,
};
pub use buffer::TextBuffer;
pub use dictionary::{
    COMMON_VALUES, COMPARISON_OPERATORS, CommonValue, EXAMPLE_QUERIES, FIELDS, FieldKind, FieldKeyword,
    LOGICAL_OPERATORS, Operator, field_by_alias, field_by_key,
};
pub use engine::{ParseError, Quote, Suggestion, SuggestionKind};
pub use events::{AppEvent, EventBus, Plan, SubscriptionId};
pub use expr::{Clause, ComparisonOp, Expr, Value};
pub use settings::{ScreenerSettings, Settings, SuggestionSettings};
pub use store::{Rule, RuleStore};

// --- Internal types ---------------------------------------------------------

/// Byte span into the rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LogicalOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Numeric literal with any `K`/`M`/`B`/`T` suffix already applied.
    Number(f64),
    /// Quoted string or a bare word that is not a keyword.
    Text(String),
    Field(&'static FieldKeyword),
    Comparison(ComparisonOp),
    Logical(LogicalOp),
    LParen,
    RParen,
}

/// A lexed token: what it is, where it sits and the exact source text.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub range: Range,
    pub lexeme: String,
}

pub(crate) type Production = Box<dyn Fn(&str, usize) -> Result<Option<TokenKind>, ParseError> + Send + Sync>;

/// A lexing rule: a name, a `^`-anchored regex tried at the current offset
/// and a production that turns the matched lexeme into a token.
///
/// Rules are tried in declaration order and the first match wins.
pub(crate) struct LexRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub production: Production,
}

impl std::fmt::Debug for LexRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .finish()
    }
}
