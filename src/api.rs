use crate::engine::{self, ParseError, Quote, Suggestion};
use crate::{Expr, Rule, TokenKind};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Environment needed when creating rules.
#[derive(Debug, Clone)]
pub struct Context {
    /// Timestamp recorded on rules created with this context.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let reference_time =
                NaiveDate::from_ymd_opt(2013, 2, 12).and_then(|d| d.and_hms_opt(9, 30, 0)).unwrap_or_default();
            Self { reference_time }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// Options that affect suggestion and screening behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Maximum number of suggestions returned for non-empty input.
    pub suggestion_limit: usize,
    /// When screening, a quote must pass every rule instead of any rule.
    pub require_all: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { suggestion_limit: 10, require_all: true }
    }
}

/// A compact token summary used in verbose output.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSummary {
    pub start: usize,
    pub end: usize,
    pub kind: &'static str,
    pub lexeme: String,
}

/// Additional details returned by [`parse_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ParseDetails {
    /// Names of the coarse input classes detected by the pre-scan.
    pub classes: Vec<&'static str>,
    pub tokens: Vec<TokenSummary>,
    pub total: Duration,
    pub lex: Duration,
    pub parse: Duration,
}

/// Result from [`parse_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ParseResultVerbose {
    pub text: String,
    /// Heuristic verdict from [`validate_rule`].
    pub validated: bool,
    pub expr: Option<Expr>,
    pub error: Option<ParseError>,
    pub details: ParseDetails,
}

/// Completion candidates for `text` with the cursor at byte offset `cursor`.
///
/// # Example
/// ```
/// use screener::{SuggestionKind, generate_suggestions};
///
/// let out = generate_suggestions("price > 100 an", 14);
/// assert!(out.iter().any(|s| s.text == "and" && s.kind == SuggestionKind::Operator));
/// ```
pub fn generate_suggestions(text: &str, cursor: usize) -> Vec<Suggestion> {
    generate_suggestions_with(text, cursor, &Options::default())
}

/// Like [`generate_suggestions`] with an explicit suggestion limit.
pub fn generate_suggestions_with(text: &str, cursor: usize, options: &Options) -> Vec<Suggestion> {
    engine::generate(text, cursor, options.suggestion_limit)
}

/// Heuristic check that `line` mentions a known field and an operator.
///
/// This does not parse: `"priceless > nothing"` is accepted. See
/// [`parse_rule`] for a structural check.
pub fn validate_rule(line: &str) -> bool {
    engine::looks_valid(line)
}

/// Parse one rule line into an expression tree.
pub fn parse_rule(text: &str) -> Result<Expr, ParseError> {
    engine::Parser::parse_str(text)
}

/// Parse `text` and return tokens, input classes and timings alongside the
/// result. The normal [`parse_rule`] path does not allocate these.
pub fn parse_verbose(text: &str) -> ParseResultVerbose {
    let run = engine::parse_with_metrics(text);

    let tokens = run
        .tokens
        .iter()
        .map(|t| TokenSummary {
            start: t.range.start,
            end: t.range.end,
            kind: token_kind_name(&t.kind),
            lexeme: t.lexeme.clone(),
        })
        .collect();

    let details = ParseDetails {
        classes: run.classes.names(),
        tokens,
        total: run.metrics.total,
        lex: run.metrics.lex,
        parse: run.metrics.parse,
    };

    let (expr, error) = match run.result {
        Ok(expr) => (Some(expr), None),
        Err(err) => (None, Some(err)),
    };

    ParseResultVerbose { text: text.to_string(), validated: validate_rule(text), expr, error, details }
}

/// Quotes that pass `rules`.
///
/// Rules that did not parse are skipped. With no usable rules every quote
/// passes. `options.require_all` selects between all-rules and any-rule.
pub fn screen<'q>(rules: &[Rule], quotes: &'q [Quote], options: &Options) -> Vec<&'q Quote> {
    let usable: Vec<&Rule> = rules
        .iter()
        .filter(|r| {
            if !r.is_parsed() {
                warn!(id = r.id, text = %r.text, "skipping rule that did not parse");
            }
            r.is_parsed()
        })
        .collect();

    if usable.is_empty() {
        return quotes.iter().collect();
    }

    quotes
        .iter()
        .filter(|q| {
            if options.require_all {
                usable.iter().all(|r| r.matches(q))
            } else {
                usable.iter().any(|r| r.matches(q))
            }
        })
        .collect()
}

fn token_kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Number(_) => "number",
        TokenKind::Text(_) => "text",
        TokenKind::Field(_) => "field",
        TokenKind::Comparison(_) => "comparison",
        TokenKind::Logical(_) => "logical",
        TokenKind::LParen | TokenKind::RParen => "paren",
    }
}
