//! Lexer.
//!
//! The lexer walks the input left to right. At each offset it tries the lex
//! rules in declaration order; the first anchored match wins and its
//! production turns the lexeme into a `TokenKind` (or nothing, for
//! whitespace).
//!
//! ```text
//! "mcap > 1.5B and sector = 'Energy'"
//!  ^^^^ word     -> Field(mcap)
//!       ^ symbol -> Comparison(Gt)
//!         ^^^^ number -> Number(1.5e9)
//!              ^^^ word -> Logical(And)
//!                  ^^^^^^ word -> Field(sector)
//!                         ^ symbol -> Comparison(Eq)
//!                           ^^^^^^^^ string -> Text("Energy")
//! ```
//!
//! Words are classified against the dictionary: logical keywords, word
//! operators and field aliases become dedicated tokens, anything else is text.

use super::error::ParseError;
use crate::dictionary::field_by_alias;
use crate::{ComparisonOp, LexRule, LogicalOp, Range, Token, TokenKind};
use once_cell::sync::Lazy;
use tracing::trace;

static LEX_RULES: Lazy<Vec<LexRule>> = Lazy::new(rules);

fn rules() -> Vec<LexRule> {
    vec![
        lex_rule! {
            name: "whitespace",
            pattern: r"^\s+",
            prod: |_lexeme: &str, _at: usize| { Ok(None) },
        },
        lex_rule! {
            name: "number",
            pattern: r"^-?(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\.\d+)[A-Za-z%]*",
            prod: |lexeme: &str, at: usize| { parse_number(lexeme, at).map(|n| Some(TokenKind::Number(n))) },
        },
        lex_rule! {
            name: "string",
            pattern: r#"^(?:"[^"]*"|'[^']*')"#,
            prod: |lexeme: &str, _at: usize| {
                let inner = &lexeme[1..lexeme.len() - 1];
                Ok(Some(TokenKind::Text(inner.to_string())))
            },
        },
        lex_rule! {
            name: "symbol",
            pattern: r"^(?:>=|<=|!=|==|&&|\|\||=|>|<)",
            prod: |lexeme: &str, _at: usize| {
                let kind = match lexeme {
                    "&&" => TokenKind::Logical(LogicalOp::And),
                    "||" => TokenKind::Logical(LogicalOp::Or),
                    _ => match ComparisonOp::from_token(lexeme) {
                        Some(op) => TokenKind::Comparison(op),
                        None => return Ok(None),
                    },
                };
                Ok(Some(kind))
            },
        },
        lex_rule! {
            name: "paren",
            pattern: r"^[()]",
            prod: |lexeme: &str, _at: usize| {
                Ok(Some(if lexeme == "(" { TokenKind::LParen } else { TokenKind::RParen }))
            },
        },
        lex_rule! {
            name: "word",
            pattern: r"^[\p{L}_][\p{L}\p{N}_.\-]*",
            prod: |lexeme: &str, _at: usize| { Ok(Some(classify_word(lexeme))) },
        },
    ]
}

fn classify_word(word: &str) -> TokenKind {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "and" => return TokenKind::Logical(LogicalOp::And),
        "or" => return TokenKind::Logical(LogicalOp::Or),
        "not" => return TokenKind::Logical(LogicalOp::Not),
        _ => {}
    }
    if let Some(op) = ComparisonOp::from_token(&lower) {
        return TokenKind::Comparison(op);
    }
    match field_by_alias(&lower) {
        Some(field) => TokenKind::Field(field),
        None => TokenKind::Text(word.to_string()),
    }
}

/// Parse a numeric literal, expanding `K`/`M`/`B`/`T` suffixes. A trailing
/// `%` is accepted and ignored since percentage fields are stored as percent.
fn parse_number(lexeme: &str, at: usize) -> Result<f64, ParseError> {
    let split = lexeme.find(|c: char| c.is_ascii_alphabetic() || c == '%').unwrap_or(lexeme.len());
    let (digits, suffix) = lexeme.split_at(split);

    let multiplier = match suffix.to_ascii_lowercase().as_str() {
        "" | "%" => 1.0,
        "k" => 1e3,
        "m" => 1e6,
        "b" => 1e9,
        "t" => 1e12,
        _ => return Err(ParseError::InvalidNumber { lexeme: lexeme.to_string(), position: at }),
    };

    let value: f64 = digits
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber { lexeme: lexeme.to_string(), position: at })?;

    Ok(value * multiplier)
}

/// Split `input` into tokens.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let hit = LEX_RULES.iter().find_map(|rule| rule.pattern.find(rest).map(|m| (rule, m.end())));

        let Some((rule, len)) = hit else {
            let ch = rest.chars().next().unwrap_or_default();
            return Err(ParseError::UnexpectedChar { ch, position: pos });
        };

        let lexeme = &rest[..len];
        if let Some(kind) = (rule.production)(lexeme, pos)? {
            trace!(rule = rule.name, lexeme, pos, "lexed token");
            tokens.push(Token { kind, range: Range { start: pos, end: pos + len }, lexeme: lexeme.to_string() });
        }
        pos += len;
    }

    Ok(tokens)
}
