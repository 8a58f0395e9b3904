//! Parse errors.
//!
//! Every variant that refers to a place in the input carries the byte offset
//! of the offending token so callers can underline it.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ParseError {
    #[error("rule is empty")]
    Empty,

    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid number '{lexeme}' at {position}")]
    InvalidNumber { lexeme: String, position: usize },

    #[error("unknown field '{name}' at {position}")]
    UnknownField { name: String, position: usize },

    #[error("expected {expected}, found '{found}' at {position}")]
    UnexpectedToken { expected: &'static str, found: String, position: usize },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("operator '{operator}' does not apply to {kind} field '{field}' at {position}")]
    OperatorMismatch { operator: &'static str, field: &'static str, kind: &'static str, position: usize },

    #[error("nesting deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: usize },
}

impl ParseError {
    /// Byte offset the error points at, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Empty | ParseError::UnexpectedEnd { .. } => None,
            ParseError::UnexpectedChar { position, .. }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::UnknownField { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::OperatorMismatch { position, .. }
            | ParseError::TooDeep { position, .. } => Some(*position),
        }
    }
}
