//! Parse run metrics.
//!
//! `Parser::parse` is the normal path. `parse_with_metrics` additionally keeps
//! the token list, the input classes and per-phase timings so the CLI report
//! can show what the lexer saw and where time went.

use super::error::ParseError;
use super::trigger::InputClass;
use crate::{Expr, Token};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub(crate) struct ParseMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent in the lexer.
    pub lex: Duration,
    /// Time spent building the expression tree.
    pub parse: Duration,
}

/// Parser output bundled with the intermediate state that produced it.
#[derive(Debug, Clone)]
pub(crate) struct ParseRun {
    pub classes: InputClass,
    /// Empty when lexing failed.
    pub tokens: Vec<Token>,
    pub result: Result<Expr, ParseError>,
    pub metrics: ParseMetrics,
}
