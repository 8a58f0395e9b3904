//! Rule engine.
//!
//! Everything that reads rule text lives here, split into focused submodules
//! under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! keystroke ── suggest::generate ──▶ Vec<Suggestion>       (suggest.rs)
//!
//! line ── InputClass::scan ──┬──▶ validate::looks_valid   (trigger.rs, validate.rs)
//!                            │
//!                            └──▶ lexer::tokenize          (lexer.rs)
//!                                   - ordered regex lex rules
//!                                   - words classified against the dictionary
//!                                        │
//!                                        v
//!                                 parser::Parser::parse     (parser.rs)
//!                                   - recursive descent, `and` binds tighter
//!                                   - clause type checks
//!                                        │
//!                                        v
//!                                      Expr ── evaluate ──▶ bool per Quote (evaluate.rs)
//! ```
//!
//! Suggestion and validation never go through the lexer: both are deliberately
//! substring heuristics over the raw text so they keep working on half-typed
//! input. Only the parser gives real structure.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=screener=trace` to see lexer and parser traces.

#[path = "engine/error.rs"]
mod error;
#[path = "engine/evaluate.rs"]
mod evaluate;
#[path = "engine/lexer.rs"]
mod lexer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/suggest.rs"]
mod suggest;
#[path = "engine/trigger.rs"]
mod trigger;
#[path = "engine/validate.rs"]
mod validate;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use error::ParseError;
pub use evaluate::Quote;
pub(crate) use parser::{Parser, parse_with_metrics};
pub use suggest::{Suggestion, SuggestionKind};
pub(crate) use suggest::{clamp_cursor, generate, word_start};
pub(crate) use validate::looks_valid;
