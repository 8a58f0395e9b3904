//! Recursive descent parser for filter expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr   := and ( ("or" | "||") and )*
//! and    := unary ( ("and" | "&&") unary )*
//! unary  := "not" unary | "(" expr ")" | clause
//! clause := field op value
//!         | field "between" number "and" number
//! ```
//!
//! Runs of the same connective are collected into one flat `And`/`Or` node.
//! Nesting through parentheses and `not` is limited to [`MAX_DEPTH`] levels;
//! deeper input is rejected with [`ParseError::TooDeep`].
//!
//! `and` inside a `between` clause is consumed by the clause, so
//! `price between 10 and 50 and pe < 15` parses as two clauses joined by `and`.
//!
//! Each clause is type checked against its field: numeric fields take number
//! literals and every operator except `contains`; text fields take `=`, `!=`
//! and `contains`. A number typed against a text field is kept as its source
//! text (`symbol = 3M` compares against `"3M"`).

use super::error::ParseError;
use super::lexer::tokenize;
use super::metrics::{ParseMetrics, ParseRun};
use super::trigger::InputClass;
use crate::dictionary::{FieldKeyword, FieldKind};
use crate::{Clause, ComparisonOp, Expr, LogicalOp, Token, TokenKind, Value};
use std::time::Instant;
use tracing::debug;

/// Deepest nesting of parentheses and `not` a rule may use.
const MAX_DEPTH: usize = 128;

/// Parser over a token slice.
///
/// Usage: `Parser::new(&tokens).parse()`, or [`Parser::parse_str`] to lex
/// and parse in one step.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0, depth: 0 }
    }

    /// Lex and parse `input`.
    pub fn parse_str(input: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(input)?;
        Parser::new(&tokens).parse()
    }

    /// Parse the whole token slice into one expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let expr = self.parse_or()?;
        if let Some(tok) = self.peek() {
            return Err(unexpected("'and', 'or' or end of rule", tok));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a Token, ParseError> {
        let tok = self.tokens.get(self.pos).ok_or(ParseError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat_logical(&mut self, op: LogicalOp) -> bool {
        match self.peek() {
            Some(Token { kind: TokenKind::Logical(found), .. }) if *found == op => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_and()?];
        while self.eat_logical(LogicalOp::Or) {
            operands.push(self.parse_and()?);
        }
        Ok(if operands.len() == 1 { operands.remove(0) } else { Expr::Or { operands } })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_unary()?];
        while self.eat_logical(LogicalOp::And) {
            operands.push(self.parse_unary()?);
        }
        Ok(if operands.len() == 1 { operands.remove(0) } else { Expr::And { operands } })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let Some(tok) = self.peek() else {
            return self.parse_clause().map(Expr::Clause);
        };

        match tok.kind {
            TokenKind::Logical(LogicalOp::Not) => {
                self.descend(tok)?;
                self.pos += 1;
                let inner = self.parse_unary();
                self.depth -= 1;
                Ok(Expr::Not { inner: Box::new(inner?) })
            }
            TokenKind::LParen => {
                self.descend(tok)?;
                self.pos += 1;
                let inner = self.parse_or().and_then(|inner| {
                    let close = self.next("')'")?;
                    if close.kind != TokenKind::RParen {
                        return Err(unexpected("')'", close));
                    }
                    Ok(inner)
                });
                self.depth -= 1;
                inner
            }
            _ => self.parse_clause().map(Expr::Clause),
        }
    }

    fn descend(&mut self, at: &Token) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH, position: at.range.start });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_clause(&mut self) -> Result<Clause, ParseError> {
        let tok = self.next("field")?;
        let field = match &tok.kind {
            TokenKind::Field(field) => *field,
            TokenKind::Text(name) => {
                return Err(ParseError::UnknownField { name: name.clone(), position: tok.range.start });
            }
            _ => return Err(unexpected("field", tok)),
        };

        let op_tok = self.next("operator")?;
        let operator = match op_tok.kind {
            TokenKind::Comparison(op) => op,
            _ => return Err(unexpected("operator", op_tok)),
        };
        check_operator(field, operator, op_tok)?;

        let value = match (operator, field.kind) {
            (ComparisonOp::Between, _) => {
                let low = self.number()?;
                let and = self.next("'and'")?;
                if and.kind != TokenKind::Logical(LogicalOp::And) {
                    return Err(unexpected("'and'", and));
                }
                let high = self.number()?;
                let (low, high) = if low <= high { (low, high) } else { (high, low) };
                Value::Range { low, high }
            }
            (_, FieldKind::Numeric) => Value::Number(self.number()?),
            (_, FieldKind::Text) => Value::Text(self.text()?),
        };

        Ok(Clause { field: field.field, alias: tok.lexeme.clone(), operator, value })
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let tok = self.next("number")?;
        match tok.kind {
            TokenKind::Number(n) => Ok(n),
            _ => Err(unexpected("number", tok)),
        }
    }

    /// Text operand. Bare words that happen to be field aliases, and numbers,
    /// are taken literally.
    fn text(&mut self) -> Result<String, ParseError> {
        let tok = self.next("value")?;
        match &tok.kind {
            TokenKind::Text(s) => Ok(s.clone()),
            TokenKind::Number(_) | TokenKind::Field(_) => Ok(tok.lexeme.clone()),
            _ => Err(unexpected("value", tok)),
        }
    }
}

fn check_operator(field: &'static FieldKeyword, operator: ComparisonOp, at: &Token) -> Result<(), ParseError> {
    let allowed = match field.kind {
        FieldKind::Numeric => operator != ComparisonOp::Contains,
        FieldKind::Text => matches!(operator, ComparisonOp::Eq | ComparisonOp::Ne | ComparisonOp::Contains),
    };
    if allowed {
        return Ok(());
    }

    Err(ParseError::OperatorMismatch {
        operator: operator.symbol(),
        field: field.alias,
        kind: match field.kind {
            FieldKind::Numeric => "numeric",
            FieldKind::Text => "text",
        },
        position: at.range.start,
    })
}

fn unexpected(expected: &'static str, tok: &Token) -> ParseError {
    ParseError::UnexpectedToken { expected, found: tok.lexeme.clone(), position: tok.range.start }
}

/// Parse `input`, keeping tokens, input classes and timings.
pub(crate) fn parse_with_metrics(input: &str) -> ParseRun {
    let start = Instant::now();
    let classes = InputClass::scan(input);

    let lex_start = Instant::now();
    let lexed = tokenize(input);
    let lex = lex_start.elapsed();

    let parse_start = Instant::now();
    let (tokens, result) = match lexed {
        Ok(tokens) => {
            let result = Parser::new(&tokens).parse();
            (tokens, result)
        }
        Err(err) => (Vec::new(), Err(err)),
    };
    let parse = parse_start.elapsed();

    if let Err(err) = &result {
        debug!(input, error = %err, "rule did not parse");
    }

    ParseRun { classes, tokens, result, metrics: ParseMetrics { total: start.elapsed(), lex, parse } }
}
