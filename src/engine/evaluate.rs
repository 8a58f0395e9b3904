//! Expression evaluation against quotes.
//!
//! ```text
//! Clause ──┬─ numeric field -> f64 comparison (between is inclusive)
//!          └─ text field    -> case-insensitive equality / substring
//! missing or mistyped field -> clause is false
//! ```
//!
//! `Not` over a clause whose field is missing is therefore true; screening
//! treats absent data as "does not satisfy the condition", not as unknown.

use crate::{Clause, ComparisonOp, Expr, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A market quote keyed by canonical field names (`"peRatio"`, `"sector"`).
///
/// Deserializes from a flat JSON object:
/// `{"symbol": "AAPL", "price": 190.5, "sector": "Technology"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    #[serde(flatten)]
    pub values: HashMap<String, serde_json::Value>,
}

impl Quote {
    pub fn new(symbol: impl Into<String>) -> Self {
        Quote { symbol: symbol.into(), values: HashMap::new() }
    }

    /// Builder-style setter used by callers assembling quotes by hand.
    pub fn with(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    fn number(&self, field: &str) -> Option<f64> {
        self.values.get(field)?.as_f64()
    }

    fn text(&self, field: &str) -> Option<&str> {
        if field == "symbol" {
            return Some(&self.symbol);
        }
        self.values.get(field)?.as_str()
    }
}

impl Expr {
    /// Whether `quote` satisfies this expression.
    pub fn evaluate(&self, quote: &Quote) -> bool {
        match self {
            Expr::Clause(clause) => clause.evaluate(quote),
            Expr::And { operands } => operands.iter().all(|e| e.evaluate(quote)),
            Expr::Or { operands } => operands.iter().any(|e| e.evaluate(quote)),
            Expr::Not { inner } => !inner.evaluate(quote),
        }
    }
}

impl Clause {
    pub fn evaluate(&self, quote: &Quote) -> bool {
        match &self.value {
            Value::Number(rhs) => {
                let Some(lhs) = quote.number(self.field) else { return false };
                compare_numbers(self.operator, lhs, *rhs)
            }
            Value::Range { low, high } => quote.number(self.field).is_some_and(|v| v >= *low && v <= *high),
            Value::Text(rhs) => {
                let Some(lhs) = quote.text(self.field) else { return false };
                let (lhs, rhs) = (lhs.to_lowercase(), rhs.to_lowercase());
                match self.operator {
                    ComparisonOp::Eq => lhs == rhs,
                    ComparisonOp::Ne => lhs != rhs,
                    ComparisonOp::Contains => lhs.contains(&rhs),
                    _ => false,
                }
            }
        }
    }
}

fn compare_numbers(op: ComparisonOp, lhs: f64, rhs: f64) -> bool {
    match op {
        ComparisonOp::Gt => lhs > rhs,
        ComparisonOp::Lt => lhs < rhs,
        ComparisonOp::Ge => lhs >= rhs,
        ComparisonOp::Le => lhs <= rhs,
        ComparisonOp::Eq => lhs == rhs,
        ComparisonOp::Ne => lhs != rhs,
        ComparisonOp::Contains | ComparisonOp::Between => false,
    }
}
