use serde::Serialize;
use std::fmt;

/// Comparison applied between a quote field and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Contains,
    Between,
}

impl ComparisonOp {
    /// Map an operator token (`">="`, `"contains"`, ...) to its operator.
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token.to_ascii_lowercase().as_str() {
            ">" => ComparisonOp::Gt,
            "<" => ComparisonOp::Lt,
            ">=" => ComparisonOp::Ge,
            "<=" => ComparisonOp::Le,
            "=" | "==" => ComparisonOp::Eq,
            "!=" => ComparisonOp::Ne,
            "contains" => ComparisonOp::Contains,
            "between" => ComparisonOp::Between,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Le => "<=",
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Contains => "contains",
            ComparisonOp::Between => "between",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    /// Inclusive bounds of a `between` clause.
    Range { low: f64, high: f64 },
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Range { low, high } => write!(f, "{} and {}", format_number(*low), format_number(*high)),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 { format!("{}", v as i64) } else { format!("{}", v) }
}

/// A single `field operator value` condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    /// Canonical quote key the clause reads.
    pub field: &'static str,
    /// Alias as the user typed it.
    pub alias: String,
    pub operator: ComparisonOp,
    pub value: Value,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Parsed filter expression.
///
/// Chains of the same connective are kept flat, so `a and b and c` is one
/// `And` with three operands rather than a nested pair.
///
/// ```text
/// pe < 15 and mcap > 1B or not sector = Energy
///
///            Or
///          /    \
///        And     Not
///       /   \      \
///   pe<15  mcap>1e9  sector="Energy"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Clause(Clause),
    /// Two or more operands that must all hold.
    And { operands: Vec<Expr> },
    /// Two or more operands of which at least one must hold.
    Or { operands: Vec<Expr> },
    Not { inner: Box<Expr> },
}

impl Expr {
    /// All clauses in source order.
    pub fn clauses(&self) -> Vec<&Clause> {
        let mut out = Vec::new();
        self.collect_clauses(&mut out);
        out
    }

    fn collect_clauses<'a>(&'a self, out: &mut Vec<&'a Clause>) {
        match self {
            Expr::Clause(c) => out.push(c),
            Expr::And { operands } | Expr::Or { operands } => {
                for operand in operands {
                    operand.collect_clauses(out);
                }
            }
            Expr::Not { inner } => inner.collect_clauses(out),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Clause(c) => write!(f, "{}", c),
            Expr::And { operands } => write_joined(f, operands, " and "),
            Expr::Or { operands } => write_joined(f, operands, " or "),
            Expr::Not { inner } => write!(f, "not {}", inner),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, operands: &[Expr], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (idx, operand) in operands.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", operand)?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(field: &'static str, operator: ComparisonOp, value: Value) -> Expr {
        Expr::Clause(Clause { field, alias: field.to_string(), operator, value })
    }

    #[test]
    fn clauses_are_flattened_in_source_order() {
        let expr = Expr::Or {
            operands: vec![
                Expr::And {
                    operands: vec![
                        clause("peRatio", ComparisonOp::Lt, Value::Number(15.0)),
                        clause("marketCap", ComparisonOp::Gt, Value::Number(1e9)),
                    ],
                },
                Expr::Not { inner: Box::new(clause("sector", ComparisonOp::Eq, Value::Text("Energy".into()))) },
            ],
        };

        let fields: Vec<&str> = expr.clauses().iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["peRatio", "marketCap", "sector"]);
        assert_eq!(expr.to_string(), "((peRatio < 15 and marketCap > 1000000000) or not sector = \"Energy\")");
    }

    #[test]
    fn flat_chains_display_and_serialize() {
        let expr = Expr::And {
            operands: vec![
                clause("price", ComparisonOp::Gt, Value::Number(1.0)),
                clause("beta", ComparisonOp::Lt, Value::Number(2.0)),
                clause("rsi", ComparisonOp::Le, Value::Number(70.0)),
            ],
        };
        assert_eq!(expr.to_string(), "(price > 1 and beta < 2 and rsi <= 70)");

        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["type"], "and");
        assert_eq!(json["operands"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn operator_tokens_round_trip_through_symbols() {
        assert_eq!(ComparisonOp::from_token("=="), Some(ComparisonOp::Eq));
        assert_eq!(ComparisonOp::from_token("CONTAINS"), Some(ComparisonOp::Contains));
        assert_eq!(ComparisonOp::from_token("~"), None);
        assert_eq!(ComparisonOp::Between.symbol(), "between");
    }
}
