//! Static screener vocabulary.
//!
//! Every table is kept in declaration order: suggestion output follows this
//! order, so reordering entries changes what the user sees first.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// How a field's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Text,
}

/// A user-typed alias for a quote field.
#[derive(Debug, PartialEq, Serialize)]
pub struct FieldKeyword {
    /// What the user types, e.g. `"mcap"`.
    pub alias: &'static str,
    /// Canonical quote key, e.g. `"marketCap"`.
    pub field: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub example: &'static str,
}

/// A comparison or logical operator token.
#[derive(Debug, PartialEq, Serialize)]
pub struct Operator {
    pub token: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

/// A shorthand literal shown as a suggestion together with its expansion.
#[derive(Debug, PartialEq, Serialize)]
pub struct CommonValue {
    pub token: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

macro_rules! field {
    ($alias:literal => $field:literal, $kind:ident, $desc:literal, $example:literal) => {
        FieldKeyword { alias: $alias, field: $field, kind: FieldKind::$kind, description: $desc, example: $example }
    };
}

macro_rules! op {
    ($token:literal, $desc:literal, $example:literal) => {
        Operator { token: $token, description: $desc, example: $example }
    };
}

pub static FIELDS: &[FieldKeyword] = &[
    field!("price" => "price", Numeric, "Current share price", "price > 100"),
    field!("pe" => "peRatio", Numeric, "Price to earnings ratio", "pe < 15"),
    field!("pb" => "pbRatio", Numeric, "Price to book ratio", "pb < 3"),
    field!("peg" => "pegRatio", Numeric, "Price/earnings to growth ratio", "peg < 1"),
    field!("eps" => "eps", Numeric, "Earnings per share", "eps > 2"),
    field!("mcap" => "marketCap", Numeric, "Market capitalization", "mcap > 1B"),
    field!("market_cap" => "marketCap", Numeric, "Market capitalization", "market_cap > 10B"),
    field!("volume" => "volume", Numeric, "Shares traded today", "volume > 1M"),
    field!("avg_volume" => "avgVolume", Numeric, "Average daily volume", "avg_volume > 500K"),
    field!("change" => "changePercent", Numeric, "Daily change in percent", "change > 5"),
    field!("dividend" => "dividendYield", Numeric, "Dividend yield in percent", "dividend > 3"),
    field!("yield" => "dividendYield", Numeric, "Dividend yield in percent", "yield > 4"),
    field!("beta" => "beta", Numeric, "Volatility relative to the market", "beta < 1"),
    field!("roe" => "returnOnEquity", Numeric, "Return on equity in percent", "roe > 15"),
    field!("debt_equity" => "debtToEquity", Numeric, "Debt to equity ratio", "debt_equity < 0.5"),
    field!("rsi" => "rsi", Numeric, "14-day relative strength index", "rsi < 30"),
    field!("high52" => "fiftyTwoWeekHigh", Numeric, "52-week high", "high52 < 200"),
    field!("low52" => "fiftyTwoWeekLow", Numeric, "52-week low", "low52 > 10"),
    field!("revenue" => "revenue", Numeric, "Trailing twelve month revenue", "revenue > 1B"),
    field!("margin" => "profitMargin", Numeric, "Net profit margin in percent", "margin > 20"),
    field!("sector" => "sector", Text, "Market sector", "sector = Technology"),
    field!("industry" => "industry", Text, "Industry within the sector", "industry contains software"),
    field!("exchange" => "exchange", Text, "Listing exchange", "exchange = NASDAQ"),
    field!("symbol" => "symbol", Text, "Ticker symbol", "symbol = AAPL"),
    field!("name" => "name", Text, "Company name", "name contains bank"),
];

pub static COMPARISON_OPERATORS: &[Operator] = &[
    op!(">", "Greater than", "price > 100"),
    op!("<", "Less than", "pe < 15"),
    op!(">=", "Greater than or equal", "volume >= 1M"),
    op!("<=", "Less than or equal", "beta <= 1"),
    op!("=", "Equal to", "sector = Technology"),
    op!("==", "Equal to", "exchange == NYSE"),
    op!("!=", "Not equal to", "sector != Energy"),
    op!("contains", "Text contains", "name contains bank"),
    op!("between", "Inclusive numeric range", "price between 10 and 50"),
];

pub static LOGICAL_OPERATORS: &[Operator] = &[
    op!("and", "Both conditions must hold", "pe < 15 and mcap > 1B"),
    op!("or", "Either condition may hold", "rsi < 30 or change < -5"),
    op!("not", "Negates the next condition", "not sector = Energy"),
    op!("&&", "Both conditions must hold", "pe < 15 && mcap > 1B"),
    op!("||", "Either condition may hold", "rsi < 30 || change < -5"),
];

pub static COMMON_VALUES: &[CommonValue] = &[
    CommonValue { token: "1K", value: "1,000", description: "One thousand" },
    CommonValue { token: "1M", value: "1,000,000", description: "One million" },
    CommonValue { token: "100M", value: "100,000,000", description: "One hundred million" },
    CommonValue { token: "1B", value: "1,000,000,000", description: "One billion" },
    CommonValue { token: "10B", value: "10,000,000,000", description: "Ten billion" },
    CommonValue { token: "100B", value: "100,000,000,000", description: "One hundred billion" },
    CommonValue { token: "1T", value: "1,000,000,000,000", description: "One trillion" },
    CommonValue { token: "Technology", value: "Technology", description: "Technology sector" },
    CommonValue { token: "Healthcare", value: "Healthcare", description: "Healthcare sector" },
    CommonValue { token: "Financial", value: "Financial Services", description: "Financial services sector" },
    CommonValue { token: "Energy", value: "Energy", description: "Energy sector" },
    CommonValue { token: "NASDAQ", value: "NASDAQ", description: "Nasdaq exchange" },
    CommonValue { token: "NYSE", value: "NYSE", description: "New York Stock Exchange" },
];

pub static EXAMPLE_QUERIES: &[&str] = &[
    "price > 100",
    "pe < 15 and market_cap > 1B",
    "sector = Technology and change > 5",
    "volume > 1M or dividend > 3",
    "rsi < 30 and not sector = Energy",
    "price between 10 and 50",
];

static FIELDS_BY_ALIAS: Lazy<HashMap<&'static str, &'static FieldKeyword>> =
    Lazy::new(|| FIELDS.iter().map(|f| (f.alias, f)).collect());

/// Look up a field by what the user typed (case-insensitive).
pub fn field_by_alias(alias: &str) -> Option<&'static FieldKeyword> {
    FIELDS_BY_ALIAS.get(alias.to_ascii_lowercase().as_str()).copied()
}

/// First field declared for a canonical key.
pub fn field_by_key(key: &str) -> Option<&'static FieldKeyword> {
    FIELDS.iter().find(|f| f.field == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn aliases_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for f in FIELDS {
            assert!(seen.insert(f.alias), "duplicate alias {}", f.alias);
            assert_eq!(f.alias, f.alias.to_ascii_lowercase());
        }
    }

    #[test]
    fn operator_sets_are_disjoint() {
        let comparison: HashSet<_> = COMPARISON_OPERATORS.iter().map(|o| o.token).collect();
        assert!(LOGICAL_OPERATORS.iter().all(|o| !comparison.contains(o.token)));
    }

    #[test]
    fn alias_lookup_ignores_case() {
        assert_eq!(field_by_alias("PE").map(|f| f.field), Some("peRatio"));
        assert_eq!(field_by_alias("Market_Cap").map(|f| f.field), Some("marketCap"));
        assert!(field_by_alias("priceless").is_none());
    }

    #[test]
    fn key_lookup_returns_first_declared_alias() {
        assert_eq!(field_by_key("marketCap").map(|f| f.alias), Some("mcap"));
        assert_eq!(field_by_key("dividendYield").map(|f| f.alias), Some("dividend"));
    }
}
