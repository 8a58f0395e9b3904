use crate::engine::{Parser, Quote, looks_valid};
use crate::{ComparisonOp, Value};

#[test]
fn clause_examples_parsing() {
    // (input, canonical field, operator, value)
    let cases: Vec<(&str, &str, ComparisonOp, Value)> = vec![
        ("price > 100", "price", ComparisonOp::Gt, Value::Number(100.0)),
        ("PRICE>100", "price", ComparisonOp::Gt, Value::Number(100.0)),
        ("pe < 15", "peRatio", ComparisonOp::Lt, Value::Number(15.0)),
        ("pb <= 1.2", "pbRatio", ComparisonOp::Le, Value::Number(1.2)),
        ("mcap > 1B", "marketCap", ComparisonOp::Gt, Value::Number(1e9)),
        ("market_cap >= 10b", "marketCap", ComparisonOp::Ge, Value::Number(1e10)),
        ("volume > 1,000,000", "volume", ComparisonOp::Gt, Value::Number(1e6)),
        ("avg_volume > 500K", "avgVolume", ComparisonOp::Gt, Value::Number(5e5)),
        ("change < -5", "changePercent", ComparisonOp::Lt, Value::Number(-5.0)),
        ("change > 2.5%", "changePercent", ComparisonOp::Gt, Value::Number(2.5)),
        ("dividend = 3", "dividendYield", ComparisonOp::Eq, Value::Number(3.0)),
        ("yield == 4", "dividendYield", ComparisonOp::Eq, Value::Number(4.0)),
        ("beta != 1", "beta", ComparisonOp::Ne, Value::Number(1.0)),
        ("revenue > 1T", "revenue", ComparisonOp::Gt, Value::Number(1e12)),
        ("debt_equity < .5", "debtToEquity", ComparisonOp::Lt, Value::Number(0.5)),
        ("rsi between 30 and 70", "rsi", ComparisonOp::Between, Value::Range { low: 30.0, high: 70.0 }),
        ("sector = Technology", "sector", ComparisonOp::Eq, Value::Text("Technology".into())),
        ("sector != 'Energy'", "sector", ComparisonOp::Ne, Value::Text("Energy".into())),
        ("industry contains software", "industry", ComparisonOp::Contains, Value::Text("software".into())),
        ("exchange = NASDAQ", "exchange", ComparisonOp::Eq, Value::Text("NASDAQ".into())),
        ("symbol = BRK.B", "symbol", ComparisonOp::Eq, Value::Text("BRK.B".into())),
        ("name CONTAINS \"bank of\"", "name", ComparisonOp::Contains, Value::Text("bank of".into())),
        ("name contains Société", "name", ComparisonOp::Contains, Value::Text("Société".into())),
    ];

    for (input, field, operator, value) in cases {
        let expr = Parser::parse_str(input).unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"));
        let clauses = expr.clauses();
        assert_eq!(clauses.len(), 1, "{input:?}");
        assert_eq!(clauses[0].field, field, "{input:?}");
        assert_eq!(clauses[0].operator, operator, "{input:?}");
        assert_eq!(clauses[0].value, value, "{input:?}");
    }
}

#[test]
fn compound_examples_clause_counts() {
    let cases: Vec<(usize, &str)> = vec![
        (2, "pe < 15 and market_cap > 1B"),
        (2, "sector = Technology and change > 5"),
        (2, "volume > 1M or dividend > 3"),
        (2, "rsi < 30 and not sector = Energy"),
        (1, "price between 10 and 50"),
        (3, "(pe < 15 || pb < 1) && mcap > 100M"),
        (3, "not (beta > 1.5 or rsi > 70) and volume > 1M"),
        (2, "price between 10 and 50 and pe < 20"),
    ];

    for (count, input) in cases {
        let expr = Parser::parse_str(input).unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"));
        assert_eq!(expr.clauses().len(), count, "{input:?}");
    }
}

#[test]
fn rejected_examples() {
    let cases = [
        "",
        "price",
        "price >",
        "> 100",
        "price > 100 and",
        "price 100",
        "foo > 1",
        "price > 1Q",
        "price between 10 50",
        "sector contains",
        "(price > 1",
        "price > 1)",
        "volume > 1 @",
    ];

    for input in cases {
        assert!(Parser::parse_str(input).is_err(), "{input:?} should not parse");
    }
}

#[test]
fn validator_and_parser_disagree_where_expected() {
    // (line, heuristic verdict, parses)
    let cases = [
        ("price > 100", true, true),
        ("priceless > nothing", true, false),
        ("just some words", false, false),
        ("priceless", false, false),
        ("volume > 1M or", true, false),
    ];

    for (line, valid, parses) in cases {
        assert_eq!(looks_valid(line), valid, "{line:?}");
        assert_eq!(Parser::parse_str(line).is_ok(), parses, "{line:?}");
    }
}

#[test]
fn screening_examples() {
    let quotes = vec![
        Quote::new("AAPL").with("price", 190.0).with("peRatio", 29.0).with("marketCap", 2.9e12).with("sector", "Technology"),
        Quote::new("XOM").with("price", 110.0).with("peRatio", 12.0).with("marketCap", 4.4e11).with("sector", "Energy"),
        Quote::new("F").with("price", 12.0).with("peRatio", 7.0).with("marketCap", 4.8e10).with("sector", "Consumer Cyclical"),
    ];

    let cases: Vec<(&str, Vec<&str>)> = vec![
        ("pe < 15", vec!["XOM", "F"]),
        ("pe < 15 and mcap > 100B", vec!["XOM"]),
        ("sector = technology or price < 20", vec!["AAPL", "F"]),
        ("not sector = Energy", vec!["AAPL", "F"]),
        ("price between 100 and 200", vec!["AAPL", "XOM"]),
        ("sector contains cyc", vec!["F"]),
    ];

    for (input, expected) in cases {
        let expr = Parser::parse_str(input).unwrap();
        let hits: Vec<&str> = quotes.iter().filter(|q| expr.evaluate(q)).map(|q| q.symbol.as_str()).collect();
        assert_eq!(hits, expected, "{input:?}");
    }
}
