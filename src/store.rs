//! Ordered rule store.
//!
//! Rules are created in batches from free text (one rule per non-empty line),
//! appended in insertion order and never deduplicated. Every mutation notifies
//! subscribers with the full, updated list.

use crate::api::Context;
use crate::engine::{ParseError, Parser, Quote, looks_valid};
use crate::events::{EventBus, SubscriptionId};
use crate::{Clause, Expr};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

/// One screener rule.
///
/// `validated` is the substring heuristic (see [`crate::validate_rule`]);
/// `expr` is the real parse result and is `None` exactly when `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub id: u64,
    pub text: String,
    pub expr: Option<Expr>,
    pub error: Option<ParseError>,
    pub validated: bool,
    pub created_at: NaiveDateTime,
}

impl Rule {
    /// Build a rule from one line of text.
    pub fn new(id: u64, text: &str, created_at: NaiveDateTime) -> Self {
        let (expr, error) = match Parser::parse_str(text) {
            Ok(expr) => (Some(expr), None),
            Err(err) => (None, Some(err)),
        };
        Rule { id, text: text.to_string(), expr, error, validated: looks_valid(text), created_at }
    }

    /// Field/operator/value triples, empty when the rule did not parse.
    pub fn clauses(&self) -> Vec<&Clause> {
        self.expr.as_ref().map(Expr::clauses).unwrap_or_default()
    }

    pub fn is_parsed(&self) -> bool {
        self.expr.is_some()
    }

    /// Whether `quote` passes this rule. Unparsed rules match nothing.
    pub fn matches(&self, quote: &Quote) -> bool {
        self.expr.as_ref().is_some_and(|e| e.evaluate(quote))
    }
}

#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    next_id: u64,
    listeners: EventBus<[Rule]>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change listener; it receives the full list after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Rule]) + Send + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Add one rule per non-empty line of `free_text`, stamped with the
    /// current time. Returns the newly added rules.
    pub fn add_rules(&mut self, free_text: &str) -> &[Rule] {
        self.add_rules_with(free_text, &Context::default())
    }

    /// Like [`add_rules`](Self::add_rules) but with an explicit [`Context`].
    pub fn add_rules_with(&mut self, free_text: &str, context: &Context) -> &[Rule] {
        let first = self.rules.len();

        for line in free_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.next_id += 1;
            let rule = Rule::new(self.next_id, line, context.reference_time);
            debug!(id = rule.id, text = %rule.text, validated = rule.validated, parsed = rule.is_parsed(), "rule added");
            self.rules.push(rule);
        }

        info!(added = self.rules.len() - first, total = self.rules.len(), "rules ingested");
        self.notify();
        &self.rules[first..]
    }

    /// Remove the rule with `id`. Ids are not reused.
    pub fn remove(&mut self, id: u64) -> Option<Rule> {
        let idx = self.rules.iter().position(|r| r.id == id)?;
        let removed = self.rules.remove(idx);
        self.notify();
        Some(removed)
    }

    /// Drop every rule. Id numbering continues where it left off.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.notify();
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: u64) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn notify(&mut self) {
        self.listeners.publish(&self.rules);
    }
}
