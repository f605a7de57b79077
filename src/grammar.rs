//! Grammar store: a mutable mapping from non-terminal name to its ordered
//! list of productions, plus a fresh-name generator and the start symbol.

use crate::symbol::Symbol;
use std::collections::HashMap;
use std::fmt;

/// An ordered sequence of symbols. The empty sequence denotes epsilon.
pub type Production = Vec<Symbol>;

/// A mutable context-free grammar under construction or normalization.
///
/// `Grammar` is created by the ingester, mutated in place by each pipeline
/// pass, and returned by the driver. Production order within a rule is
/// preserved for deterministic output but carries no language meaning.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<String, Vec<Production>>,
    start: String,
    counter: usize,
}

impl Grammar {
    /// Creates an empty grammar with the given start symbol.
    pub fn new(start: impl Into<String>) -> Self {
        Grammar {
            rules: HashMap::new(),
            start: start.into(),
            counter: 0,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Appends `body` to the productions at `head`, unless an equal body is
    /// already present (set-like semantics per rule).
    pub fn add_production(&mut self, head: impl Into<String>, body: Production) {
        let entry = self.rules.entry(head.into()).or_default();
        if !entry.contains(&body) {
            entry.push(body);
        }
    }

    /// Removes one production matching `body` from `head`. No-op if absent
    /// or if `head` does not exist.
    pub fn remove_production(&mut self, head: &str, body: &Production) {
        if let Some(prods) = self.rules.get_mut(head) {
            if let Some(pos) = prods.iter().position(|p| p == body) {
                prods.remove(pos);
            }
        }
    }

    /// Replaces the production at `head` index `idx` with `body`.
    pub fn set_production(&mut self, head: &str, idx: usize, body: Production) {
        if let Some(prods) = self.rules.get_mut(head) {
            if let Some(slot) = prods.get_mut(idx) {
                *slot = body;
            }
        }
    }

    /// Mints a fresh non-terminal name, guaranteed unique within this
    /// grammar's lifetime. `hint` is sanitized (`?`→`_opt`, `*`→`_rep`,
    /// `+`→`_plus`) and used as a prefix; an empty hint becomes `NT`.
    pub fn fresh_name(&mut self, hint: &str) -> String {
        let sanitized = sanitize_hint(hint);
        self.counter += 1;
        format!("{}_{}", sanitized, self.counter)
    }

    pub fn contains(&self, head: &str) -> bool {
        self.rules.contains_key(head)
    }

    pub fn iter_heads(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    /// A snapshot of the current heads, safe to iterate while mutating the
    /// grammar (several passes append new heads or productions mid-scan).
    pub fn heads_snapshot(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    pub fn productions(&self, head: &str) -> &[Production] {
        self.rules.get(head).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Removes all rules with no productions at all (as opposed to a rule
    /// with one empty-body production, which is a live epsilon production
    /// until the epsilon pass deletes it).
    pub fn drop_empty_rules(&mut self) {
        self.rules.retain(|_, prods| !prods.is_empty());
    }

    pub fn rules(&self) -> &HashMap<String, Vec<Production>> {
        &self.rules
    }

    /// Every non-terminal name referenced in any production body, across
    /// every rule.
    pub fn referenced_nonterminals(&self) -> std::collections::HashSet<String> {
        self.rules
            .values()
            .flatten()
            .flat_map(|body| body.iter())
            .filter_map(|s| s.nonterminal_name().map(|n| n.to_string()))
            .collect()
    }
}

fn sanitize_hint(hint: &str) -> String {
    if hint.is_empty() {
        return "NT".to_string();
    }
    hint.replace('?', "_opt").replace('*', "_rep").replace('+', "_plus")
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut heads: Vec<&String> = self.rules.keys().collect();
        heads.sort();
        for head in heads {
            for body in &self.rules[head] {
                let rhs = if body.is_empty() {
                    "ε".to_string()
                } else {
                    body.iter()
                        .map(|s| s.canonical().to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                writeln!(f, "{} -> {}", head, rhs)?;
            }
        }
        Ok(())
    }
}
