//! Terminal isolation: ensures terminals appear only in productions of
//! length 1 (`A -> a`), never mixed into longer bodies.

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Rewrites every terminal inside a production of length ≥ 2 to a fresh or
/// reused `TERM_<canonical>` non-terminal, and ensures `TERM_<canonical> ->
/// <terminal>` exists for each one introduced.
pub fn isolate_terminals(grammar: &mut Grammar) {
    let mut introduced = 0usize;

    for head in grammar.heads_snapshot() {
        let productions = grammar.productions(&head).to_vec();
        for (idx, body) in productions.iter().enumerate() {
            if body.len() < 2 {
                continue;
            }
            let mut rewritten = body.clone();
            let mut changed = false;
            for symbol in rewritten.iter_mut() {
                if let Symbol::Terminal(t) = symbol {
                    let term_name = format!("TERM_{}", t.rendered().replace('\'', ""));
                    if !grammar.contains(&term_name) {
                        grammar.add_production(term_name.clone(), vec![Symbol::Terminal(t.clone())]);
                        introduced += 1;
                    }
                    *symbol = Symbol::non_terminal(term_name);
                    changed = true;
                }
            }
            if changed {
                grammar.set_production(&head, idx, rewritten);
            }
        }
    }

    log::debug!("terminal-isolation: introduced {introduced} TERM_* non-terminal(s)");
}
