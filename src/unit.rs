//! Unit elimination: removes all productions of the form `A -> B` where `B`
//! is a non-terminal, propagating `B`'s own productions into `A`.

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Repeatedly removes unit productions until none remain. Safe under unit
/// cycles: each removal strictly decreases the set of (head, body) pairs
/// still containing a unit production, and propagation only ever adds
/// already-existing bodies, so the procedure terminates.
pub fn eliminate_units(grammar: &mut Grammar) {
    let mut removed = 0usize;
    loop {
        let unit = find_unit_production(grammar);
        let Some((head, referenced)) = unit else {
            break;
        };

        grammar.remove_production(&head, &vec![Symbol::non_terminal(referenced.clone())]);
        removed += 1;

        for body in grammar.productions(&referenced).to_vec() {
            grammar.add_production(head.clone(), body);
        }
    }
    log::debug!("unit: removed {removed} unit production(s)");
}

fn find_unit_production(grammar: &Grammar) -> Option<(String, String)> {
    for head in grammar.heads_snapshot() {
        for body in grammar.productions(&head) {
            if body.len() == 1 {
                if let Some(name) = body[0].nonterminal_name() {
                    return Some((head.clone(), name.to_string()));
                }
            }
        }
    }
    None
}
