//! Epsilon elimination: removes empty productions without changing the
//! recognized language (except possibly whether ε itself is accepted).

use crate::error::{PipelineError, Result};
use crate::grammar::{Grammar, Production};
use std::collections::HashSet;

/// Default cap on the number of nullable-position subsets expanded per
/// production. Worst case is `2^k` for `k` nullable positions in a single
/// production; this guards against pathological inputs exhausting memory
/// (see spec §5, §9A).
pub const DEFAULT_MAX_NULLABLE_SUBSETS: usize = 1 << 20;

/// Removes all epsilon productions from `grammar`, propagating nullability
/// into every production that referenced a nullable position.
pub fn eliminate_epsilon(grammar: &mut Grammar, max_subsets: usize) -> Result<()> {
    let nullable = compute_nullable(grammar);
    log::debug!("epsilon: {} nullable non-terminal(s)", nullable.len());

    for head in grammar.heads_snapshot() {
        let productions: Vec<Production> = grammar.productions(&head).to_vec();
        for body in &productions {
            let nullable_indices: Vec<usize> = body
                .iter()
                .enumerate()
                .filter(|(_, s)| s.nonterminal_name().is_some_and(|n| nullable.contains(n)))
                .map(|(i, _)| i)
                .collect();

            let subset_count = 1usize
                .checked_shl(nullable_indices.len() as u32)
                .unwrap_or(usize::MAX);
            if subset_count > max_subsets {
                return Err(PipelineError::ExpansionCapExceeded {
                    head: head.clone(),
                    cap: max_subsets,
                });
            }

            for mask in 1..subset_count {
                let dropped: HashSet<usize> = nullable_indices
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, &idx)| idx)
                    .collect();
                let reduced: Production = body
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !dropped.contains(i))
                    .map(|(_, s)| s.clone())
                    .collect();
                if !reduced.is_empty() {
                    grammar.add_production(head.clone(), reduced);
                }
            }
        }
    }

    // Step 3: delete all empty productions from every rule.
    for head in grammar.heads_snapshot() {
        let empty: Vec<Production> = grammar
            .productions(&head)
            .iter()
            .filter(|b| b.is_empty())
            .cloned()
            .collect();
        for body in empty {
            grammar.remove_production(&head, &body);
        }
    }

    Ok(())
}

/// Fixed-point computation of the nullable set: a non-terminal is nullable
/// if it has an empty production, or a production whose every symbol is
/// already known nullable.
fn compute_nullable(grammar: &Grammar) -> HashSet<String> {
    let mut nullable: HashSet<String> = HashSet::new();
    loop {
        let mut changed = false;
        for head in grammar.iter_heads() {
            if nullable.contains(head) {
                continue;
            }
            let is_nullable = grammar.productions(head).iter().any(|body| {
                body.is_empty()
                    || body
                        .iter()
                        .all(|s| s.nonterminal_name().is_some_and(|n| nullable.contains(n)))
            });
            if is_nullable {
                nullable.insert(head.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Symbol, Terminal};

    #[test]
    fn nullable_propagation_drops_epsilon_only_rule() {
        // S -> A B, A -> ε, B -> "b"
        let mut g = Grammar::new("S");
        g.add_production("S", vec![Symbol::non_terminal("A"), Symbol::non_terminal("B")]);
        g.add_production("A", vec![]);
        g.add_production("B", vec![Symbol::terminal(Terminal::literal("b"))]);

        eliminate_epsilon(&mut g, DEFAULT_MAX_NULLABLE_SUBSETS).unwrap();

        let s_bodies = g.productions("S");
        assert!(s_bodies.iter().all(|b| !b.is_empty()));
        assert!(s_bodies
            .iter()
            .any(|b| b.len() == 1 && b[0].nonterminal_name() == Some("B")));
        assert!(g.productions("A").is_empty());
    }

    #[test]
    fn no_epsilon_production_survives_non_start_rules() {
        let mut g = Grammar::new("S");
        g.add_production("S", vec![Symbol::non_terminal("A")]);
        g.add_production("A", vec![]);
        g.add_production("A", vec![Symbol::terminal(Terminal::literal("a"))]);

        eliminate_epsilon(&mut g, DEFAULT_MAX_NULLABLE_SUBSETS).unwrap();

        for head in g.heads_snapshot() {
            assert!(g.productions(&head).iter().all(|b| !b.is_empty()));
        }
    }

    #[test]
    fn cap_is_enforced() {
        let mut g = Grammar::new("S");
        let mut body = Vec::new();
        for i in 0..25 {
            let name = format!("N{i}");
            g.add_production(&name, vec![]);
            body.push(Symbol::non_terminal(name));
        }
        g.add_production("S", body);

        let err = eliminate_epsilon(&mut g, 1 << 10).unwrap_err();
        assert!(matches!(err, PipelineError::ExpansionCapExceeded { .. }));
    }
}
