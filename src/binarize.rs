//! Binarization: rewrites productions longer than 2 symbols into a
//! right-branching chain of fresh two-symbol productions.

use crate::error::{PipelineError, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Binarizes every production longer than 2 symbols, across every head.
/// Also enforces the invariant noted as an open question in the spec: once
/// terminal isolation has run, no production of length ≥ 2 may still
/// contain a terminal, since binarization assumes such bodies are made of
/// two non-terminals.
pub fn binarize(grammar: &mut Grammar) -> Result<()> {
    let mut introduced = 0usize;

    for head in grammar.heads_snapshot() {
        loop {
            let long = grammar
                .productions(&head)
                .iter()
                .find(|body| body.len() > 2)
                .cloned();
            let Some(body) = long else { break };

            grammar.remove_production(&head, &body);

            let mut current_head = head.clone();
            for window in body[..body.len() - 1].windows(1).take(body.len() - 2) {
                let new_nt = grammar.fresh_name(&format!("{head}_BIN"));
                grammar.add_production(current_head.clone(), vec![window[0].clone(), Symbol::non_terminal(new_nt.clone())]);
                current_head = new_nt;
                introduced += 1;
            }
            let tail = &body[body.len() - 2..];
            grammar.add_production(current_head, tail.to_vec());
        }
    }

    for head in grammar.heads_snapshot() {
        for body in grammar.productions(&head) {
            if body.len() == 2 && body.iter().any(|s| s.is_terminal()) {
                return Err(PipelineError::InternalInvariant(format!(
                    "production `{head} -> {} {}` mixes a terminal into a length-2 body after terminal isolation",
                    body[0].canonical(),
                    body[1].canonical(),
                )));
            }
            if body.len() > 2 {
                return Err(PipelineError::InternalInvariant(format!(
                    "production at `{head}` still has length {} after binarization",
                    body.len()
                )));
            }
        }
    }

    log::debug!("binarize: introduced {introduced} chain non-terminal(s)");
    Ok(())
}
