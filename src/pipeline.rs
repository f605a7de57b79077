//! Pipeline driver: runs the fixed sequence of passes — ingest, eliminate
//! epsilon, eliminate units, isolate terminals, binarize — and returns the
//! resulting CNF grammar.
//!
//! This driver does not preserve ε in the start symbol's language: if the
//! original grammar accepted the empty string, the CNF grammar generally
//! will not. A caller that needs ε-preservation should add an
//! `S' -> S | ε` rule node ahead of the original start rule before calling
//! `run`; no such pre-pass is added internally (spec §9).

use crate::ast::AstNode;
use crate::binarize::binarize;
use crate::epsilon::{eliminate_epsilon, DEFAULT_MAX_NULLABLE_SUBSETS};
use crate::error::Result;
use crate::grammar::Grammar;
use crate::ingest::ingest;
use crate::terminal::isolate_terminals;
use crate::unit::eliminate_units;

/// The pipeline's one externally meaningful tunable: the safety cap on how
/// many nullable-position subsets epsilon elimination will expand out of a
/// single production before giving up (spec §5, §9A).
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub max_nullable_subsets: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_nullable_subsets: DEFAULT_MAX_NULLABLE_SUBSETS,
        }
    }
}

/// Runs the full EBNF-to-CNF pipeline with the default configuration.
pub fn run(rule_nodes: &[AstNode]) -> Result<Grammar> {
    run_with_config(rule_nodes, PipelineConfig::default())
}

/// Runs the full EBNF-to-CNF pipeline with an explicit configuration.
pub fn run_with_config(rule_nodes: &[AstNode], config: PipelineConfig) -> Result<Grammar> {
    log::debug!("pipeline: [1/5] ingesting {} rule node(s)", rule_nodes.len());
    let mut grammar = ingest(rule_nodes)?;

    log::debug!("pipeline: [2/5] eliminating epsilon productions");
    eliminate_epsilon(&mut grammar, config.max_nullable_subsets)?;

    log::debug!("pipeline: [3/5] eliminating unit productions");
    eliminate_units(&mut grammar);

    log::debug!("pipeline: [4/5] isolating terminals");
    isolate_terminals(&mut grammar);

    log::debug!("pipeline: [5/5] binarizing");
    binarize(&mut grammar)?;

    log::debug!(
        "pipeline: complete, {} head(s) in final CNF grammar",
        grammar.heads_snapshot().len()
    );
    Ok(grammar)
}
