//! EBNF-to-Chomsky-Normal-Form grammar transformation pipeline.
//!
//! Accepts a context-free grammar written in an extended notation (choice,
//! sequence, optional, repetition, one-or-more, literal/hex/range terminals)
//! as a syntax tree (see [`ast`]) and normalizes it to Chomsky Normal Form:
//! every production is either a single terminal or exactly two
//! non-terminals, with no epsilon productions and no unit productions.
//!
//! The pipeline is strictly single-threaded and synchronous; see
//! [`pipeline::run`] for the driver that ties the five passes together.

pub mod ast;
pub mod binarize;
pub mod epsilon;
pub mod error;
pub mod grammar;
pub mod ingest;
pub mod pipeline;
pub mod symbol;
pub mod terminal;
pub mod unit;

pub use error::{PipelineError, Result};
pub use grammar::{Grammar, Production};
pub use pipeline::{run, run_with_config, PipelineConfig};
pub use symbol::{Symbol, Terminal, TerminalKind};
