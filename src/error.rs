//! Error types for the EBNF-to-CNF transformation pipeline.

use thiserror::Error;

/// Errors that can occur while ingesting a syntax tree or normalizing a
/// grammar to Chomsky Normal Form.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An RHS node carried a tag the ingester does not recognize.
    #[error("unrecognized syntax-tree node tag `{tag}` while translating `{context}`")]
    UnknownNodeTag { tag: String, context: String },

    /// A `Rule`/`Definition`/`CharRange`/`Choice`/`Sequence`/`Optional`/
    /// `Repetition`/`RepetitionPlus` node violated its required shape
    /// (wrong child count, missing value, etc).
    #[error("malformed `{tag}` node: {reason}")]
    MalformedNode { tag: String, reason: String },

    /// The ingester was given no rule nodes at all; there is no start
    /// symbol to designate.
    #[error("cannot ingest an empty grammar: no rule nodes were supplied")]
    EmptyInput,

    /// A pass detected a broken invariant it did not itself introduce: a
    /// missing head, an unexpected mixed-symbol production after terminal
    /// isolation, or similar evidence of a bug in the pipeline itself.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The epsilon-elimination safety cap (see `PipelineConfig`) was
    /// exceeded while expanding nullable positions out of a production.
    #[error(
        "epsilon-expansion safety cap ({cap}) exceeded while expanding nullable positions in `{head}`"
    )]
    ExpansionCapExceeded { head: String, cap: usize },
}

/// Type alias for `Result`s produced by this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
