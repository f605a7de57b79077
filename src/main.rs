//! Demo binary: builds a small sample EBNF grammar, runs the ingest ->
//! epsilon -> unit -> terminal-isolation -> binarize pipeline over it, and
//! prints the resulting Chomsky Normal Form grammar.
//!
//! Run with `RUST_LOG=debug` to see the pipeline's staged trace output.

use cnf_grammar::ast::{AstNode, TAG_CHOICE, TAG_OPTIONAL, TAG_SEQUENCE};
use std::process;

/// `S ::= "a" ("b" | "c")? "d"`
fn sample_rules() -> Vec<AstNode> {
    vec![AstNode::rule(
        "S",
        AstNode::with_children(
            TAG_SEQUENCE,
            vec![
                AstNode::literal("a"),
                AstNode::with_children(
                    TAG_OPTIONAL,
                    vec![AstNode::with_children(
                        TAG_CHOICE,
                        vec![AstNode::literal("b"), AstNode::literal("c")],
                    )],
                ),
                AstNode::literal("d"),
            ],
        ),
    )]
}

fn main() {
    env_logger::init();

    match cnf_grammar::run(&sample_rules()) {
        Ok(grammar) => {
            println!("start: {}", grammar.start());
            print!("{grammar}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
