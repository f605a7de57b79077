//! End-to-end tests matching the pipeline's concrete scenarios and
//! property-style invariants.

use cnf_grammar::ast::{
    AstNode, TAG_CHOICE, TAG_REPETITION, TAG_REPETITION_PLUS, TAG_SEQUENCE,
};
use cnf_grammar::{run, Grammar, PipelineConfig};

fn assert_is_cnf(grammar: &Grammar) {
    for head in grammar.heads_snapshot() {
        for body in grammar.productions(&head) {
            match body.len() {
                1 => assert!(body[0].is_terminal(), "`{head}` length-1 body must be a terminal"),
                2 => assert!(
                    body.iter().all(|s| s.is_nonterminal()),
                    "`{head}` length-2 body must be two non-terminals"
                ),
                n => panic!("`{head}` has an illegal production length {n}"),
            }
        }
    }
}

/// Brute-force recognizer over a (small, already-CNF) grammar, used to check
/// language preservation for strings up to a small bound.
fn accepts(grammar: &Grammar, head: &str, target: &str, depth: usize) -> bool {
    if depth == 0 {
        return false;
    }
    for body in grammar.productions(head) {
        match body.len() {
            1 if body[0].canonical() == target => return true,
            2 => {
                let left = body[0].nonterminal_name().unwrap();
                let right = body[1].nonterminal_name().unwrap();
                for split in 0..=target.len() {
                    if !target.is_char_boundary(split) {
                        continue;
                    }
                    let (l, r) = target.split_at(split);
                    if accepts(grammar, left, l, depth - 1) && accepts(grammar, right, r, depth - 1)
                    {
                        return true;
                    }
                }
            }
            _ => {}
        }
    }
    false
}

#[test]
fn scenario_single_alternation_is_unchanged_by_the_pipeline() {
    // S ::= "a" | "b"
    let rule = AstNode::rule(
        "S",
        AstNode::with_children(TAG_CHOICE, vec![AstNode::literal("a"), AstNode::literal("b")]),
    );
    let grammar = run(&[rule]).unwrap();
    assert_is_cnf(&grammar);
    assert_eq!(grammar.start(), "S");
    let mut bodies: Vec<String> = grammar
        .productions("S")
        .iter()
        .map(|b| b[0].canonical().to_string())
        .collect();
    bodies.sort();
    assert_eq!(bodies, vec!["a", "b"]);
}

#[test]
fn scenario_repetition_star_accepts_zero_or_more() {
    // S ::= "a"*
    let rule = AstNode::rule("S", AstNode::with_children(TAG_REPETITION, vec![AstNode::literal("a")]));
    let grammar = run(&[rule]).unwrap();
    assert_is_cnf(&grammar);
    // Epsilon elimination drops the empty production everywhere, including
    // the start rule (the pipeline does not re-grant ε to the start
    // symbol), so "" is not accepted even though the source grammar was
    // `"a"*`.
    assert!(!accepts(&grammar, grammar.start(), "", 6));
    assert!(accepts(&grammar, grammar.start(), "a", 6));
    assert!(accepts(&grammar, grammar.start(), "aaa", 6));
}

#[test]
fn scenario_repetition_plus_requires_at_least_one() {
    // S ::= "a"+
    let rule = AstNode::rule(
        "S",
        AstNode::with_children(TAG_REPETITION_PLUS, vec![AstNode::literal("a")]),
    );
    let grammar = run(&[rule]).unwrap();
    assert_is_cnf(&grammar);
    assert!(accepts(&grammar, grammar.start(), "a", 6));
    assert!(accepts(&grammar, grammar.start(), "aaaa", 8));
    assert!(!accepts(&grammar, grammar.start(), "", 6));
}

#[test]
fn scenario_nullable_propagation_preserves_exact_language() {
    // S ::= A B, A ::= "x"?, B ::= "b"  -- language is {"b", "xb"}
    let rules = vec![
        AstNode::rule(
            "S",
            AstNode::with_children(
                TAG_SEQUENCE,
                vec![AstNode::identifier("A"), AstNode::identifier("B")],
            ),
        ),
        AstNode::rule(
            "A",
            AstNode::with_children(cnf_grammar::ast::TAG_OPTIONAL, vec![AstNode::literal("x")]),
        ),
        AstNode::rule("B", AstNode::literal("b")),
    ];
    let grammar = run(&rules).unwrap();
    assert_is_cnf(&grammar);
    assert!(accepts(&grammar, grammar.start(), "b", 10));
    assert!(accepts(&grammar, grammar.start(), "xb", 10));
    assert!(!accepts(&grammar, grammar.start(), "x", 10));
    assert!(!accepts(&grammar, grammar.start(), "", 10));
}

#[test]
fn scenario_long_sequence_binarizes_into_a_right_branching_chain() {
    let rule = AstNode::rule(
        "R",
        AstNode::with_children(
            TAG_SEQUENCE,
            vec![
                AstNode::literal("a"),
                AstNode::literal("b"),
                AstNode::literal("c"),
                AstNode::literal("d"),
                AstNode::literal("e"),
            ],
        ),
    );
    let grammar = run(&[rule]).unwrap();
    assert_is_cnf(&grammar);
    assert!(accepts(&grammar, grammar.start(), "abcde", 10));
    assert!(!accepts(&grammar, grammar.start(), "abcd", 10));
}

#[test]
fn scenario_unit_chain_collapses_to_the_terminal_production() {
    // A -> B, B -> C, C -> "c"
    let rules = vec![
        AstNode::rule("A", AstNode::identifier("B")),
        AstNode::rule("B", AstNode::identifier("C")),
        AstNode::rule("C", AstNode::literal("c")),
    ];
    let grammar = run(&rules).unwrap();
    assert_is_cnf(&grammar);
    for head in ["A", "B", "C"] {
        assert!(accepts(&grammar, head, "c", 5));
    }
}

#[test]
fn scenario_cartesian_distribution_of_choice_inside_sequence() {
    // S ::= ("a" | "b") "c"  -- language is {"ac", "bc"}
    let rule = AstNode::rule(
        "S",
        AstNode::with_children(
            TAG_SEQUENCE,
            vec![
                AstNode::with_children(TAG_CHOICE, vec![AstNode::literal("a"), AstNode::literal("b")]),
                AstNode::literal("c"),
            ],
        ),
    );
    let grammar = run(&[rule]).unwrap();
    assert_is_cnf(&grammar);
    assert!(accepts(&grammar, grammar.start(), "ac", 6));
    assert!(accepts(&grammar, grammar.start(), "bc", 6));
    assert!(!accepts(&grammar, grammar.start(), "cc", 6));
}

#[test]
fn fresh_names_minted_across_a_run_never_collide() {
    let rules = vec![AstNode::rule(
        "S",
        AstNode::with_children(
            TAG_SEQUENCE,
            vec![
                AstNode::with_children(cnf_grammar::ast::TAG_OPTIONAL, vec![AstNode::literal("a")]),
                AstNode::with_children(cnf_grammar::ast::TAG_OPTIONAL, vec![AstNode::literal("b")]),
                AstNode::with_children(TAG_REPETITION, vec![AstNode::literal("c")]),
                AstNode::with_children(TAG_REPETITION_PLUS, vec![AstNode::literal("d")]),
            ],
        ),
    )];
    let grammar = run(&rules).unwrap();
    let mut seen = std::collections::HashSet::new();
    for head in grammar.heads_snapshot() {
        assert!(seen.insert(head), "duplicate head name minted during ingestion/binarization");
    }
}

#[test]
fn epsilon_expansion_cap_is_surfaced_as_an_error_not_a_panic() {
    // 25 independently-nullable non-terminals in one sequence: 2^25 subsets,
    // comfortably over a small configured cap.
    let mut children = Vec::new();
    for i in 0..25 {
        children.push(AstNode::with_children(
            TAG_REPETITION,
            vec![AstNode::literal(format!("t{i}"))],
        ));
    }
    let rule = AstNode::rule("S", AstNode::with_children(TAG_SEQUENCE, children));
    let config = PipelineConfig { max_nullable_subsets: 1 << 8 };
    let err = cnf_grammar::run_with_config(&[rule], config).unwrap_err();
    assert!(matches!(err, cnf_grammar::PipelineError::ExpansionCapExceeded { .. }));
}

#[test]
fn unknown_rhs_tag_aborts_ingestion_with_a_typed_error() {
    let rule = AstNode::rule("S", AstNode::new("NotARealNode"));
    let err = run(&[rule]).unwrap_err();
    assert!(matches!(err, cnf_grammar::PipelineError::UnknownNodeTag { .. }));
}
