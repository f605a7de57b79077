//! Walks an externally supplied syntax tree of rule definitions and emits
//! productions into a fresh `Grammar`, desugaring EBNF operators by
//! introducing auxiliary non-terminals as it goes.

use crate::ast::{
    AstNode, TAG_CHAR_RANGE, TAG_CHOICE, TAG_DEFINITION, TAG_HEX_LITERAL, TAG_IDENTIFIER,
    TAG_LITERAL, TAG_OPTIONAL, TAG_REPETITION, TAG_REPETITION_PLUS, TAG_RULE, TAG_SEQUENCE,
};
use crate::error::{PipelineError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::{Symbol, Terminal};

/// Ingests an ordered list of `Rule` nodes into a `Grammar`. The start
/// symbol is the head of the first rule.
pub fn ingest(rule_nodes: &[AstNode]) -> Result<Grammar> {
    if rule_nodes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let start = rule_head_name(&rule_nodes[0])?;
    let mut grammar = Grammar::new(start);

    for rule_node in rule_nodes {
        ingest_rule(&mut grammar, rule_node)?;
    }

    log::debug!(
        "ingest: {} rule node(s) produced {} head(s)",
        rule_nodes.len(),
        grammar.heads_snapshot().len()
    );

    Ok(grammar)
}

fn rule_head_name(node: &AstNode) -> Result<String> {
    require_tag(node, TAG_RULE)?;
    let head = node.children.first().ok_or_else(|| malformed(TAG_RULE, "missing head child"))?;
    require_tag(head, TAG_IDENTIFIER)?;
    head.value
        .clone()
        .ok_or_else(|| malformed(TAG_IDENTIFIER, "missing name value"))
}

fn ingest_rule(grammar: &mut Grammar, node: &AstNode) -> Result<()> {
    require_tag(node, TAG_RULE)?;
    if node.children.len() != 2 {
        return Err(malformed(
            TAG_RULE,
            &format!("expected 2 children (Identifier, Definition), found {}", node.children.len()),
        ));
    }

    let head_node = &node.children[0];
    require_tag(head_node, TAG_IDENTIFIER)?;
    let head = head_node
        .value
        .clone()
        .ok_or_else(|| malformed(TAG_IDENTIFIER, "missing name value"))?;

    let def_node = &node.children[1];
    require_tag(def_node, TAG_DEFINITION)?;
    let rhs = def_node
        .children
        .first()
        .ok_or_else(|| malformed(TAG_DEFINITION, "missing rhs child"))?;

    let bodies = translate_rhs(grammar, rhs)?;
    for body in bodies {
        grammar.add_production(head.clone(), body);
    }
    Ok(())
}

/// Translates an RHS expression node into the set of productions it
/// contributes to its parent non-terminal, per the table in §4.3.
fn translate_rhs(grammar: &mut Grammar, node: &AstNode) -> Result<Vec<Production>> {
    match node.tag.as_str() {
        TAG_IDENTIFIER => {
            let name = node
                .value
                .clone()
                .ok_or_else(|| malformed(TAG_IDENTIFIER, "missing name value"))?;
            Ok(vec![vec![Symbol::non_terminal(name)]])
        }
        TAG_LITERAL => {
            let payload = node
                .value
                .clone()
                .ok_or_else(|| malformed(TAG_LITERAL, "missing literal value"))?;
            Ok(vec![vec![Symbol::terminal(Terminal::literal(payload))]])
        }
        TAG_HEX_LITERAL => {
            let code = node
                .value
                .as_deref()
                .ok_or_else(|| malformed(TAG_HEX_LITERAL, "missing code point value"))?;
            Ok(vec![vec![Symbol::terminal(Terminal::hex(code))]])
        }
        TAG_CHAR_RANGE => {
            if node.children.len() != 2 {
                return Err(malformed(
                    TAG_CHAR_RANGE,
                    &format!("expected 2 HexLiteral children, found {}", node.children.len()),
                ));
            }
            let lo = hex_value(&node.children[0])?;
            let hi = hex_value(&node.children[1])?;
            Ok(vec![vec![Symbol::terminal(Terminal::range(&lo, &hi))]])
        }
        TAG_CHOICE => {
            if node.children.is_empty() {
                return Err(malformed(TAG_CHOICE, "must have at least one child"));
            }
            let mut productions = Vec::new();
            for child in &node.children {
                productions.extend(translate_rhs(grammar, child)?);
            }
            Ok(productions)
        }
        TAG_SEQUENCE => {
            if node.children.is_empty() {
                return Err(malformed(TAG_SEQUENCE, "must have at least one child"));
            }
            // Full Cartesian-product distribution: a sequence's language is
            // the language of the cross product of its children's
            // alternatives. See SPEC_FULL.md §9B for why this corrects the
            // original implementation's "first alternative only" bug
            // instead of reproducing it.
            let mut acc: Vec<Production> = vec![Vec::new()];
            for child in &node.children {
                let child_bodies = translate_rhs(grammar, child)?;
                let mut next = Vec::with_capacity(acc.len() * child_bodies.len().max(1));
                for prefix in &acc {
                    for body in &child_bodies {
                        let mut combined = prefix.clone();
                        combined.extend(body.iter().cloned());
                        next.push(combined);
                    }
                }
                acc = next;
            }
            Ok(acc)
        }
        TAG_OPTIONAL => {
            let inner = single_child(node, TAG_OPTIONAL)?;
            let inner_bodies = translate_rhs(grammar, inner)?;
            let name = grammar.fresh_name(&rhs_hint(inner));
            for body in inner_bodies {
                grammar.add_production(name.clone(), body);
            }
            grammar.add_production(name.clone(), Vec::new());
            Ok(vec![vec![Symbol::non_terminal(name)]])
        }
        TAG_REPETITION => {
            let inner = single_child(node, TAG_REPETITION)?;
            let inner_bodies = translate_rhs(grammar, inner)?;
            let name = grammar.fresh_name(&rhs_hint(inner));
            for body in &inner_bodies {
                let mut with_tail = body.clone();
                with_tail.push(Symbol::non_terminal(name.clone()));
                grammar.add_production(name.clone(), with_tail);
            }
            grammar.add_production(name.clone(), Vec::new());
            Ok(vec![vec![Symbol::non_terminal(name)]])
        }
        TAG_REPETITION_PLUS => {
            let inner = single_child(node, TAG_REPETITION_PLUS)?;
            let inner_bodies = translate_rhs(grammar, inner)?;
            let name = grammar.fresh_name(&rhs_hint(inner));
            for body in &inner_bodies {
                let mut with_tail = body.clone();
                with_tail.push(Symbol::non_terminal(name.clone()));
                grammar.add_production(name.clone(), with_tail);
            }
            grammar.add_production(name.clone(), Vec::new());
            // A+ ≡ A A*: each inner production's leading symbol, followed
            // by the repetition non-terminal just minted above.
            let mut out = Vec::with_capacity(inner_bodies.len());
            for body in &inner_bodies {
                let first = body.first().cloned().ok_or_else(|| {
                    PipelineError::InternalInvariant(
                        "RepetitionPlus inner expression produced an empty body".to_string(),
                    )
                })?;
                out.push(vec![first, Symbol::non_terminal(name.clone())]);
            }
            Ok(out)
        }
        other => Err(PipelineError::UnknownNodeTag {
            tag: other.to_string(),
            context: "RHS expression".to_string(),
        }),
    }
}

fn single_child<'a>(node: &'a AstNode, tag: &str) -> Result<&'a AstNode> {
    if node.children.len() != 1 {
        return Err(malformed(
            tag,
            &format!("expected exactly 1 child, found {}", node.children.len()),
        ));
    }
    Ok(&node.children[0])
}

fn hex_value(node: &AstNode) -> Result<String> {
    require_tag(node, TAG_HEX_LITERAL)?;
    node.value
        .clone()
        .ok_or_else(|| malformed(TAG_HEX_LITERAL, "missing code point value"))
}

fn require_tag(node: &AstNode, expected: &str) -> Result<()> {
    if node.tag != expected {
        return Err(PipelineError::UnknownNodeTag {
            tag: node.tag.clone(),
            context: expected.to_string(),
        });
    }
    Ok(())
}

fn malformed(tag: &str, reason: &str) -> PipelineError {
    PipelineError::MalformedNode {
        tag: tag.to_string(),
        reason: reason.to_string(),
    }
}

/// The fresh-name hint for an EBNF operator's inner expression: the inner
/// node's own rendered symbol for leaf nodes, or its flattened text for
/// composite nodes (`Choice`/`Sequence`). See SPEC_FULL.md §9B.
fn rhs_hint(node: &AstNode) -> String {
    match node.tag.as_str() {
        TAG_IDENTIFIER | TAG_LITERAL => node.value.clone().unwrap_or_default(),
        TAG_HEX_LITERAL => Terminal::hex(node.value.as_deref().unwrap_or("")).rendered().to_string(),
        TAG_CHAR_RANGE if node.children.len() == 2 => {
            let lo = node.children[0].value.as_deref().unwrap_or("");
            let hi = node.children[1].value.as_deref().unwrap_or("");
            Terminal::range(lo, hi).rendered().to_string()
        }
        _ => node.flatten(),
    }
}
