//! The externally supplied grammar syntax tree.
//!
//! This is the minimal node shape the ingester needs, not a lexer or
//! parser: building `AstNode` trees out of grammar source text, a bootstrap
//! EBNF meta-grammar, or a Unicode character-category ruleset is a
//! collaborator's responsibility, out of scope for this crate (see
//! `crate::ingest`).

/// `Rule.children = [Identifier(name), Definition]`.
pub const TAG_RULE: &str = "Rule";
pub const TAG_IDENTIFIER: &str = "Identifier";
pub const TAG_LITERAL: &str = "Literal";
pub const TAG_HEX_LITERAL: &str = "HexLiteral";
pub const TAG_CHAR_RANGE: &str = "CharRange";
pub const TAG_CHOICE: &str = "Choice";
pub const TAG_SEQUENCE: &str = "Sequence";
pub const TAG_OPTIONAL: &str = "Optional";
pub const TAG_REPETITION: &str = "Repetition";
pub const TAG_REPETITION_PLUS: &str = "RepetitionPlus";
/// `Definition.children = [rhs]` (single child).
pub const TAG_DEFINITION: &str = "Definition";

/// A node in the externally supplied grammar syntax tree.
///
/// Three fields, per the spec's external interface: a type tag, an optional
/// payload, and an ordered list of children. `Identifier`, `Literal`, and
/// `HexLiteral` carry their payload in `value`; every other tag's meaning
/// comes entirely from its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(tag: impl Into<String>) -> Self {
        AstNode {
            tag: tag.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        AstNode {
            tag: tag.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: impl Into<String>, children: Vec<AstNode>) -> Self {
        AstNode {
            tag: tag.into(),
            value: None,
            children,
        }
    }

    /// Convenience constructor for an `Identifier` node.
    pub fn identifier(name: impl Into<String>) -> Self {
        AstNode::leaf(TAG_IDENTIFIER, name)
    }

    /// Convenience constructor for a `Literal` node.
    pub fn literal(payload: impl Into<String>) -> Self {
        AstNode::leaf(TAG_LITERAL, payload)
    }

    /// Convenience constructor for a `HexLiteral` node.
    pub fn hex_literal(code: impl Into<String>) -> Self {
        AstNode::leaf(TAG_HEX_LITERAL, code)
    }

    /// Convenience constructor for a `CharRange` node.
    pub fn char_range(lo: impl Into<String>, hi: impl Into<String>) -> Self {
        AstNode::with_children(
            TAG_CHAR_RANGE,
            vec![AstNode::hex_literal(lo), AstNode::hex_literal(hi)],
        )
    }

    /// Convenience constructor for a `Rule` node: `Rule(Identifier, Definition(rhs))`.
    pub fn rule(name: impl Into<String>, rhs: AstNode) -> Self {
        AstNode::with_children(
            TAG_RULE,
            vec![
                AstNode::identifier(name),
                AstNode::with_children(TAG_DEFINITION, vec![rhs]),
            ],
        )
    }

    /// Recursively concatenates the values of this node and its children,
    /// in document order. Used as a naming fallback for composite RHS
    /// nodes that have no single direct value (mirrors the original
    /// implementation's `ASTNode.flatten`).
    pub fn flatten(&self) -> String {
        match &self.value {
            Some(v) => v.clone(),
            None => self.children.iter().map(AstNode::flatten).collect(),
        }
    }
}
