//! Symbol types for extended (EBNF) and Chomsky-Normal-Form grammars.
//!
//! This module defines the vocabulary shared by every pass of the pipeline:
//! non-terminals (named rule heads) and terminals (literal / hex / range),
//! identified by their canonical rendered form.

use std::fmt;

/// Distinguishes how a terminal was spelled in the source grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    /// A character or multi-character string literal, e.g. `"="`.
    Literal,
    /// A single Unicode code point, rendered `#xNNNN`.
    Hex,
    /// A code point range, rendered `[#xLO-#xHI]`.
    Range,
}

/// A terminal symbol, identified by its canonical rendered form.
///
/// Two terminals are equal iff their rendered forms are equal, regardless of
/// how they were constructed.
#[derive(Debug, Clone, Eq)]
pub struct Terminal {
    kind: TerminalKind,
    rendered: String,
}

impl Terminal {
    /// A literal terminal. `payload` is the text verbatim (quotes already
    /// stripped by the caller).
    pub fn literal(payload: impl Into<String>) -> Self {
        Terminal {
            kind: TerminalKind::Literal,
            rendered: payload.into(),
        }
    }

    /// A hex code-point terminal. `code` is padded to at least 4 uppercase
    /// hex digits and rendered as `#xNNNN`.
    pub fn hex(code: &str) -> Self {
        Terminal {
            kind: TerminalKind::Hex,
            rendered: format!("#x{}", pad_hex(code)),
        }
    }

    /// A code-point range terminal, rendered as `[#xLO-#xHI]`.
    pub fn range(lo: &str, hi: &str) -> Self {
        Terminal {
            kind: TerminalKind::Range,
            rendered: format!("[#x{}-#x{}]", pad_hex(lo), pad_hex(hi)),
        }
    }

    pub fn kind(&self) -> TerminalKind {
        self.kind
    }

    /// The canonical rendered form, e.g. `a`, `#x0041`, `[#x0041-#x005A]`.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl std::hash::Hash for Terminal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

fn pad_hex(code: &str) -> String {
    let upper = code
        .trim_start_matches("#x")
        .trim_start_matches("0x")
        .to_uppercase();
    if upper.len() >= 4 {
        upper
    } else {
        format!("{:0>4}", upper)
    }
}

/// A symbol in the grammar: either a non-terminal (a rule head) or a
/// terminal. Terminal detection is purely by variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    NonTerminal(String),
    Terminal(Terminal),
}

impl Symbol {
    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn terminal(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }

    /// A symbol is terminal iff its variant is not `NonTerminal`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// The non-terminal name, if this symbol is one.
    pub fn nonterminal_name(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::NonTerminal(_) => None,
        }
    }

    /// The canonical string form: the non-terminal's name, or the
    /// terminal's rendered form.
    pub fn canonical(&self) -> &str {
        match self {
            Symbol::NonTerminal(name) => name,
            Symbol::Terminal(t) => t.rendered(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
