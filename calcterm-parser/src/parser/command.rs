//! The reverse-Polish command stream produced by the parser.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which kind of node a [`Command`] constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeType {
    /// A number literal; the command's name is the exact slice of source code to parse.
    Literal,

    /// A named node. The eight reserved names (`+`, `-`, `*`, `/`, `%`, `^`, `!`, `ng`)
    /// construct the corresponding algebraic node; any other name constructs a symbol or
    /// function application.
    Symbol,
}

/// A single instruction in the reverse-Polish stream emitted by the parser.
///
/// The expression builder executes commands in order against a stack: a literal command pushes
/// one node, and a symbol command pops `arity` children and pushes its construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Which kind of node this command constructs.
    pub node_type: NodeType,

    /// The literal text or the name to dispatch on.
    pub name: String,

    /// The number of children popped from the stack. Always zero for literals.
    pub arity: usize,

    /// The region of the source code that this command was parsed from.
    pub span: Range<usize>,
}

impl Command {
    /// Creates a literal command from the slice of source it was matched from.
    pub fn literal(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            node_type: NodeType::Literal,
            name: name.into(),
            arity: 0,
            span,
        }
    }

    /// Creates a symbol command with the given dispatch name and arity.
    pub fn symbol(name: impl Into<String>, arity: usize, span: Range<usize>) -> Self {
        Self {
            node_type: NodeType::Symbol,
            name: name.into(),
            arity,
            span,
        }
    }
}
