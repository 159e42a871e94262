//! The symbolic expression tree.
//!
//! An [`Expr`] is an immutable node in a rooted tree. Children are held behind [`Rc`], so a
//! transformation that leaves a subtree unchanged shares it with the old tree instead of copying
//! it. Cycles are impossible by construction: every node is built bottom-up from already-built
//! children.
//!
//! Nodes are created through the [`builder`] module, never directly; the builder is also what
//! gives the parser's command stream a uniform way to construct any node by name.
//!
//! The [`PartialEq`] implementation is structural equality, child order included. The
//! simplification pipeline relies on this both for its fixed-point check and for combining like
//! terms.

pub mod builder;
pub mod visit;

use calcterm_parser::parser::op::Precedence;
use crate::number::Number;
use std::cmp::Ordering;
use std::rc::Rc;

/// The sign attached to one term of an [`Expr::Add`].
///
/// The sign vector is the only place additive sign is represented, outside an explicit
/// [`Expr::Neg`] produced by the parser for unary minus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Returns the opposite sign.
    pub fn flip(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    /// Combines two signs multiplicatively.
    pub fn times(self, other: Self) -> Self {
        if self == other {
            Self::Plus
        } else {
            Self::Minus
        }
    }

    pub fn is_minus(self) -> bool {
        self == Self::Minus
    }
}

/// A node in the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A number literal. Always a leaf.
    Literal(Number),

    /// A named node: a free variable (`args` empty), a named constant, or a function
    /// application.
    Symbol { name: String, args: Vec<Rc<Expr>> },

    /// Two or more terms with a parallel sign vector of the same length.
    /// `Add([a, b, c], [+, -, +])` means `a - b + c`.
    Add { terms: Vec<Rc<Expr>>, signs: Vec<Sign> },

    /// Two or more factors.
    Mul(Vec<Rc<Expr>>),

    /// A numerator over a denominator.
    Div(Rc<Expr>, Rc<Expr>),

    /// Remainder of truncated division.
    Mod(Rc<Expr>, Rc<Expr>),

    /// A base raised to an exponent.
    Pow(Rc<Expr>, Rc<Expr>),

    /// Unary minus, as written in the source.
    Neg(Rc<Expr>),

    /// Postfix factorial.
    Factorial(Rc<Expr>),
}

impl Expr {
    /// If the expression is a literal, returns the contained number.
    pub fn as_literal(&self) -> Option<&Number> {
        match self {
            Self::Literal(n) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a zero-argument symbol, returns its name.
    pub fn as_free_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol { name, args } if args.is_empty() => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is the symbolic imaginary unit.
    pub fn is_imaginary_unit(&self) -> bool {
        self.as_free_symbol() == Some("i")
    }

    /// Returns true if the expression is a literal with the given small integer value.
    pub fn is_literal_int(&self, value: i32) -> bool {
        self.as_literal()
            .map(|n| n == &Number::from(value))
            .unwrap_or(false)
    }

    /// Returns the precedence of the operator this expression renders as, or [`None`] for an
    /// atom that never needs parentheses.
    ///
    /// A literal is usually an atom, but a negative real renders with a leading `-` and a
    /// non-real literal renders as a sum, so those report the corresponding operator precedence.
    pub fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Literal(n) => {
                if n.is_negative_real() {
                    Some(Precedence::Neg)
                } else if !n.is_real() {
                    if n.real().is_zero() {
                        Some(Precedence::Factor)
                    } else {
                        Some(Precedence::Term)
                    }
                } else {
                    None
                }
            }
            Self::Symbol { .. } => None,
            Self::Add { .. } => Some(Precedence::Term),
            Self::Mul(_) | Self::Div(..) | Self::Mod(..) => Some(Precedence::Factor),
            Self::Neg(_) => Some(Precedence::Neg),
            Self::Pow(..) => Some(Precedence::Exp),
            Self::Factorial(_) => Some(Precedence::Factorial),
        }
    }

    /// Compares the precedence of two expressions, treating atoms as binding tighter than any
    /// operator. Used to decide where parentheses are needed when rendering.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        }
    }
}
