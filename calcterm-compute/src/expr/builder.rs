//! The sole factory for expression nodes.
//!
//! The builder exposes two layers. The algebraic layer (`add`, `multiply`, `divide`, ...)
//! constructs nodes directly. The symbolic layer ([`call`]) dispatches on a name: the eight
//! reserved names (`+`, `-`, `*`, `/`, `%`, `^`, `!`, `ng`) construct the corresponding
//! algebraic node, and any other name constructs a [`Expr::Symbol`]. This dispatch is what lets
//! [`build`] execute every parser command uniformly.
//!
//! The builder performs no simplification; rewrite passes own all of that.

use ariadne::{Label, Report, ReportKind};
use calcterm_error::{Error, ErrorKind, EXPR};
use calcterm_parser::parser::command::{Command, NodeType};
use crate::number::Number;
use std::ops::Range;
use std::rc::Rc;
use super::{Expr, Sign};

/// Creates a literal node.
pub fn literal(n: Number) -> Rc<Expr> {
    Rc::new(Expr::Literal(n))
}

/// Creates a free-variable or named-constant symbol.
pub fn symbol(name: impl Into<String>) -> Rc<Expr> {
    Rc::new(Expr::Symbol {
        name: name.into(),
        args: Vec::new(),
    })
}

/// Creates a symbol with arguments, i.e. a function application.
pub fn symbol_call(name: impl Into<String>, args: Vec<Rc<Expr>>) -> Rc<Expr> {
    Rc::new(Expr::Symbol {
        name: name.into(),
        args,
    })
}

/// Creates an addition of two terms.
pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
    add_all(vec![lhs, rhs])
}

/// Creates an addition with all-positive signs.
pub fn add_all(terms: Vec<Rc<Expr>>) -> Rc<Expr> {
    let signs = vec![Sign::Plus; terms.len()];
    add_signed(terms, signs)
}

/// Creates an addition with the given sign vector. The vector is stored as provided.
///
/// # Panics
///
/// Panics if the sign vector's length differs from the number of terms.
pub fn add_signed(terms: Vec<Rc<Expr>>, signs: Vec<Sign>) -> Rc<Expr> {
    assert_eq!(
        terms.len(),
        signs.len(),
        "every term of an addition carries exactly one sign",
    );
    Rc::new(Expr::Add { terms, signs })
}

/// Creates a subtraction, represented as an addition with a `[+, -]` sign vector.
pub fn subtract(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
    add_signed(vec![lhs, rhs], vec![Sign::Plus, Sign::Minus])
}

/// Creates a unary negation.
pub fn negate(operand: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Neg(operand))
}

/// Creates a multiplication of two factors.
pub fn multiply(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
    multiply_all(vec![lhs, rhs])
}

/// Creates a multiplication from a list of factors.
pub fn multiply_all(factors: Vec<Rc<Expr>>) -> Rc<Expr> {
    Rc::new(Expr::Mul(factors))
}

/// Creates a division.
pub fn divide(top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Div(top, bottom))
}

/// Creates a modulus.
pub fn modulus(top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Mod(top, bottom))
}

/// Creates an exponentiation.
pub fn power(base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Pow(base, exponent))
}

/// Creates a factorial.
pub fn factorial(operand: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Factorial(operand))
}

/// Constructs a node by name. The reserved operator names construct algebraic nodes and reject
/// the wrong number of children; any other name constructs a symbol with the children as its
/// arguments.
pub fn call(name: &str, mut children: Vec<Rc<Expr>>) -> Option<Rc<Expr>> {
    match name {
        "+" => (children.len() >= 2).then(|| add_all(children)),
        "-" => (children.len() == 2).then(|| {
            let rhs = children.pop().unwrap();
            let lhs = children.pop().unwrap();
            subtract(lhs, rhs)
        }),
        "*" => (children.len() >= 2).then(|| multiply_all(children)),
        "/" | "%" | "^" => (children.len() == 2).then(|| {
            let rhs = children.pop().unwrap();
            let lhs = children.pop().unwrap();
            match name {
                "/" => divide(lhs, rhs),
                "%" => modulus(lhs, rhs),
                _ => power(lhs, rhs),
            }
        }),
        "!" => (children.len() == 1).then(|| factorial(children.pop().unwrap())),
        "ng" => (children.len() == 1).then(|| negate(children.pop().unwrap())),
        _ => Some(symbol_call(name, children)),
    }
}

/// A numeric literal in the source could not be converted into a [`Number`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidLiteral;

impl ErrorKind for InvalidLiteral {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        Report::build(ReportKind::Error, src_id, spans.first().map_or(0, |s| s.start))
            .with_message("invalid numeric literal")
            .with_labels(spans.iter().map(|span| {
                Label::new((src_id, span.clone()))
                    .with_color(EXPR)
                    .with_message("this literal cannot be represented as a number")
            }))
            .finish()
    }
}

/// The command stream did not fold into exactly one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedCommands;

impl ErrorKind for MalformedCommands {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        Report::build(ReportKind::Error, src_id, spans.first().map_or(0, |s| s.start))
            .with_message("malformed expression")
            .with_labels(spans.iter().map(|span| {
                Label::new((src_id, span.clone()))
                    .with_color(EXPR)
                    .with_message("while building this part of the expression")
            }))
            .finish()
    }
}

/// Folds a reverse-Polish command stream into an expression tree.
///
/// A stack of expressions is maintained. A literal command parses its text as a [`Number`] and
/// pushes a literal node; a symbol command pops its arity in children (last popped becomes the
/// leftmost child, restoring source order) and pushes the builder's construction for its name.
/// At the end the stack must contain exactly one value.
pub fn build(commands: &[Command]) -> Result<Rc<Expr>, Error> {
    let mut stack: Vec<Rc<Expr>> = Vec::new();

    for command in commands {
        match command.node_type {
            NodeType::Literal => {
                let n = Number::parse(&command.name)
                    .ok_or_else(|| Error::new(vec![command.span.clone()], InvalidLiteral))?;
                stack.push(literal(n));
            }
            NodeType::Symbol => {
                if stack.len() < command.arity {
                    return Err(Error::new(vec![command.span.clone()], MalformedCommands));
                }
                let children = stack.split_off(stack.len() - command.arity);
                let node = call(&command.name, children)
                    .ok_or_else(|| Error::new(vec![command.span.clone()], MalformedCommands))?;
                stack.push(node);
            }
        }
    }

    if stack.len() == 1 {
        Ok(stack.pop().unwrap())
    } else {
        let span = commands.last().map_or(0..0, |c| c.span.clone());
        Err(Error::new(vec![span], MalformedCommands))
    }
}

#[cfg(test)]
mod tests {
    use calcterm_parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Rc<Expr> {
        build(&Parser::new(input).unwrap().parse().unwrap()).unwrap()
    }

    #[test]
    fn binary_operators_build_their_nodes() {
        assert_eq!(
            parse("1+2"),
            add(literal(Number::from(1)), literal(Number::from(2))),
        );
        assert_eq!(
            parse("1-2"),
            subtract(literal(Number::from(1)), literal(Number::from(2))),
        );
        assert_eq!(
            parse("x/2"),
            divide(symbol("x"), literal(Number::from(2))),
        );
        assert_eq!(
            parse("x^2"),
            power(symbol("x"), literal(Number::from(2))),
        );
    }

    #[test]
    fn subtraction_is_a_signed_addition() {
        let expr = parse("1-2");
        let Expr::Add { signs, .. } = &*expr else {
            panic!("expected an addition");
        };
        assert_eq!(signs, &[Sign::Plus, Sign::Minus]);
    }

    #[test]
    fn unary_minus_builds_neg() {
        assert_eq!(parse("--x"), negate(negate(symbol("x"))));
    }

    #[test]
    fn children_appear_in_source_order() {
        assert_eq!(
            parse("f(a,b,c)"),
            symbol_call("f", vec![symbol("a"), symbol("b"), symbol("c")]),
        );
    }

    #[test]
    fn nested_precedence() {
        assert_eq!(
            parse("1+2*3"),
            add(
                literal(Number::from(1)),
                multiply(literal(Number::from(2)), literal(Number::from(3))),
            ),
        );
    }

    #[test]
    fn reserved_names_reject_wrong_arity() {
        assert!(call("ng", vec![symbol("x"), symbol("y")]).is_none());
        assert!(call("/", vec![symbol("x")]).is_none());
        assert!(call("+", vec![symbol("x")]).is_none());
    }

    #[test]
    fn parentheses_do_not_survive_into_the_tree() {
        assert_eq!(parse("(x)"), symbol("x"));
        assert_eq!(parse("(1+2)"), parse("1+2"));
    }
}
