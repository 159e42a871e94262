//! Structural cleanup passes: collapsing trivial nodes, flattening nested associative
//! operators, and canonicalizing negation.

use crate::expr::{builder, visit::Restructurer, Expr, Sign};
use crate::number::Number;
use std::rc::Rc;
use super::product;

/// Collapses an addition or multiplication with a single child into that child. A single
/// minus-signed term becomes an explicit negation.
pub struct SizeOneArray;

impl Restructurer for SizeOneArray {
    fn add(&mut self, mut children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        match children.len() {
            0 => builder::literal(Number::zero()),
            1 => {
                let child = children.pop().unwrap();
                if signs[0].is_minus() {
                    builder::negate(child)
                } else {
                    child
                }
            }
            _ => builder::add_signed(children, signs.to_vec()),
        }
    }

    fn multiply(&mut self, mut children: Vec<Rc<Expr>>) -> Rc<Expr> {
        match children.len() {
            0 => builder::literal(Number::from(1)),
            1 => children.pop().unwrap(),
            _ => builder::multiply_all(children),
        }
    }
}

/// Flattens associative operators: an addition nested in an addition is inlined with its signs
/// multiplied through, and a multiplication nested in a multiplication is inlined.
pub struct SelfNesting;

impl Restructurer for SelfNesting {
    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        if !children.iter().any(|child| matches!(&**child, Expr::Add { .. })) {
            return builder::add_signed(children, signs.to_vec());
        }

        let mut terms = Vec::new();
        let mut out_signs = Vec::new();
        for (child, sign) in children.into_iter().zip(signs) {
            if let Expr::Add { terms: inner, signs: inner_signs } = &*child {
                for (term, inner_sign) in inner.iter().zip(inner_signs) {
                    terms.push(Rc::clone(term));
                    out_signs.push(if sign.is_minus() {
                        inner_sign.flip()
                    } else {
                        *inner_sign
                    });
                }
            } else {
                terms.push(child);
                out_signs.push(*sign);
            }
        }
        builder::add_signed(terms, out_signs)
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if !children.iter().any(|child| matches!(&**child, Expr::Mul(_))) {
            return builder::multiply_all(children);
        }

        let mut factors = Vec::new();
        for child in children {
            if let Expr::Mul(inner) = &*child {
                factors.extend(inner.iter().cloned());
            } else {
                factors.push(child);
            }
        }
        builder::multiply_all(factors)
    }
}

/// Canonicalizes negation:
///
/// - `-(-x)` becomes `x`
/// - the negation of a literal becomes a negative literal
/// - the negation of a product with a literal factor negates that factor, and a `-1` factor
///   is hoisted back out as an explicit negation
/// - an addition whose signs are all negative becomes the negation of an all-positive addition
pub struct Negatives;

impl Restructurer for Negatives {
    fn negate(&mut self, operand: Rc<Expr>) -> Rc<Expr> {
        match &*operand {
            Expr::Neg(inner) => Rc::clone(inner),
            Expr::Literal(n) => builder::literal(n.negate()),
            Expr::Mul(factors) => {
                match factors.iter().position(|f| matches!(&**f, Expr::Literal(_))) {
                    Some(idx) => {
                        let mut negated = factors.clone();
                        let Expr::Literal(n) = &*negated[idx] else {
                            unreachable!();
                        };
                        negated[idx] = builder::literal(n.negate());
                        builder::multiply_all(negated)
                    }
                    None => builder::negate(Rc::clone(&operand)),
                }
            }
            _ => builder::negate(Rc::clone(&operand)),
        }
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if children.len() >= 2 {
            if let Some(idx) = children.iter().position(|child| child.is_literal_int(-1)) {
                let mut factors = children;
                factors.remove(idx);
                return builder::negate(product(factors));
            }
        }
        builder::multiply_all(children)
    }

    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        if !children.is_empty() && signs.iter().all(|sign| sign.is_minus()) {
            let count = children.len();
            return builder::negate(builder::add_signed(children, vec![Sign::Plus; count]));
        }
        builder::add_signed(children, signs.to_vec())
    }
}
