//! Partial evaluation of all-literal subtrees.

use crate::expr::{builder, visit::Restructurer, Expr, Sign};
use crate::number::Number;
use std::rc::Rc;

/// Folds any node whose children are all literals, using only exact operations. Division with a
/// remainder, fractional powers, and anything else without an exact result is left alone.
pub struct NumberReducerBasic;

/// If every child is a literal, returns the contained numbers.
fn all_literals(children: &[Rc<Expr>]) -> Option<Vec<&Number>> {
    children.iter().map(|child| child.as_literal()).collect()
}

impl Restructurer for NumberReducerBasic {
    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        if let Some(values) = all_literals(&children) {
            let mut sum = Number::zero();
            for (value, sign) in values.into_iter().zip(signs) {
                sum = if sign.is_minus() {
                    sum.sub(value)
                } else {
                    sum.add(value)
                };
            }
            return builder::literal(sum);
        }
        builder::add_signed(children, signs.to_vec())
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if let Some(values) = all_literals(&children) {
            let mut result = Number::from(1);
            for value in values {
                result = result.mul(value);
            }
            return builder::literal(result);
        }
        builder::multiply_all(children)
    }

    fn divide(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        if let (Some(a), Some(b)) = (top.as_literal(), bottom.as_literal()) {
            if let Some(result) = a.div_exact(b) {
                return builder::literal(result);
            }
        }
        builder::divide(top, bottom)
    }

    fn modulus(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        if let (Some(a), Some(b)) = (top.as_literal(), bottom.as_literal()) {
            if let Some(result) = a.checked_mod(b) {
                return builder::literal(result);
            }
        }
        builder::modulus(top, bottom)
    }

    fn power(&mut self, base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
        if let (Some(a), Some(b)) = (base.as_literal(), exponent.as_literal()) {
            if let Some(result) = a.pow_exact(b) {
                return builder::literal(result);
            }
        }
        builder::power(base, exponent)
    }

    fn negate(&mut self, operand: Rc<Expr>) -> Rc<Expr> {
        if let Some(n) = operand.as_literal() {
            return builder::literal(n.negate());
        }
        builder::negate(operand)
    }

    fn factorial(&mut self, operand: Rc<Expr>) -> Rc<Expr> {
        if let Some(result) = operand.as_literal().and_then(Number::checked_factorial) {
            return builder::literal(result);
        }
        builder::factorial(operand)
    }
}
