//! First-order algebraic identities.

use crate::expr::{builder, visit::Restructurer, Expr, Sign};
use crate::number::Number;
use std::rc::Rc;

/// Applies the identity rules `x+0=x`, `x*1=x`, `x*0=0`, `x^0=1`, `x^1=x`, `0^x=0` (for a
/// provably nonzero exponent), and `1^x=1`.
pub struct FirstOrderBasic;

fn is_literal_zero(expr: &Expr) -> bool {
    expr.as_literal().map(Number::is_zero).unwrap_or(false)
}

fn is_literal_one(expr: &Expr) -> bool {
    expr.as_literal().map(Number::is_one).unwrap_or(false)
}

impl Restructurer for FirstOrderBasic {
    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        if !children.iter().any(|child| is_literal_zero(child)) {
            return builder::add_signed(children, signs.to_vec());
        }

        let mut terms = Vec::new();
        let mut out_signs = Vec::new();
        for (child, sign) in children.into_iter().zip(signs) {
            if !is_literal_zero(&child) {
                terms.push(child);
                out_signs.push(*sign);
            }
        }

        if terms.is_empty() {
            return builder::literal(Number::zero());
        }
        builder::add_signed(terms, out_signs)
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if children.iter().any(|child| is_literal_zero(child)) {
            return builder::literal(Number::zero());
        }
        if !children.iter().any(|child| is_literal_one(child)) {
            return builder::multiply_all(children);
        }

        let factors: Vec<_> = children
            .into_iter()
            .filter(|child| !is_literal_one(child))
            .collect();
        if factors.is_empty() {
            return builder::literal(Number::from(1));
        }
        builder::multiply_all(factors)
    }

    fn power(&mut self, base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
        if is_literal_zero(&exponent) {
            return builder::literal(Number::from(1));
        }
        if is_literal_one(&exponent) {
            return base;
        }
        if is_literal_one(&base) {
            return builder::literal(Number::from(1));
        }
        if is_literal_zero(&base) {
            // only fold when the exponent is provably nonzero (and positive, so the result
            // exists at all)
            if exponent
                .as_literal()
                .map(Number::is_positive_real)
                .unwrap_or(false)
            {
                return builder::literal(Number::zero());
            }
        }
        builder::power(base, exponent)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn lit(n: i32) -> Rc<Expr> {
        builder::literal(Number::from(n))
    }

    #[test]
    fn additive_identity() {
        let expr = builder::add(builder::symbol("x"), lit(0));
        assert_eq!(
            FirstOrderBasic.visit(&expr),
            builder::add_signed(vec![builder::symbol("x")], vec![Sign::Plus]),
        );
    }

    #[test]
    fn multiplicative_identities() {
        let times_one = builder::multiply(builder::symbol("x"), lit(1));
        assert_eq!(
            FirstOrderBasic.visit(&times_one),
            builder::multiply_all(vec![builder::symbol("x")]),
        );

        let times_zero = builder::multiply(builder::symbol("x"), lit(0));
        assert_eq!(FirstOrderBasic.visit(&times_zero), lit(0));
    }

    #[test]
    fn power_identities() {
        let x = builder::symbol;
        assert_eq!(FirstOrderBasic.visit(&builder::power(x("x"), lit(0))), lit(1));
        assert_eq!(FirstOrderBasic.visit(&builder::power(x("x"), lit(1))), x("x"));
        assert_eq!(FirstOrderBasic.visit(&builder::power(lit(1), x("x"))), lit(1));
        assert_eq!(FirstOrderBasic.visit(&builder::power(lit(0), lit(3))), lit(0));
        // zero base with a symbolic exponent is left alone
        let zero_pow = builder::power(lit(0), x("x"));
        assert_eq!(FirstOrderBasic.visit(&zero_pow), zero_pow);
    }
}
