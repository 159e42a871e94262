//! Passes that normalize fractions and fold literal arithmetic.

use crate::expr::{builder, visit::Restructurer, Expr, Sign};
use crate::number::Number;
use std::cmp::Ordering;
use std::rc::Rc;
use super::{order_factors, product};

/// If the expression is a division, returns its numerator and denominator.
fn as_division(expr: &Rc<Expr>) -> Option<(Rc<Expr>, Rc<Expr>)> {
    if let Expr::Div(top, bottom) = &**expr {
        Some((Rc::clone(top), Rc::clone(bottom)))
    } else {
        None
    }
}

/// Rewrites nested fractions into a single division at the top:
///
/// - `(a/b) / (c/d)` becomes `(a*d) / (b*c)`
/// - `(a/b) / c` becomes `a / (b*c)`
/// - `a / (c/d)` becomes `(a*d) / c`
/// - a product with division factors becomes one division of products
pub struct Rationalizer;

impl Restructurer for Rationalizer {
    fn divide(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        match (as_division(&top), as_division(&bottom)) {
            (Some((a, b)), Some((c, d))) => {
                builder::divide(builder::multiply(a, d), builder::multiply(b, c))
            }
            (Some((a, b)), None) => builder::divide(a, builder::multiply(b, bottom)),
            (None, Some((c, d))) => builder::divide(builder::multiply(top, d), c),
            (None, None) => builder::divide(top, bottom),
        }
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        let mut numerators = Vec::new();
        let mut denominators = Vec::new();
        for child in children {
            match as_division(&child) {
                Some((top, bottom)) => {
                    numerators.push(top);
                    denominators.push(bottom);
                }
                None => numerators.push(child),
            }
        }

        if denominators.is_empty() {
            builder::multiply_all(numerators)
        } else {
            builder::divide(product(numerators), product(denominators))
        }
    }
}

/// Folds the literal children of additions and multiplications into a single canonical literal,
/// and reduces literal fractions by their greatest common divisor.
pub struct GCDLiteral;

impl Restructurer for GCDLiteral {
    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        let literal_count = children
            .iter()
            .filter(|child| child.as_literal().is_some())
            .count();
        if literal_count < 2 {
            return builder::add_signed(children, signs.to_vec());
        }

        let mut sum = Number::zero();
        let mut terms = Vec::new();
        let mut out_signs = Vec::new();
        for (child, sign) in children.into_iter().zip(signs) {
            match child.as_literal() {
                Some(n) => {
                    let value = if sign.is_minus() { n.negate() } else { n.clone() };
                    sum = sum.add(&value);
                }
                None => {
                    terms.push(child);
                    out_signs.push(*sign);
                }
            }
        }

        if terms.is_empty() {
            return builder::literal(sum);
        }

        let (sign, magnitude) = if sum.is_negative_real() {
            (Sign::Minus, sum.negate())
        } else {
            (Sign::Plus, sum)
        };
        terms.push(builder::literal(magnitude));
        out_signs.push(sign);
        builder::add_signed(terms, out_signs)
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        let literal_count = children
            .iter()
            .filter(|child| child.as_literal().is_some())
            .count();

        let mut factors;
        if literal_count >= 2 {
            let mut folded = Number::from(1);
            factors = Vec::with_capacity(children.len() - literal_count + 1);
            for child in children {
                match child.as_literal() {
                    Some(n) => folded = folded.mul(n),
                    None => factors.push(child),
                }
            }
            if factors.is_empty() {
                return builder::literal(folded);
            }
            factors.push(builder::literal(folded));
        } else {
            factors = children;
        }

        order_factors(&mut factors);
        builder::multiply_all(factors)
    }

    fn divide(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        let integers = top
            .as_literal()
            .and_then(Number::as_integer)
            .zip(bottom.as_literal().and_then(Number::as_integer));

        if let Some((mut a, mut b)) = integers {
            if !b.is_zero() {
                // keep the denominator positive
                if b.cmp0() == Ordering::Less {
                    a = -a;
                    b = -b;
                }
                let divisor = a.clone().gcd(&b);
                if divisor != 1 {
                    a /= &divisor;
                    b /= &divisor;
                }
                return builder::divide(
                    builder::literal(Number::from(a)),
                    builder::literal(Number::from(b)),
                );
            }
        }

        builder::divide(top, bottom)
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
    fn nested_fractions_collapse() {
        // a / (b/c) -> (a*c) / b
        let expr = builder::divide(
            builder::symbol("a"),
            builder::divide(builder::symbol("b"), builder::symbol("c")),
        );
        assert_eq!(
            Rationalizer.visit(&expr),
            builder::divide(
                builder::multiply(builder::symbol("a"), builder::symbol("c")),
                builder::symbol("b"),
            ),
        );
    }

    #[test]
    fn products_of_fractions_become_one_fraction() {
        // a * (b/c) -> (a*b) / c
        let expr = builder::multiply(
            builder::symbol("a"),
            builder::divide(builder::symbol("b"), builder::symbol("c")),
        );
        assert_eq!(
            Rationalizer.visit(&expr),
            builder::divide(
                builder::multiply(builder::symbol("a"), builder::symbol("b")),
                builder::symbol("c"),
            ),
        );
    }

    #[test]
    fn literal_fractions_reduce_by_gcd() {
        let expr = builder::divide(lit(6), lit(8));
        assert_eq!(
            GCDLiteral.visit(&expr),
            builder::divide(lit(3), lit(4)),
        );
    }

    #[test]
    fn negative_denominators_are_normalized() {
        let expr = builder::divide(lit(6), lit(-8));
        assert_eq!(
            GCDLiteral.visit(&expr),
            builder::divide(lit(-3), lit(4)),
        );
    }

    #[test]
    fn literals_fold_in_sums_and_products() {
        let sum = builder::add_signed(
            vec![builder::symbol("x"), lit(2), lit(5)],
            vec![Sign::Plus, Sign::Plus, Sign::Minus],
        );
        assert_eq!(
            GCDLiteral.visit(&sum),
            builder::add_signed(
                vec![builder::symbol("x"), lit(3)],
                vec![Sign::Plus, Sign::Minus],
            ),
        );

        let product = builder::multiply_all(vec![lit(3), builder::symbol("x"), lit(4)]);
        assert_eq!(
            GCDLiteral.visit(&product),
            builder::multiply_all(vec![lit(12), builder::symbol("x")]),
        );
    }

    #[test]
    fn division_by_zero_is_left_alone() {
        let expr = builder::divide(lit(6), lit(0));
        assert_eq!(GCDLiteral.visit(&expr), expr);
    }
}
