//! Passes that keep the imaginary unit symbolic and in canonical position.
//!
//! The algebraic layer only works with real literals; a complex value is always represented as a
//! sum of a real part and a literal multiple of the symbol `i`. [`ComplexSplitter`] establishes
//! that form, [`ComplexNormalizer`] maintains it through products and sums, and
//! [`ComplexExpander`] distributes products over sums so the other two have something to gather.

use crate::expr::{builder, visit::Restructurer, Expr, Sign};
use crate::number::Number;
use rug::{ops::RemRounding, Integer};
use std::rc::Rc;
use super::{order_factors, product};

/// Replaces any non-real literal `a+bi` with `a + b*i`, keeping `i` symbolic so the other passes
/// can treat it like any other factor.
///
/// Minimal forms are produced directly: a pure-imaginary literal becomes `b*i` (or `i` / `-i`
/// for unit coefficients) rather than an addition with a zero term, because this pass also runs
/// after the identity rules in the driver's closing sequence.
pub struct ComplexSplitter;

impl Restructurer for ComplexSplitter {
    fn literal(&mut self, n: &Number) -> Rc<Expr> {
        if n.is_real() {
            return builder::literal(n.clone());
        }

        let real = n.real_part();
        let imag = n.imaginary_part();
        let (sign, magnitude) = if imag.is_negative_real() {
            (Sign::Minus, imag.negate())
        } else {
            (Sign::Plus, imag)
        };

        let imag_term = if magnitude.is_one() {
            builder::symbol("i")
        } else {
            builder::multiply(builder::literal(magnitude), builder::symbol("i"))
        };

        if real.is_zero() {
            return match sign {
                Sign::Plus => imag_term,
                Sign::Minus => builder::negate(imag_term),
            };
        }

        builder::add_signed(
            vec![builder::literal(real), imag_term],
            vec![Sign::Plus, sign],
        )
    }
}

/// Splits a factor into its base and literal exponent. A factor that is not a power, or whose
/// exponent is not a literal, counts as raised to the first power.
fn base_and_exponent(expr: &Rc<Expr>) -> (Rc<Expr>, Number) {
    if let Expr::Pow(base, exponent) = &**expr {
        if let Some(n) = exponent.as_literal() {
            return (Rc::clone(base), n.clone());
        }
    }
    (Rc::clone(expr), Number::from(1))
}

/// Combines structurally equal factors into powers: `x*x` becomes `x^2` and `x^2*x` becomes
/// `x^3`. Literal bases are left for `GCDLiteral` to fold numerically.
fn combine_like_factors(factors: &mut Vec<Rc<Expr>>) {
    let mut idx = 0;
    while idx < factors.len() {
        let (base, mut exponent) = base_and_exponent(&factors[idx]);
        if matches!(&*base, Expr::Literal(_)) {
            idx += 1;
            continue;
        }

        let mut combined = false;
        let mut next = idx + 1;
        while next < factors.len() {
            let (other_base, other_exponent) = base_and_exponent(&factors[next]);
            if base == other_base {
                exponent = exponent.add(&other_exponent);
                factors.remove(next);
                combined = true;
            } else {
                next += 1;
            }
        }

        if combined {
            factors[idx] = if exponent.is_one() {
                base
            } else {
                builder::power(base, builder::literal(exponent))
            };
        }
        idx += 1;
    }
}

/// Multiplies the first literal factor by `n`, or inserts `n` as a new leading factor if there
/// is none.
fn merge_literal_factor(factors: &mut Vec<Rc<Expr>>, n: &Number) {
    for factor in factors.iter_mut() {
        if let Expr::Literal(value) = &**factor {
            *factor = builder::literal(value.mul(n));
            return;
        }
    }
    factors.insert(0, builder::literal(n.clone()));
}

/// The coefficient and symbolic part of one term of an addition. A term with no symbolic part
/// reports a [`None`] key.
fn coefficient_of(expr: &Rc<Expr>) -> (Number, Option<Rc<Expr>>) {
    match &**expr {
        Expr::Literal(n) => (n.clone(), None),
        Expr::Neg(inner) => {
            let (coeff, key) = coefficient_of(inner);
            (coeff.negate(), key)
        }
        Expr::Mul(factors) => {
            let mut coeff = Number::from(1);
            let mut rest = Vec::new();
            for factor in factors {
                if let Expr::Literal(n) = &**factor {
                    coeff = coeff.mul(n);
                } else {
                    rest.push(Rc::clone(factor));
                }
            }
            if rest.is_empty() {
                (coeff, None)
            } else {
                (coeff, Some(product(rest)))
            }
        }
        _ => (Number::from(1), Some(Rc::clone(expr))),
    }
}

/// Splits a real coefficient into a sign for the sign vector and a non-negative magnitude.
/// Complex coefficients keep their sign.
fn signed_magnitude(coeff: Number) -> (Sign, Number) {
    if coeff.is_negative_real() {
        (Sign::Minus, coeff.negate())
    } else {
        (Sign::Plus, coeff)
    }
}

/// Multiplies a magnitude back onto a term's symbolic part.
fn apply_coefficient(magnitude: Number, key: Rc<Expr>) -> Rc<Expr> {
    if magnitude.is_one() {
        return key;
    }
    let mut factors = vec![builder::literal(magnitude)];
    if let Expr::Mul(inner) = &*key {
        factors.extend(inner.iter().cloned());
    } else {
        factors.push(key);
    }
    builder::multiply_all(factors)
}

/// Canonicalizes sums and products that involve the imaginary unit (and, by the same machinery,
/// any other symbolic part).
///
/// In a product, repeated factors are folded into powers and the imaginary units are reduced
/// through the four-cycle of `i`, merging a `-1` into the literal coefficient where needed. In a
/// sum, terms with the same symbolic part are gathered by summing their literal coefficients, so
/// the real and imaginary parts of a complex sum end up as two terms. Both rewrites order their
/// children deterministically.
pub struct ComplexNormalizer;

impl Restructurer for ComplexNormalizer {
    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        let mut imaginary_units = 0usize;
        let mut factors: Vec<Rc<Expr>> = Vec::new();
        for child in children {
            if child.is_imaginary_unit() {
                imaginary_units += 1;
            } else {
                factors.push(child);
            }
        }

        combine_like_factors(&mut factors);

        // i^k cycles with period four
        let mut negate_coefficient = false;
        match imaginary_units % 4 {
            0 => {}
            1 => factors.push(builder::symbol("i")),
            2 => negate_coefficient = true,
            _ => {
                negate_coefficient = true;
                factors.push(builder::symbol("i"));
            }
        }
        if negate_coefficient {
            merge_literal_factor(&mut factors, &Number::from(-1));
        }

        order_factors(&mut factors);
        product(factors)
    }

    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        struct Group {
            key: Option<Rc<Expr>>,
            coeff: Number,
        }

        let mut groups: Vec<Group> = Vec::new();
        for (child, sign) in children.into_iter().zip(signs) {
            let (mut coeff, key) = coefficient_of(&child);
            if sign.is_minus() {
                coeff = coeff.negate();
            }
            if let Some(group) = groups.iter_mut().find(|group| group.key == key) {
                group.coeff = group.coeff.add(&coeff);
            } else {
                groups.push(Group { key, coeff });
            }
        }

        // the gathered literal term goes last
        groups.sort_by_key(|group| group.key.is_none());

        let mut terms = Vec::new();
        let mut out_signs = Vec::new();
        for Group { key, coeff } in groups {
            if coeff.is_zero() {
                continue;
            }
            let (sign, magnitude) = signed_magnitude(coeff);
            match key {
                None => terms.push(builder::literal(magnitude)),
                Some(key) => terms.push(apply_coefficient(magnitude, key)),
            }
            out_signs.push(sign);
        }

        if terms.is_empty() {
            return builder::literal(Number::zero());
        }
        builder::add_signed(terms, out_signs)
    }

    fn power(&mut self, base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
        if base.is_imaginary_unit() {
            if let Some(k) = exponent.as_literal().and_then(Number::as_integer) {
                let cycle = k.rem_euc(Integer::from(4)).to_u32().unwrap_or(0);
                return match cycle {
                    0 => builder::literal(Number::from(1)),
                    1 => builder::symbol("i"),
                    2 => builder::literal(Number::from(-1)),
                    _ => builder::negate(builder::symbol("i")),
                };
            }
        }
        builder::power(base, exponent)
    }
}

/// Distributes products over sums: `(a+b)*c` becomes `a*c+b*c`, and a small literal power of a
/// sum is expanded the same way. The expansion is the cartesian product of the terms of every
/// sum factor, with the sign vectors multiplied through, so one application expands the node
/// completely.
pub struct ComplexExpander;

/// The largest literal exponent that is expanded into a product of sums.
const MAX_EXPANSION_POWER: u32 = 16;

fn expand_product(children: Vec<Rc<Expr>>) -> Rc<Expr> {
    let mut products: Vec<(Sign, Vec<Rc<Expr>>)> = vec![(Sign::Plus, Vec::new())];
    for child in children {
        if let Expr::Add { terms, signs } = &*child {
            let mut next = Vec::with_capacity(products.len() * terms.len());
            for (sign, factors) in &products {
                for (term, term_sign) in terms.iter().zip(signs) {
                    let mut expanded = factors.clone();
                    expanded.push(Rc::clone(term));
                    next.push((sign.times(*term_sign), expanded));
                }
            }
            products = next;
        } else {
            for (_, factors) in &mut products {
                factors.push(Rc::clone(&child));
            }
        }
    }

    let mut terms = Vec::with_capacity(products.len());
    let mut signs = Vec::with_capacity(products.len());
    for (sign, factors) in products {
        terms.push(product(factors));
        signs.push(sign);
    }
    builder::add_signed(terms, signs)
}

impl Restructurer for ComplexExpander {
    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if children.iter().any(|child| matches!(&**child, Expr::Add { .. })) {
            expand_product(children)
        } else {
            builder::multiply_all(children)
        }
    }

    fn power(&mut self, base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
        if matches!(&*base, Expr::Add { .. }) {
            if let Some(k) = exponent
                .as_literal()
                .and_then(Number::as_integer)
                .and_then(|k| k.to_u32())
            {
                if (2..=MAX_EXPANSION_POWER).contains(&k) {
                    return expand_product(vec![base; k as usize]);
                }
            }
        }
        builder::power(base, exponent)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::complex;
    use pretty_assertions::assert_eq;
    use super::*;

    fn lit(n: i32) -> Rc<Expr> {
        builder::literal(Number::from(n))
    }

    #[test]
    fn splitter_rewrites_complex_literals() {
        let mut pass = ComplexSplitter;

        let three_plus_two_i = builder::literal(Number::from_complex(complex((3, 2))));
        assert_eq!(
            pass.visit(&three_plus_two_i),
            builder::add_signed(
                vec![lit(3), builder::multiply(lit(2), builder::symbol("i"))],
                vec![Sign::Plus, Sign::Plus],
            ),
        );

        let minus_i = builder::literal(Number::from_complex(complex((0, -1))));
        assert_eq!(pass.visit(&minus_i), builder::negate(builder::symbol("i")));

        let real = builder::literal(Number::from(5));
        assert_eq!(pass.visit(&real), real);
    }

    #[test]
    fn normalizer_reduces_i_squared() {
        let product = builder::multiply(builder::symbol("i"), builder::symbol("i"));
        assert_eq!(ComplexNormalizer.visit(&product), lit(-1));
    }

    #[test]
    fn normalizer_folds_i_powers() {
        let cases = [(4, lit(1)), (2, lit(-1))];
        for (exp, expected) in cases {
            let power = builder::power(builder::symbol("i"), lit(exp));
            assert_eq!(ComplexNormalizer.visit(&power), expected);
        }
        let i_cubed = builder::power(builder::symbol("i"), lit(3));
        assert_eq!(
            ComplexNormalizer.visit(&i_cubed),
            builder::negate(builder::symbol("i")),
        );
    }

    #[test]
    fn normalizer_combines_like_factors_into_powers() {
        let squared = builder::multiply(builder::symbol("x"), builder::symbol("x"));
        assert_eq!(
            ComplexNormalizer.visit(&squared),
            builder::power(builder::symbol("x"), lit(2)),
        );
    }

    #[test]
    fn normalizer_gathers_like_terms() {
        // x + x -> 2*x
        let sum = builder::add(builder::symbol("x"), builder::symbol("x"));
        assert_eq!(
            ComplexNormalizer.visit(&sum),
            builder::add_signed(
                vec![builder::multiply(lit(2), builder::symbol("x"))],
                vec![Sign::Plus],
            ),
        );
    }

    #[test]
    fn normalizer_cancels_terms() {
        // x - x -> 0
        let sum = builder::subtract(builder::symbol("x"), builder::symbol("x"));
        assert_eq!(ComplexNormalizer.visit(&sum), lit(0));
    }

    #[test]
    fn expander_distributes() {
        // (x+1)*y -> x*y + 1*y
        let expr = builder::multiply(
            builder::add(builder::symbol("x"), lit(1)),
            builder::symbol("y"),
        );
        assert_eq!(
            ComplexExpander.visit(&expr),
            builder::add(
                builder::multiply(builder::symbol("x"), builder::symbol("y")),
                builder::multiply(lit(1), builder::symbol("y")),
            ),
        );
    }

    #[test]
    fn expander_expands_literal_powers_of_sums() {
        // (x+1)^2 -> x*x + x*1 + 1*x + 1*1
        let expr = builder::power(builder::add(builder::symbol("x"), lit(1)), lit(2));
        let expanded = ComplexExpander.visit(&expr);
        let Expr::Add { terms, .. } = &*expanded else {
            panic!("expected an expanded sum");
        };
        assert_eq!(terms.len(), 4);
    }
}
