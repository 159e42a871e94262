//! Numeric evaluation of fully-numeric expression trees.

use crate::expr::{Expr, Sign};
use crate::number::Number;

/// Folds the expression to a single [`Number`], or returns [`None`] if it contains a free
/// symbol, a function application, or an operation with no defined numeric result (division by
/// zero, modulus of non-integers, factorial of non-integers, or anything non-finite).
///
/// The recognized constants are `i`, `pi`, and `e`.
pub fn evaluate(expr: &Expr) -> Option<Number> {
    let result = eval(expr)?;
    result.is_finite().then_some(result)
}

fn eval(expr: &Expr) -> Option<Number> {
    match expr {
        Expr::Literal(n) => Some(n.clone()),
        Expr::Symbol { name, args } if args.is_empty() => match name.as_str() {
            "i" => Some(Number::i()),
            "pi" => Some(Number::pi()),
            "e" => Some(Number::e()),
            _ => None,
        },
        Expr::Symbol { .. } => None,
        Expr::Add { terms, signs } => {
            let mut sum = Number::zero();
            for (term, sign) in terms.iter().zip(signs) {
                let value = eval(term)?;
                sum = match sign {
                    Sign::Plus => sum.add(&value),
                    Sign::Minus => sum.sub(&value),
                };
            }
            Some(sum)
        }
        Expr::Mul(factors) => {
            let mut result = Number::from(1);
            for factor in factors {
                result = result.mul(&eval(factor)?);
            }
            Some(result)
        }
        Expr::Div(top, bottom) => eval(top)?.checked_div(&eval(bottom)?),
        Expr::Mod(top, bottom) => eval(top)?.checked_mod(&eval(bottom)?),
        Expr::Pow(base, exponent) => eval(base)?.checked_pow(&eval(exponent)?),
        Expr::Neg(operand) => Some(eval(operand)?.negate()),
        Expr::Factorial(operand) => eval(operand)?.checked_factorial(),
    }
}
