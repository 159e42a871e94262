//! Arbitrary-precision numbers for literal nodes and numeric evaluation.
//!
//! A [`Number`] is a complex value computed at [`PRECISION`](crate::primitive::PRECISION) bits.
//! The algebraic layer only ever sees real literals (the imaginary unit is kept symbolic as the
//! symbol `i`); full complex values appear when the evaluator folds an expression containing `i`.
//!
//! Partial operations come in two flavors. The `checked_*` methods compute numerically and fail
//! only when the operation is undefined (division by zero, modulus of non-integers) or the result
//! is not finite. The `*_exact` methods are stricter: they only succeed when the result is exact,
//! and are what allows the simplifier to fold `4/2` while leaving `3/4` as a fraction.

pub mod fmt;

use crate::consts;
use crate::primitive::{complex, float, PRECISION};
use rug::{ops::Pow, Complex, Float, Integer};
use std::cmp::Ordering;

/// An arbitrary-precision real-or-complex number.
#[derive(Debug, Clone)]
pub struct Number {
    value: Complex,
}

impl Number {
    /// Creates a number from a raw [`Complex`] value.
    pub fn from_complex(value: Complex) -> Self {
        Self { value }
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Self::from_complex(complex(0))
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Self::from_complex(consts::I.clone())
    }

    /// The circle constant.
    pub fn pi() -> Self {
        Self::from_complex(complex(&*consts::PI))
    }

    /// Euler's number.
    pub fn e() -> Self {
        Self::from_complex(complex(&*consts::E))
    }

    /// Parses a numeric literal: digits, an optional fractional part, and an optional signed
    /// exponent. Returns [`None`] for malformed input and for values too large to represent.
    pub fn parse(text: &str) -> Option<Self> {
        let parsed = Float::parse(text).ok()?;
        let value = Float::with_val(PRECISION, parsed);
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_complex(complex(value)))
    }

    /// The real part, as a [`Float`].
    pub fn real(&self) -> &Float {
        self.value.real()
    }

    /// The imaginary part, as a [`Float`].
    pub fn imag(&self) -> &Float {
        self.value.imag()
    }

    /// The real part, as a real [`Number`].
    pub fn real_part(&self) -> Self {
        Self::from_complex(complex(self.value.real()))
    }

    /// The imaginary part, as a real [`Number`].
    pub fn imaginary_part(&self) -> Self {
        Self::from_complex(complex(self.value.imag()))
    }

    /// Returns the number with its real and imaginary parts exchanged.
    pub fn exchange_real_and_imaginary(&self) -> Self {
        Self::from_complex(complex((self.value.imag(), self.value.real())))
    }

    pub fn is_zero(&self) -> bool {
        self.value.real().is_zero() && self.value.imag().is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.is_real() && self.value.real() == &1
    }

    /// Returns true if the imaginary part is zero.
    pub fn is_real(&self) -> bool {
        self.value.imag().is_zero()
    }

    pub fn is_positive_real(&self) -> bool {
        self.is_real() && self.value.real().is_sign_positive() && !self.value.real().is_zero()
    }

    pub fn is_negative_real(&self) -> bool {
        self.is_real() && self.value.real().is_sign_negative() && !self.value.real().is_zero()
    }

    /// Returns true if the number is a real integer.
    pub fn is_integer(&self) -> bool {
        self.is_real() && self.value.real().is_integer()
    }

    /// Returns true if both parts are finite.
    pub fn is_finite(&self) -> bool {
        self.value.real().is_finite() && self.value.imag().is_finite()
    }

    /// If the number is a real integer, returns it as an [`Integer`].
    pub fn as_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            self.value.real().to_integer()
        } else {
            None
        }
    }

    /// Negates the number.
    pub fn negate(&self) -> Self {
        Self::from_complex(Complex::with_val(PRECISION, -&self.value))
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self::from_complex(Complex::with_val(PRECISION, &self.value + &rhs.value))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        Self::from_complex(Complex::with_val(PRECISION, &self.value - &rhs.value))
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Self::from_complex(Complex::with_val(PRECISION, &self.value * &rhs.value))
    }

    /// Divides numerically. Fails on division by zero.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::from_complex(Complex::with_val(
            PRECISION,
            &self.value / &rhs.value,
        )))
    }

    /// Divides only if the result is exact: integer division must leave no remainder, and
    /// non-integer operands must both be real.
    pub fn div_exact(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() || !self.is_real() || !rhs.is_real() {
            return None;
        }
        match (self.as_integer(), rhs.as_integer()) {
            (Some(a), Some(b)) => {
                let (quotient, remainder) = a.div_rem(b);
                remainder.is_zero().then(|| Self::from(quotient))
            }
            _ => Some(Self::from(float(self.value.real()) / rhs.value.real())),
        }
    }

    /// Remainder of truncated integer division. Defined only for real integers and a nonzero
    /// divisor.
    pub fn checked_mod(&self, rhs: &Self) -> Option<Self> {
        let a = self.as_integer()?;
        let b = rhs.as_integer()?;
        if b.is_zero() {
            return None;
        }
        Some(Self::from(a % b))
    }

    /// Raises to a power numerically. Fails for a zero base with a non-positive exponent, and
    /// whenever the result is not finite.
    pub fn checked_pow(&self, rhs: &Self) -> Option<Self> {
        if self.is_zero() && !rhs.is_positive_real() {
            return None;
        }
        let result = Self::from_complex(Complex::with_val(
            PRECISION,
            (&self.value).pow(&rhs.value),
        ));
        result.is_finite().then_some(result)
    }

    /// Raises to a power only if the result is exact: the exponent must be a real integer of
    /// reasonable size, and a negative exponent only applies to a base of magnitude one.
    pub fn pow_exact(&self, rhs: &Self) -> Option<Self> {
        if !self.is_real() || !rhs.is_real() {
            return None;
        }
        let exp = rhs.as_integer()?;

        if self.is_zero() {
            // 0^0 and 0^negative are left for the evaluator to reject
            return (exp.cmp0() == Ordering::Greater).then(Self::zero);
        }

        if let Some(base) = self.as_integer() {
            if exp.cmp0() == Ordering::Less {
                // only unit bases stay integral under a negative exponent
                return match (base == 1, base == -1, exp.is_odd()) {
                    (true, _, _) => Some(Self::from(1)),
                    (_, true, true) => Some(Self::from(-1)),
                    (_, true, false) => Some(Self::from(1)),
                    _ => None,
                };
            }
            let e = exp.to_u32().filter(|&e| e <= 9999)?;
            Some(Self::from(base.pow(e)))
        } else {
            let e = exp.to_i32().filter(|e| e.unsigned_abs() <= 512)?;
            let result = Self::from(self.value.real().clone().pow(e));
            result.is_finite().then_some(result)
        }
    }

    /// Factorial of a non-negative real integer.
    pub fn checked_factorial(&self) -> Option<Self> {
        let n = self.as_integer()?;
        if n.cmp0() == Ordering::Less {
            return None;
        }
        let n = n.to_u32().filter(|&n| n <= 10_000)?;
        Some(Self::from(Integer::from(Integer::factorial(n))))
    }

    /// Greatest common divisor, defined only for real integers.
    pub fn gcd(&self, rhs: &Self) -> Option<Self> {
        let a = self.as_integer()?;
        let b = rhs.as_integer()?;
        Some(Self::from(a.gcd(&b)))
    }

    /// A total order over numbers for deterministic child ordering: by real part, then by
    /// imaginary part.
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        self.value
            .real()
            .partial_cmp(other.value.real())
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                self.value
                    .imag()
                    .partial_cmp(other.value.imag())
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Canonical decimal representation of the real part.
    pub fn format_real_part(&self) -> String {
        fmt::fmt_part(self.value.real(), fmt::SIG_FIGS)
    }

    /// Canonical decimal representation of the imaginary part.
    pub fn format_imaginary_part(&self) -> String {
        fmt::fmt_part(self.value.imag(), fmt::SIG_FIGS)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::from_complex(complex(n))
    }
}

impl From<Float> for Number {
    fn from(n: Float) -> Self {
        Self::from_complex(complex(n))
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::from_complex(complex(n))
    }
}
