//! Utility functions to format the floating-point parts of a [`Number`](super::Number).

use rug::{float::Round, Float};
use std::cmp::Ordering;

/// The number of significant figures to display when formatting a number.
pub const SIG_FIGS: usize = 100;

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: &Float) -> bool {
    let abs = n.as_abs();
    *abs <= 1e-6 || *abs >= 1e+12
}

/// Trims trailing parts from a string assumed to represent a single number in decimal notation.
fn trim_trailing(s: &str) -> &str {
    // look for decimal point
    if s.contains('.') {
        // look for trailing zeros
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        let byte_len = trimmed.len();
        &s[..byte_len]
    } else {
        // cannot trim trailing zeros to the left of the decimal point
        s
    }
}

/// Formats a float as a standard decimal number.
fn fmt_decimal(n: &Float, sig_figs: usize) -> String {
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(sig_figs), Round::Nearest);
    let exponent = exponent.unwrap(); // exponent is Some() if the number is normal

    // add decimal point
    match exponent.cmp(&0) {
        Ordering::Less => s.insert_str(0, &format!("0.{}", "0".repeat(-exponent as usize))),
        Ordering::Equal => s.insert_str(0, "0."),
        Ordering::Greater => {
            let exponent = exponent as usize;
            match s.len().cmp(&exponent) {
                // if there are not enough digits before the decimal point, add zeros
                Ordering::Less => s.push_str(&"0".repeat(exponent - s.len())),

                // place the decimal point in the correct place
                Ordering::Greater => s.insert(exponent, '.'),

                // if len == exponent, the decimal point would be at the end of the string, so we
                // don't add anything
                Ordering::Equal => {},
            }
        },
    }

    format!("{}{}", if sign { "-" } else { "" }, trim_trailing(&s))
}

/// Formats a float in scientific notation.
///
/// `E` is used instead of `e` to avoid ambiguity with Euler's number; the output still matches
/// the literal grammar accepted by the tokenizer.
fn fmt_scientific(n: &Float, sig_figs: usize) -> String {
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(sig_figs), Round::Nearest);
    let mut exponent = exponent.unwrap(); // exponent is Some() if the number is normal

    // add decimal point
    s.insert(1, '.');

    // subtract 1 from the exponent because we inserted a decimal point after the first digit
    exponent -= 1;

    format!(
        "{}{}E{}",
        if sign { "-" } else { "" },
        trim_trailing(&s),
        exponent,
    )
}

/// Formats one floating-point part of a number, choosing between decimal and scientific notation
/// based on the magnitude of the value.
pub fn fmt_part(n: &Float, sig_figs: usize) -> String {
    if n.is_zero() {
        return "0".to_string();
    }
    if should_use_scientific(n) {
        fmt_scientific(n, sig_figs)
    } else {
        fmt_decimal(n, sig_figs)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use super::*;

    #[test]
    fn integers_have_no_decimal_point() {
        assert_eq!(fmt_part(&float(14), SIG_FIGS), "14");
        assert_eq!(fmt_part(&float(-3), SIG_FIGS), "-3");
        assert_eq!(fmt_part(&float(0), SIG_FIGS), "0");
    }

    #[test]
    fn fractions_trim_trailing_zeros() {
        assert_eq!(fmt_part(&(float(3) / float(4)), SIG_FIGS), "0.75");
        assert_eq!(fmt_part(&float(2.5), SIG_FIGS), "2.5");
    }

    #[test]
    fn large_and_small_use_scientific() {
        assert_eq!(fmt_part(&float(1e15), SIG_FIGS), "1E15");
        assert_eq!(fmt_part(&float(-2.5e13), SIG_FIGS), "-2.5E13");
        assert_eq!(fmt_part(&float(1e-9), SIG_FIGS), "1E-9");
    }
}
