//! The one-line infix renderer.
//!
//! Rendering is a post-order concatenation of the children's renders, with parentheses inserted
//! whenever a child's precedence is lower than its parent's, or equal when the child sits on the
//! non-associative side. The output contains no whitespace and reparses to a structurally equal
//! tree, modulo the explicit parentheses.

use calcterm_parser::parser::op::{Associativity, Precedence};
use crate::expr::{Expr, Sign};
use crate::number::Number;
use std::fmt;

/// Renders the expression as a single line of infix text.
pub fn one_line(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&one_line(self))
    }
}

/// Decides whether a child must be parenthesized under a parent operator with the given
/// precedence and associativity. `first_operand` marks the parent's leftmost operand.
pub(crate) fn needs_parens(
    child: &Expr,
    parent: Precedence,
    first_operand: bool,
    associativity: Associativity,
) -> bool {
    match child.precedence() {
        None => false,
        Some(precedence) => {
            precedence < parent
                || precedence == parent
                    && match associativity {
                        // the right-hand side of a left-associative operator regroups without
                        // parentheses, and vice versa
                        Associativity::Left => !first_operand,
                        Associativity::Right => first_operand,
                    }
        }
    }
}

/// Renders a literal. A non-real literal renders as its split form `a+b*i`, which keeps the
/// output parseable.
pub(crate) fn literal_text(n: &Number) -> String {
    if n.is_real() {
        return n.format_real_part();
    }

    let imag = n.imaginary_part();
    let (negative, magnitude) = if imag.is_negative_real() {
        (true, imag.negate())
    } else {
        (false, imag)
    };
    let unit = if magnitude.is_one() {
        "i".to_string()
    } else {
        format!("{}*i", magnitude.format_real_part())
    };

    if n.real().is_zero() {
        if negative {
            format!("-{unit}")
        } else {
            unit
        }
    } else {
        format!(
            "{}{}{}",
            n.format_real_part(),
            if negative { '-' } else { '+' },
            unit,
        )
    }
}

fn write_child(
    out: &mut String,
    child: &Expr,
    parent: Precedence,
    first_operand: bool,
    associativity: Associativity,
) {
    if needs_parens(child, parent, first_operand, associativity) {
        out.push('(');
        write_expr(out, child);
        out.push(')');
    } else {
        write_expr(out, child);
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(n) => out.push_str(&literal_text(n)),

        Expr::Symbol { name, args } => {
            out.push_str(name);
            if !args.is_empty() {
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_expr(out, arg);
                }
                out.push(')');
            }
        }

        Expr::Add { terms, signs } => {
            for (i, (term, sign)) in terms.iter().zip(signs).enumerate() {
                match (i, sign) {
                    (0, Sign::Plus) => {}
                    (0, Sign::Minus) => out.push('-'),
                    (_, Sign::Plus) => out.push('+'),
                    (_, Sign::Minus) => out.push('-'),
                }
                write_child(out, term, Precedence::Term, i == 0 && !sign.is_minus(), Associativity::Left);
            }
        }

        Expr::Mul(factors) => {
            for (i, factor) in factors.iter().enumerate() {
                if i > 0 {
                    out.push('*');
                }
                write_child(out, factor, Precedence::Factor, i == 0, Associativity::Left);
            }
        }

        Expr::Div(top, bottom) => {
            write_child(out, top, Precedence::Factor, true, Associativity::Left);
            out.push('/');
            write_child(out, bottom, Precedence::Factor, false, Associativity::Left);
        }

        Expr::Mod(top, bottom) => {
            write_child(out, top, Precedence::Factor, true, Associativity::Left);
            out.push('%');
            write_child(out, bottom, Precedence::Factor, false, Associativity::Left);
        }

        Expr::Pow(base, exponent) => {
            write_child(out, base, Precedence::Exp, true, Associativity::Right);
            out.push('^');
            write_child(out, exponent, Precedence::Exp, false, Associativity::Right);
        }

        Expr::Neg(operand) => {
            out.push('-');
            write_child(out, operand, Precedence::Neg, false, Associativity::Right);
        }

        Expr::Factorial(operand) => {
            write_child(out, operand, Precedence::Factorial, true, Associativity::Left);
            out.push('!');
        }
    }
}

#[cfg(test)]
mod tests {
    use calcterm_parser::Parser;
    use crate::expr::builder;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;
    use super::*;

    fn parse(input: &str) -> Rc<Expr> {
        builder::build(&Parser::new(input).unwrap().parse().unwrap()).unwrap()
    }

    /// Renders the parse of `input` back to one line.
    fn round(input: &str) -> String {
        one_line(&parse(input))
    }

    #[test]
    fn operators_render_without_spaces() {
        assert_eq!(round("1 + 2 * 3"), "1+2*3");
        assert_eq!(round("x ^ 2 - 7"), "x^2-7");
        assert_eq!(round("7 % 3"), "7%3");
    }

    #[test]
    fn parentheses_follow_precedence() {
        assert_eq!(round("(1+2)*3"), "(1+2)*3");
        assert_eq!(round("1+2*3"), "1+2*3");
        assert_eq!(round("a*(b/c)"), "a*(b/c)");
        assert_eq!(round("a*b/c"), "a*b/c");
        assert_eq!(round("a/(b*c)"), "a/(b*c)");
        assert_eq!(round("(a^b)^c"), "(a^b)^c");
        assert_eq!(round("a^b^c"), "a^b^c");
        assert_eq!(round("(-2)^2"), "(-2)^2");
        assert_eq!(round("-2^2"), "-2^2");
        assert_eq!(round("-(x*y)"), "-(x*y)");
        assert_eq!(round("(1+2)!"), "(1+2)!");
        assert_eq!(round("a-(b+c)"), "a-(b+c)");
    }

    #[test]
    fn implicit_multiplication_renders_explicitly() {
        assert_eq!(round("2x"), "2*x");
        assert_eq!(round("2(3+4)"), "2*(3+4)");
    }

    #[test]
    fn calls_render_with_commas() {
        assert_eq!(round("f(a,b,c)"), "f(a,b,c)");
        assert_eq!(round("sin(x+1)"), "sin(x+1)");
    }

    #[test]
    fn rendered_output_reparses_to_the_same_tree() {
        for input in [
            "1+2*3",
            "(1+2)*3",
            "-x^2!",
            "a/(b/c)",
            "2x y",
            "f(g(x),-y)",
            "--5",
            "a-(b-c)",
            "3!2",
        ] {
            let tree = parse(input);
            let rendered = one_line(&tree);
            assert_eq!(parse(&rendered), tree, "round trip failed for {input:?}");
            // rendering is a fixed point after one round
            assert_eq!(one_line(&parse(&rendered)), rendered);
        }
    }

    #[test]
    fn complex_literals_render_parseably() {
        use crate::primitive::complex;

        let n = builder::literal(Number::from_complex(complex((3, 2))));
        assert_eq!(one_line(&n), "3+2*i");

        let pure = builder::literal(Number::from_complex(complex((0, -1))));
        assert_eq!(one_line(&pure), "-i");
    }
}
