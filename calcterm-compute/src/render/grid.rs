//! The two-dimensional grid renderer.
//!
//! Mirrors the one-line renderer's structure, but composes [`CharMap`]s instead of strings:
//! divisions stack over a bar, exponents raise, and a literal coefficient is juxtaposed directly
//! before a symbol. Fractions group themselves visually, so they are never parenthesized (except
//! as the base of a power, where the exponent would otherwise float ambiguously).

use calcterm_parser::parser::op::{Associativity, Precedence};
use crate::expr::{Expr, Sign};
use super::char_map::CharMap;
use super::one_line::{literal_text, needs_parens};

/// Renders the expression as a two-dimensional character grid.
pub fn grid(expr: &Expr) -> CharMap {
    render(expr)
}

/// The grid variant of the parenthesization rule.
fn grid_parens(
    child: &Expr,
    parent: Precedence,
    first_operand: bool,
    associativity: Associativity,
) -> bool {
    if matches!(child, Expr::Div(..)) {
        return parent == Precedence::Exp && first_operand;
    }
    needs_parens(child, parent, first_operand, associativity)
}

fn child(
    expr: &Expr,
    parent: Precedence,
    first_operand: bool,
    associativity: Associativity,
) -> CharMap {
    let map = render(expr);
    if grid_parens(expr, parent, first_operand, associativity) {
        map.parenthesized()
    } else {
        map
    }
}

/// Returns true if the rendered expression begins with a symbol name, which is what allows a
/// literal coefficient to be juxtaposed before it without a `*`.
fn starts_with_symbol(expr: &Expr) -> bool {
    match expr {
        Expr::Symbol { .. } => true,
        Expr::Pow(base, _) => starts_with_symbol(base),
        Expr::Factorial(operand) => starts_with_symbol(operand),
        _ => false,
    }
}

/// Returns true if the expression is a literal that renders as a bare unsigned number.
fn is_plain_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Literal(_)) && expr.precedence().is_none()
}

fn render(expr: &Expr) -> CharMap {
    match expr {
        Expr::Literal(n) => CharMap::text(&literal_text(n)),

        Expr::Symbol { name, args } => {
            let name_map = CharMap::text(name);
            if args.is_empty() {
                return name_map;
            }
            let mut arg_map: Option<CharMap> = None;
            for arg in args {
                let rendered = render(arg);
                arg_map = Some(match arg_map {
                    None => rendered,
                    Some(list) => list.beside(CharMap::text(",")).beside(rendered),
                });
            }
            name_map.beside(arg_map.unwrap().parenthesized())
        }

        Expr::Add { terms, signs } => {
            let mut map: Option<CharMap> = None;
            for (i, (term, sign)) in terms.iter().zip(signs).enumerate() {
                let rendered = child(
                    term,
                    Precedence::Term,
                    i == 0 && !sign.is_minus(),
                    Associativity::Left,
                );
                map = Some(match (map, sign) {
                    (None, Sign::Plus) => rendered,
                    (None, Sign::Minus) => CharMap::text("-").beside(rendered),
                    (Some(acc), Sign::Plus) => acc.beside(CharMap::text("+")).beside(rendered),
                    (Some(acc), Sign::Minus) => acc.beside(CharMap::text("-")).beside(rendered),
                });
            }
            map.unwrap_or_else(|| CharMap::text("0"))
        }

        Expr::Mul(factors) => {
            let mut map: Option<CharMap> = None;
            let mut previous: Option<&Expr> = None;
            for (i, factor) in factors.iter().enumerate() {
                let rendered = child(factor, Precedence::Factor, i == 0, Associativity::Left);
                map = Some(match map {
                    None => rendered,
                    Some(acc) => {
                        // a literal coefficient sits directly against a symbol
                        let juxtapose = previous.map(is_plain_literal).unwrap_or(false)
                            && starts_with_symbol(factor);
                        if juxtapose {
                            acc.beside(rendered)
                        } else {
                            acc.beside(CharMap::text("*")).beside(rendered)
                        }
                    }
                });
                previous = Some(factor);
            }
            map.unwrap_or_else(|| CharMap::text("1"))
        }

        Expr::Div(top, bottom) => render(top).over(render(bottom)),

        Expr::Mod(top, bottom) => child(top, Precedence::Factor, true, Associativity::Left)
            .beside(CharMap::text("%"))
            .beside(child(bottom, Precedence::Factor, false, Associativity::Left)),

        Expr::Pow(base, exponent) => child(base, Precedence::Exp, true, Associativity::Right)
            .raised(child(exponent, Precedence::Exp, false, Associativity::Right)),

        Expr::Neg(operand) => CharMap::text("-").beside(child(
            operand,
            Precedence::Neg,
            false,
            Associativity::Right,
        )),

        Expr::Factorial(operand) => {
            child(operand, Precedence::Factorial, true, Associativity::Left)
                .beside(CharMap::text("!"))
        }
    }
}

#[cfg(test)]
mod tests {
    use calcterm_parser::Parser;
    use crate::expr::builder;
    use pretty_assertions::assert_eq;
    use super::*;

    fn render_grid(input: &str) -> Vec<String> {
        let expr = builder::build(&Parser::new(input).unwrap().parse().unwrap()).unwrap();
        grid(&expr).into_strings()
    }

    #[test]
    fn flat_expressions_stay_on_one_row() {
        assert_eq!(render_grid("1+2*3"), vec!["1+2*3".to_string()]);
    }

    #[test]
    fn fractions_stack() {
        assert_eq!(
            render_grid("6/8"),
            vec![" 6 ".to_string(), "---".to_string(), " 8 ".to_string()],
        );
    }

    #[test]
    fn exponents_raise() {
        assert_eq!(
            render_grid("x^2"),
            vec![" 2".to_string(), "x ".to_string()],
        );
    }

    #[test]
    fn terms_align_on_the_baseline() {
        assert_eq!(
            render_grid("1+x/2"),
            vec![
                "   x ".to_string(),
                "1+---".to_string(),
                "   2 ".to_string(),
            ],
        );
    }

    #[test]
    fn literal_coefficients_juxtapose_before_symbols() {
        assert_eq!(render_grid("2x"), vec!["2x".to_string()]);
        assert_eq!(render_grid("2*x"), vec!["2x".to_string()]);
        // between two literals the operator is kept
        assert_eq!(render_grid("2*3"), vec!["2*3".to_string()]);
    }

    #[test]
    fn tall_arguments_get_tall_parentheses() {
        assert_eq!(
            render_grid("sin(1/2)"),
            vec![
                "   / 1 \\".to_string(),
                "sin|---|".to_string(),
                "   \\ 2 /".to_string(),
            ],
        );
    }

    #[test]
    fn fraction_bases_of_powers_are_parenthesized() {
        assert_eq!(
            render_grid("(1/2)^2"),
            vec![
                "     2".to_string(),
                "/ 1 \\ ".to_string(),
                "|---| ".to_string(),
                "\\ 2 / ".to_string(),
            ],
        );
    }
}
