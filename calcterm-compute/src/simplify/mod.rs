//! The simplification pipeline.
//!
//! Simplification is a fixed composition of rewriting passes. A few setup passes establish the
//! canonical representation, a bounded loop runs the main rewriting sequence until it reaches a
//! fixed point (or the iteration cap, since a fixed point is not guaranteed to exist for all
//! inputs), and a closing sequence expands products over sums and re-canonicalizes the result.

pub mod passes;

use crate::expr::{visit::Restructurer, Expr};
use passes::{
    BasicSymbols, ComplexExpander, ComplexNormalizer, ComplexSplitter, FirstOrderBasic,
    GCDLiteral, Negatives, NumberReducerBasic, Rationalizer, SelfNesting, SizeOneArray,
};
use std::rc::Rc;

/// Options controlling the simplification pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyOptions {
    /// The maximum number of iterations of the main rewriting loop. The loop exits early as soon
    /// as an iteration leaves the tree structurally unchanged.
    pub max_iterations: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { max_iterations: 20 }
    }
}

/// Runs a single rewriting pass over the expression.
fn reduce<R: Restructurer>(mut pass: R, expr: &Rc<Expr>) -> Rc<Expr> {
    pass.visit(expr)
}

/// Simplifies the given expression with the default options.
pub fn simplify(expr: &Rc<Expr>) -> Rc<Expr> {
    simplify_with(expr, SimplifyOptions::default())
}

/// Simplifies the given expression. The pass order is significant: the loop's rewrites feed each
/// other (gathering exposes literals to fold, folding exposes trivial nodes to collapse), and
/// the closing sequence re-establishes the canonical form after expansion.
pub fn simplify_with(expr: &Rc<Expr>, options: SimplifyOptions) -> Rc<Expr> {
    let mut res = reduce(BasicSymbols, expr);
    res = reduce(ComplexSplitter, &res);
    res = reduce(Rationalizer, &res);

    for _ in 0..options.max_iterations {
        let before = Rc::clone(&res);
        res = reduce(ComplexNormalizer, &res);
        res = reduce(GCDLiteral, &res);
        res = reduce(SizeOneArray, &res);
        res = reduce(SelfNesting, &res);
        res = reduce(Negatives, &res);
        res = reduce(FirstOrderBasic, &res);
        res = reduce(NumberReducerBasic, &res);
        if res == before {
            break;
        }
    }

    res = reduce(ComplexExpander, &res);
    res = reduce(ComplexSplitter, &res);
    res = reduce(ComplexNormalizer, &res);
    res = reduce(GCDLiteral, &res);
    res = reduce(SizeOneArray, &res);
    res = reduce(SelfNesting, &res);
    res = reduce(Negatives, &res);
    res
}

#[cfg(test)]
mod tests {
    use calcterm_parser::Parser;
    use crate::expr::builder;
    use crate::render::one_line;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Rc<Expr> {
        builder::build(&Parser::new(input).unwrap().parse().unwrap()).unwrap()
    }

    /// Parses, simplifies, and renders the result on one line.
    fn simplified(input: &str) -> String {
        one_line(&simplify(&parse(input)))
    }

    #[test]
    fn numeric_subtrees_fold() {
        assert_eq!(simplified("2+3*4"), "14");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("5!-20"), "100");
    }

    #[test]
    fn products_of_sums_expand() {
        assert_eq!(simplified("(x+1)*(x+1)"), "x^2+2*x+1");
        assert_eq!(simplified("(x+1)*(x-1)"), "x^2-1");
        assert_eq!(simplified("(x+1)^2"), "x^2+2*x+1");
    }

    #[test]
    fn literal_fractions_reduce() {
        assert_eq!(simplified("6/8"), "3/4");
        assert_eq!(simplified("8/4"), "2");
        assert_eq!(simplified("1/3"), "1/3");
    }

    #[test]
    fn negations_cancel() {
        assert_eq!(simplified("--x"), "x");
        assert_eq!(simplified("---x"), "-x");
    }

    #[test]
    fn unknown_functions_are_untouched() {
        assert_eq!(simplified("sin(0)+cos(0)"), "sin(0)+cos(0)");
    }

    #[test]
    fn imaginary_units_square_to_minus_one() {
        assert_eq!(simplified("i*i+1"), "0");
        assert_eq!(simplified("i*i"), "-1");
        assert_eq!(simplified("i^3"), "-i");
    }

    #[test]
    fn like_terms_combine() {
        assert_eq!(simplified("x+x+x"), "3*x");
        assert_eq!(simplified("2*x-x"), "x");
        assert_eq!(simplified("x-x"), "0");
    }

    #[test]
    fn nested_fractions_flatten() {
        assert_eq!(simplified("x/(y/z)"), "x*z/y");
        assert_eq!(simplified("(1/2)/3"), "1/6");
    }

    #[test]
    fn simplify_is_idempotent() {
        for input in [
            "2+3*4",
            "(x+1)*(x+1)",
            "6/8",
            "--x",
            "sin(0)+cos(0)",
            "i*i+1",
            "x+2*y-3*z",
            "-a-b",
            "2*pi*x",
        ] {
            let once = simplify(&parse(input));
            let twice = simplify(&once);
            assert_eq!(once, twice, "simplify is not idempotent for {input:?}");
        }
    }

    #[test]
    fn deep_negation_chains_collapse() {
        let mut input = String::from("x");
        for _ in 0..100 {
            input.insert(0, '-');
        }
        assert_eq!(simplified(&input), "x");
        input.insert(0, '-');
        assert_eq!(simplified(&input), "-x");
    }

    #[test]
    fn iteration_cap_is_configurable() {
        let expr = parse("2+3*4");
        let options = SimplifyOptions { max_iterations: 0 };
        // with no loop iterations only the setup and closing passes run
        let res = simplify_with(&expr, options);
        assert_eq!(one_line(&res), "14");
    }
}
