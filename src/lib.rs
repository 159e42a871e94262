//! A CAS core for terminal calculators.
//!
//! `calcterm` accepts a mathematical expression in standard infix notation, parses it into a
//! symbolic expression tree, simplifies the tree through a pipeline of rewriting passes, and
//! renders the result both as one-line infix text and as a two-dimensional character grid (for
//! fractions, exponents, and tall parentheses). When the simplified expression is purely
//! numeric it is additionally evaluated to an arbitrary-precision complex number.
//!
//! ```
//! let submission = calcterm::submit("6/8 + x - x").unwrap();
//! assert_eq!(submission.output.one_line, "3/4");
//! assert_eq!(submission.output.grid, vec![" 3 ", "---", " 4 "]);
//! assert_eq!(submission.number.unwrap().one_line, "0.75");
//! ```

use calcterm_compute::expr::builder;
use calcterm_compute::render;
use calcterm_parser::Parser;
use std::rc::Rc;

pub use calcterm_compute::{
    evaluate, simplify, simplify_with, Expr, Number, Restructurer, Sign, SimplifyOptions,
};
pub use calcterm_error::Error;

/// An expression rendered for display.
///
/// Plain value semantics: renderings are freely copyable and reusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The expression on a single line of infix text.
    pub one_line: String,

    /// The expression as a rectangular character grid, one string per row.
    pub grid: Vec<String>,
}

impl From<String> for Rendered {
    fn from(s: String) -> Self {
        Self {
            grid: vec![s.clone()],
            one_line: s,
        }
    }
}

/// Everything produced for one submitted expression: the parsed input and simplified output
/// renderings, plus the numeric value when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub input: Rendered,
    pub output: Rendered,
    pub number: Option<Rendered>,
}

/// Parses an infix expression into a tree. On a syntax error or a malformed literal, the
/// returned [`Error`] carries the offending source position.
pub fn parse(input: &str) -> Result<Rc<Expr>, Error> {
    let commands = Parser::new(input)?.parse()?;
    builder::build(&commands)
}

/// Renders an expression both ways.
pub fn render(expr: &Expr) -> Rendered {
    Rendered {
        one_line: render::one_line(expr),
        grid: render::grid(expr).into_strings(),
    }
}

/// Renders a number as `real`, `imag·i`, or `real±imag·i`, with the unit imaginary parts
/// special-cased to `i` and `-i`.
pub fn render_number(n: &Number) -> Rendered {
    let real = n.format_real_part();
    let mut imaginary = n.format_imaginary_part();

    if imaginary == "1" {
        imaginary = "i".to_string();
    } else if imaginary == "-1" {
        imaginary = "-i".to_string();
    } else if imaginary != "0" {
        imaginary.push('i');
    }

    if imaginary == "0" {
        return Rendered::from(real);
    }
    if real == "0" {
        return Rendered::from(imaginary);
    }

    let sign = if n.imaginary_part().is_positive_real() {
        "+"
    } else {
        ""
    };
    Rendered::from(format!("{real}{sign}{imaginary}"))
}

/// Runs the full pipeline for one input: parse, simplify, optionally evaluate, and render the
/// input, the output, and the numeric value.
pub fn submit(input: &str) -> Result<Submission, Error> {
    let parsed = parse(input)?;
    let simplified = simplify(&parsed);
    let number = evaluate(&simplified);

    Ok(Submission {
        input: render(&parsed),
        output: render(&simplified),
        number: number.as_ref().map(render_number),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses, simplifies, and renders one line.
    fn simplified(input: &str) -> String {
        render(&simplify(&parse(input).unwrap())).one_line
    }

    #[test]
    fn end_to_end_scenarios() {
        assert_eq!(simplified("2+3*4"), "14");
        assert_eq!(simplified("(x+1)*(x+1)"), "x^2+2*x+1");
        assert_eq!(simplified("6/8"), "3/4");
        assert_eq!(simplified("--x"), "x");
        assert_eq!(simplified("sin(0)+cos(0)"), "sin(0)+cos(0)");
        assert_eq!(simplified("i*i+1"), "0");
    }

    #[test]
    fn parse_round_trips_through_rendering() {
        for input in [
            "1+2*3",
            "4x^2 + 5x + 1",
            "-(x+1)!",
            "sin(x)cos(x)",
            "a/(b/c) % 7",
            "2^3^4",
        ] {
            let tree = parse(input).unwrap();
            let rendered = render(&tree).one_line;
            assert_eq!(parse(&rendered).unwrap(), tree, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn simplified_rendering_is_deterministic() {
        for input in ["(x+1)*(x+1)", "i*i+1", "2+y+x"] {
            assert_eq!(simplified(input), simplified(input));
        }
    }

    #[test]
    fn syntax_errors_report_positions() {
        assert_eq!(parse("").unwrap_err().spans, vec![0..0]);
        assert_eq!(parse("1+2)").unwrap_err().spans, vec![3..4]);
        assert_eq!(parse("(1+2").unwrap_err().spans[0], 4..4);
        assert_eq!(parse("1 $ 2").unwrap_err().spans, vec![2..3]);
    }

    #[test]
    fn oversized_literals_fail_at_their_position() {
        let input = "1+1e99999999999999999999";
        assert_eq!(parse(input).unwrap_err().spans, vec![2..input.len()]);
    }

    #[test]
    fn numeric_results_appear_only_when_defined() {
        let with_number = submit("2+3*4").unwrap();
        assert_eq!(with_number.number.unwrap().one_line, "14");

        let symbolic = submit("x+1").unwrap();
        assert_eq!(symbolic.number, None);

        let division_by_zero = submit("1/0").unwrap();
        assert_eq!(division_by_zero.number, None);
        assert_eq!(division_by_zero.output.one_line, "1/0");
    }

    #[test]
    fn complex_numbers_render_with_their_special_cases() {
        assert_eq!(render_number(&evaluate(&parse("i").unwrap()).unwrap()).one_line, "i");
        assert_eq!(
            render_number(&evaluate(&parse("-i").unwrap()).unwrap()).one_line,
            "-i",
        );
        assert_eq!(
            render_number(&evaluate(&parse("2+3i").unwrap()).unwrap()).one_line,
            "2+3i",
        );
        assert_eq!(
            render_number(&evaluate(&parse("2-3i").unwrap()).unwrap()).one_line,
            "2-3i",
        );
        assert_eq!(
            render_number(&evaluate(&parse("3i").unwrap()).unwrap()).one_line,
            "3i",
        );
    }

    #[test]
    fn submission_includes_both_grids() {
        let submission = submit("6/8").unwrap();
        assert_eq!(submission.input.grid, vec![" 6 ", "---", " 8 "]);
        assert_eq!(submission.output.grid, vec![" 3 ", "---", " 4 "]);
    }
}
