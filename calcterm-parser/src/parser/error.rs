//! Error kinds produced by the tokenizer and parser.

use ariadne::{Label, Report, ReportKind};
use calcterm_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;
use std::ops::Range;

/// Builds a report with the given message, one label per span, and an optional help message.
fn report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    labels: &[&str],
    help: Option<String>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let mut builder = Report::build(ReportKind::Error, src_id, spans.first().map_or(0, |s| s.start))
        .with_message(message)
        .with_labels(
            labels
                .iter()
                .zip(spans.iter())
                .map(|(label, span)| {
                    Label::new((src_id, span.clone()))
                        .with_color(EXPR)
                        .with_message(*label)
                })
                .collect::<Vec<_>>(),
        );

    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}

/// The tokenizer found a character that no token rule matches.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCharacter;

impl ErrorKind for UnknownCharacter {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(src_id, spans, "unrecognized character", &["here"], None)
    }
}

/// The end of the source code was reached while an expression was still expected.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "unexpected end of input",
            &["you might need to add another expression here"],
            None,
        )
    }
}

/// A token appeared somewhere it is not allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    /// The token that was found.
    pub found: TokenKind,
}

impl ErrorKind for UnexpectedToken {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "unexpected token",
            &["this token is not valid here"],
            Some(format!("found {:?}", self.found)),
        )
    }
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

impl ErrorKind for UnclosedParenthesis {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "unclosed parenthesis",
            &["this parenthesis is not closed"],
            Some(
                if self.opening {
                    "add a closing parenthesis `)` somewhere after this"
                } else {
                    "add an opening parenthesis `(` somewhere before this"
                }
                .to_string(),
            ),
        )
    }
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyParenthesis;

impl ErrorKind for EmptyParenthesis {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            "missing expression inside parenthesis",
            &["add an expression here"],
            None,
        )
    }
}
