pub mod command;
pub mod error;
pub mod op;

use calcterm_error::Error;
use command::Command;
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use op::{Associativity, BinOpKind, Precedence};
use std::ops::Range;

/// An entry on the shunting-yard operator stack.
#[derive(Debug)]
enum StackEntry {
    /// A binary operator waiting for its right-hand side.
    Bin(BinOpKind, Range<usize>),

    /// A prefix unary minus.
    Neg(Range<usize>),

    /// An opening parenthesis, either grouping or opening a function call's argument list.
    Paren {
        span: Range<usize>,
        call: Option<Call>,
    },
}

/// A function call in progress: the name before the opening parenthesis and the number of
/// arguments completed so far (one more than the commas seen).
#[derive(Debug)]
struct Call {
    name: String,
    span: Range<usize>,
    commas: usize,
}

/// The infix parser.
///
/// Parsing is the shunting-yard algorithm: tokens are consumed left to right, operators wait on a
/// stack until an operator of no greater precedence arrives, and operands and completed operators
/// are emitted into a reverse-Polish [`Command`] stream. Precedence and associativity therefore
/// never appear in the output; a consumer can fold the command stream with a plain stack.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens being parsed, with whitespace already filtered out.
    tokens: Vec<Token<'source>>,

    /// The span pointing at the end of the source code.
    eof: Range<usize>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    ///
    /// Fails if the source contains characters no token rule matches; the error points at the
    /// position tokenization stopped.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        let tokens = tokenize_complete(source)
            .map_err(|span| Error::new(vec![span], error::UnknownCharacter))?;
        Ok(Self {
            tokens: tokens.into_vec().into_iter().filter(|t| !t.is_ignore()).collect(),
            eof: source.len()..source.len(),
        })
    }

    /// Parses the token stream into a reverse-Polish command sequence.
    pub fn parse(&self) -> Result<Vec<Command>, Error> {
        let mut output: Vec<Command> = Vec::new();
        let mut ops: Vec<StackEntry> = Vec::new();

        // true while the next token must begin an operand; this is what disambiguates unary from
        // binary `-` and `+`
        let mut expect_operand = true;
        let mut prev_kind: Option<TokenKind> = None;

        let mut idx = 0;
        while idx < self.tokens.len() {
            let token = &self.tokens[idx];
            match token.kind {
                TokenKind::Literal => {
                    if !expect_operand {
                        Self::push_implicit_mul(&mut output, &mut ops, token.span.start);
                    }
                    output.push(Command::literal(token.lexeme, token.span.clone()));
                    expect_operand = false;
                }

                TokenKind::Name => {
                    if !expect_operand {
                        Self::push_implicit_mul(&mut output, &mut ops, token.span.start);
                    }

                    // an identifier immediately followed by `(` begins a function call; the
                    // opening parenthesis is consumed here so the argument list can be counted
                    if self.tokens.get(idx + 1).map(|t| t.kind) == Some(TokenKind::OpenParen) {
                        let paren = &self.tokens[idx + 1];
                        ops.push(StackEntry::Paren {
                            span: paren.span.clone(),
                            call: Some(Call {
                                name: token.lexeme.to_string(),
                                span: token.span.clone(),
                                commas: 0,
                            }),
                        });
                        prev_kind = Some(TokenKind::OpenParen);
                        expect_operand = true;
                        idx += 2;
                        continue;
                    }

                    output.push(Command::symbol(token.lexeme, 0, token.span.clone()));
                    expect_operand = false;
                }

                TokenKind::OpenParen => {
                    if !expect_operand {
                        Self::push_implicit_mul(&mut output, &mut ops, token.span.start);
                    }
                    ops.push(StackEntry::Paren {
                        span: token.span.clone(),
                        call: None,
                    });
                    expect_operand = true;
                }

                TokenKind::CloseParen => {
                    if expect_operand {
                        // `()` is an error for grouping parentheses, but `f()` is a legal
                        // zero-argument call
                        let directly_after_open = prev_kind == Some(TokenKind::OpenParen);
                        match ops.last() {
                            Some(StackEntry::Paren { call: Some(_), .. }) if directly_after_open => {}
                            Some(StackEntry::Paren { span, call: None }) if directly_after_open => {
                                return Err(Error::new(
                                    vec![span.start..token.span.end],
                                    error::EmptyParenthesis,
                                ));
                            }
                            _ => {
                                return Err(Error::new(
                                    vec![token.span.clone()],
                                    error::UnexpectedToken { found: token.kind },
                                ));
                            }
                        }
                    }

                    let entry = Self::pop_until_paren(&mut output, &mut ops);
                    match entry {
                        Some(StackEntry::Paren { call: Some(call), .. }) => {
                            let arity = if prev_kind == Some(TokenKind::OpenParen) {
                                0
                            } else {
                                call.commas + 1
                            };
                            output.push(Command::symbol(call.name, arity, call.span));
                        }
                        Some(StackEntry::Paren { .. }) => {}
                        _ => {
                            // no matching `(` anywhere on the stack
                            return Err(Error::new(
                                vec![token.span.clone()],
                                error::UnclosedParenthesis { opening: false },
                            ));
                        }
                    }
                    expect_operand = false;
                }

                TokenKind::Comma => {
                    if expect_operand {
                        return Err(Error::new(
                            vec![token.span.clone()],
                            error::UnexpectedToken { found: token.kind },
                        ));
                    }

                    // finish the current argument, leaving the call's parenthesis on the stack
                    while matches!(ops.last(), Some(StackEntry::Bin(..) | StackEntry::Neg(_))) {
                        let entry = ops.pop().unwrap();
                        Self::emit(&mut output, entry);
                    }
                    match ops.last_mut() {
                        Some(StackEntry::Paren { call: Some(call), .. }) => call.commas += 1,
                        _ => {
                            // a comma outside a function call's argument list
                            return Err(Error::new(
                                vec![token.span.clone()],
                                error::UnexpectedToken { found: token.kind },
                            ));
                        }
                    }
                    expect_operand = true;
                }

                TokenKind::Add if expect_operand => {
                    // unary plus is a no-op and emits no command
                }

                TokenKind::Sub if expect_operand => {
                    // prefix operators take no left-hand side, so nothing is popped
                    ops.push(StackEntry::Neg(token.span.clone()));
                }

                TokenKind::Factorial => {
                    if expect_operand {
                        return Err(Error::new(
                            vec![token.span.clone()],
                            error::UnexpectedToken { found: token.kind },
                        ));
                    }
                    // postfix `!` has the highest precedence of all operators, so it applies
                    // directly to the operand just emitted
                    output.push(Command::symbol("!", 1, token.span.clone()));
                }

                kind => {
                    let op = BinOpKind::from_token(kind).expect("all other kinds handled above");
                    if expect_operand {
                        return Err(Error::new(
                            vec![token.span.clone()],
                            error::UnexpectedToken { found: kind },
                        ));
                    }
                    Self::pop_for(&mut output, &mut ops, op.precedence(), op.associativity());
                    ops.push(StackEntry::Bin(op, token.span.clone()));
                    expect_operand = true;
                }
            }

            prev_kind = Some(token.kind);
            idx += 1;
        }

        if expect_operand {
            // covers empty input (reported at position 0) and a trailing operator
            return Err(Error::new(vec![self.eof.clone()], error::UnexpectedEof));
        }

        while let Some(entry) = ops.pop() {
            if let StackEntry::Paren { span, .. } = entry {
                return Err(Error::new(
                    vec![self.eof.clone(), span],
                    error::UnclosedParenthesis { opening: true },
                ));
            }
            Self::emit(&mut output, entry);
        }

        Ok(output)
    }

    /// Emits the command for a completed operator stack entry.
    fn emit(output: &mut Vec<Command>, entry: StackEntry) {
        match entry {
            StackEntry::Bin(op, span) => output.push(Command::symbol(op.name(), 2, span)),
            StackEntry::Neg(span) => output.push(Command::symbol("ng", 1, span)),
            StackEntry::Paren { .. } => unreachable!("parens are never emitted"),
        }
    }

    /// Pops every operator that binds at least as tightly as an incoming operator with the given
    /// precedence and associativity. A right-associative operator only pops operators that bind
    /// strictly tighter, which is what groups `a^b^c` as `a^(b^c)`.
    fn pop_for(
        output: &mut Vec<Command>,
        ops: &mut Vec<StackEntry>,
        precedence: Precedence,
        associativity: Associativity,
    ) {
        while let Some(top) = ops.last() {
            let top_precedence = match top {
                StackEntry::Bin(op, _) => op.precedence(),
                StackEntry::Neg(_) => Precedence::Neg,
                StackEntry::Paren { .. } => break,
            };

            let pop = match associativity {
                Associativity::Left => top_precedence >= precedence,
                Associativity::Right => top_precedence > precedence,
            };

            if pop {
                Self::emit(output, ops.pop().unwrap());
            } else {
                break;
            }
        }
    }

    /// Pops operators until an opening parenthesis is found, returning that entry. Returns
    /// [`None`] if the stack runs out.
    fn pop_until_paren(output: &mut Vec<Command>, ops: &mut Vec<StackEntry>) -> Option<StackEntry> {
        while let Some(entry) = ops.pop() {
            if matches!(entry, StackEntry::Paren { .. }) {
                return Some(entry);
            }
            Self::emit(output, entry);
        }
        None
    }

    /// Handles the juxtaposition of two value-like tokens by inserting a multiplication with the
    /// same precedence as an explicit `*`.
    fn push_implicit_mul(output: &mut Vec<Command>, ops: &mut Vec<StackEntry>, at: usize) {
        let op = BinOpKind::Mul;
        Self::pop_for(output, ops, op.precedence(), op.associativity());
        ops.push(StackEntry::Bin(op, at..at));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses the input and formats the resulting command stream as one string, commands
    /// separated by spaces and function arities written as `name/arity`.
    fn rpn(input: &str) -> String {
        let commands = Parser::new(input).unwrap().parse().unwrap();
        commands
            .iter()
            .map(|c| match c.node_type {
                command::NodeType::Literal => c.name.clone(),
                command::NodeType::Symbol if c.arity == 0 => c.name.clone(),
                command::NodeType::Symbol => format!("{}/{}", c.name, c.arity),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn parse_err(input: &str) -> Error {
        Parser::new(input).and_then(|p| p.parse().map(|_| ())).unwrap_err()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(rpn("1+2*3"), "1 2 3 */2 +/2");
        assert_eq!(rpn("1*2+3"), "1 2 */2 3 +/2");
        assert_eq!(rpn("1-2-3"), "1 2 -/2 3 -/2");
        assert_eq!(rpn("2^3^4"), "2 3 4 ^/2 ^/2");
        assert_eq!(rpn("6/8%5"), "6 8 //2 5 %/2");
    }

    #[test]
    fn parentheses() {
        assert_eq!(rpn("(1+2)*3"), "1 2 +/2 3 */2");
        assert_eq!(rpn("((x))"), "x");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(rpn("-x"), "x ng/1");
        assert_eq!(rpn("--x"), "x ng/1 ng/1");
        assert_eq!(rpn("-2^2"), "2 2 ^/2 ng/1");
        assert_eq!(rpn("-2*3"), "2 ng/1 3 */2");
        assert_eq!(rpn("2*-3"), "2 3 ng/1 */2");
        assert_eq!(rpn("1--2"), "1 2 ng/1 -/2");
    }

    #[test]
    fn unary_plus_is_a_no_op() {
        assert_eq!(rpn("+x"), "x");
        assert_eq!(rpn("1++2"), "1 2 +/2");
        assert_eq!(rpn("3+ +x"), "3 x +/2");
    }

    #[test]
    fn factorial_is_postfix() {
        assert_eq!(rpn("3!"), "3 !/1");
        assert_eq!(rpn("3!!"), "3 !/1 !/1");
        assert_eq!(rpn("-3!"), "3 !/1 ng/1");
        assert_eq!(rpn("2^3!"), "2 3 !/1 ^/2");
        assert_eq!(rpn("(1+2)!"), "1 2 +/2 !/1");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(rpn("2x"), "2 x */2");
        assert_eq!(rpn("2(3+4)"), "2 3 4 +/2 */2");
        assert_eq!(rpn("(a)(b)"), "a b */2");
        assert_eq!(rpn("4x^2"), "4 x 2 ^/2 */2");
        assert_eq!(rpn("3!2"), "3 !/1 2 */2");
        assert_eq!(rpn("2x y"), "2 x */2 y */2");
    }

    #[test]
    fn function_calls() {
        assert_eq!(rpn("sin(0)"), "0 sin/1");
        assert_eq!(rpn("f(a,b,c)"), "a b c f/3");
        assert_eq!(rpn("f()"), "f/0");
        assert_eq!(rpn("f(g(x),y)"), "x g/1 y f/2");
        assert_eq!(rpn("2sin(x)"), "2 x sin/1 */2");
        // an identifier immediately followed by `(` is always a call
        assert_eq!(rpn("x(x+1)"), "x 1 +/2 x/1");
    }

    #[test]
    fn empty_input_fails_at_position_zero() {
        let err = parse_err("");
        assert_eq!(err.spans, vec![0..0]);
    }

    #[test]
    fn unmatched_open_paren_fails_at_eof() {
        let err = parse_err("(1+2");
        assert_eq!(err.spans[0], 4..4);
    }

    #[test]
    fn unmatched_close_paren_fails_at_its_position() {
        let err = parse_err("1+2)");
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn trailing_operator_fails() {
        let err = parse_err("1+");
        assert_eq!(err.spans, vec![2..2]);
    }

    #[test]
    fn empty_parens_fail() {
        let err = parse_err("()");
        assert_eq!(err.spans, vec![0..2]);
    }

    #[test]
    fn stray_comma_fails() {
        assert_eq!(parse_err("1,2").spans, vec![1..2]);
        assert_eq!(parse_err("(1,2)").spans, vec![2..3]);
    }
}
