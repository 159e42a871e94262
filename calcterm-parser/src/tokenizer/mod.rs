pub mod token;

use logos::{Lexer, Logos};
use std::ops::Range;
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer.
///
/// Token rules are tried in priority order, longest match first, so multi-character lexemes win
/// over their prefixes. If no rule matches at some position, the span of the offending input is
/// returned instead; its start is the position tokenization stopped at.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, Range<usize>> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => return Err(lexer.span()),
        }
    }

    Ok(tokens.into_boxed_slice())
}
