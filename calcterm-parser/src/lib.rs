//! Tokenizer and infix parser for `calcterm`.
//!
//! The parser in this crate does not build expression trees directly. Instead, it converts the
//! token stream into a flat [`Command`](parser::command::Command) sequence in reverse Polish
//! order, using the shunting-yard algorithm to resolve operator precedence and associativity.
//! The expression builder in `calcterm-compute` folds that sequence into a tree.
//!
//! This split keeps the parser free of any knowledge about expression representation or number
//! parsing; a literal travels through this crate as the exact slice of source code it was matched
//! from.

pub mod parser;
pub mod tokenizer;

pub use parser::{command::Command, Parser};
