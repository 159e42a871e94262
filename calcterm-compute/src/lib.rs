//! Symbolic computation for `calcterm`: the expression tree and its builder, the restructurer
//! framework, the simplification pipeline, the numeric evaluator, and the renderers.
//!
//! The expression representation is deliberately small: nine node kinds, built exclusively
//! through [`expr::builder`], rewritten exclusively through [`expr::visit::Restructurer`]
//! passes. Arbitrary-precision arithmetic is delegated to [`rug`] behind the [`Number`] type.

pub mod consts;
pub mod eval;
pub mod expr;
pub mod number;
pub mod primitive;
pub mod render;
pub mod simplify;

pub use eval::evaluate;
pub use expr::{builder, visit::Restructurer, Expr, Sign};
pub use number::Number;
pub use render::{grid, one_line, CharMap};
pub use simplify::{simplify, simplify_with, SimplifyOptions};
