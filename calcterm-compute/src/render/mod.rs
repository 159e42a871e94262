//! Rendering of expression trees, both as one-line infix text and as a two-dimensional
//! character grid.

pub mod char_map;
pub mod grid;
pub mod one_line;

pub use char_map::CharMap;
pub use grid::grid;
pub use one_line::one_line;
