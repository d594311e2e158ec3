//! Colour model shared by the batchers.
//!
//! Colours are straight RGB triples; one triple tints a whole shape draw or a
//! whole sprite quad.

pub mod color;

pub use color::Color;
