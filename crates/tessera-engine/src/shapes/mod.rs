//! Flat-coloured polygons, rectangles, circles, and batched lines and points.

mod batcher;
mod buffers;

pub use batcher::{BatchMode, ShapeBatcher, ShapeMode};
pub use buffers::ShapeBuffers;
