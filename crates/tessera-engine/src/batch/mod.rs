//! CPU-side append buffers mirrored into a pair of GPU buffers.

mod growable;

pub use growable::{BatchLayout, GrowableBatch};
