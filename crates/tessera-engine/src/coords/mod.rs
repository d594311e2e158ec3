//! Coordinate and geometry types shared by the batchers and backends.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//!
//! Backends convert to clip space using the `u_viewport` uniform.

mod rect;
mod rotation;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use rotation::Rotation;
pub use vec2::Vec2;
pub use viewport::Viewport;
