use super::Vec2;

/// Rotation applied to a shape or sprite at submission time.
///
/// `angle` is in radians. `offset` displaces the pivot from the shape's own
/// anchor (top-left for rectangles, centre for sprites), not from the world
/// origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rotation {
    pub angle: f32,
    pub offset: Vec2,
}

impl Rotation {
    /// No rotation.
    pub const NONE: Rotation = Rotation { angle: 0.0, offset: Vec2::zero() };

    /// Rotation about the anchor itself.
    #[inline]
    pub const fn new(angle: f32) -> Self {
        Self { angle, offset: Vec2::zero() }
    }

    /// Moves the pivot by `offset` relative to the anchor.
    #[inline]
    pub const fn around(self, offset: Vec2) -> Self {
        Self { angle: self.angle, offset }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self.angle == 0.0
    }
}
