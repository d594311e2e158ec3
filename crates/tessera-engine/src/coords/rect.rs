use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
///
/// Also serves as the atlas quad: `(x, y, width, height)` in atlas pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Corners in clockwise order starting at the origin: TL, TR, BR, BL.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }

    /// Divides the rectangle by a texture size, producing `(u0, v0)`/`(u1, v1)`.
    #[inline]
    pub fn uv_bounds(self, texture_width: f32, texture_height: f32) -> (Vec2, Vec2) {
        let min = self.min();
        let max = self.max();
        (
            Vec2::new(min.x / texture_width, min.y / texture_height),
            Vec2::new(max.x / texture_width, max.y / texture_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── corners ───────────────────────────────────────────────────────────

    #[test]
    fn corners_are_clockwise_from_top_left() {
        let c = r(1.0, 2.0, 10.0, 20.0).corners();
        assert_eq!(c[0], Vec2::new(1.0, 2.0));
        assert_eq!(c[1], Vec2::new(11.0, 2.0));
        assert_eq!(c[2], Vec2::new(11.0, 22.0));
        assert_eq!(c[3], Vec2::new(1.0, 22.0));
    }

    // ── uv_bounds ─────────────────────────────────────────────────────────

    #[test]
    fn uv_bounds_divides_by_texture_size() {
        let (uv0, uv1) = r(64.0, 64.0, 64.0, 64.0).uv_bounds(256.0, 128.0);
        assert_eq!(uv0, Vec2::new(0.25, 0.5));
        assert_eq!(uv1, Vec2::new(0.5, 1.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
