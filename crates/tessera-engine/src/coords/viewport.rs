/// Viewport size in pixels.
///
/// Backends treat this as the basis for converting pixel positions to clip
/// space in their shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size as the `[w, h]` pair uploaded to the `u_viewport` uniform.
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}
