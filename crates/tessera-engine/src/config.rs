/// Tuning parameters for [`crate::Graphics`] and the batchers it owns.
///
/// Growth values are in batch units: lines, points, sprite quads.
#[derive(Debug, Clone)]
pub struct GraphicsConfig {
    /// Lines added when the line batch fills up.
    pub line_growth: usize,

    /// Points added when the point batch fills up.
    pub point_growth: usize,

    /// Quads added when the dynamic sprite batch fills up.
    pub sprite_growth: usize,

    /// Quads the dynamic sprite batch is allocated with.
    pub sprite_initial_capacity: usize,

    /// Quads added when a [`crate::sprite::StaticRenderContainer`] fills up.
    pub static_growth: usize,

    /// Texture units handed out before atlases receive the invalid unit.
    ///
    /// Clamped to [`crate::backend::TextureUnit::COUNT`].
    pub max_texture_units: u32,

    /// Points generated by [`crate::Graphics::circle`].
    pub circle_precision: u32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            line_growth: 10,
            point_growth: 10,
            sprite_growth: 10,
            sprite_initial_capacity: 10,
            static_growth: 100,
            max_texture_units: 16,
            circle_precision: 16,
        }
    }
}
