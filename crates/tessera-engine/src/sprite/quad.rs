use crate::atlas::{AtlasRegion, TextureAtlas};
use crate::coords::{Rotation, Vec2};
use crate::geometry;
use crate::paint::Color;

use super::SpriteVertex;

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

/// Two triangles over corners TL(0) TR(1) BL(2) BR(3).
pub const QUAD_INDEX_PATTERN: [u32; INDICES_PER_QUAD] = [0, 1, 3, 3, 2, 0];

/// Placement of one sprite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    pub size: Vec2,
    /// Pivot offset is relative to `center`.
    pub rotation: Rotation,
    pub tint: Color,
}

impl Sprite {
    /// Untinted, unrotated sprite.
    #[inline]
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size, rotation: Rotation::NONE, tint: Color::white() }
    }

    #[inline]
    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn tinted(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// The four corner vertices of `sprite` sampling `region` of `atlas`.
pub fn quad_vertices(atlas: &TextureAtlas, region: AtlasRegion, sprite: &Sprite) -> [SpriteVertex; VERTICES_PER_QUAD] {
    let quad = atlas.region_quad(region);
    let (uv0, uv1) = quad.uv_bounds(atlas.width() as f32, atlas.height() as f32);

    let half = sprite.size / 2.0;
    let c = sprite.center;
    let mut corners = [
        Vec2::new(c.x - half.x, c.y - half.y),
        Vec2::new(c.x + half.x, c.y - half.y),
        Vec2::new(c.x - half.x, c.y + half.y),
        Vec2::new(c.x + half.x, c.y + half.y),
    ];
    if !sprite.rotation.is_identity() {
        geometry::rotate_points(&mut corners, c + sprite.rotation.offset, sprite.rotation.angle);
    }

    let uvs = [[uv0.x, uv0.y], [uv1.x, uv0.y], [uv0.x, uv1.y], [uv1.x, uv1.y]];
    let color = sprite.tint.to_array();
    let texture_index = atlas.unit().index() as f32;

    core::array::from_fn(|i| SpriteVertex {
        position: [corners[i].x, corners[i].y],
        uv: uvs[i],
        color,
        texture_index,
    })
}

/// Index pattern offset to the quad whose first vertex is `base_vertex`.
#[inline]
pub fn quad_indices(base_vertex: u32) -> [u32; INDICES_PER_QUAD] {
    QUAD_INDEX_PATTERN.map(|i| i + base_vertex)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use core::f32::consts::PI;

    use super::*;
    use crate::atlas::{AtlasImage, TextureUnits};
    use crate::backend::RecordingBackend;
    use crate::coords::Rect;

    fn atlas() -> TextureAtlas {
        let mut backend = RecordingBackend::new();
        let mut units = TextureUnits::default();
        let rgba = vec![0; 256 * 128 * 4];
        TextureAtlas::new(&mut backend, &mut units, AtlasImage::new(256, 128, &rgba), 4, 2)
    }

    #[test]
    fn corners_are_centred_with_cell_uvs() {
        let a = atlas();
        let v = quad_vertices(&a, AtlasRegion::Cell(5), &Sprite::new(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0)));

        assert_eq!(v[0].position, [90.0, 45.0]);
        assert_eq!(v[1].position, [110.0, 45.0]);
        assert_eq!(v[2].position, [90.0, 55.0]);
        assert_eq!(v[3].position, [110.0, 55.0]);

        assert_eq!(v[0].uv, [0.25, 0.5]);
        assert_eq!(v[1].uv, [0.5, 0.5]);
        assert_eq!(v[2].uv, [0.25, 1.0]);
        assert_eq!(v[3].uv, [0.5, 1.0]);

        assert!(v.iter().all(|v| v.color == [1.0, 1.0, 1.0] && v.texture_index == 0.0));
    }

    #[test]
    fn explicit_quad_and_tint() {
        let a = atlas();
        let sprite = Sprite::new(Vec2::zero(), Vec2::new(2.0, 2.0)).tinted(Color::rgb(0.5, 0.25, 1.0));
        let v = quad_vertices(&a, Rect::new(0.0, 0.0, 128.0, 32.0).into(), &sprite);

        assert_eq!(v[3].uv, [0.5, 0.25]);
        assert_eq!(v[2].color, [0.5, 0.25, 1.0]);
    }

    #[test]
    fn rotation_pivots_on_centre_plus_offset() {
        let a = atlas();
        let sprite = Sprite::new(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0))
            .rotated(Rotation::new(PI).around(Vec2::new(2.0, 0.0)));
        let v = quad_vertices(&a, AtlasRegion::Cell(0), &sprite);

        // Half turn about (12, 10): TL (8, 9) -> (16, 11).
        assert_abs_diff_eq!(v[0].position[0], 16.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v[0].position[1], 11.0, epsilon = 1e-4);
        // UVs are untouched by rotation.
        assert_eq!(v[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn indices_offset_by_base_vertex() {
        assert_eq!(quad_indices(0), [0, 1, 3, 3, 2, 0]);
        assert_eq!(quad_indices(8), [8, 9, 11, 11, 10, 8]);
    }
}
