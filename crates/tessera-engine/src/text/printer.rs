use crate::atlas::{AtlasImage, AtlasRegion, TextureAtlas, TextureUnits};
use crate::backend::GpuBackend;
use crate::coords::{Rotation, Vec2};
use crate::paint::Color;
use crate::sprite::{Sprite, SpriteBatcher};

use super::{FontMetrics, PrintValue};

/// How a string is placed and coloured.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub scale: f32,
    /// Radians; the string turns rigidly about its start.
    pub rotation: f32,
    /// Decimal places kept for floats, see [`super::truncate_digits`].
    pub digits: Option<usize>,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { scale: 1.0, rotation: 0.0, digits: None, color: Color::white() }
    }
}

/// Draws strings glyph by glyph from a font atlas.
#[derive(Debug, Clone)]
pub struct TextPrinter {
    atlas: TextureAtlas,
    metrics: FontMetrics,
}

impl TextPrinter {
    pub fn new(atlas: TextureAtlas, metrics: FontMetrics) -> Self {
        Self { atlas, metrics }
    }

    /// Uploads the font image and builds its atlas from the metrics grid.
    pub fn from_metrics(
        backend: &mut dyn GpuBackend,
        units: &mut TextureUnits,
        metrics: FontMetrics,
        rgba: &[u8],
    ) -> Self {
        let (cells_wide, cells_high) = metrics.grid();
        let image = AtlasImage::new(metrics.image_width, metrics.image_height, rgba);
        let atlas = TextureAtlas::new(backend, units, image, cells_wide, cells_high);
        Self::new(atlas, metrics)
    }

    #[inline]
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    #[inline]
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Queues `value` on `sprites`, with the first glyph cell's top-left
    /// corner at `origin`.
    pub fn print(
        &self,
        sprites: &mut SpriteBatcher,
        backend: &mut dyn GpuBackend,
        value: impl Into<PrintValue>,
        origin: Vec2,
        style: &TextStyle,
    ) {
        let text = value.into().render(style.digits);
        for (cell, glyph) in self.layout(&text, origin, style) {
            sprites.draw(backend, &self.atlas, AtlasRegion::Cell(cell), &glyph);
        }
    }

    /// Atlas cell and sprite placement of every byte of `text`.
    pub fn layout(&self, text: &str, origin: Vec2, style: &TextStyle) -> Vec<(u32, Sprite)> {
        let m = &self.metrics;
        let size = Vec2::new(m.cell_width as f32, m.cell_height as f32) * style.scale;
        let mut offset = size / 2.0;

        text.bytes()
            .map(|byte| {
                let glyph = Sprite {
                    center: origin + offset,
                    size,
                    rotation: Rotation::new(style.rotation).around(Vec2::new(-offset.x, 0.0)),
                    tint: style.color,
                };
                offset.x += m.advance(byte) as f32 * style.scale;
                (m.cell_of(byte), glyph)
            })
            .collect()
    }

    /// Total pen advance of `text` at `scale`.
    pub fn measure(&self, text: &str, scale: f32) -> f32 {
        text.bytes().map(|b| self.metrics.advance(b) as f32).sum::<f32>() * scale
    }

    /// Releases the font texture. Not for the font installed in a
    /// `Graphics`, which releases it itself.
    pub fn destroy(&self, backend: &mut dyn GpuBackend) {
        self.atlas.destroy(backend);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use core::f32::consts::PI;

    use super::*;
    use crate::backend::RecordingBackend;
    use crate::config::GraphicsConfig;

    fn metrics() -> FontMetrics {
        let mut m = FontMetrics::monospace(16, 32, 32, 256, 192);
        m.widths[b'i' as usize] = 6;
        m
    }

    fn setup() -> (RecordingBackend, SpriteBatcher, TextPrinter) {
        let mut backend = RecordingBackend::new();
        let mut units = TextureUnits::default();
        let sprites = SpriteBatcher::new(&mut backend, &GraphicsConfig::default());
        let rgba = vec![255; 256 * 192 * 4];
        let printer = TextPrinter::from_metrics(&mut backend, &mut units, metrics(), &rgba);
        (backend, sprites, printer)
    }

    #[test]
    fn atlas_grid_comes_from_metrics() {
        let (_, _, printer) = setup();
        assert_eq!(printer.atlas().cells_wide(), 16);
        assert_eq!(printer.atlas().cells_high(), 6);
        assert_eq!(printer.atlas().get_quad(1).size, Vec2::new(16.0, 32.0));
    }

    #[test]
    fn glyphs_advance_by_authored_width() {
        let (_, _, printer) = setup();
        let style = TextStyle { scale: 2.0, ..TextStyle::default() };
        let glyphs = printer.layout("ii!", Vec2::new(100.0, 50.0), &style);

        let cells: Vec<u32> = glyphs.iter().map(|g| g.0).collect();
        assert_eq!(cells, vec![73, 73, 1]);

        assert_eq!(glyphs[0].1.center, Vec2::new(116.0, 82.0));
        assert_eq!(glyphs[1].1.center, Vec2::new(128.0, 82.0));
        assert_eq!(glyphs[2].1.center, Vec2::new(140.0, 82.0));
        assert_eq!(glyphs[0].1.size, Vec2::new(32.0, 64.0));
    }

    #[test]
    fn every_glyph_pivots_on_the_string_start() {
        let (_, _, printer) = setup();
        let style = TextStyle { rotation: PI, ..TextStyle::default() };
        for (_, g) in printer.layout("abc", Vec2::zero(), &style) {
            let pivot = g.center + g.rotation.offset;
            assert_abs_diff_eq!(pivot.x, 0.0, epsilon = 1e-5);
            assert_eq!(pivot.y, 16.0);
            assert_eq!(g.rotation.angle, PI);
        }
    }

    #[test]
    fn print_queues_one_sprite_per_byte() {
        let (mut backend, mut sprites, printer) = setup();
        let style = TextStyle { digits: Some(2), color: Color::rgb(1.0, 0.0, 0.0), ..TextStyle::default() };
        printer.print(&mut sprites, &mut backend, 3.14159f32, Vec2::zero(), &style);

        assert_eq!(sprites.draw_count(), 4);
        let v = sprites.pending_vertices();
        assert!(v.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        // '.' is cell 14: column 14 of the first row.
        assert_eq!(v[4].uv, [14.0 * 16.0 / 256.0, 0.0]);
    }

    #[test]
    fn booleans_print_as_words() {
        let (mut backend, mut sprites, printer) = setup();
        printer.print(&mut sprites, &mut backend, false, Vec2::zero(), &TextStyle::default());
        assert_eq!(sprites.draw_count(), 5);
    }

    #[test]
    fn measure_sums_advances() {
        let (_, _, printer) = setup();
        assert_eq!(printer.measure("iA", 1.0), 22.0);
        assert_eq!(printer.measure("iA", 0.5), 11.0);
        assert_eq!(printer.measure("", 3.0), 0.0);
    }
}
