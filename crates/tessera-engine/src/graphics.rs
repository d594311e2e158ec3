//! One owner for the backend and every batcher drawing through it.

use crate::atlas::{AtlasError, AtlasImage, AtlasRegion, TextureAtlas, TextureUnits};
use crate::backend::{GpuBackend, ShaderProgram, TextureHandle, UniformValue};
use crate::config::GraphicsConfig;
use crate::coords::{Rect, Rotation, Vec2, Viewport};
use crate::paint::Color;
use crate::shapes::{ShapeBatcher, ShapeMode};
use crate::sprite::{Sprite, SpriteBatcher, StaticRenderContainer};
use crate::text::{FontMetrics, PrintValue, TextPrinter, TextStyle};

/// The drawing surface of an application.
///
/// Owns the backend, the texture-unit counter, the shape and sprite batchers
/// and the optional font. Dropping it releases every GPU resource it created,
/// newest first.
pub struct Graphics<B: GpuBackend> {
    backend: B,
    config: GraphicsConfig,
    units: TextureUnits,
    shapes: ShapeBatcher,
    sprites: SpriteBatcher,
    font: Option<TextPrinter>,
    textures: Vec<TextureHandle>,
    warned_no_font: bool,
}

impl<B: GpuBackend> Graphics<B> {
    pub fn new(mut backend: B, config: GraphicsConfig) -> Self {
        let units = TextureUnits::new(config.max_texture_units);
        let shapes = ShapeBatcher::new(&mut backend, &config);
        let sprites = SpriteBatcher::new(&mut backend, &config);
        log::debug!("graphics ready ({} texture units)", units.limit());

        Self {
            backend,
            config,
            units,
            shapes,
            sprites,
            font: None,
            textures: Vec::new(),
            warned_no_font: false,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn config(&self) -> &GraphicsConfig {
        &self.config
    }

    #[inline]
    pub fn units(&self) -> &TextureUnits {
        &self.units
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeBatcher {
        &self.shapes
    }

    #[inline]
    pub fn sprites(&self) -> &SpriteBatcher {
        &self.sprites
    }

    #[inline]
    pub fn font(&self) -> Option<&TextPrinter> {
        self.font.as_ref()
    }

    /// Pushes the viewport size to both programs.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        for program in [ShaderProgram::Shape, ShaderProgram::Sprite] {
            self.backend.bind_program(program);
            self.backend.set_uniform("u_viewport", UniformValue::from(viewport));
        }
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// Uploads an atlas image and claims the next texture unit for it.
    ///
    /// The texture belongs to `self`: it is released on drop, or earlier via
    /// [`release_atlas`](Self::release_atlas). Do not call
    /// [`TextureAtlas::destroy`] on the result.
    pub fn create_atlas(&mut self, image: AtlasImage<'_>, cells_wide: u32, cells_high: u32) -> TextureAtlas {
        let atlas = TextureAtlas::new(&mut self.backend, &mut self.units, image, cells_wide, cells_high);
        self.textures.push(atlas.texture());
        atlas
    }

    /// [`create_atlas`](Self::create_atlas) that rejects uneven grids and
    /// malformed pixel data.
    pub fn create_atlas_checked(
        &mut self,
        image: AtlasImage<'_>,
        cells_wide: u32,
        cells_high: u32,
    ) -> Result<TextureAtlas, AtlasError> {
        let atlas = TextureAtlas::checked(&mut self.backend, &mut self.units, image, cells_wide, cells_high)?;
        self.textures.push(atlas.texture());
        Ok(atlas)
    }

    /// Releases an atlas made by this `Graphics` now instead of on drop.
    /// Its texture unit stays claimed. Atlases from elsewhere are left alone.
    pub fn release_atlas(&mut self, atlas: TextureAtlas) {
        let Some(at) = self.textures.iter().position(|&t| t == atlas.texture()) else {
            log::warn!("release_atlas: {:?} is not owned by this Graphics", atlas.texture());
            return;
        };
        self.textures.remove(at);
        atlas.destroy(&mut self.backend);
    }

    /// Installs the font used by [`print`](Self::print). A previous font's
    /// texture is released; its texture unit is not.
    pub fn load_font(&mut self, metrics: FontMetrics, rgba: &[u8]) {
        let printer = TextPrinter::from_metrics(&mut self.backend, &mut self.units, metrics, rgba);
        if let Some(old) = self.font.replace(printer) {
            old.destroy(&mut self.backend);
        }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn polygon(&mut self, mode: ShapeMode, vertices: &[Vec2], color: Color) {
        self.shapes.polygon(&mut self.backend, mode, vertices, color);
    }

    pub fn rectangle(&mut self, mode: ShapeMode, rect: Rect, rotation: Rotation, color: Color) {
        self.shapes.rectangle(&mut self.backend, mode, rect, rotation, color);
    }

    /// Circle at the configured default precision.
    pub fn circle(&mut self, mode: ShapeMode, center: Vec2, radius: f32, color: Color) {
        let precision = self.config.circle_precision;
        self.shapes.circle(&mut self.backend, mode, center, radius, color, precision);
    }

    pub fn circle_with_precision(&mut self, mode: ShapeMode, center: Vec2, radius: f32, color: Color, precision: u32) {
        self.shapes.circle(&mut self.backend, mode, center, radius, color, precision);
    }

    pub fn batch_lines_push(&mut self) {
        self.shapes.batch_lines_push(&mut self.backend);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.shapes.line(&mut self.backend, from, to, color);
    }

    pub fn batch_lines_pop(&mut self) {
        self.shapes.batch_lines_pop(&mut self.backend);
    }

    pub fn batch_points_push(&mut self) {
        self.shapes.batch_points_push(&mut self.backend);
    }

    pub fn point(&mut self, at: Vec2, color: Color, size: f32) {
        self.shapes.point(&mut self.backend, at, color, size);
    }

    pub fn batch_points_pop(&mut self, point_size: f32) {
        self.shapes.batch_points_pop(&mut self.backend, point_size);
    }

    #[inline]
    pub fn is_batched(&self) -> bool {
        self.shapes.is_batched()
    }

    // ── sprites ───────────────────────────────────────────────────────────

    pub fn draw(&mut self, atlas: &TextureAtlas, region: impl Into<AtlasRegion>, sprite: &Sprite) {
        self.sprites.draw(&mut self.backend, atlas, region, sprite);
    }

    pub fn draw_compiled(&mut self, container: &StaticRenderContainer) {
        self.sprites.draw_compiled(&mut self.backend, container);
    }

    /// A container sized by the configured static growth step.
    pub fn static_container(&self) -> StaticRenderContainer {
        StaticRenderContainer::with_growth(self.config.static_growth)
    }

    pub fn compile_static(
        container: &mut StaticRenderContainer,
        atlas: &TextureAtlas,
        region: impl Into<AtlasRegion>,
        sprite: &Sprite,
    ) {
        SpriteBatcher::compile_static(container, atlas, region, sprite);
    }

    pub fn load_static_data(&mut self, container: &StaticRenderContainer) {
        self.sprites.load_static_data(&mut self.backend, container);
    }

    pub fn clear_static_data(&mut self) {
        self.sprites.clear_static_data(&mut self.backend);
    }

    /// Draws the static sprite layer and this frame's sprites.
    pub fn render(&mut self) {
        self.sprites.render(&mut self.backend);
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Queues `value` as sprites. Without a loaded font nothing is drawn.
    pub fn print(&mut self, value: impl Into<PrintValue>, origin: Vec2, style: &TextStyle) {
        let Some(font) = self.font.as_ref() else {
            if !self.warned_no_font {
                log::warn!("print called before load_font; text is not drawn");
                self.warned_no_font = true;
            }
            return;
        };
        font.print(&mut self.sprites, &mut self.backend, value, origin, style);
    }
}

impl<B: GpuBackend> Drop for Graphics<B> {
    fn drop(&mut self) {
        if let Some(font) = self.font.take() {
            font.destroy(&mut self.backend);
        }
        for texture in self.textures.drain(..).rev() {
            self.backend.destroy_texture(texture);
        }
        self.sprites.destroy(&mut self.backend);
        self.shapes.destroy(&mut self.backend);
        log::debug!("graphics resources released");
    }
}
