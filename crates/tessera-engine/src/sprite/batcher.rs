use crate::atlas::{AtlasRegion, TextureAtlas};
use crate::backend::{
    BufferHandle, BufferKind, BufferUsage, DrawCall, GpuBackend, ShaderProgram, TextureUnit, Topology,
    UniformValue,
};
use crate::batch::{BatchLayout, GrowableBatch};
use crate::config::GraphicsConfig;

use super::quad::{quad_indices, quad_vertices, Sprite, INDICES_PER_QUAD, VERTICES_PER_QUAD};
use super::{SpriteVertex, StaticRenderContainer};

/// Collects textured quads for one frame and draws them, after the loaded
/// static set, in a single indexed call.
#[derive(Debug)]
pub struct SpriteBatcher {
    dynamic: GrowableBatch<SpriteVertex, u32>,
    static_vertices: BufferHandle,
    static_indices: BufferHandle,
    static_count: usize,
}

impl SpriteBatcher {
    /// Allocates the dynamic batch and points the sprite program's samplers
    /// at units `0..16`.
    pub fn new(backend: &mut dyn GpuBackend, config: &GraphicsConfig) -> Self {
        let vertices = backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic);
        let indices = backend.create_buffer(BufferKind::Index, BufferUsage::Dynamic);
        let dynamic = GrowableBatch::with_capacity(
            backend,
            BatchLayout::new(VERTICES_PER_QUAD, INDICES_PER_QUAD, config.sprite_growth),
            vertices,
            indices,
            config.sprite_initial_capacity,
        );

        let static_vertices = backend.create_buffer(BufferKind::Vertex, BufferUsage::Static);
        let static_indices = backend.create_buffer(BufferKind::Index, BufferUsage::Static);

        backend.bind_program(ShaderProgram::Sprite);
        backend.set_uniform(
            "u_textures",
            UniformValue::IntArray((0..TextureUnit::COUNT as i32).collect()),
        );

        Self { dynamic, static_vertices, static_indices, static_count: 0 }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn draw_count(&self) -> usize {
        self.dynamic.len()
    }

    #[inline]
    pub fn draw_capacity(&self) -> usize {
        self.dynamic.capacity()
    }

    #[inline]
    pub fn static_count(&self) -> usize {
        self.static_count
    }

    /// Dynamic `(vertex, index)` buffers.
    #[inline]
    pub fn dynamic_buffers(&self) -> (BufferHandle, BufferHandle) {
        (self.dynamic.primary_buffer(), self.dynamic.secondary_buffer())
    }

    /// Static `(vertex, index)` buffers.
    #[inline]
    pub fn static_buffers(&self) -> (BufferHandle, BufferHandle) {
        (self.static_vertices, self.static_indices)
    }

    /// Vertices queued for the next [`render`](Self::render).
    #[inline]
    pub fn pending_vertices(&self) -> &[SpriteVertex] {
        self.dynamic.primary()
    }

    // ── dynamic ───────────────────────────────────────────────────────────

    /// Queues one sprite for this frame.
    pub fn draw(
        &mut self,
        backend: &mut dyn GpuBackend,
        atlas: &TextureAtlas,
        region: impl Into<AtlasRegion>,
        sprite: &Sprite,
    ) {
        let vertices = quad_vertices(atlas, region.into(), sprite);
        self.push_quad(backend, &vertices);
    }

    /// Queues every quad of a compiled container for this frame only.
    pub fn draw_compiled(&mut self, backend: &mut dyn GpuBackend, container: &StaticRenderContainer) {
        for quad in container.vertices().chunks_exact(VERTICES_PER_QUAD) {
            self.push_quad(backend, quad);
        }
    }

    fn push_quad(&mut self, backend: &mut dyn GpuBackend, vertices: &[SpriteVertex]) {
        let base = (self.dynamic.len() * VERTICES_PER_QUAD) as u32;
        self.dynamic.push(backend, vertices, &quad_indices(base));
    }

    // ── static ────────────────────────────────────────────────────────────

    /// Compiles one sprite into `container` for later loading.
    pub fn compile_static(
        container: &mut StaticRenderContainer,
        atlas: &TextureAtlas,
        region: impl Into<AtlasRegion>,
        sprite: &Sprite,
    ) {
        container.push_sprite(atlas, region.into(), sprite);
    }

    /// Replaces the static layer with the contents of `container`.
    pub fn load_static_data(&mut self, backend: &mut dyn GpuBackend, container: &StaticRenderContainer) {
        backend.upload_full(self.static_vertices, bytemuck::cast_slice(container.vertices()));
        backend.upload_full(self.static_indices, bytemuck::cast_slice(container.indices()));
        self.static_count = container.count();
        log::debug!("static sprite layer loaded: {} quads", self.static_count);
    }

    /// Empties the static layer.
    pub fn clear_static_data(&mut self, backend: &mut dyn GpuBackend) {
        backend.allocate(self.static_vertices, 0);
        backend.allocate(self.static_indices, 0);
        self.static_count = 0;
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Draws the static layer, then this frame's sprites, then empties the
    /// dynamic batch.
    pub fn render(&mut self, backend: &mut dyn GpuBackend) {
        backend.bind_program(ShaderProgram::Sprite);

        backend.draw(&DrawCall {
            topology: Topology::Triangles,
            vertices: self.static_vertices,
            colors: None,
            indices: Some(self.static_indices),
            count: (self.static_count * INDICES_PER_QUAD) as u32,
            point_size: None,
        });

        self.dynamic.upload(backend);
        backend.draw(&DrawCall {
            topology: Topology::Triangles,
            vertices: self.dynamic.primary_buffer(),
            colors: None,
            indices: Some(self.dynamic.secondary_buffer()),
            count: (self.dynamic.len() * INDICES_PER_QUAD) as u32,
            point_size: None,
        });

        self.dynamic.reset();
    }

    /// Releases all four buffers.
    pub fn destroy(&self, backend: &mut dyn GpuBackend) {
        backend.destroy_buffer(self.static_indices);
        backend.destroy_buffer(self.static_vertices);
        backend.destroy_buffer(self.dynamic.secondary_buffer());
        backend.destroy_buffer(self.dynamic.primary_buffer());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AtlasImage, TextureUnits};
    use crate::backend::{BackendEvent, RecordingBackend};
    use crate::coords::Vec2;

    struct Fixture {
        backend: RecordingBackend,
        units: TextureUnits,
        sprites: SpriteBatcher,
    }

    impl Fixture {
        fn new() -> Self {
            let mut backend = RecordingBackend::new();
            let sprites = SpriteBatcher::new(&mut backend, &GraphicsConfig::default());
            Self { backend, units: TextureUnits::default(), sprites }
        }

        fn atlas(&mut self) -> TextureAtlas {
            let rgba = vec![0; 64 * 64 * 4];
            TextureAtlas::new(&mut self.backend, &mut self.units, AtlasImage::new(64, 64, &rgba), 2, 2)
        }
    }

    fn sprite_at(x: f32) -> Sprite {
        Sprite::new(Vec2::new(x, 0.0), Vec2::new(8.0, 8.0))
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn samplers_are_pointed_at_all_sixteen_units() {
        let f = Fixture::new();
        assert!(f.backend.events().contains(&BackendEvent::SetUniform {
            program: Some(ShaderProgram::Sprite),
            name: "u_textures".into(),
            value: UniformValue::IntArray((0..16).collect()),
        }));
        assert_eq!(f.sprites.draw_capacity(), 10);
    }

    // ── dynamic batch ─────────────────────────────────────────────────────

    #[test]
    fn eleven_sprites_grow_capacity_by_ten_without_loss() {
        let mut f = Fixture::new();
        let atlas = f.atlas();
        for i in 0..11 {
            f.sprites.draw(&mut f.backend, &atlas, 0u32, &sprite_at(i as f32 * 10.0));
        }

        assert_eq!(f.sprites.draw_count(), 11);
        assert_eq!(f.sprites.draw_capacity(), 20);
        let (vbo, ibo) = f.sprites.dynamic_buffers();
        assert_eq!(f.backend.buffer_byte_size(vbo), 20 * 4 * 32);
        assert_eq!(f.backend.buffer_byte_size(ibo), 20 * 6 * 4);

        f.sprites.render(&mut f.backend);
        let verts = f.backend.buffer_as::<SpriteVertex>(vbo);
        for i in 0..11 {
            assert_eq!(verts[i * 4].position, [i as f32 * 10.0 - 4.0, -4.0]);
        }
        let indices = f.backend.buffer_as::<u32>(ibo);
        assert_eq!(&indices[60..66], &[40, 41, 43, 43, 42, 40]);
        assert_eq!(f.backend.draws().last().map(|d| d.count), Some(66));
    }

    #[test]
    fn render_resets_the_dynamic_batch() {
        let mut f = Fixture::new();
        let atlas = f.atlas();
        f.sprites.draw(&mut f.backend, &atlas, 1u32, &sprite_at(0.0));
        f.sprites.render(&mut f.backend);
        assert_eq!(f.sprites.draw_count(), 0);

        f.sprites.render(&mut f.backend);
        assert_eq!(f.backend.draws().last().map(|d| d.count), Some(0));
        assert_eq!(f.sprites.draw_capacity(), 10);
    }

    #[test]
    fn draw_compiled_replays_with_fresh_offsets() {
        let mut f = Fixture::new();
        let atlas = f.atlas();
        let mut container = StaticRenderContainer::new();
        SpriteBatcher::compile_static(&mut container, &atlas, 0u32, &sprite_at(1.0));
        SpriteBatcher::compile_static(&mut container, &atlas, 1u32, &sprite_at(2.0));

        f.sprites.draw(&mut f.backend, &atlas, 3u32, &sprite_at(0.0));
        f.sprites.draw_compiled(&mut f.backend, &container);
        assert_eq!(f.sprites.draw_count(), 3);
        assert_eq!(&f.sprites.pending_vertices()[4..], container.vertices());

        f.sprites.render(&mut f.backend);
        let (_, ibo) = f.sprites.dynamic_buffers();
        assert_eq!(&f.backend.buffer_as::<u32>(ibo)[6..12], &[4, 5, 7, 7, 6, 4]);
    }

    // ── static layer ──────────────────────────────────────────────────────

    #[test]
    fn static_layer_draws_before_dynamic() {
        let mut f = Fixture::new();
        let atlas = f.atlas();
        let mut container = StaticRenderContainer::new();
        for i in 0..3u32 {
            SpriteBatcher::compile_static(&mut container, &atlas, i, &sprite_at(i as f32));
        }
        f.sprites.load_static_data(&mut f.backend, &container);
        f.sprites.draw(&mut f.backend, &atlas, 0u32, &sprite_at(0.0));
        f.backend.clear_events();

        f.sprites.render(&mut f.backend);

        let (svbo, sibo) = f.sprites.static_buffers();
        let (dvbo, dibo) = f.sprites.dynamic_buffers();
        let draws = f.backend.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!((draws[0].vertices, draws[0].indices, draws[0].count), (svbo, Some(sibo), 18));
        assert_eq!((draws[1].vertices, draws[1].indices, draws[1].count), (dvbo, Some(dibo), 6));
        assert!(draws.iter().all(|d| d.topology == Topology::Triangles && d.colors.is_none()));
        assert_eq!(f.backend.events()[0], BackendEvent::BindProgram(ShaderProgram::Sprite));

        assert_eq!(f.backend.buffer_as::<SpriteVertex>(svbo), container.vertices());
        assert_eq!(f.backend.buffer_as::<u32>(sibo), container.indices());
    }

    #[test]
    fn cleared_static_layer_draws_zero_indices() {
        let mut f = Fixture::new();
        let atlas = f.atlas();
        let mut container = StaticRenderContainer::new();
        SpriteBatcher::compile_static(&mut container, &atlas, 0u32, &sprite_at(0.0));
        f.sprites.load_static_data(&mut f.backend, &container);

        f.sprites.clear_static_data(&mut f.backend);
        f.sprites.render(&mut f.backend);

        let (svbo, _) = f.sprites.static_buffers();
        assert_eq!(f.sprites.static_count(), 0);
        assert_eq!(f.backend.buffer_byte_size(svbo), 0);
        assert_eq!(f.backend.draws()[0].count, 0);
    }

    #[test]
    fn static_draw_is_issued_even_when_empty() {
        let mut f = Fixture::new();
        f.sprites.render(&mut f.backend);
        assert_eq!(f.backend.draws().len(), 2);
    }

    // ── texture units ─────────────────────────────────────────────────────

    #[test]
    fn seventeenth_atlas_carries_the_invalid_index() {
        let mut f = Fixture::new();
        let atlases: Vec<_> = (0..17).map(|_| f.atlas()).collect();
        f.sprites.draw(&mut f.backend, &atlases[15], 0u32, &sprite_at(0.0));
        f.sprites.draw(&mut f.backend, &atlases[16], 0u32, &sprite_at(0.0));

        let verts = f.sprites.pending_vertices();
        assert!(verts[..4].iter().all(|v| v.texture_index == 15.0));
        assert!(verts[4..].iter().all(|v| v.texture_index == 16.0));
    }

    #[test]
    fn destroy_releases_all_buffers() {
        let mut f = Fixture::new();
        let before = f.backend.live_buffers();
        f.sprites.destroy(&mut f.backend);
        assert_eq!(f.backend.live_buffers(), before - 4);
    }
}
