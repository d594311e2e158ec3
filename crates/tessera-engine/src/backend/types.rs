use crate::coords::Viewport;

/// Opaque buffer id issued by a [`super::GpuBackend`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

/// Opaque texture id issued by a [`super::GpuBackend`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Texture sampling slot. Valid units are `0..16`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    /// Number of sampler slots the sprite program exposes.
    pub const COUNT: u32 = 16;

    /// Flagged unit handed out once all real units are claimed. Vertices that
    /// carry it are shaded with the invalid-texture colour.
    pub const INVALID: TextureUnit = TextureUnit(Self::COUNT);

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Update-frequency hint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    Static,
    Dynamic,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    /// Flat-coloured positions (polygons, lines, points).
    Shape,
    /// Textured, tinted [`crate::sprite::SpriteVertex`] quads.
    Sprite,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    /// Closed outline: the last vertex connects back to the first.
    LineLoop,
    Points,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Vec2([f32; 2]),
    IntArray(Vec<i32>),
}

impl From<Viewport> for UniformValue {
    fn from(v: Viewport) -> Self {
        UniformValue::Vec2(v.to_array())
    }
}

/// How colour triples are stepped relative to vertices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColorStep {
    /// One triple per vertex.
    PerVertex,
    /// One triple for the whole draw.
    PerInstance,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColorSource {
    pub buffer: BufferHandle,
    pub step: ColorStep,
}

/// One draw submission.
///
/// Shape draws read `[f32; 2]` positions from `vertices` and `[f32; 3]`
/// colours from `colors`. Sprite draws read interleaved sprite vertices and
/// `u32` indices. `count` is vertices for non-indexed draws and indices for
/// indexed ones.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub topology: Topology,
    pub vertices: BufferHandle,
    pub colors: Option<ColorSource>,
    pub indices: Option<BufferHandle>,
    pub count: u32,
    pub point_size: Option<f32>,
}
