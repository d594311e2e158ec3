//! Textured quad batching: a per-frame dynamic batch plus one precompiled
//! static set, both drawn by [`SpriteBatcher::render`].

mod batcher;
mod container;
mod quad;
mod vertex;

pub use batcher::SpriteBatcher;
pub use container::StaticRenderContainer;
pub use quad::{quad_indices, quad_vertices, Sprite, INDICES_PER_QUAD, QUAD_INDEX_PATTERN, VERTICES_PER_QUAD};
pub use vertex::SpriteVertex;
