//! Texture atlases addressed by grid cell, and the texture-unit counter they
//! draw their sampler slot from.

mod error;
mod texture_atlas;
mod units;

pub use error::AtlasError;
pub use texture_atlas::{AtlasImage, AtlasRegion, TextureAtlas};
pub use units::TextureUnits;
