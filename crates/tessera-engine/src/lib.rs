//! Tessera: an immediate-mode 2D batching renderer.
//!
//! Shapes, line and point batches, sprite batching over texture atlases, and
//! bitmap-font text, all written against the narrow [`backend::GpuBackend`]
//! seam. [`render::WgpuBackend`] drives a real device; [`backend::RecordingBackend`]
//! records every call for tests and headless capture.
//!
//! [`Graphics`] is the usual entry point: it owns the backend and one of each
//! batcher, and releases every GPU resource it created when dropped.

pub mod atlas;
pub mod backend;
pub mod batch;
pub mod config;
pub mod coords;
pub mod device;
pub mod geometry;
pub mod graphics;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shapes;
pub mod sprite;
pub mod text;

pub use config::GraphicsConfig;
pub use graphics::Graphics;
