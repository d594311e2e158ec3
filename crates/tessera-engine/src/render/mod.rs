//! wgpu implementation of the [`GpuBackend`](crate::backend::GpuBackend) seam.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod common;
mod ctx;
mod wgpu_backend;

pub use ctx::{RenderCtx, RenderTarget};
pub use wgpu_backend::WgpuBackend;
