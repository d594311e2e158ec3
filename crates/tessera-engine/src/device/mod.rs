//! Headless GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a window
//! - creating offscreen color targets that a `WgpuBackend` can render into
//! - submitting recorded command encoders

mod gpu;
mod init;

pub use gpu::{Gpu, OffscreenTarget};
pub use init::GpuInit;
