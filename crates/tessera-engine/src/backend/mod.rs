//! The narrow GPU interface the batchers are written against.
//!
//! Everything above this module talks in handles, byte slices and
//! [`DrawCall`]s. [`RecordingBackend`] keeps all of it in memory for tests and
//! headless capture; `render::WgpuBackend` replays it on a real device.

mod recording;
mod types;

pub use recording::{BackendEvent, RecordingBackend};
pub use types::{
    BufferHandle, BufferKind, BufferUsage, ColorSource, ColorStep, DrawCall, ShaderProgram,
    TextureHandle, TextureUnit, Topology, UniformValue,
};

/// Graphics-API binding consumed by the shape, sprite and text batchers.
///
/// All calls are synchronous and issued from one thread. Submission order is
/// draw order.
pub trait GpuBackend {
    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&mut self, kind: BufferKind, usage: BufferUsage) -> BufferHandle;

    /// Re-specifies the storage of `handle` as `byte_len` zeroed bytes.
    fn allocate(&mut self, handle: BufferHandle, byte_len: usize);

    /// Re-specifies the storage of `handle` with `bytes` as contents.
    fn upload_full(&mut self, handle: BufferHandle, bytes: &[u8]);

    /// Overwrites `bytes.len()` bytes starting at `offset`.
    ///
    /// Bytes outside the range are untouched. A range past the end of the
    /// buffer is rejected (logged) without modifying anything.
    fn upload_range(&mut self, handle: BufferHandle, offset: usize, bytes: &[u8]);

    /// Current storage size of `handle` in bytes; 0 for unknown handles.
    fn buffer_byte_size(&self, handle: BufferHandle) -> usize;

    fn destroy_buffer(&mut self, handle: BufferHandle);

    // ── textures ──────────────────────────────────────────────────────────

    /// Creates an RGBA8 texture. `rgba` holds `width * height * 4` bytes.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle;

    fn bind_texture(&mut self, unit: TextureUnit, texture: TextureHandle);

    fn destroy_texture(&mut self, texture: TextureHandle);

    // ── programs & draws ──────────────────────────────────────────────────

    fn bind_program(&mut self, program: ShaderProgram);

    /// Sets a uniform on the currently bound program.
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn draw(&mut self, call: &DrawCall);
}
