use std::collections::HashMap;

use bytemuck::Pod;

use super::{
    BufferHandle, BufferKind, BufferUsage, DrawCall, GpuBackend, ShaderProgram, TextureHandle,
    TextureUnit, UniformValue,
};

/// One recorded backend call. Uploads keep sizes only; the bytes live in the
/// backend's buffer store.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    CreateBuffer { handle: BufferHandle, kind: BufferKind, usage: BufferUsage },
    Allocate { handle: BufferHandle, byte_len: usize },
    UploadFull { handle: BufferHandle, byte_len: usize },
    UploadRange { handle: BufferHandle, offset: usize, byte_len: usize },
    DestroyBuffer(BufferHandle),
    CreateTexture { handle: TextureHandle, width: u32, height: u32 },
    BindTexture { unit: TextureUnit, texture: TextureHandle },
    DestroyTexture(TextureHandle),
    BindProgram(ShaderProgram),
    SetUniform { program: Option<ShaderProgram>, name: String, value: UniformValue },
    Draw(DrawCall),
}

#[derive(Debug)]
struct RecordedBuffer {
    kind: BufferKind,
    bytes: Vec<u8>,
}

#[derive(Debug)]
struct RecordedTexture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

/// In-memory [`GpuBackend`].
///
/// Keeps a CPU copy of every buffer and texture and logs every call in order.
/// Buffer handles start at 1 so a zero handle never aliases a real buffer.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    buffers: HashMap<BufferHandle, RecordedBuffer>,
    textures: HashMap<TextureHandle, RecordedTexture>,
    bound_units: HashMap<TextureUnit, TextureHandle>,
    program: Option<ShaderProgram>,
    events: Vec<BackendEvent>,
    next_buffer: u32,
    next_texture: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Draw calls in submission order.
    pub fn draws(&self) -> Vec<&DrawCall> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BackendEvent::Draw(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn buffer_bytes(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(|b| b.bytes.as_slice())
    }

    pub fn buffer_kind(&self, handle: BufferHandle) -> Option<BufferKind> {
        self.buffers.get(&handle).map(|b| b.kind)
    }

    /// Buffer contents reinterpreted as `T`. Trailing bytes that do not fill a
    /// whole `T` are dropped.
    pub fn buffer_as<T: Pod>(&self, handle: BufferHandle) -> Vec<T> {
        let Some(bytes) = self.buffer_bytes(handle) else {
            return Vec::new();
        };
        let whole = bytes.len() / size_of::<T>() * size_of::<T>();
        bytemuck::pod_collect_to_vec(&bytes[..whole])
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&texture).map(|t| (t.width, t.height))
    }

    pub fn texture_rgba(&self, texture: TextureHandle) -> Option<&[u8]> {
        self.textures.get(&texture).map(|t| t.rgba.as_slice())
    }

    pub fn bound_texture(&self, unit: TextureUnit) -> Option<TextureHandle> {
        self.bound_units.get(&unit).copied()
    }

    pub fn current_program(&self) -> Option<ShaderProgram> {
        self.program
    }

    /// Re-specifies a buffer behind its owner's back, the way another user of
    /// a shared buffer would. Not logged.
    pub fn resize_externally(&mut self, handle: BufferHandle, byte_len: usize) {
        if let Some(buf) = self.buffers.get_mut(&handle) {
            buf.bytes = vec![0; byte_len];
        }
    }
}

impl GpuBackend for RecordingBackend {
    fn create_buffer(&mut self, kind: BufferKind, usage: BufferUsage) -> BufferHandle {
        self.next_buffer += 1;
        let handle = BufferHandle(self.next_buffer);
        self.buffers.insert(handle, RecordedBuffer { kind, bytes: Vec::new() });
        self.events.push(BackendEvent::CreateBuffer { handle, kind, usage });
        handle
    }

    fn allocate(&mut self, handle: BufferHandle, byte_len: usize) {
        let Some(buf) = self.buffers.get_mut(&handle) else {
            log::error!("allocate on unknown buffer {handle:?}");
            return;
        };
        buf.bytes = vec![0; byte_len];
        self.events.push(BackendEvent::Allocate { handle, byte_len });
    }

    fn upload_full(&mut self, handle: BufferHandle, bytes: &[u8]) {
        let Some(buf) = self.buffers.get_mut(&handle) else {
            log::error!("upload_full on unknown buffer {handle:?}");
            return;
        };
        buf.bytes = bytes.to_vec();
        self.events.push(BackendEvent::UploadFull { handle, byte_len: bytes.len() });
    }

    fn upload_range(&mut self, handle: BufferHandle, offset: usize, bytes: &[u8]) {
        let Some(buf) = self.buffers.get_mut(&handle) else {
            log::error!("upload_range on unknown buffer {handle:?}");
            return;
        };
        let end = offset + bytes.len();
        if end > buf.bytes.len() {
            log::error!(
                "upload_range {offset}..{end} out of bounds for {handle:?} ({} bytes)",
                buf.bytes.len()
            );
            return;
        }
        buf.bytes[offset..end].copy_from_slice(bytes);
        self.events.push(BackendEvent::UploadRange { handle, offset, byte_len: bytes.len() });
    }

    fn buffer_byte_size(&self, handle: BufferHandle) -> usize {
        self.buffers.get(&handle).map_or(0, |b| b.bytes.len())
    }

    fn destroy_buffer(&mut self, handle: BufferHandle) {
        self.buffers.remove(&handle);
        self.events.push(BackendEvent::DestroyBuffer(handle));
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle {
        self.next_texture += 1;
        let handle = TextureHandle(self.next_texture);
        self.textures.insert(handle, RecordedTexture { width, height, rgba: rgba.to_vec() });
        self.events.push(BackendEvent::CreateTexture { handle, width, height });
        handle
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: TextureHandle) {
        self.bound_units.insert(unit, texture);
        self.events.push(BackendEvent::BindTexture { unit, texture });
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture);
        self.bound_units.retain(|_, t| *t != texture);
        self.events.push(BackendEvent::DestroyTexture(texture));
    }

    fn bind_program(&mut self, program: ShaderProgram) {
        self.program = Some(program);
        self.events.push(BackendEvent::BindProgram(program));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.events.push(BackendEvent::SetUniform {
            program: self.program,
            name: name.to_owned(),
            value,
        });
    }

    fn draw(&mut self, call: &DrawCall) {
        self.events.push(BackendEvent::Draw(call.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_buffer(b: &mut RecordingBackend) -> BufferHandle {
        b.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic)
    }

    // ── buffers ───────────────────────────────────────────────────────────

    #[test]
    fn allocate_zeroes_storage() {
        let mut b = RecordingBackend::new();
        let h = vertex_buffer(&mut b);
        b.upload_full(h, &[1, 2, 3]);
        b.allocate(h, 5);
        assert_eq!(b.buffer_bytes(h), Some(&[0u8; 5][..]));
        assert_eq!(b.buffer_byte_size(h), 5);
    }

    #[test]
    fn upload_range_leaves_other_bytes_alone() {
        let mut b = RecordingBackend::new();
        let h = vertex_buffer(&mut b);
        b.upload_full(h, &[9; 8]);
        b.upload_range(h, 2, &[1, 2]);
        assert_eq!(b.buffer_bytes(h), Some(&[9, 9, 1, 2, 9, 9, 9, 9][..]));
    }

    #[test]
    fn upload_range_past_end_is_rejected() {
        let mut b = RecordingBackend::new();
        let h = vertex_buffer(&mut b);
        b.allocate(h, 4);
        b.clear_events();

        b.upload_range(h, 3, &[1, 2]);
        assert_eq!(b.buffer_bytes(h), Some(&[0u8; 4][..]));
        assert!(b.events().is_empty());
    }

    #[test]
    fn buffer_as_reinterprets_floats() {
        let mut b = RecordingBackend::new();
        let h = vertex_buffer(&mut b);
        b.upload_full(h, bytemuck::cast_slice(&[1.0f32, 2.5]));
        assert_eq!(b.buffer_as::<f32>(h), vec![1.0, 2.5]);
    }

    #[test]
    fn handles_are_distinct_and_nonzero() {
        let mut b = RecordingBackend::new();
        let a = vertex_buffer(&mut b);
        let c = b.create_buffer(BufferKind::Index, BufferUsage::Static);
        assert_ne!(a, c);
        assert_ne!(a, BufferHandle(0));
        assert_eq!(b.buffer_kind(c), Some(BufferKind::Index));
    }

    #[test]
    fn destroy_releases_buffer() {
        let mut b = RecordingBackend::new();
        let h = vertex_buffer(&mut b);
        b.destroy_buffer(h);
        assert_eq!(b.live_buffers(), 0);
        assert_eq!(b.buffer_byte_size(h), 0);
    }

    // ── textures & programs ───────────────────────────────────────────────

    #[test]
    fn texture_binding_is_tracked_until_destroyed() {
        let mut b = RecordingBackend::new();
        let t = b.create_texture(2, 1, &[255; 8]);
        b.bind_texture(TextureUnit(3), t);
        assert_eq!(b.bound_texture(TextureUnit(3)), Some(t));
        assert_eq!(b.texture_size(t), Some((2, 1)));
        assert_eq!(b.texture_rgba(t), Some(&[255u8; 8][..]));

        b.destroy_texture(t);
        assert_eq!(b.bound_texture(TextureUnit(3)), None);
        assert_eq!(b.live_textures(), 0);
    }

    #[test]
    fn uniforms_record_the_bound_program() {
        let mut b = RecordingBackend::new();
        assert_eq!(b.current_program(), None);
        b.bind_program(ShaderProgram::Sprite);
        assert_eq!(b.current_program(), Some(ShaderProgram::Sprite));
        b.set_uniform("u_viewport", UniformValue::Vec2([800.0, 600.0]));
        assert_eq!(
            b.events().last(),
            Some(&BackendEvent::SetUniform {
                program: Some(ShaderProgram::Sprite),
                name: "u_viewport".into(),
                value: UniformValue::Vec2([800.0, 600.0]),
            })
        );
    }
}
