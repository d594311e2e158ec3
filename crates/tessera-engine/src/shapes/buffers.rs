use crate::backend::{BufferHandle, BufferKind, BufferUsage, GpuBackend};

/// The position/colour buffer pair every shape draw goes through.
///
/// Immediate draws re-specify both buffers with `upload_full`; the line and
/// point batches write into them with `upload_range` after their size guard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShapeBuffers {
    pub positions: BufferHandle,
    pub colors: BufferHandle,
}

impl ShapeBuffers {
    pub fn create(backend: &mut dyn GpuBackend) -> Self {
        Self {
            positions: backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic),
            colors: backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic),
        }
    }

    pub fn destroy(self, backend: &mut dyn GpuBackend) {
        backend.destroy_buffer(self.colors);
        backend.destroy_buffer(self.positions);
    }
}
