use bytemuck::{Pod, Zeroable};

use crate::backend::{BufferHandle, GpuBackend};

/// Shape of one batch unit and the growth step.
///
/// A unit is one logical submission: a line is two points and one colour, a
/// sprite quad is four vertices and six indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchLayout {
    pub primary_per_unit: usize,
    pub secondary_per_unit: usize,
    /// Units added whenever the batch is full.
    pub growth: usize,
}

impl BatchLayout {
    #[inline]
    pub const fn new(primary_per_unit: usize, secondary_per_unit: usize, growth: usize) -> Self {
        Self { primary_per_unit, secondary_per_unit, growth }
    }
}

/// Two parallel CPU streams plus the GPU buffers they are uploaded into.
///
/// Invariants:
/// - `len <= capacity`
/// - CPU streams hold exactly `capacity * per_unit` elements
/// - after [`ensure_capacity`](Self::ensure_capacity), both GPU buffers hold at
///   least `capacity * per_unit * size_of` bytes
///
/// The GPU buffers may be shared with other users that re-specify them; the
/// size guard restores the expected size before this batch writes into them.
#[derive(Debug)]
pub struct GrowableBatch<P: Pod, S: Pod> {
    layout: BatchLayout,
    primary: Vec<P>,
    secondary: Vec<S>,
    primary_buffer: BufferHandle,
    secondary_buffer: BufferHandle,
    len: usize,
    capacity: usize,
}

impl<P: Pod, S: Pod> GrowableBatch<P, S> {
    /// Empty batch with zero capacity. Nothing is allocated until the first push.
    pub fn new(layout: BatchLayout, primary_buffer: BufferHandle, secondary_buffer: BufferHandle) -> Self {
        Self {
            layout,
            primary: Vec::new(),
            secondary: Vec::new(),
            primary_buffer,
            secondary_buffer,
            len: 0,
            capacity: 0,
        }
    }

    /// Batch pre-sized to `capacity` units, with both GPU buffers allocated.
    pub fn with_capacity(
        backend: &mut dyn GpuBackend,
        layout: BatchLayout,
        primary_buffer: BufferHandle,
        secondary_buffer: BufferHandle,
        capacity: usize,
    ) -> Self {
        let mut batch = Self::new(layout, primary_buffer, secondary_buffer);
        batch.resize_to(backend, capacity);
        batch
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn layout(&self) -> BatchLayout {
        self.layout
    }

    #[inline]
    pub fn primary_buffer(&self) -> BufferHandle {
        self.primary_buffer
    }

    #[inline]
    pub fn secondary_buffer(&self) -> BufferHandle {
        self.secondary_buffer
    }

    /// Primary elements of the used units.
    pub fn primary(&self) -> &[P] {
        &self.primary[..self.len * self.layout.primary_per_unit]
    }

    /// Secondary elements of the used units.
    pub fn secondary(&self) -> &[S] {
        &self.secondary[..self.len * self.layout.secondary_per_unit]
    }

    // ── growth ────────────────────────────────────────────────────────────

    /// Makes room for one more unit.
    ///
    /// A full batch grows by `layout.growth` units and re-allocates both GPU
    /// buffers. Otherwise only the size guard runs.
    pub fn ensure_capacity(&mut self, backend: &mut dyn GpuBackend) {
        if self.len >= self.capacity {
            let next = self.capacity + self.layout.growth.max(1);
            log::debug!("batch grow: {} -> {} units", self.capacity, next);
            self.resize_to(backend, next);
        } else {
            self.guard_gpu_size(backend);
        }
    }

    /// Re-allocates both GPU buffers if either is smaller than this batch
    /// expects. Never shrinks.
    pub fn guard_gpu_size(&mut self, backend: &mut dyn GpuBackend) {
        let (primary_bytes, secondary_bytes) = self.expected_bytes();
        if backend.buffer_byte_size(self.primary_buffer) < primary_bytes
            || backend.buffer_byte_size(self.secondary_buffer) < secondary_bytes
        {
            log::debug!(
                "batch buffers re-specified externally; restoring {primary_bytes}/{secondary_bytes} bytes"
            );
            backend.allocate(self.primary_buffer, primary_bytes);
            backend.allocate(self.secondary_buffer, secondary_bytes);
        }
    }

    fn resize_to(&mut self, backend: &mut dyn GpuBackend, capacity: usize) {
        self.capacity = capacity;
        self.primary.resize(capacity * self.layout.primary_per_unit, P::zeroed());
        self.secondary.resize(capacity * self.layout.secondary_per_unit, S::zeroed());

        let (primary_bytes, secondary_bytes) = self.expected_bytes();
        backend.allocate(self.primary_buffer, primary_bytes);
        backend.allocate(self.secondary_buffer, secondary_bytes);
    }

    fn expected_bytes(&self) -> (usize, usize) {
        (
            self.capacity * self.layout.primary_per_unit * size_of::<P>(),
            self.capacity * self.layout.secondary_per_unit * size_of::<S>(),
        )
    }

    // ── submission ────────────────────────────────────────────────────────

    /// Appends one unit and returns its slot.
    ///
    /// `primary` and `secondary` must hold exactly one unit's worth of
    /// elements each.
    pub fn push(&mut self, backend: &mut dyn GpuBackend, primary: &[P], secondary: &[S]) -> usize {
        let (pp, sp) = (self.layout.primary_per_unit, self.layout.secondary_per_unit);
        assert_eq!(primary.len(), pp, "GrowableBatch::push: primary unit size mismatch");
        assert_eq!(secondary.len(), sp, "GrowableBatch::push: secondary unit size mismatch");

        self.ensure_capacity(backend);

        let slot = self.len;
        self.primary[slot * pp..(slot + 1) * pp].copy_from_slice(primary);
        self.secondary[slot * sp..(slot + 1) * sp].copy_from_slice(secondary);
        self.len += 1;
        slot
    }

    /// Writes the used range of both streams into the GPU buffers. Bytes past
    /// the used range are not touched.
    pub fn upload(&mut self, backend: &mut dyn GpuBackend) {
        self.guard_gpu_size(backend);
        if self.len == 0 {
            return;
        }
        backend.upload_range(self.primary_buffer, 0, bytemuck::cast_slice(self.primary()));
        backend.upload_range(self.secondary_buffer, 0, bytemuck::cast_slice(self.secondary()));
    }

    /// Empties the batch. Capacity and GPU storage are kept.
    pub fn reset(&mut self) {
        self.len = 0;
        self.primary.fill(P::zeroed());
        self.secondary.fill(S::zeroed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendEvent, BufferKind, BufferUsage, RecordingBackend};

    fn setup(layout: BatchLayout) -> (RecordingBackend, GrowableBatch<f32, u32>) {
        let mut backend = RecordingBackend::new();
        let p = backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic);
        let s = backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic);
        (backend, GrowableBatch::new(layout, p, s))
    }

    // ── growth ────────────────────────────────────────────────────────────

    #[test]
    fn first_push_grows_from_zero() {
        let (mut backend, mut batch) = setup(BatchLayout::new(2, 1, 10));
        assert_eq!(batch.capacity(), 0);

        assert_eq!(batch.push(&mut backend, &[1.0, 2.0], &[7]), 0);
        assert_eq!(batch.capacity(), 10);
        assert_eq!(backend.buffer_byte_size(batch.primary_buffer()), 10 * 2 * 4);
        assert_eq!(backend.buffer_byte_size(batch.secondary_buffer()), 10 * 4);
    }

    #[test]
    fn grows_by_increment_without_losing_data() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        for i in 0..25 {
            batch.push(&mut backend, &[i as f32], &[i]);
        }
        assert_eq!(batch.len(), 25);
        assert_eq!(batch.capacity(), 30);
        assert_eq!(batch.primary(), (0..25).map(|i| i as f32).collect::<Vec<_>>().as_slice());
        assert_eq!(batch.secondary(), (0..25).collect::<Vec<u32>>().as_slice());
    }

    #[test]
    fn with_capacity_allocates_up_front() {
        let mut backend = RecordingBackend::new();
        let p = backend.create_buffer(BufferKind::Vertex, BufferUsage::Dynamic);
        let s = backend.create_buffer(BufferKind::Index, BufferUsage::Dynamic);
        let batch: GrowableBatch<[f32; 8], u32> =
            GrowableBatch::with_capacity(&mut backend, BatchLayout::new(4, 6, 10), p, s, 10);

        assert_eq!(batch.capacity(), 10);
        assert_eq!(backend.buffer_byte_size(p), 10 * 4 * 32);
        assert_eq!(backend.buffer_byte_size(s), 10 * 6 * 4);
    }

    // ── size guard ────────────────────────────────────────────────────────

    #[test]
    fn guard_restores_externally_shrunk_buffer() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        batch.push(&mut backend, &[1.0], &[1]);

        backend.resize_externally(batch.primary_buffer(), 4);
        batch.push(&mut backend, &[2.0], &[2]);

        assert_eq!(backend.buffer_byte_size(batch.primary_buffer()), 40);
        assert_eq!(backend.buffer_byte_size(batch.secondary_buffer()), 40);
    }

    #[test]
    fn guard_never_shrinks_a_larger_buffer() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        batch.push(&mut backend, &[1.0], &[1]);
        backend.allocate(batch.primary_buffer(), 4096);
        backend.clear_events();

        batch.guard_gpu_size(&mut backend);
        assert!(backend.events().is_empty());
        assert_eq!(backend.buffer_byte_size(batch.primary_buffer()), 4096);
    }

    // ── upload & reset ────────────────────────────────────────────────────

    #[test]
    fn upload_writes_only_the_used_range() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        batch.push(&mut backend, &[3.0], &[9]);
        batch.push(&mut backend, &[4.0], &[8]);
        backend.clear_events();

        batch.upload(&mut backend);
        assert_eq!(
            backend.events(),
            &[
                BackendEvent::UploadRange { handle: batch.primary_buffer(), offset: 0, byte_len: 8 },
                BackendEvent::UploadRange { handle: batch.secondary_buffer(), offset: 0, byte_len: 8 },
            ]
        );
        let floats = backend.buffer_as::<f32>(batch.primary_buffer());
        assert_eq!(&floats[..3], &[3.0, 4.0, 0.0]);
    }

    #[test]
    fn upload_after_external_shrink_reallocates_first() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        batch.push(&mut backend, &[5.0], &[5]);
        backend.upload_full(batch.secondary_buffer(), &[0; 2]);

        batch.upload(&mut backend);
        assert_eq!(backend.buffer_as::<u32>(batch.secondary_buffer())[0], 5);
        assert_eq!(backend.buffer_byte_size(batch.secondary_buffer()), 40);
    }

    #[test]
    fn reset_keeps_capacity_and_zeroes_contents() {
        let (mut backend, mut batch) = setup(BatchLayout::new(1, 1, 10));
        for i in 0..12 {
            batch.push(&mut backend, &[1.0], &[i]);
        }
        batch.reset();

        assert!(batch.is_empty());
        assert_eq!(batch.capacity(), 20);
        batch.push(&mut backend, &[2.0], &[2]);
        assert_eq!(batch.primary(), &[2.0]);
        assert_eq!(batch.capacity(), 20);
    }

    #[test]
    #[should_panic(expected = "primary unit size mismatch")]
    fn push_rejects_wrong_unit_size() {
        let (mut backend, mut batch) = setup(BatchLayout::new(2, 1, 10));
        batch.push(&mut backend, &[1.0], &[1]);
    }
}
