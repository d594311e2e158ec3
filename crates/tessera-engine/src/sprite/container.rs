use core::ops::{Add, AddAssign};

use crate::atlas::{AtlasRegion, TextureAtlas};

use super::quad::{quad_indices, quad_vertices, Sprite, INDICES_PER_QUAD, VERTICES_PER_QUAD};
use super::SpriteVertex;

/// Quads compiled once and loaded as the static layer of a
/// [`super::SpriteBatcher`].
///
/// Append-only. Indices are stored already offset to each quad's position
/// in the container.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRenderContainer {
    vertices: Vec<SpriteVertex>,
    indices: Vec<u32>,
    count: usize,
    capacity: usize,
    growth: usize,
}

impl StaticRenderContainer {
    pub const DEFAULT_GROWTH: usize = 100;

    pub fn new() -> Self {
        Self::with_growth(Self::DEFAULT_GROWTH)
    }

    /// Empty container that reserves `growth` quads at a time.
    pub fn with_growth(growth: usize) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            count: 0,
            capacity: 0,
            growth: growth.max(1),
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertices of quad `i`.
    pub fn quad(&self, i: usize) -> Option<&[SpriteVertex]> {
        self.vertices.get(i * VERTICES_PER_QUAD..(i + 1) * VERTICES_PER_QUAD)
    }

    /// Compiles one sprite into the container.
    pub fn push_sprite(&mut self, atlas: &TextureAtlas, region: AtlasRegion, sprite: &Sprite) {
        self.push_quad(quad_vertices(atlas, region, sprite));
    }

    pub(super) fn push_quad(&mut self, vertices: [SpriteVertex; VERTICES_PER_QUAD]) {
        self.reserve_quads(self.count + 1);
        self.indices.extend(quad_indices((self.count * VERTICES_PER_QUAD) as u32));
        self.vertices.extend(vertices);
        self.count += 1;
    }

    /// Appends every quad of `other`, re-offsetting its indices past the
    /// quads already here.
    pub fn append(&mut self, other: &StaticRenderContainer) {
        let base = (self.count * VERTICES_PER_QUAD) as u32;
        self.reserve_quads(self.count + other.count);
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
        self.count += other.count;
    }

    /// Overwrites quads from `start` onwards with the quads of `other`.
    ///
    /// Quads past the current end are appended, so `count` becomes
    /// `max(count, start + other.count)`. `start` past the end leaves zeroed
    /// quads in the gap.
    pub fn set(&mut self, other: &StaticRenderContainer, start: usize) {
        let end = start + other.count;
        if end > self.count {
            self.reserve_quads(end);
            self.vertices.resize(end * VERTICES_PER_QUAD, SpriteVertex::default());
            self.indices.resize(end * INDICES_PER_QUAD, 0);
            for quad in self.count..start {
                let at = quad * INDICES_PER_QUAD;
                self.indices[at..at + INDICES_PER_QUAD]
                    .copy_from_slice(&quad_indices((quad * VERTICES_PER_QUAD) as u32));
            }
            self.count = end;
        }

        let base = (start * VERTICES_PER_QUAD) as u32;
        let v0 = start * VERTICES_PER_QUAD;
        self.vertices[v0..v0 + other.vertices.len()].copy_from_slice(&other.vertices);
        let i0 = start * INDICES_PER_QUAD;
        for (dst, src) in self.indices[i0..i0 + other.indices.len()].iter_mut().zip(&other.indices) {
            *dst = src + base;
        }
    }

    /// Removes every quad. Capacity is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.count = 0;
    }

    fn reserve_quads(&mut self, quads: usize) {
        if quads <= self.capacity {
            return;
        }
        while self.capacity < quads {
            self.capacity += self.growth;
        }
        log::debug!("static container grow: {} quads", self.capacity);
        self.vertices.reserve_exact(self.capacity * VERTICES_PER_QUAD - self.vertices.len());
        self.indices.reserve_exact(self.capacity * INDICES_PER_QUAD - self.indices.len());
    }
}

impl Default for StaticRenderContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl AddAssign<&StaticRenderContainer> for StaticRenderContainer {
    fn add_assign(&mut self, rhs: &StaticRenderContainer) {
        self.append(rhs);
    }
}

impl AddAssign for StaticRenderContainer {
    fn add_assign(&mut self, rhs: StaticRenderContainer) {
        self.append(&rhs);
    }
}

impl Add<&StaticRenderContainer> for StaticRenderContainer {
    type Output = StaticRenderContainer;

    fn add(mut self, rhs: &StaticRenderContainer) -> StaticRenderContainer {
        self.append(rhs);
        self
    }
}

impl Add for StaticRenderContainer {
    type Output = StaticRenderContainer;

    fn add(mut self, rhs: StaticRenderContainer) -> StaticRenderContainer {
        self.append(&rhs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(tag: f32) -> [SpriteVertex; 4] {
        [SpriteVertex { texture_index: tag, ..SpriteVertex::default() }; 4]
    }

    fn container(tags: &[f32]) -> StaticRenderContainer {
        let mut c = StaticRenderContainer::new();
        for &t in tags {
            c.push_quad(quad(t));
        }
        c
    }

    fn tags(c: &StaticRenderContainer) -> Vec<f32> {
        (0..c.count()).filter_map(|i| c.quad(i)).map(|q| q[0].texture_index).collect()
    }

    // ── growth ────────────────────────────────────────────────────────────

    #[test]
    fn grows_in_steps_of_one_hundred() {
        let mut c = StaticRenderContainer::new();
        assert_eq!(c.capacity(), 0);
        c.push_quad(quad(0.0));
        assert_eq!(c.capacity(), 100);

        for _ in 0..100 {
            c.push_quad(quad(0.0));
        }
        assert_eq!(c.count(), 101);
        assert_eq!(c.capacity(), 200);
        assert_eq!(c.vertices().len(), 101 * 4);
        assert_eq!(c.indices().len(), 101 * 6);
    }

    #[test]
    fn indices_are_offset_per_quad() {
        let c = container(&[0.0, 1.0, 2.0]);
        assert_eq!(&c.indices()[12..], &[8, 9, 11, 11, 10, 8]);
    }

    // ── append ────────────────────────────────────────────────────────────

    #[test]
    fn append_reoffsets_indices() {
        let mut a = container(&[1.0, 2.0]);
        let b = container(&[3.0]);
        a.append(&b);

        assert_eq!(a.count(), 3);
        assert_eq!(tags(&a), vec![1.0, 2.0, 3.0]);
        assert_eq!(&a.indices()[12..], &[8, 9, 11, 11, 10, 8]);
    }

    #[test]
    fn add_operators_concatenate() {
        let sum = container(&[1.0]) + container(&[2.0, 3.0]);
        assert_eq!(tags(&sum), vec![1.0, 2.0, 3.0]);

        let mut acc = StaticRenderContainer::new();
        acc += &container(&[4.0]);
        acc += container(&[5.0]);
        assert_eq!(tags(&acc), vec![4.0, 5.0]);
        assert_eq!(acc.indices(), container(&[4.0, 5.0]).indices());
    }

    #[test]
    fn append_empty_is_a_no_op() {
        let mut a = container(&[1.0]);
        let before = a.clone();
        a.append(&StaticRenderContainer::new());
        assert_eq!(a, before);
    }

    // ── set ───────────────────────────────────────────────────────────────

    #[test]
    fn set_overwrites_in_place() {
        let mut a = container(&[1.0, 2.0, 3.0]);
        a.set(&container(&[9.0]), 1);

        assert_eq!(tags(&a), vec![1.0, 9.0, 3.0]);
        assert_eq!(&a.indices()[6..12], &[4, 5, 7, 7, 6, 4]);
    }

    #[test]
    fn set_past_end_extends_count() {
        let mut a = container(&[1.0]);
        a.set(&container(&[7.0, 8.0]), 2);

        assert_eq!(a.count(), 4);
        assert_eq!(tags(&a), vec![1.0, 0.0, 7.0, 8.0]);
        assert_eq!(a.indices(), container(&[0.0; 4]).indices());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut a = container(&[1.0, 2.0]);
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 100);
    }
}
