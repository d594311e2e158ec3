use bytemuck::{Pod, Zeroable};

/// One sprite corner as uploaded: 8 floats, 32 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 3],
    /// Texture unit index as a float; 16.0 marks an invalid unit.
    pub texture_index: f32,
}

impl SpriteVertex {
    pub const FLOATS: usize = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_eight_packed_floats() {
        assert_eq!(size_of::<SpriteVertex>(), SpriteVertex::FLOATS * 4);
        let v = SpriteVertex {
            position: [1.0, 2.0],
            uv: [3.0, 4.0],
            color: [5.0, 6.0, 7.0],
            texture_index: 8.0,
        };
        let floats: &[f32] = bytemuck::cast_slice(core::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
