use thiserror::Error;

/// Rejected atlas construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    #[error("atlas texture has zero size ({width}x{height})")]
    EmptyTexture { width: u32, height: u32 },

    #[error("atlas grid has zero cells ({cells_wide}x{cells_high})")]
    EmptyGrid { cells_wide: u32, cells_high: u32 },

    #[error("{width}x{height} texture does not divide evenly into a {cells_wide}x{cells_high} grid")]
    UnevenGrid { width: u32, height: u32, cells_wide: u32, cells_high: u32 },

    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    PixelDataSize { expected: usize, actual: usize },
}
