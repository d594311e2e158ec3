use crate::backend::{GpuBackend, TextureHandle, TextureUnit};
use crate::coords::Rect;

use super::{AtlasError, TextureUnits};

/// Decoded RGBA8 pixels. Decoding itself happens outside this crate.
#[derive(Debug, Copy, Clone)]
pub struct AtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

impl<'a> AtlasImage<'a> {
    #[inline]
    pub const fn new(width: u32, height: u32, rgba: &'a [u8]) -> Self {
        Self { width, height, rgba }
    }

    #[inline]
    pub const fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Where in an atlas a sprite samples from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AtlasRegion {
    /// Grid cell, row-major from the top-left.
    Cell(u32),
    /// Explicit sub-rectangle in atlas pixels.
    Quad(Rect),
}

impl From<u32> for AtlasRegion {
    #[inline]
    fn from(cell: u32) -> Self {
        AtlasRegion::Cell(cell)
    }
}

impl From<Rect> for AtlasRegion {
    #[inline]
    fn from(quad: Rect) -> Self {
        AtlasRegion::Quad(quad)
    }
}

/// A texture divided into a uniform grid of cells, bound to its own unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAtlas {
    texture: TextureHandle,
    unit: TextureUnit,
    width: u32,
    height: u32,
    cells_wide: u32,
    cells_high: u32,
    cell_width: u32,
    cell_height: u32,
}

impl TextureAtlas {
    /// Uploads `image`, claims the next texture unit and binds the texture
    /// to it.
    ///
    /// Cell size is the integer quotient of texture size and grid; a grid that
    /// does not divide evenly is logged and the remainder is never sampled.
    pub fn new(
        backend: &mut dyn GpuBackend,
        units: &mut TextureUnits,
        image: AtlasImage<'_>,
        cells_wide: u32,
        cells_high: u32,
    ) -> Self {
        if cells_wide == 0 || cells_high == 0 {
            log::warn!("atlas grid {cells_wide}x{cells_high} has no cells; using 1x1");
        } else if image.width % cells_wide != 0 || image.height % cells_high != 0 {
            log::warn!(
                "{}x{} atlas does not divide evenly into {cells_wide}x{cells_high} cells",
                image.width,
                image.height
            );
        }
        let cells_wide = cells_wide.max(1);
        let cells_high = cells_high.max(1);

        let texture = backend.create_texture(image.width, image.height, image.rgba);
        let unit = units.allocate();
        if unit.is_valid() {
            backend.bind_texture(unit, texture);
        }
        log::debug!(
            "atlas {texture:?}: {}x{} px, {cells_wide}x{cells_high} cells, {unit:?}",
            image.width,
            image.height
        );

        Self {
            texture,
            unit,
            width: image.width,
            height: image.height,
            cells_wide,
            cells_high,
            cell_width: image.width / cells_wide,
            cell_height: image.height / cells_high,
        }
    }

    /// Like [`new`](Self::new), but rejects empty textures and grids, uneven
    /// grids and short pixel data instead of logging them.
    pub fn checked(
        backend: &mut dyn GpuBackend,
        units: &mut TextureUnits,
        image: AtlasImage<'_>,
        cells_wide: u32,
        cells_high: u32,
    ) -> Result<Self, AtlasError> {
        if image.width == 0 || image.height == 0 {
            return Err(AtlasError::EmptyTexture { width: image.width, height: image.height });
        }
        if cells_wide == 0 || cells_high == 0 {
            return Err(AtlasError::EmptyGrid { cells_wide, cells_high });
        }
        if image.width % cells_wide != 0 || image.height % cells_high != 0 {
            return Err(AtlasError::UnevenGrid {
                width: image.width,
                height: image.height,
                cells_wide,
                cells_high,
            });
        }
        if image.rgba.len() != image.expected_len() {
            return Err(AtlasError::PixelDataSize {
                expected: image.expected_len(),
                actual: image.rgba.len(),
            });
        }
        Ok(Self::new(backend, units, image, cells_wide, cells_high))
    }

    /// Pixel rectangle of grid cell `cell`. Cells past the grid are not
    /// rejected; they address rows below the texture.
    pub fn get_quad(&self, cell: u32) -> Rect {
        let col = (cell % self.cells_wide) as f32;
        let row = (cell / self.cells_wide) as f32;
        let (w, h) = (self.cell_width as f32, self.cell_height as f32);
        Rect::new(col * w, row * h, w, h)
    }

    /// Resolves a region to atlas pixels.
    pub fn region_quad(&self, region: AtlasRegion) -> Rect {
        match region {
            AtlasRegion::Cell(cell) => self.get_quad(cell),
            AtlasRegion::Quad(quad) => quad,
        }
    }

    #[inline]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    #[inline]
    pub fn unit(&self) -> TextureUnit {
        self.unit
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cells_wide(&self) -> u32 {
        self.cells_wide
    }

    #[inline]
    pub fn cells_high(&self) -> u32 {
        self.cells_high
    }

    #[inline]
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    #[inline]
    pub fn cell_count(&self) -> u32 {
        self.cells_wide * self.cells_high
    }

    /// Releases the texture. The unit stays claimed.
    ///
    /// Only for atlases built directly with [`TextureAtlas::new`] or
    /// [`TextureAtlas::checked`]; ones from `Graphics::create_atlas` go back
    /// through `Graphics::release_atlas`.
    pub fn destroy(&self, backend: &mut dyn GpuBackend) {
        backend.destroy_texture(self.texture);
    }
}
