use thiserror::Error;

/// Failure to read a font data file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontMetricsError {
    #[error("line {line}: `{key}` has non-numeric value `{value}`")]
    InvalidNumber { line: usize, key: String, value: String },

    #[error("line {line}: character code {code} is outside 0..=255")]
    CharOutOfRange { line: usize, code: u32 },

    #[error("font data is missing `{0}`")]
    MissingField(&'static str),

    #[error("font cell size {width}x{height} is empty")]
    EmptyCell { width: u32, height: u32 },
}

/// Grid and advance-width data for a fixed-cell bitmap font.
///
/// Glyph `c` lives in atlas cell `c - starting_char`; its pen advance is
/// `widths[c]` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub cell_width: u32,
    pub cell_height: u32,
    pub starting_char: u8,
    pub image_width: u32,
    pub image_height: u32,
    pub widths: [u32; 256],
}

impl FontMetrics {
    /// Metrics where every glyph advances by a full cell.
    pub fn monospace(cell_width: u32, cell_height: u32, starting_char: u8, image_width: u32, image_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            starting_char,
            image_width,
            image_height,
            widths: [cell_width; 256],
        }
    }

    /// Parses a font data file of `Key,value` lines.
    ///
    /// Recognised keys: `Cell Width`, `Cell Height`, `Start Char`,
    /// `Image Width`, `Image Height` and `Char <code> Base Width`. Any other
    /// line is ignored. Glyphs without a base width advance by 0.
    pub fn parse(source: &str) -> Result<Self, FontMetricsError> {
        let mut cell_width = None;
        let mut cell_height = None;
        let mut starting_char = 0u8;
        let mut image_width = None;
        let mut image_height = None;
        let mut widths = [0u32; 256];

        for (i, raw) in source.lines().enumerate() {
            let line = i + 1;
            let Some((key, value)) = raw.split_once(',') else { continue };
            let key = key.trim();
            let number = || parse_number(line, key, value);

            match key {
                "Cell Width" => cell_width = Some(number()?),
                "Cell Height" => cell_height = Some(number()?),
                "Image Width" => image_width = Some(number()?),
                "Image Height" => image_height = Some(number()?),
                "Start Char" => {
                    let code = number()?;
                    starting_char = u8::try_from(code)
                        .map_err(|_| FontMetricsError::CharOutOfRange { line, code })?;
                }
                _ => {
                    let words: Vec<&str> = key.split_whitespace().collect();
                    if let ["Char", code, "Base", ..] = words.as_slice() {
                        let code = parse_number(line, key, code)?;
                        let slot = widths
                            .get_mut(code as usize)
                            .ok_or(FontMetricsError::CharOutOfRange { line, code })?;
                        *slot = number()?;
                    }
                }
            }
        }

        let cell_width = cell_width.ok_or(FontMetricsError::MissingField("Cell Width"))?;
        let cell_height = cell_height.ok_or(FontMetricsError::MissingField("Cell Height"))?;
        if cell_width == 0 || cell_height == 0 {
            return Err(FontMetricsError::EmptyCell { width: cell_width, height: cell_height });
        }

        Ok(Self {
            cell_width,
            cell_height,
            starting_char,
            image_width: image_width.ok_or(FontMetricsError::MissingField("Image Width"))?,
            image_height: image_height.ok_or(FontMetricsError::MissingField("Image Height"))?,
            widths,
        })
    }

    /// `(cells_wide, cells_high)` of the font image.
    pub fn grid(&self) -> (u32, u32) {
        (
            self.image_width / self.cell_width.max(1),
            self.image_height / self.cell_height.max(1),
        )
    }

    #[inline]
    pub fn advance(&self, byte: u8) -> u32 {
        self.widths[byte as usize]
    }

    /// Atlas cell of `byte`. Bytes below `starting_char` wrap.
    #[inline]
    pub fn cell_of(&self, byte: u8) -> u32 {
        u32::from(byte.wrapping_sub(self.starting_char))
    }
}

fn parse_number(line: usize, key: &str, value: &str) -> Result<u32, FontMetricsError> {
    value.trim().parse().map_err(|_| FontMetricsError::InvalidNumber {
        line,
        key: key.to_owned(),
        value: value.trim().to_owned(),
    })
}
