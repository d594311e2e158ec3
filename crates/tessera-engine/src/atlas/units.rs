use crate::backend::TextureUnit;

/// Hands out texture units in creation order. Units are never reclaimed.
#[derive(Debug, Clone)]
pub struct TextureUnits {
    next: u32,
    limit: u32,
}

impl TextureUnits {
    /// Counter over `limit` units, clamped to [`TextureUnit::COUNT`].
    pub fn new(limit: u32) -> Self {
        Self { next: 0, limit: limit.min(TextureUnit::COUNT) }
    }

    /// Claims the next unit.
    ///
    /// Once `limit` units are out, logs a warning and returns
    /// [`TextureUnit::INVALID`]; sprites from such an atlas render in the
    /// invalid-texture colour.
    pub fn allocate(&mut self) -> TextureUnit {
        if self.next >= self.limit {
            log::warn!(
                "texture unit limit ({}) reached; atlas gets invalid unit {}",
                self.limit,
                TextureUnit::INVALID.index()
            );
            return TextureUnit::INVALID;
        }
        let unit = TextureUnit(self.next);
        self.next += 1;
        unit
    }

    #[inline]
    pub fn allocated(&self) -> u32 {
        self.next
    }

    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for TextureUnits {
    fn default() -> Self {
        Self::new(TextureUnit::COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_sequential() {
        let mut units = TextureUnits::default();
        assert_eq!(units.allocate(), TextureUnit(0));
        assert_eq!(units.allocate(), TextureUnit(1));
        assert_eq!(units.allocated(), 2);
    }

    #[test]
    fn seventeenth_unit_is_flagged_invalid() {
        let mut units = TextureUnits::default();
        for i in 0..16 {
            assert_eq!(units.allocate(), TextureUnit(i));
        }
        let overflow = units.allocate();
        assert_eq!(overflow, TextureUnit::INVALID);
        assert_eq!(overflow.index(), 16);
        assert!(!overflow.is_valid());
        assert_eq!(units.allocated(), 16);
    }

    #[test]
    fn limit_is_clamped_to_unit_count() {
        assert_eq!(TextureUnits::new(64).limit(), 16);
        let mut units = TextureUnits::new(1);
        units.allocate();
        assert_eq!(units.allocate(), TextureUnit::INVALID);
    }
}
