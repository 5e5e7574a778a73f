// Decoded sprite attribute table

use super::constants::{
    OAM_ENTRY_COUNT, OAM_ENTRY_SIZE, SPRITE_X_OFFSET, SPRITE_Y_OFFSET, TALL_SPRITE_HEIGHT,
    TILE_SIZE,
};
use super::memory::{Oam, VramBank};
use super::palette::MonochromePalette;

/// Decoded sprite attribute byte
///
/// ```text
/// Bit 7   OBJ-to-BG priority (1 = behind BG colors 1-3)
/// Bit 6   Y flip
/// Bit 5   X flip
/// Bit 4   Palette number (monochrome: OBP0/OBP1)
/// Bit 3   Tile VRAM bank (color only)
/// Bit 2-0 Palette number (color only, OBP0-7)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteAttributes {
    pub behind_background: bool,
    pub y_flip: bool,
    pub x_flip: bool,
    pub monochrome_palette: MonochromePalette,
    pub vram_bank: VramBank,
    pub color_palette: u8,
}

impl SpriteAttributes {
    /// Decode a raw attribute byte
    pub fn from_byte(value: u8) -> Self {
        SpriteAttributes {
            behind_background: value & 0x80 != 0,
            y_flip: value & 0x40 != 0,
            x_flip: value & 0x20 != 0,
            monochrome_palette: if value & 0x10 != 0 {
                MonochromePalette::Obp1
            } else {
                MonochromePalette::Obp0
            },
            vram_bank: if value & 0x08 != 0 {
                VramBank::Bank1
            } else {
                VramBank::Bank0
            },
            color_palette: value & 0x07,
        }
    }

    /// Re-encode the attributes into the raw byte
    pub fn to_byte(self) -> u8 {
        let mut value = self.color_palette & 0x07;
        if self.behind_background {
            value |= 0x80;
        }
        if self.y_flip {
            value |= 0x40;
        }
        if self.x_flip {
            value |= 0x20;
        }
        if self.monochrome_palette == MonochromePalette::Obp1 {
            value |= 0x10;
        }
        if self.vram_bank == VramBank::Bank1 {
            value |= 0x08;
        }
        value
    }
}

/// One sprite attribute entry with the hardware offsets removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sprite {
    /// OAM index (0-39)
    pub index: u8,
    /// Raw Y position (screen Y + 16)
    pub raw_y: u8,
    /// Raw X position (screen X + 8)
    pub raw_x: u8,
    /// Tile index
    pub tile_index: u8,
    /// Decoded attributes
    pub attributes: SpriteAttributes,
}

impl Sprite {
    /// Decode the entry at `index` from the raw table
    pub fn decode(oam: &Oam, index: u8) -> Self {
        let base = index as usize * OAM_ENTRY_SIZE;
        Sprite {
            index,
            raw_y: oam.read(base),
            raw_x: oam.read(base + 1),
            tile_index: oam.read(base + 2),
            attributes: SpriteAttributes::from_byte(oam.read(base + 3)),
        }
    }

    /// Top edge on screen; raw Y below 16 wraps to 240 and up
    pub fn screen_y(&self) -> u8 {
        self.raw_y.wrapping_sub(SPRITE_Y_OFFSET)
    }

    /// Left edge on screen; wraps for sprites partially left of the screen
    pub fn screen_x(&self) -> u8 {
        self.raw_x.wrapping_sub(SPRITE_X_OFFSET)
    }

    /// Row within the sprite covered by `scanline`, if any
    ///
    /// A top edge that wrapped above the screen lies past every visible
    /// scanline, so such a sprite never covers scanlines 0-15.
    pub fn row_on_scanline(&self, scanline: u8, tall: bool) -> Option<u8> {
        let top = self.screen_y();
        let bottom = top as u16 + sprite_height(tall) as u16;
        (scanline >= top && (scanline as u16) < bottom).then(|| scanline - top)
    }

    /// Tile index actually used for rendering
    ///
    /// In 8x16 mode the low bit is ignored: the upper tile is `NN & 0xFE`
    /// and the lower tile is the one right after it.
    pub fn effective_tile(&self, tall: bool) -> u8 {
        if tall {
            self.tile_index & 0xFE
        } else {
            self.tile_index
        }
    }
}

/// Sprite height in pixels for the given size flag
#[inline]
pub fn sprite_height(tall: bool) -> u8 {
    if tall {
        TALL_SPRITE_HEIGHT
    } else {
        TILE_SIZE
    }
}

/// All 40 sprite entries, decoded once per pass
#[derive(Debug, Clone, Copy)]
pub struct OamTable {
    entries: [Sprite; OAM_ENTRY_COUNT],
}

impl OamTable {
    /// Decode every entry of the raw table
    pub fn decode(oam: &Oam) -> Self {
        let mut entries = [Sprite::default(); OAM_ENTRY_COUNT];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = Sprite::decode(oam, i as u8);
        }
        OamTable { entries }
    }

    /// All entries in OAM order
    pub fn entries(&self) -> &[Sprite; OAM_ENTRY_COUNT] {
        &self.entries
    }

    /// Entry at the given index
    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.entries.get(index)
    }

    /// Entries covering the scanline, paired with the covered row, in OAM order
    pub fn on_scanline(&self, scanline: u8, tall: bool) -> impl Iterator<Item = (Sprite, u8)> + '_ {
        self.entries
            .iter()
            .filter_map(move |sprite| sprite.row_on_scanline(scanline, tall).map(|row| (*sprite, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oam_with_sprite(index: usize, bytes: [u8; 4]) -> Oam {
        let mut oam = Oam::new();
        for (i, b) in bytes.iter().enumerate() {
            oam.write(index * 4 + i, *b);
        }
        oam
    }

    #[test]
    fn test_attribute_decode() {
        let attrs = SpriteAttributes::from_byte(0xFF);
        assert!(attrs.behind_background);
        assert!(attrs.y_flip);
        assert!(attrs.x_flip);
        assert_eq!(attrs.monochrome_palette, MonochromePalette::Obp1);
        assert_eq!(attrs.vram_bank, VramBank::Bank1);
        assert_eq!(attrs.color_palette, 7);

        let attrs = SpriteAttributes::from_byte(0x00);
        assert_eq!(attrs, SpriteAttributes::default());
    }

    #[test]
    fn test_attribute_byte_round_trip() {
        for value in [0x00, 0x15, 0x2A, 0x80, 0xC3, 0xFF] {
            assert_eq!(SpriteAttributes::from_byte(value).to_byte(), value);
        }
    }

    #[test]
    fn test_sprite_decode_removes_offsets() {
        let oam = oam_with_sprite(3, [36, 18, 0x42, 0x20]);
        let sprite = Sprite::decode(&oam, 3);

        assert_eq!(sprite.index, 3);
        assert_eq!(sprite.screen_y(), 20);
        assert_eq!(sprite.screen_x(), 10);
        assert_eq!(sprite.tile_index, 0x42);
        assert!(sprite.attributes.x_flip);
    }

    #[test]
    fn test_row_on_scanline() {
        let oam = oam_with_sprite(0, [36, 18, 0, 0]);
        let sprite = Sprite::decode(&oam, 0);

        assert_eq!(sprite.row_on_scanline(19, false), None);
        assert_eq!(sprite.row_on_scanline(20, false), Some(0));
        assert_eq!(sprite.row_on_scanline(27, false), Some(7));
        assert_eq!(sprite.row_on_scanline(28, false), None);
        assert_eq!(sprite.row_on_scanline(35, true), Some(15));
        assert_eq!(sprite.row_on_scanline(36, true), None);
    }

    #[test]
    fn test_sprite_with_wrapped_top_edge_not_visible() {
        // Raw Y = 10 wraps the top edge to 250
        let oam = oam_with_sprite(0, [10, 8, 0, 0]);
        let sprite = Sprite::decode(&oam, 0);
        assert_eq!(sprite.screen_y(), 250);

        for scanline in 0..144u8 {
            assert_eq!(sprite.row_on_scanline(scanline, false), None);
            assert_eq!(sprite.row_on_scanline(scanline, true), None);
        }
        // Only the wrapped rows themselves match
        assert_eq!(sprite.row_on_scanline(250, false), Some(0));
        assert_eq!(sprite.row_on_scanline(255, true), Some(5));
    }

    #[test]
    fn test_sprite_at_top_edge_visible() {
        // Raw Y = 16 is the first fully visible position
        let oam = oam_with_sprite(0, [16, 8, 0, 0]);
        let sprite = Sprite::decode(&oam, 0);

        assert_eq!(sprite.row_on_scanline(0, false), Some(0));
        assert_eq!(sprite.row_on_scanline(7, false), Some(7));
        assert_eq!(sprite.row_on_scanline(8, false), None);
        assert_eq!(sprite.row_on_scanline(15, true), Some(15));
        assert_eq!(sprite.row_on_scanline(16, true), None);
    }

    #[test]
    fn test_hidden_sprite_never_visible() {
        // Raw Y = 0 hides the sprite in both sizes
        let sprite = Sprite::default();
        for scanline in 0..144u8 {
            assert_eq!(sprite.row_on_scanline(scanline, false), None);
            assert_eq!(sprite.row_on_scanline(scanline, true), None);
        }
    }

    #[test]
    fn test_effective_tile_clears_low_bit_in_tall_mode() {
        let oam = oam_with_sprite(0, [16, 8, 0x05, 0]);
        let sprite = Sprite::decode(&oam, 0);
        assert_eq!(sprite.effective_tile(false), 0x05);
        assert_eq!(sprite.effective_tile(true), 0x04);
    }

    #[test]
    fn test_table_on_scanline_filters_in_oam_order() {
        let mut oam = Oam::new();
        for (index, y) in [(0usize, 16u8), (5, 100), (7, 12)] {
            oam.write(index * 4, y);
        }
        let table = OamTable::decode(&oam);

        let visible: Vec<(u8, u8)> = table
            .on_scanline(0, false)
            .map(|(sprite, row)| (sprite.index, row))
            .collect();
        assert_eq!(visible, vec![(0, 0), (7, 4)]);
        assert_eq!(table.entries().len(), 40);
        assert_eq!(table.get(5).map(|s| s.raw_y), Some(100));
    }
}
