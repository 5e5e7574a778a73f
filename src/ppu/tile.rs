// Tile decoding
//
// Each 8x8 tile is 16 bytes: two bytes per row. The first byte of a row holds
// the low bit of every pixel's color index, the second byte the high bit.
// Bit 7 is the leftmost pixel.

use super::constants::{
    BYTES_PER_TILE_ROW, TILE_BYTES, TILE_DATA_SIGNED_BASE, TILE_DATA_UNSIGNED_START,
};
use super::memory::{Vram, VramBank};

/// Tile data addressing mode (LCDC bit 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAddressing {
    /// $8000 method: unsigned tile index from $8000 (always used by sprites)
    Unsigned,
    /// $8800 method: signed tile index relative to $9000
    Signed,
}

/// Base address of a tile's data
///
/// # Arguments
///
/// * `addressing` - Tile data addressing mode
/// * `tile_index` - Tile index from OAM or the tile map
#[inline]
pub fn tile_data_address(addressing: TileAddressing, tile_index: u8) -> u16 {
    match addressing {
        TileAddressing::Unsigned => TILE_DATA_UNSIGNED_START + (tile_index as u16) * TILE_BYTES,
        TileAddressing::Signed => {
            let offset = (tile_index as i8 as i16) * TILE_BYTES as i16;
            TILE_DATA_SIGNED_BASE.wrapping_add_signed(offset)
        }
    }
}

/// Byte offset of a row inside a tile's data
#[inline]
pub fn row_offset(row: u8) -> u16 {
    row as u16 * BYTES_PER_TILE_ROW
}

/// One row of tile pixel data (both bitplanes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileRow {
    /// Low bitplane
    pub low: u8,
    /// High bitplane
    pub high: u8,
}

impl TileRow {
    /// Create a row from its two raw bytes
    pub fn new(low: u8, high: u8) -> Self {
        TileRow { low, high }
    }

    /// Read the two bytes of a row from VRAM
    ///
    /// # Arguments
    ///
    /// * `vram` - Video RAM
    /// * `bank` - Bank holding the tile
    /// * `addr` - Address of the row (tile base plus row offset)
    #[inline]
    pub fn fetch(vram: &Vram, bank: VramBank, addr: u16) -> Self {
        TileRow {
            low: vram.read(addr, bank),
            high: vram.read(addr.wrapping_add(1), bank),
        }
    }

    /// Color index (0-3) of the pixel at screen column `column` (0 = leftmost)
    ///
    /// With `x_flip` the row is read mirrored.
    #[inline]
    pub fn color_index(self, column: u8, x_flip: bool) -> u8 {
        let bit = if x_flip { column & 0x07 } else { 7 - (column & 0x07) };
        let lo = (self.low >> bit) & 0x01;
        let hi = (self.high >> bit) & 0x01;
        (hi << 1) | lo
    }

    /// Decode all eight pixels, leftmost first
    pub fn pixels(self, x_flip: bool) -> [u8; 8] {
        let mut out = [0u8; 8];
        for (column, pixel) in out.iter_mut().enumerate() {
            *pixel = self.color_index(column as u8, x_flip);
        }
        out
    }

    /// True if every pixel of the row is color index 0
    pub fn is_transparent(self) -> bool {
        self.low | self.high == 0
    }
}

/// Fetch a tile row by tile index, bank and row
///
/// `row` may exceed 7 for the lower half of a tall sprite; the bytes then come
/// from the following tile.
pub fn fetch_tile_row(
    vram: &Vram,
    addressing: TileAddressing,
    tile_index: u8,
    bank: VramBank,
    row: u8,
) -> TileRow {
    let addr = tile_data_address(addressing, tile_index).wrapping_add(row_offset(row));
    TileRow::fetch(vram, bank, addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_tile_address() {
        assert_eq!(tile_data_address(TileAddressing::Unsigned, 0), 0x8000);
        assert_eq!(tile_data_address(TileAddressing::Unsigned, 1), 0x8010);
        assert_eq!(tile_data_address(TileAddressing::Unsigned, 0xFF), 0x8FF0);
    }

    #[test]
    fn test_signed_tile_address() {
        assert_eq!(tile_data_address(TileAddressing::Signed, 0), 0x9000);
        assert_eq!(tile_data_address(TileAddressing::Signed, 0x7F), 0x97F0);
        assert_eq!(tile_data_address(TileAddressing::Signed, 0x80), 0x8800);
        assert_eq!(tile_data_address(TileAddressing::Signed, 0xFF), 0x8FF0);
    }

    #[test]
    fn test_color_index_bitplanes() {
        // low = 0b1010_0000, high = 0b1100_0000
        let row = TileRow::new(0xA0, 0xC0);
        assert_eq!(row.pixels(false), [3, 2, 1, 0, 0, 0, 0, 0]);
        assert_eq!(row.pixels(true), [0, 0, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_color_index_low_plane_only() {
        let row = TileRow::new(0xFF, 0x00);
        assert_eq!(row.pixels(false), [1; 8]);
        assert!(!row.is_transparent());
        assert!(TileRow::default().is_transparent());
    }

    #[test]
    fn test_fetch_tile_row_per_bank() {
        let mut vram = Vram::new();
        // Tile 2, row 3 in bank 1
        vram.write(0x8026, VramBank::Bank1, 0x81);
        vram.write(0x8027, VramBank::Bank1, 0x42);

        let row = fetch_tile_row(&vram, TileAddressing::Unsigned, 2, VramBank::Bank1, 3);
        assert_eq!(row, TileRow::new(0x81, 0x42));

        let row = fetch_tile_row(&vram, TileAddressing::Unsigned, 2, VramBank::Bank0, 3);
        assert_eq!(row, TileRow::default());
    }

    #[test]
    fn test_tall_row_reads_next_tile() {
        let mut vram = Vram::new();
        // Row 9 of tile 4 is row 1 of tile 5
        vram.write(0x8052, VramBank::Bank0, 0x3C);
        let row = fetch_tile_row(&vram, TileAddressing::Unsigned, 4, VramBank::Bank0, 9);
        assert_eq!(row.low, 0x3C);
    }
}
