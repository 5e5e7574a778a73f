//! PPU unit tests
//!
//! This module contains tests for sprite compositing and the scanline
//! driver, organized by functionality.

use super::*;
use super::registers::{LCDC, OBP0, OBP1};

// ========================================
// Test Constants (OAM attribute bits)
// ========================================

/// OBJ-to-BG priority: sprite behind BG colors 1-3
pub(crate) const ATTR_BEHIND_BG: u8 = 0x80;
/// Vertical flip
pub(crate) const ATTR_Y_FLIP: u8 = 0x40;
/// Horizontal flip
pub(crate) const ATTR_X_FLIP: u8 = 0x20;
/// Monochrome palette OBP1
pub(crate) const ATTR_OBP1: u8 = 0x10;
/// Tile from VRAM bank 1 (color only)
pub(crate) const ATTR_BANK1: u8 = 0x08;

/// LCDC with display, sprites and BG priority enabled, 8x8 sprites
pub(crate) const LCDC_SPRITES_8X8: u8 = 0x83;
/// LCDC with display, sprites and BG priority enabled, 8x16 sprites
pub(crate) const LCDC_SPRITES_8X16: u8 = 0x87;

// ========================================
// Test Helper Functions
// ========================================

/// Place a sprite using screen coordinates (offsets are added here)
pub(crate) fn place_sprite(ppu: &mut Ppu, index: u8, y: u8, x: u8, tile: u8, attributes: u8) {
    let base = index * 4;
    ppu.write_oam(base, y.wrapping_add(16));
    ppu.write_oam(base + 1, x.wrapping_add(8));
    ppu.write_oam(base + 2, tile);
    ppu.write_oam(base + 3, attributes);
}

/// Write one row of a tile in the $8000 region
pub(crate) fn write_tile_row(ppu: &mut Ppu, bank: VramBank, tile: u8, row: u8, low: u8, high: u8) {
    let addr = 0x8000 + tile as u16 * 16 + row as u16 * 2;
    ppu.vram_mut().write(addr, bank, low);
    ppu.vram_mut().write(addr + 1, bank, high);
}

/// Fill all 8 rows of a tile with the same two bytes
pub(crate) fn fill_tile(ppu: &mut Ppu, bank: VramBank, tile: u8, low: u8, high: u8) {
    for row in 0..8 {
        write_tile_row(ppu, bank, tile, row, low, high);
    }
}

/// Monochrome PPU with sprites enabled and the given OBP0/OBP1 values
pub(crate) fn monochrome_ppu(obp0: u8, obp1: u8) -> Ppu {
    let mut ppu = Ppu::new();
    ppu.write_register(LCDC, LCDC_SPRITES_8X8);
    ppu.write_register(OBP0, obp0);
    ppu.write_register(OBP1, obp1);
    ppu
}

/// Color PPU with sprites enabled
pub(crate) fn color_ppu(lcdc: u8) -> Ppu {
    let mut ppu = Ppu::with_mode(true);
    ppu.write_register(LCDC, lcdc);
    ppu
}

/// Fill the priority buffer for `scanline` with one entry on every column
pub(crate) fn fill_priority(ppu: &mut Ppu, scanline: u8, color_index: u8, bg_priority: bool) {
    let buffer = ppu.priority_buffer_mut();
    buffer.begin_line(scanline);
    for x in 0..SCREEN_WIDTH as u8 {
        buffer.record(x, color_index, bg_priority);
    }
}

/// Render the sprites of one scanline into a fresh recorder
pub(crate) fn sprite_writes(ppu: &Ppu, scanline: u8, tall: bool) -> RecordingSink {
    let mut sink = RecordingSink::new();
    ppu.render_sprites(scanline, tall, &mut sink);
    sink
}

// ========================================
// Test Modules
// ========================================

mod quirks;
