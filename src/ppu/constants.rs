// PPU constants

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 160;

/// Screen height in pixels (visible scanlines)
pub const SCREEN_HEIGHT: usize = 144;

/// Number of entries in the sprite attribute table
pub const OAM_ENTRY_COUNT: usize = 40;

/// Size of one sprite attribute entry in bytes
pub const OAM_ENTRY_SIZE: usize = 4;

/// Size of the sprite attribute table in bytes (40 × 4)
pub const OAM_SIZE: usize = OAM_ENTRY_COUNT * OAM_ENTRY_SIZE;

/// Start of VRAM in the CPU address space
pub const VRAM_START: u16 = 0x8000;

/// Last VRAM address in the CPU address space
pub const VRAM_END: u16 = 0x9FFF;

/// Size of one VRAM bank (8KB)
pub const VRAM_BANK_SIZE: usize = 0x2000;

/// Tile data region used by sprites ($8000, unsigned tile indices)
pub const TILE_DATA_UNSIGNED_START: u16 = 0x8000;

/// Tile data region base for signed tile indices ($8800 mode, centered at $9000)
pub const TILE_DATA_SIGNED_BASE: u16 = 0x9000;

/// Bytes per 8x8 tile (2 bytes per row)
pub const TILE_BYTES: u16 = 16;

/// Bytes per tile row (two bitplanes)
pub const BYTES_PER_TILE_ROW: u16 = 2;

/// Tile size in pixels (8x8)
pub const TILE_SIZE: u8 = 8;

/// Height of a tall (8x16) sprite
pub const TALL_SPRITE_HEIGHT: u8 = 16;

/// Sprite Y position offset (screen Y + 16)
pub const SPRITE_Y_OFFSET: u8 = 16;

/// Sprite X position offset (screen X + 8)
pub const SPRITE_X_OFFSET: u8 = 8;

/// Size of a color palette memory (8 palettes × 4 colors × 2 bytes)
pub const COLOR_PALETTE_MEMORY_SIZE: usize = 64;

/// Number of color palettes per layer
pub const COLOR_PALETTE_COUNT: u8 = 8;
