// PPU module - scanline compositing for the Game Boy / Game Boy Color video controller
//
// The background/window pass is supplied by the caller through the
// `BackgroundLayer` trait; this module owns video memory, palettes, the
// priority buffer and the sprite compositor.

pub mod constants;
pub mod memory;
pub mod oam;
pub mod order;
pub mod output;
pub mod palette;
pub mod priority;
pub mod registers;
pub mod rendering;
pub mod tile;

#[cfg(test)]
mod tests;

pub use constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use memory::{MemoryError, Oam, Vram, VramBank};
pub use oam::{OamTable, Sprite, SpriteAttributes};
pub use order::{CoordinateOrder, DrawOrder, OamIndexOrder, SpriteOrdering};
pub use output::{Channel, PixelSink, PixelWrite, RecordingSink};
pub use palette::{
    ColorPaletteMemory, Layer, MonochromePalette, MonochromePalettes, PaletteSelector, Palettes,
    ResolvedColor, Rgb555,
};
pub use priority::{BackgroundPriority, PriorityBuffer, PriorityEntry};
pub use registers::{LcdControl, RenderContext};
pub use rendering::{BackgroundLayer, BackgroundLine, BlankBackground, SpriteCompositor};
pub use tile::{TileAddressing, TileRow};

/// Video controller state used for compositing
pub struct Ppu {
    /// Video RAM (two banks)
    pub(crate) vram: Vram,

    /// Sprite attribute table
    pub(crate) oam: Oam,

    /// Monochrome and color palettes
    pub(crate) palettes: Palettes,

    /// Background/window priority for the scanline being composited
    pub(crate) priority: PriorityBuffer,

    /// LCDC ($FF40)
    pub(crate) lcdc: LcdControl,

    /// VRAM bank selected for CPU access (VBK, $FF4F)
    pub(crate) vbk: VramBank,

    /// Color hardware mode
    pub(crate) color_mode: bool,

    /// Sprite overlap tie-break policy
    pub(crate) sprite_order: SpriteOrdering,
}

impl Ppu {
    /// Create a PPU for monochrome hardware
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Create a PPU for monochrome (`false`) or color (`true`) hardware
    ///
    /// LCDC starts at $91 (display, BG and unsigned tile data on) as left by the boot ROM.
    pub fn with_mode(color_mode: bool) -> Self {
        Ppu {
            vram: Vram::new(),
            oam: Oam::new(),
            palettes: Palettes::new(),
            priority: PriorityBuffer::new(),
            lcdc: LcdControl(0x91),
            vbk: VramBank::Bank0,
            color_mode,
            sprite_order: SpriteOrdering::default(),
        }
    }

    /// Whether color mode is active
    pub fn color_mode(&self) -> bool {
        self.color_mode
    }

    /// Switch between monochrome and color mode
    pub fn set_color_mode(&mut self, color_mode: bool) {
        self.color_mode = color_mode;
        if !color_mode {
            self.vbk = VramBank::Bank0;
        }
    }

    /// Current LCDC value
    pub fn lcdc(&self) -> LcdControl {
        self.lcdc
    }

    /// VRAM bank selected for CPU access
    pub fn vram_bank(&self) -> VramBank {
        self.vbk
    }

    /// Sprite overlap tie-break policy
    pub fn sprite_order(&self) -> SpriteOrdering {
        self.sprite_order
    }

    /// Change the sprite overlap tie-break policy
    pub fn set_sprite_order(&mut self, order: SpriteOrdering) {
        self.sprite_order = order;
    }

    /// Rendering context derived from the current mode and LCDC
    pub fn context(&self) -> RenderContext {
        RenderContext::from_lcdc(self.color_mode, self.lcdc)
    }

    /// Video RAM
    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    /// Mutable video RAM
    pub fn vram_mut(&mut self) -> &mut Vram {
        &mut self.vram
    }

    /// Sprite attribute table
    pub fn oam(&self) -> &Oam {
        &self.oam
    }

    /// Mutable sprite attribute table
    pub fn oam_mut(&mut self) -> &mut Oam {
        &mut self.oam
    }

    /// Read a byte of OAM (offset 0-159)
    pub fn read_oam(&self, offset: u8) -> u8 {
        self.oam.read(offset as usize)
    }

    /// Write a byte of OAM (offset 0-159)
    pub fn write_oam(&mut self, offset: u8, data: u8) {
        self.oam.write(offset as usize, data);
    }

    /// Palettes
    pub fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    /// Mutable palettes
    pub fn palettes_mut(&mut self) -> &mut Palettes {
        &mut self.palettes
    }

    /// Priority buffer of the current scanline
    pub fn priority_buffer(&self) -> &PriorityBuffer {
        &self.priority
    }

    /// Mutable priority buffer, for callers running their own background pass
    pub fn priority_buffer_mut(&mut self) -> &mut PriorityBuffer {
        &mut self.priority
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}
