// LCD control register, the per-pass rendering context and
// CPU-facing register handling

use serde::{Deserialize, Serialize};

use super::memory::VramBank;
use super::palette::MonochromePalette;
use super::Ppu;

/// LCD control ($FF40)
pub const LCDC: u16 = 0xFF40;
/// Background palette data, monochrome ($FF47)
pub const BGP: u16 = 0xFF47;
/// Object palette 0 data, monochrome ($FF48)
pub const OBP0: u16 = 0xFF48;
/// Object palette 1 data, monochrome ($FF49)
pub const OBP1: u16 = 0xFF49;
/// VRAM bank select, color only ($FF4F)
pub const VBK: u16 = 0xFF4F;
/// Background palette specification, color only ($FF68)
pub const BCPS: u16 = 0xFF68;
/// Background palette data, color only ($FF69)
pub const BCPD: u16 = 0xFF69;
/// Object palette specification, color only ($FF6A)
pub const OCPS: u16 = 0xFF6A;
/// Object palette data, color only ($FF6B)
pub const OCPD: u16 = 0xFF6B;

/// LCD control register (LCDC, $FF40)
///
/// Only the bits that affect compositing are exposed as named accessors;
/// the raw value is kept so it can be stored and restored unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LcdControl(pub u8);

impl LcdControl {
    /// Bit 7: LCD and PPU enable
    pub fn display_enabled(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Bit 2: OBJ size (0 = 8x8, 1 = 8x16)
    pub fn tall_sprites(self) -> bool {
        self.0 & 0x04 != 0
    }

    /// Bit 1: OBJ enable
    pub fn sprites_enabled(self) -> bool {
        self.0 & 0x02 != 0
    }

    /// Bit 0: BG/window enable on monochrome hardware,
    /// master BG-over-OBJ priority in color mode
    pub fn master_priority(self) -> bool {
        self.0 & 0x01 != 0
    }
}

/// Hardware mode flags consulted by every compositing query
///
/// Built once per scanline pass and handed to each component explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    /// Color (CGB) mode is active
    pub color_mode: bool,
    /// LCDC bit 0
    pub master_priority: bool,
}

impl RenderContext {
    /// Create a context for monochrome hardware
    pub fn monochrome() -> Self {
        RenderContext {
            color_mode: false,
            master_priority: true,
        }
    }

    /// Create a context for color hardware with the given LCDC bit 0
    pub fn color(master_priority: bool) -> Self {
        RenderContext {
            color_mode: true,
            master_priority,
        }
    }

    /// Derive the context from the mode flag and the current LCDC value
    pub fn from_lcdc(color_mode: bool, lcdc: LcdControl) -> Self {
        RenderContext {
            color_mode,
            master_priority: lcdc.master_priority(),
        }
    }

    /// In color mode with LCDC bit 0 clear, sprites are drawn above
    /// everything regardless of any priority bits
    pub fn sprites_always_on_top(self) -> bool {
        self.color_mode && !self.master_priority
    }
}

impl Ppu {
    /// Read a video register
    ///
    /// Color-only registers read as $FF in monochrome mode, as do
    /// addresses this module does not handle.
    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            LCDC => self.lcdc.0,
            BGP => self.palettes.monochrome.register(MonochromePalette::Bgp),
            OBP0 => self.palettes.monochrome.register(MonochromePalette::Obp0),
            OBP1 => self.palettes.monochrome.register(MonochromePalette::Obp1),
            VBK if self.color_mode => 0xFE | self.vbk.id(),
            BCPS if self.color_mode => self.palettes.background.read_spec(),
            BCPD if self.color_mode => self.palettes.background.read_data(),
            OCPS if self.color_mode => self.palettes.sprite.read_spec(),
            OCPD if self.color_mode => self.palettes.sprite.read_data(),
            _ => 0xFF,
        }
    }

    /// Write a video register
    ///
    /// Writes to color-only registers are ignored in monochrome mode.
    pub fn write_register(&mut self, addr: u16, data: u8) {
        match addr {
            LCDC => self.lcdc = LcdControl(data),
            BGP => self
                .palettes
                .monochrome
                .set_register(MonochromePalette::Bgp, data),
            OBP0 => self
                .palettes
                .monochrome
                .set_register(MonochromePalette::Obp0, data),
            OBP1 => self
                .palettes
                .monochrome
                .set_register(MonochromePalette::Obp1, data),
            VBK if self.color_mode => {
                self.vbk = if data & 0x01 != 0 {
                    VramBank::Bank1
                } else {
                    VramBank::Bank0
                };
            }
            BCPS if self.color_mode => self.palettes.background.write_spec(data),
            BCPD if self.color_mode => self.palettes.background.write_data(data),
            OCPS if self.color_mode => self.palettes.sprite.write_spec(data),
            OCPD if self.color_mode => self.palettes.sprite.write_data(data),
            _ => {}
        }
    }

    /// Read VRAM through the bank selected by VBK
    pub fn read_vram(&self, addr: u16) -> u8 {
        self.vram.read(addr, self.vbk)
    }

    /// Write VRAM through the bank selected by VBK
    pub fn write_vram(&mut self, addr: u16, data: u8) {
        self.vram.write(addr, self.vbk, data);
    }
}
