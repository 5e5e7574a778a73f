// Palette resolution for monochrome and color modes
//
// Monochrome: each palette register packs four 2-bit shades, one per color index.
// Color: each layer has 64 bytes of palette RAM holding eight palettes of four
// little-endian RGB555 colors (bits 0-4 red, 5-9 green, 10-14 blue).

use serde::{Deserialize, Serialize};

use super::constants::{COLOR_PALETTE_COUNT, COLOR_PALETTE_MEMORY_SIZE};
use super::memory::MemoryError;
use super::output::Channel;
use super::registers::RenderContext;

/// Monochrome palette register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonochromePalette {
    /// BGP ($FF47)
    Bgp,
    /// OBP0 ($FF48)
    #[default]
    Obp0,
    /// OBP1 ($FF49)
    Obp1,
}

/// Layer a color is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Sprite,
}

/// Palette selection carried by a sprite or a background tile
///
/// Monochrome hardware only looks at `monochrome`; color hardware only at `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteSelector {
    pub monochrome: MonochromePalette,
    /// Color palette number (0-7)
    pub color: u8,
}

/// A 15-bit RGB color as stored in color palette RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb555(pub u16);

impl Rgb555 {
    /// Build a color from 5-bit components
    pub fn from_components(red: u8, green: u8, blue: u8) -> Self {
        Rgb555(
            (red as u16 & 0x1F) | ((green as u16 & 0x1F) << 5) | ((blue as u16 & 0x1F) << 10),
        )
    }

    /// Extract one 5-bit channel; the value is not upscaled
    #[inline]
    pub fn component(self, channel: Channel) -> u8 {
        let shift = 5 * channel.index() as u16;
        ((self.0 >> shift) & 0x1F) as u8
    }
}

/// Output of the palette resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedColor {
    /// Monochrome shade (0-3), written identically to every channel
    Shade(u8),
    /// Color mode RGB, one 5-bit value per channel
    Rgb(Rgb555),
}

impl ResolvedColor {
    /// Channel values in R, G, B order
    pub fn channels(self) -> [u8; 3] {
        match self {
            ResolvedColor::Shade(shade) => [shade; 3],
            ResolvedColor::Rgb(rgb) => Channel::ALL.map(|channel| rgb.component(channel)),
        }
    }
}

/// The three monochrome palette registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonochromePalettes {
    pub bgp: u8,
    pub obp0: u8,
    pub obp1: u8,
}

impl MonochromePalettes {
    /// Register value for a palette
    pub fn register(&self, palette: MonochromePalette) -> u8 {
        match palette {
            MonochromePalette::Bgp => self.bgp,
            MonochromePalette::Obp0 => self.obp0,
            MonochromePalette::Obp1 => self.obp1,
        }
    }

    /// Set a palette register
    pub fn set_register(&mut self, palette: MonochromePalette, value: u8) {
        match palette {
            MonochromePalette::Bgp => self.bgp = value,
            MonochromePalette::Obp0 => self.obp0 = value,
            MonochromePalette::Obp1 => self.obp1 = value,
        }
    }

    /// Shade (0-3) for a color index in the given palette
    #[inline]
    pub fn shade(&self, palette: MonochromePalette, color_index: u8) -> u8 {
        shade_from_register(self.register(palette), color_index)
    }
}

impl Default for MonochromePalettes {
    /// Identity mapping (0b11_10_01_00) on every register
    fn default() -> Self {
        MonochromePalettes {
            bgp: 0xE4,
            obp0: 0xE4,
            obp1: 0xE4,
        }
    }
}

/// Extract the 2-bit shade for `color_index` from a packed palette register
#[inline]
pub fn shade_from_register(register: u8, color_index: u8) -> u8 {
    (register >> ((color_index & 0x03) * 2)) & 0x03
}

/// Color palette RAM for one layer, accessed through its specification
/// register (BCPS/OCPS) and data register (BCPD/OCPD)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPaletteMemory {
    data: [u8; COLOR_PALETTE_MEMORY_SIZE],
    /// Bits 0-5: byte index, bit 7: auto-increment
    spec: u8,
}

impl ColorPaletteMemory {
    /// Create palette RAM filled with white, matching the power-on state
    pub fn new() -> Self {
        ColorPaletteMemory {
            data: [0xFF; COLOR_PALETTE_MEMORY_SIZE],
            spec: 0,
        }
    }

    /// Read the specification register; bit 6 always reads as set
    pub fn read_spec(&self) -> u8 {
        self.spec | 0x40
    }

    /// Write the specification register
    pub fn write_spec(&mut self, value: u8) {
        self.spec = value & 0xBF;
    }

    /// Read the byte selected by the specification register
    pub fn read_data(&self) -> u8 {
        self.data[(self.spec & 0x3F) as usize]
    }

    /// Write the byte selected by the specification register,
    /// advancing the index when auto-increment is on
    pub fn write_data(&mut self, value: u8) {
        let index = self.spec & 0x3F;
        self.data[index as usize] = value;

        if self.spec & 0x80 != 0 {
            let next = (index + 1) & 0x3F;
            self.spec = (self.spec & !0x3F) | next;
        }
    }

    /// Byte offset of a color: 8 bytes per palette, 2 bytes per color
    #[inline]
    fn color_offset(palette: u8, color_index: u8) -> usize {
        ((palette % COLOR_PALETTE_COUNT) as usize) * 8 + ((color_index & 0x03) as usize) * 2
    }

    /// Color of `color_index` in `palette`
    ///
    /// # Arguments
    ///
    /// * `palette` - Palette number (0-7)
    /// * `color_index` - Color index (0-3)
    #[inline]
    pub fn color(&self, palette: u8, color_index: u8) -> Rgb555 {
        let offset = Self::color_offset(palette, color_index);
        let lo = self.data[offset] as u16;
        let hi = self.data[offset + 1] as u16;
        Rgb555((hi << 8) | lo)
    }

    /// Store a color directly, bypassing the register interface
    pub fn set_color(&mut self, palette: u8, color_index: u8, color: Rgb555) {
        let offset = Self::color_offset(palette, color_index);
        self.data[offset] = (color.0 & 0xFF) as u8;
        self.data[offset + 1] = (color.0 >> 8) as u8;
    }

    /// Raw palette RAM
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Replace the raw palette RAM
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::InvalidPaletteSize` unless `data` is 64 bytes long.
    pub fn load(&mut self, data: &[u8]) -> Result<(), MemoryError> {
        if data.len() != COLOR_PALETTE_MEMORY_SIZE {
            return Err(MemoryError::InvalidPaletteSize {
                expected: COLOR_PALETTE_MEMORY_SIZE,
                found: data.len(),
            });
        }
        self.data.copy_from_slice(data);
        Ok(())
    }
}

impl Default for ColorPaletteMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// All palette state needed to resolve a color index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palettes {
    pub monochrome: MonochromePalettes,
    pub background: ColorPaletteMemory,
    pub sprite: ColorPaletteMemory,
}

impl Palettes {
    /// Create palettes in their power-on state
    pub fn new() -> Self {
        Self::default()
    }

    /// RGB color from the background or sprite palette RAM
    #[inline]
    pub fn rgb(&self, palette: u8, color_index: u8, layer: Layer) -> Rgb555 {
        match layer {
            Layer::Background => self.background.color(palette, color_index),
            Layer::Sprite => self.sprite.color(palette, color_index),
        }
    }

    /// Resolve a color index to an output color
    ///
    /// # Arguments
    ///
    /// * `ctx` - Rendering context (selects monochrome or color resolution)
    /// * `selector` - Palette selection of the pixel's sprite or tile
    /// * `color_index` - Color index (0-3)
    /// * `layer` - Layer the pixel belongs to
    #[inline]
    pub fn resolve(
        &self,
        ctx: &RenderContext,
        selector: PaletteSelector,
        color_index: u8,
        layer: Layer,
    ) -> ResolvedColor {
        if ctx.color_mode {
            ResolvedColor::Rgb(self.rgb(selector.color, color_index, layer))
        } else {
            ResolvedColor::Shade(self.monochrome.shade(selector.monochrome, color_index))
        }
    }
}
