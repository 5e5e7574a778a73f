// PPU Debugger - Debug information for the video state
//
// Provides:
// - Register state capture
// - OAM viewer (all sprites, or only those covering a scanline)
// - Palette viewer (monochrome registers and color palette memory)

use crate::ppu::constants::{COLOR_PALETTE_COUNT, OAM_ENTRY_COUNT};
use crate::ppu::{Layer, MonochromePalette, OamTable, Ppu, Sprite, VramBank};

/// Video register snapshot
///
/// Contains the compositing-relevant registers at a specific point in time.
#[derive(Debug, Clone)]
pub struct PpuState {
    /// Color hardware mode
    pub color_mode: bool,

    /// LCDC register ($FF40)
    pub lcdc: u8,

    /// BGP register ($FF47)
    pub bgp: u8,

    /// OBP0 register ($FF48)
    pub obp0: u8,

    /// OBP1 register ($FF49)
    pub obp1: u8,

    /// VRAM bank selected for CPU access
    pub vram_bank: VramBank,
}

impl PpuState {
    /// Format LCDC flags
    ///
    /// # Returns
    ///
    /// A string describing the LCDC bits used by compositing
    pub fn format_lcdc(&self) -> String {
        let mut flags = Vec::new();

        if self.lcdc & 0x80 != 0 {
            flags.push("LCD");
        }
        if self.lcdc & 0x04 != 0 {
            flags.push("OBJ8x16");
        }
        if self.lcdc & 0x02 != 0 {
            flags.push("OBJ");
        }
        if self.lcdc & 0x01 != 0 {
            flags.push(if self.color_mode { "BGPrio" } else { "BG" });
        }

        if flags.is_empty() {
            "None".to_string()
        } else {
            flags.join(" ")
        }
    }

    /// Format the video state as a string
    pub fn format(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Mode: {}\n",
            if self.color_mode { "Color" } else { "Monochrome" }
        ));
        output.push_str(&format!(
            "LCDC: ${:02X} [{}]\n",
            self.lcdc,
            self.format_lcdc()
        ));
        output.push_str(&format!(
            "BGP: ${:02X} OBP0: ${:02X} OBP1: ${:02X}\n",
            self.bgp, self.obp0, self.obp1
        ));
        output.push_str(&format!("VBK: {}\n", self.vram_bank.id()));

        output
    }
}

impl std::fmt::Display for PpuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PPU[{}] LCDC:{:02X} BGP:{:02X} OBP0:{:02X} OBP1:{:02X}",
            if self.color_mode { "CGB" } else { "DMG" },
            self.lcdc,
            self.bgp,
            self.obp0,
            self.obp1
        )
    }
}

/// Sprite information from OAM, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInfo {
    /// Decoded entry
    pub sprite: Sprite,

    /// Raw attribute byte
    pub attributes: u8,
}

impl SpriteInfo {
    /// Build the info for a decoded entry
    pub fn new(sprite: Sprite) -> Self {
        SpriteInfo {
            sprite,
            attributes: sprite.attributes.to_byte(),
        }
    }

    /// Top edge on screen (may be negative for sprites above the screen)
    pub fn y(&self) -> i16 {
        self.sprite.raw_y as i16 - 16
    }

    /// Left edge on screen (may be negative for sprites left of the screen)
    pub fn x(&self) -> i16 {
        self.sprite.raw_x as i16 - 8
    }

    /// Format sprite info as a string
    pub fn format(&self) -> String {
        let attrs = self.sprite.attributes;
        format!(
            "Sprite {:2}: Y={:4} X={:4} Tile=${:02X} {} CPal={} {}{}{}{}",
            self.sprite.index,
            self.y(),
            self.x(),
            self.sprite.tile_index,
            match attrs.monochrome_palette {
                MonochromePalette::Obp1 => "OBP1",
                _ => "OBP0",
            },
            attrs.color_palette,
            if attrs.behind_background { "BG " } else { "" },
            if attrs.x_flip { "FH " } else { "" },
            if attrs.y_flip { "FV " } else { "" },
            if attrs.vram_bank == VramBank::Bank1 { "B1" } else { "" }
        )
        .trim_end()
        .to_string()
    }
}

/// PPU Debugger
///
/// Read-only views of the video state for inspection tools.
pub struct PpuDebugger {}

impl PpuDebugger {
    /// Create a new PPU debugger
    pub fn new() -> Self {
        PpuDebugger {}
    }

    /// Capture the current video register state
    pub fn capture_state(&self, ppu: &Ppu) -> PpuState {
        let mono = &ppu.palettes().monochrome;
        PpuState {
            color_mode: ppu.color_mode(),
            lcdc: ppu.lcdc().0,
            bgp: mono.register(MonochromePalette::Bgp),
            obp0: mono.register(MonochromePalette::Obp0),
            obp1: mono.register(MonochromePalette::Obp1),
            vram_bank: ppu.vram_bank(),
        }
    }

    /// Get sprite information for one OAM entry
    ///
    /// # Arguments
    ///
    /// * `ppu` - Reference to the PPU
    /// * `index` - Sprite index (0-39)
    pub fn get_sprite_info(&self, ppu: &Ppu, index: u8) -> SpriteInfo {
        SpriteInfo::new(Sprite::decode(ppu.oam(), index))
    }

    /// Get all 40 sprites from OAM
    pub fn get_all_sprites(&self, ppu: &Ppu) -> Vec<SpriteInfo> {
        OamTable::decode(ppu.oam())
            .entries()
            .iter()
            .map(|sprite| SpriteInfo::new(*sprite))
            .collect()
    }

    /// Get the sprites covering `scanline` at the current LCDC sprite height
    pub fn get_visible_sprites(&self, ppu: &Ppu, scanline: u8) -> Vec<SpriteInfo> {
        OamTable::decode(ppu.oam())
            .on_scanline(scanline, ppu.lcdc().tall_sprites())
            .map(|(sprite, _row)| SpriteInfo::new(sprite))
            .collect()
    }

    /// Format palettes as a string
    ///
    /// Monochrome registers are always listed; color palette memory is
    /// listed only in color mode.
    pub fn format_palettes(&self, ppu: &Ppu) -> String {
        let mut output = String::new();
        let palettes = ppu.palettes();

        output.push_str("Monochrome Palettes:\n");
        for (name, palette) in [
            ("BGP ", MonochromePalette::Bgp),
            ("OBP0", MonochromePalette::Obp0),
            ("OBP1", MonochromePalette::Obp1),
        ] {
            output.push_str(&format!(
                "  {}: ${:02X} shades",
                name,
                palettes.monochrome.register(palette)
            ));
            for index in 0..4 {
                output.push_str(&format!(" {}", palettes.monochrome.shade(palette, index)));
            }
            output.push('\n');
        }

        if !ppu.color_mode() {
            return output;
        }

        for (title, layer) in [
            ("Background Palettes", Layer::Background),
            ("Sprite Palettes", Layer::Sprite),
        ] {
            output.push_str(&format!("\n{}:\n", title));
            for palette in 0..COLOR_PALETTE_COUNT {
                output.push_str(&format!("  Palette {}: ", palette));
                for index in 0..4 {
                    let color = palettes.rgb(palette, index, layer);
                    output.push_str(&format!("${:04X} ", color.0));
                }
                output.push('\n');
            }
        }

        output
    }

    /// Format OAM as a string
    ///
    /// # Arguments
    ///
    /// * `ppu` - Reference to the PPU
    /// * `scanline` - If set, only show sprites covering this scanline
    pub fn format_oam(&self, ppu: &Ppu, scanline: Option<u8>) -> String {
        let mut output = String::new();

        let sprites = match scanline {
            Some(line) => self.get_visible_sprites(ppu, line),
            None => self.get_all_sprites(ppu),
        };

        output.push_str(&format!(
            "Sprites ({} of {}):\n",
            sprites.len(),
            OAM_ENTRY_COUNT
        ));

        for sprite in sprites {
            output.push_str(&format!("  {}\n", sprite.format()));
        }

        output
    }
}

impl Default for PpuDebugger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::registers::{LCDC, OBP1};
    use crate::ppu::Rgb555;

    fn ppu_with_sprite(index: u8, bytes: [u8; 4]) -> Ppu {
        let mut ppu = Ppu::new();
        for (i, b) in bytes.iter().enumerate() {
            ppu.write_oam(index * 4 + i as u8, *b);
        }
        ppu
    }

    #[test]
    fn test_ppu_debugger_creation() {
        let _debugger = PpuDebugger::new();
    }

    #[test]
    fn test_capture_state() {
        let mut ppu = Ppu::new();
        ppu.write_register(OBP1, 0x1B);
        let state = PpuDebugger::new().capture_state(&ppu);

        assert!(!state.color_mode);
        assert_eq!(state.lcdc, 0x91);
        assert_eq!(state.obp1, 0x1B);
        assert_eq!(state.vram_bank, VramBank::Bank0);
    }

    #[test]
    fn test_state_format_lcdc() {
        let mut ppu = Ppu::with_mode(true);
        ppu.write_register(LCDC, 0x87);
        let state = PpuDebugger::new().capture_state(&ppu);

        let formatted = state.format_lcdc();
        assert!(formatted.contains("LCD"));
        assert!(formatted.contains("OBJ8x16"));
        assert!(formatted.contains("BGPrio"));
        assert!(state.format().contains("Mode: Color"));
    }

    #[test]
    fn test_sprite_info_screen_coordinates() {
        let ppu = ppu_with_sprite(2, [10, 4, 0x42, 0xE0]);
        let info = PpuDebugger::new().get_sprite_info(&ppu, 2);

        assert_eq!(info.y(), -6);
        assert_eq!(info.x(), -4);
        assert_eq!(info.attributes, 0xE0);

        let formatted = info.format();
        assert!(formatted.starts_with("Sprite  2:"));
        assert!(formatted.contains("Tile=$42"));
        assert!(formatted.contains("BG FH FV"));
    }

    #[test]
    fn test_all_sprites() {
        let ppu = Ppu::new();
        let sprites = PpuDebugger::new().get_all_sprites(&ppu);
        assert_eq!(sprites.len(), 40);
        assert_eq!(sprites[39].sprite.index, 39);
    }

    #[test]
    fn test_visible_sprites_filter() {
        let mut ppu = ppu_with_sprite(3, [36, 18, 0, 0]);
        let debugger = PpuDebugger::new();

        assert_eq!(debugger.get_visible_sprites(&ppu, 20).len(), 1);
        assert!(debugger.get_visible_sprites(&ppu, 28).is_empty());

        // 8x16 mode extends the covered range
        ppu.write_register(LCDC, 0x87);
        assert_eq!(debugger.get_visible_sprites(&ppu, 28).len(), 1);
        assert!(debugger
            .format_oam(&ppu, Some(28))
            .starts_with("Sprites (1 of 40)"));
    }

    #[test]
    fn test_format_palettes() {
        let mut ppu = Ppu::new();
        let debugger = PpuDebugger::new();

        let mono = debugger.format_palettes(&ppu);
        assert!(mono.contains("BGP : $E4 shades 0 1 2 3"));
        assert!(!mono.contains("Sprite Palettes"));

        ppu.set_color_mode(true);
        ppu.palettes_mut()
            .sprite
            .set_color(1, 0, Rgb555::from_components(31, 0, 0));
        let color = debugger.format_palettes(&ppu);
        assert!(color.contains("Sprite Palettes"));
        assert!(color.contains("Palette 1: $001F"));
    }
}
