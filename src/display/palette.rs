// Presentation palette - converts stored channel values to 8-bit RGB
//
// The frame buffer keeps values at source precision: shades 0-3 in
// monochrome mode, 5-bit components in color mode. Conversion to display
// colors only happens here.

use serde::{Deserialize, Serialize};

/// Monochrome shades in RGB format, lightest (0) to darkest (3)
pub const DMG_PALETTE: [u32; 4] = [0xFFFFFF, 0xAAAAAA, 0x555555, 0x000000];

/// How the channel values in a frame are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Monochrome shade index (0-3), identical in all channels
    #[default]
    Shade,
    /// 5-bit color components (0-31)
    Rgb555,
}

impl PixelFormat {
    /// Format produced by the compositor in the given mode
    pub fn for_color_mode(color_mode: bool) -> Self {
        if color_mode {
            PixelFormat::Rgb555
        } else {
            PixelFormat::Shade
        }
    }
}

/// Convert a monochrome shade to RGB color
#[inline]
pub fn shade_to_rgb(shade: u8) -> u32 {
    DMG_PALETTE[(shade & 0x03) as usize]
}

/// Expand a 5-bit component to 8 bits, mapping 31 to 255
#[inline]
pub fn expand_5bit(value: u8) -> u8 {
    let value = value & 0x1F;
    (value << 3) | (value >> 2)
}

/// Convert one stored pixel to [R, G, B]
#[inline]
pub fn pixel_to_rgb(channels: [u8; 3], format: PixelFormat) -> [u8; 3] {
    match format {
        PixelFormat::Shade => {
            let rgb = shade_to_rgb(channels[0]);
            [
                ((rgb >> 16) & 0xFF) as u8,
                ((rgb >> 8) & 0xFF) as u8,
                (rgb & 0xFF) as u8,
            ]
        }
        PixelFormat::Rgb555 => channels.map(expand_5bit),
    }
}

/// Convert one stored pixel to [R, G, B, A]
#[inline]
pub fn pixel_to_rgba(channels: [u8; 3], format: PixelFormat) -> [u8; 4] {
    let [r, g, b] = pixel_to_rgb(channels, format);
    [r, g, b, 0xFF]
}
