// Display module - Frame storage and conversion for presentation
//
// This module provides:
// - Frame buffer (160×144 pixels, 3 channels) usable as a compositor sink
// - Monochrome shade table and 5-bit to 8-bit color expansion
// - RGBA / RGB conversion for windows, textures and screenshots

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{FrameBuffer, FRAME_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use palette::{expand_5bit, pixel_to_rgb, pixel_to_rgba, shade_to_rgb, PixelFormat, DMG_PALETTE};
