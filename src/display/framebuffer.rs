// Frame Buffer - Stores composited pixel data for one frame
//
// The screen is 160×144 pixels. Each pixel holds three channel values at
// source precision (shade 0-3 or 5-bit components), so the buffer can be
// used directly as the compositor's pixel sink.

use super::palette::{pixel_to_rgb, pixel_to_rgba, PixelFormat};
use crate::ppu::{Channel, PixelSink};

pub use crate::ppu::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Channels stored per pixel
pub const CHANNELS: usize = 3;

/// Total number of bytes in the frame buffer
pub const FRAME_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * CHANNELS;

/// Frame buffer for storing pixel data
///
/// Pixels are laid out row by row, three bytes per pixel.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [u8; FRAME_SIZE],
}

impl FrameBuffer {
    /// Create a new frame buffer with every channel at 0
    pub fn new() -> Self {
        Self {
            pixels: [0; FRAME_SIZE],
        }
    }

    #[inline]
    fn offset(x: usize, y: usize) -> usize {
        (y * SCREEN_WIDTH + x) * CHANNELS
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, channels: [u8; 3]) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        let offset = Self::offset(x, y);
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&channels);
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        let offset = Self::offset(x, y);
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    /// Fill every pixel with the same channel values
    pub fn clear(&mut self, channels: [u8; 3]) {
        for pixel in self.pixels.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&channels);
        }
    }

    /// Get the raw channel data
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Get mutable access to the raw channel data
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Copy pixel data from another frame buffer
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.pixels.copy_from_slice(&other.pixels);
    }

    /// Convert the frame buffer to RGBA format for display
    ///
    /// # Arguments
    /// * `format` - How the stored channel values are encoded
    /// * `output` - Output buffer (at least 160 × 144 × 4 bytes)
    ///
    /// # Panics
    /// Panics if output buffer is too small
    pub fn to_rgba(&self, format: PixelFormat, output: &mut [u8]) {
        assert!(
            output.len() >= SCREEN_WIDTH * SCREEN_HEIGHT * 4,
            "Output buffer too small for RGBA conversion"
        );

        for (pixel, out) in self
            .pixels
            .chunks_exact(CHANNELS)
            .zip(output.chunks_exact_mut(4))
        {
            out.copy_from_slice(&pixel_to_rgba([pixel[0], pixel[1], pixel[2]], format));
        }
    }

    /// Convert the frame buffer to packed 8-bit RGB
    pub fn to_rgb(&self, format: PixelFormat) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(FRAME_SIZE);
        for pixel in self.pixels.chunks_exact(CHANNELS) {
            rgb.extend_from_slice(&pixel_to_rgb([pixel[0], pixel[1], pixel[2]], format));
        }
        rgb
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSink for FrameBuffer {
    /// Writes outside the visible screen are dropped
    #[inline]
    fn write_channel(&mut self, x: u8, y: u8, channel: Channel, value: u8) {
        let (x, y) = (x as usize, y as usize);
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        self.pixels[Self::offset(x, y) + channel.index()] = value;
    }
}
