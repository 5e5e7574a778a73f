// Screenshot functionality
//
// Captures a frame buffer and saves it as a PNG file.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::config::ScreenshotConfig;
use crate::display::{FrameBuffer, PixelFormat, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenshotError::Io(e) => Some(e),
            ScreenshotError::PngEncoding(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a screenshot of a frame
///
/// Converts the stored channel values to 8-bit RGB, scales the image by
/// the configured integer factor and writes it as PNG.
///
/// # Arguments
///
/// * `frame` - The composited frame
/// * `format` - How the frame's channel values are encoded
/// * `config` - Screenshot settings (directory, naming, scale)
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
///
/// # Example
///
/// ```no_run
/// use gbc_ppu::display::{FrameBuffer, PixelFormat};
/// use gbc_ppu::session::{save_screenshot, ScreenshotConfig};
///
/// let frame = FrameBuffer::new();
/// let path = save_screenshot(&frame, PixelFormat::Shade, &ScreenshotConfig::default())
///     .expect("Failed to save screenshot");
/// println!("Screenshot saved to: {}", path.display());
/// ```
pub fn save_screenshot(
    frame: &FrameBuffer,
    format: PixelFormat,
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(&config.directory)?;
    let file_path = config.directory.join(screenshot_filename(config.include_timestamp));

    let scale = config.effective_scale();
    let rgb_data = scale_rgb(
        &frame.to_rgb(format),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
        scale,
    );

    save_png(
        &file_path,
        &rgb_data,
        SCREEN_WIDTH as u32 * scale,
        SCREEN_HEIGHT as u32 * scale,
    )?;
    debug!("saved screenshot to {}", file_path.display());

    Ok(file_path)
}

/// File name for a new screenshot
fn screenshot_filename(include_timestamp: bool) -> String {
    if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}.png", timestamp)
    } else {
        "screenshot.png".to_string()
    }
}

/// Nearest-neighbor upscale of packed RGB data by an integer factor
///
/// # Arguments
///
/// * `data` - RGB data (width × height × 3 bytes)
/// * `width` - Source width
/// * `height` - Source height
/// * `scale` - Integer scale factor (1 returns the data unchanged)
fn scale_rgb(data: &[u8], width: u32, height: u32, scale: u32) -> Vec<u8> {
    if scale <= 1 {
        return data.to_vec();
    }

    let (width, height, scale) = (width as usize, height as usize, scale as usize);
    let row_bytes = width * 3;
    let mut scaled = Vec::with_capacity(data.len() * scale * scale);

    for row in data.chunks_exact(row_bytes).take(height) {
        let mut scaled_row = Vec::with_capacity(row_bytes * scale);
        for pixel in row.chunks_exact(3) {
            for _ in 0..scale {
                scaled_row.extend_from_slice(pixel);
            }
        }
        for _ in 0..scale {
            scaled.extend_from_slice(&scaled_row);
        }
    }

    scaled
}

/// Save RGB data as a PNG file
///
/// # Arguments
///
/// * `path` - Path to save the PNG file
/// * `data` - RGB data (width × height × 3 bytes)
/// * `width` - Image width
/// * `height` - Image height
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
