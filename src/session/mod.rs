// Session module - Rendering session coordinator
//
// Owns a PPU and the frame it composites into, applies the configuration,
// and provides screenshots, video-state snapshots and config persistence.

mod config;
mod screenshot;
mod snapshot;

pub use config::{RendererConfig, ScreenshotConfig, SnapshotConfig, VideoConfig, CONFIG_FILE};
pub use screenshot::{save_screenshot, ScreenshotError};
pub use snapshot::{SnapshotError, VideoSnapshot, SNAPSHOT_VERSION};

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::display::{FrameBuffer, PixelFormat};
use crate::ppu::registers::LCDC;
use crate::ppu::{BackgroundLayer, Ppu};

/// Rendering session
///
/// Couples a `Ppu` with a frame buffer and the settings it was created
/// from. The background pass is supplied per call.
pub struct Session {
    /// Video state
    ppu: Ppu,

    /// Last composited frame
    frame: FrameBuffer,

    /// Configuration
    config: RendererConfig,

    /// Number of frames rendered so far
    frames_rendered: u64,
}

impl Session {
    /// Create a session from a configuration
    ///
    /// # Example
    ///
    /// ```
    /// use gbc_ppu::ppu::BlankBackground;
    /// use gbc_ppu::session::{RendererConfig, Session};
    ///
    /// let mut session = Session::new(RendererConfig::default());
    /// session.render_frame(&mut BlankBackground);
    /// assert_eq!(session.frames_rendered(), 1);
    /// ```
    pub fn new(config: RendererConfig) -> Self {
        let mut ppu = Ppu::with_mode(config.video.color_mode);
        ppu.set_sprite_order(config.video.sprite_order);
        if config.video.tall_sprites {
            let lcdc = ppu.lcdc().0 | 0x04;
            ppu.write_register(LCDC, lcdc);
        }

        info!(
            "session created: {} mode, {} sprites, {:?} order",
            if config.video.color_mode {
                "color"
            } else {
                "monochrome"
            },
            if config.video.tall_sprites { "8x16" } else { "8x8" },
            config.video.sprite_order
        );

        Session {
            ppu,
            frame: FrameBuffer::new(),
            config,
            frames_rendered: 0,
        }
    }

    /// Create a session from a configuration file, using defaults when it
    /// is missing or invalid
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Self {
        Self::new(RendererConfig::load_or_default(path))
    }

    /// Video state
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Mutable video state
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// Last composited frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Configuration
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Encoding of the frame's channel values in the current mode
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::for_color_mode(self.ppu.color_mode())
    }

    /// Number of frames rendered so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Clear the frame and render every scanline into it
    pub fn render_frame<B: BackgroundLayer + ?Sized>(&mut self, background: &mut B) {
        self.frame.clear([0, 0, 0]);
        self.ppu.render_frame(background, &mut self.frame);
        self.frames_rendered += 1;
    }

    /// Render a single scanline into the frame
    pub fn render_scanline<B: BackgroundLayer + ?Sized>(&mut self, scanline: u8, background: &mut B) {
        self.ppu.render_scanline(scanline, background, &mut self.frame);
    }

    /// Save the current frame as a PNG using the screenshot settings
    pub fn save_screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(&self.frame, self.pixel_format(), &self.config.screenshot)
    }

    /// Save the video state to a numbered slot
    pub fn save_snapshot(&self, slot: u8) -> Result<PathBuf, SnapshotError> {
        let snapshot = VideoSnapshot::capture(&self.ppu);
        snapshot.save_to_slot(&self.config.snapshot.directory, slot)
    }

    /// Restore the video state from a numbered slot
    pub fn load_snapshot(&mut self, slot: u8) -> Result<(), SnapshotError> {
        let snapshot = VideoSnapshot::load_from_slot(&self.config.snapshot.directory, slot)?;
        snapshot.restore(&mut self.ppu)?;
        debug!("restored snapshot taken at {}", snapshot.timestamp());
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}
