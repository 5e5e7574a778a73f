// Configuration management
//
// Handles renderer configuration and settings persistence.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ppu::SpriteOrdering;

/// Default configuration file path
pub const CONFIG_FILE: &str = "gbc_ppu.toml";

/// Renderer configuration
///
/// Stores all user-configurable settings for a rendering session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,

    /// Snapshot settings
    pub snapshot: SnapshotConfig,
}

/// Video configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Run in color (CGB) mode
    pub color_mode: bool,

    /// Start with 8x16 sprites selected in LCDC
    pub tall_sprites: bool,

    /// Sprite overlap tie-break policy
    pub sprite_order: SpriteOrdering,
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub directory: PathBuf,

    /// Include timestamp in filename
    pub include_timestamp: bool,

    /// Integer scale factor (1-4)
    pub scale: u32,
}

/// Snapshot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Snapshot directory
    pub directory: PathBuf,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        ScreenshotConfig {
            directory: PathBuf::from("screenshots"),
            include_timestamp: true,
            scale: 1,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            directory: PathBuf::from("snapshots"),
        }
    }
}

impl ScreenshotConfig {
    /// Scale factor clamped to the supported range
    pub fn effective_scale(&self) -> u32 {
        self.scale.clamp(1, 4)
    }
}

impl RendererConfig {
    /// Load configuration from `path` or fall back to defaults
    ///
    /// If the file is missing or cannot be parsed, the default configuration
    /// is returned. A missing file is created with the defaults when
    /// possible; an unreadable one is left untouched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gbc_ppu::session::RendererConfig;
    ///
    /// let config = RendererConfig::load_or_default("gbc_ppu.toml");
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                let config = Self::default();
                // Writing the defaults out is best effort
                if let Err(e) = config.save_to(path) {
                    debug!("could not write default config: {}", e);
                }
                config
            }
            Err(e) => {
                warn!(
                    "failed to load config from {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gbc_ppu::session::RendererConfig;
    ///
    /// let config = RendererConfig::default();
    /// config.save_to("gbc_ppu.toml").expect("Failed to save configuration");
    /// ```
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;
        debug!("saved config to {}", path.display());
        Ok(())
    }
}
