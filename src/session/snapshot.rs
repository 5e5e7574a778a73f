// Video state snapshots
//
// Serializes everything that affects compositing (VRAM, OAM, palettes,
// LCDC and mode) so a scene can be saved, inspected and restored.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ppu::{
    ColorPaletteMemory, LcdControl, MemoryError, MonochromePalettes, Oam, Ppu, Vram, VramBank,
};

/// Errors that can occur during snapshot operations
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error
    Io(io::Error),

    /// Serialization/deserialization error
    Serialization(serde_json::Error),

    /// Snapshot version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// Stored memory image has the wrong shape
    Memory(MemoryError),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {}", e),
            SnapshotError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SnapshotError::Memory(e) => write!(f, "Memory error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Serialization(e)
    }
}

impl From<MemoryError> for SnapshotError {
    fn from(e: MemoryError) -> Self {
        SnapshotError::Memory(e)
    }
}

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Complete compositing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSnapshot {
    /// Version number for compatibility checking
    version: u32,

    /// Timestamp when the snapshot was created
    timestamp: String,

    /// Color hardware mode
    color_mode: bool,

    /// LCDC register
    lcdc: LcdControl,

    /// VRAM bank selected for CPU access (0 or 1)
    vram_bank: u8,

    /// VRAM bank 0 contents
    vram_bank0: Vec<u8>,

    /// VRAM bank 1 contents
    vram_bank1: Vec<u8>,

    /// Sprite attribute table
    oam: Vec<u8>,

    /// BGP, OBP0 and OBP1
    monochrome_palettes: MonochromePalettes,

    /// Background color palette RAM and its specification register
    background_palette: PaletteState,

    /// Sprite color palette RAM and its specification register
    sprite_palette: PaletteState,
}

/// Color palette memory for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PaletteState {
    spec: u8,
    data: Vec<u8>,
}

impl PaletteState {
    fn capture(memory: &ColorPaletteMemory) -> Self {
        PaletteState {
            spec: memory.read_spec(),
            data: memory.as_slice().to_vec(),
        }
    }

    fn restore(&self) -> Result<ColorPaletteMemory, MemoryError> {
        let mut memory = ColorPaletteMemory::new();
        memory.load(&self.data)?;
        memory.write_spec(self.spec);
        Ok(memory)
    }
}

impl VideoSnapshot {
    /// Capture the current video state
    pub fn capture(ppu: &Ppu) -> Self {
        let palettes = ppu.palettes();
        VideoSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Local::now().to_rfc3339(),
            color_mode: ppu.color_mode(),
            lcdc: ppu.lcdc(),
            vram_bank: ppu.vram_bank().id(),
            vram_bank0: ppu.vram().bank(VramBank::Bank0).to_vec(),
            vram_bank1: ppu.vram().bank(VramBank::Bank1).to_vec(),
            oam: ppu.oam().as_slice().to_vec(),
            monochrome_palettes: palettes.monochrome,
            background_palette: PaletteState::capture(&palettes.background),
            sprite_palette: PaletteState::capture(&palettes.sprite),
        }
    }

    /// Time the snapshot was taken (RFC 3339)
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Restore the video state from this snapshot
    ///
    /// Everything is validated before anything is written, so the PPU is
    /// left untouched when an error is returned.
    pub fn restore(&self, ppu: &mut Ppu) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }

        let vram_bank = VramBank::try_from(self.vram_bank)?;
        let mut vram = Vram::new();
        vram.load_bank(VramBank::Bank0, &self.vram_bank0)?;
        vram.load_bank(VramBank::Bank1, &self.vram_bank1)?;
        let oam = Oam::from_bytes(&self.oam)?;
        let background = self.background_palette.restore()?;
        let sprite = self.sprite_palette.restore()?;

        ppu.set_color_mode(self.color_mode);
        ppu.lcdc = self.lcdc;
        ppu.vbk = if self.color_mode {
            vram_bank
        } else {
            VramBank::Bank0
        };
        ppu.vram = vram;
        ppu.oam = oam;
        ppu.palettes.monochrome = self.monochrome_palettes;
        ppu.palettes.background = background;
        ppu.palettes.sprite = sprite;
        ppu.priority.clear();

        Ok(())
    }

    /// Write the snapshot as JSON to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("saved video snapshot to {}", path.display());
        Ok(())
    }

    /// Read a snapshot from a JSON file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let snapshot: VideoSnapshot = serde_json::from_str(&json)?;
        debug!("loaded video snapshot from {}", path.display());
        Ok(snapshot)
    }

    /// Save this snapshot to a numbered slot
    ///
    /// # Arguments
    ///
    /// * `directory` - Snapshot directory
    /// * `slot` - Slot number (0-9)
    pub fn save_to_slot(&self, directory: &Path, slot: u8) -> Result<PathBuf, SnapshotError> {
        let file_path = Self::slot_path(directory, slot);
        self.save_to_path(&file_path)?;
        Ok(file_path)
    }

    /// Load a snapshot from a numbered slot
    pub fn load_from_slot(directory: &Path, slot: u8) -> Result<Self, SnapshotError> {
        Self::load_from_path(Self::slot_path(directory, slot))
    }

    /// File path of a slot inside `directory`
    pub fn slot_path(directory: &Path, slot: u8) -> PathBuf {
        directory.join(format!("slot_{}.json", slot))
    }
}
