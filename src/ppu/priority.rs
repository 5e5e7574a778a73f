// Background/window priority buffer
//
// Written by the background/window pass for one scanline and read by the
// sprite pass that follows it. Entries never outlive their scanline.

use super::constants::SCREEN_WIDTH;

/// Background/window state at one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityEntry {
    /// Background/window color index (0-3) before palette lookup
    pub color_index: u8,
    /// BG-to-OBJ priority bit of the tile's color-mode attributes
    pub bg_priority: bool,
}

impl PriorityEntry {
    /// Create an entry; the color index is masked to 2 bits
    pub fn new(color_index: u8, bg_priority: bool) -> Self {
        PriorityEntry {
            color_index: color_index & 0x03,
            bg_priority,
        }
    }
}

/// Read side of the priority buffer, as seen by the sprite compositor
pub trait BackgroundPriority {
    /// Background/window state at (x, scanline)
    fn priority_at(&self, x: u8, scanline: u8) -> PriorityEntry;
}

/// Priority record for the scanline currently being composited
#[derive(Debug, Clone)]
pub struct PriorityBuffer {
    scanline: Option<u8>,
    entries: [PriorityEntry; SCREEN_WIDTH],
}

impl PriorityBuffer {
    /// Create an empty buffer with no open scanline
    pub fn new() -> Self {
        PriorityBuffer {
            scanline: None,
            entries: [PriorityEntry::default(); SCREEN_WIDTH],
        }
    }

    /// Discard the previous scanline's entries and open `scanline` for writing
    pub fn begin_line(&mut self, scanline: u8) {
        self.scanline = Some(scanline);
        self.entries.fill(PriorityEntry::default());
    }

    /// Scanline the buffer currently holds
    pub fn scanline(&self) -> Option<u8> {
        self.scanline
    }

    /// Record the background/window result at column `x` of the open scanline
    ///
    /// Columns outside the visible width are ignored.
    pub fn record(&mut self, x: u8, color_index: u8, bg_priority: bool) {
        if let Some(entry) = self.entries.get_mut(x as usize) {
            *entry = PriorityEntry::new(color_index, bg_priority);
        }
    }

    /// Entries of the open scanline, leftmost first
    pub fn entries(&self) -> &[PriorityEntry] {
        &self.entries
    }

    /// Close the scanline; every query answers with the default entry until
    /// the next `begin_line`
    pub fn clear(&mut self) {
        self.scanline = None;
        self.entries.fill(PriorityEntry::default());
    }
}

impl Default for PriorityBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundPriority for PriorityBuffer {
    /// Off-screen columns and scanlines other than the open one report
    /// background color 0 without priority
    #[inline]
    fn priority_at(&self, x: u8, scanline: u8) -> PriorityEntry {
        if self.scanline != Some(scanline) {
            return PriorityEntry::default();
        }
        self.entries
            .get(x as usize)
            .copied()
            .unwrap_or_default()
    }
}
