// Video memory: VRAM banks and the raw sprite attribute table

use super::constants::{OAM_SIZE, VRAM_BANK_SIZE, VRAM_START};

/// Errors raised when raw memory handed over by the memory subsystem
/// does not have the shape the video hardware expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// The sprite attribute table is not 40 × 4 bytes
    InvalidOamSize { expected: usize, found: usize },

    /// A VRAM bank id other than 0 or 1
    InvalidVramBank(u8),

    /// A VRAM bank image is not 8KB
    InvalidVramSize { expected: usize, found: usize },

    /// A color palette RAM image is not 64 bytes
    InvalidPaletteSize { expected: usize, found: usize },
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::InvalidOamSize { expected, found } => write!(
                f,
                "Invalid OAM size: expected {} bytes, found {}",
                expected, found
            ),
            MemoryError::InvalidVramBank(bank) => write!(f, "Invalid VRAM bank: {}", bank),
            MemoryError::InvalidVramSize { expected, found } => write!(
                f,
                "Invalid VRAM bank size: expected {} bytes, found {}",
                expected, found
            ),
            MemoryError::InvalidPaletteSize { expected, found } => write!(
                f,
                "Invalid palette RAM size: expected {} bytes, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for MemoryError {}

/// VRAM bank selector
///
/// Bank 1 only exists on color hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VramBank {
    #[default]
    Bank0,
    Bank1,
}

impl VramBank {
    /// Bank id (0 or 1)
    pub fn id(self) -> u8 {
        match self {
            VramBank::Bank0 => 0,
            VramBank::Bank1 => 1,
        }
    }
}

impl TryFrom<u8> for VramBank {
    type Error = MemoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VramBank::Bank0),
            1 => Ok(VramBank::Bank1),
            other => Err(MemoryError::InvalidVramBank(other)),
        }
    }
}

/// Video RAM ($8000-$9FFF), two banks of 8KB
#[derive(Clone, Debug)]
pub struct Vram {
    banks: [Box<[u8; VRAM_BANK_SIZE]>; 2],
}

impl Vram {
    /// Create zero-filled VRAM
    pub fn new() -> Self {
        Vram {
            banks: [
                Box::new([0; VRAM_BANK_SIZE]),
                Box::new([0; VRAM_BANK_SIZE]),
            ],
        }
    }

    /// Map a CPU address into a bank offset
    ///
    /// Addresses outside $8000-$9FFF wrap into the 8KB window.
    #[inline]
    fn offset(addr: u16) -> usize {
        (addr.wrapping_sub(VRAM_START) as usize) & (VRAM_BANK_SIZE - 1)
    }

    /// Read a byte from the given bank
    ///
    /// # Arguments
    ///
    /// * `addr` - VRAM address ($8000-$9FFF)
    /// * `bank` - Bank to read from
    #[inline]
    pub fn read(&self, addr: u16, bank: VramBank) -> u8 {
        self.banks[bank.id() as usize][Self::offset(addr)]
    }

    /// Write a byte to the given bank
    pub fn write(&mut self, addr: u16, bank: VramBank, data: u8) {
        self.banks[bank.id() as usize][Self::offset(addr)] = data;
    }

    /// Raw contents of a bank
    pub fn bank(&self, bank: VramBank) -> &[u8] {
        &self.banks[bank.id() as usize][..]
    }

    /// Replace the contents of a bank
    pub fn load_bank(&mut self, bank: VramBank, data: &[u8]) -> Result<(), MemoryError> {
        if data.len() != VRAM_BANK_SIZE {
            return Err(MemoryError::InvalidVramSize {
                expected: VRAM_BANK_SIZE,
                found: data.len(),
            });
        }
        self.banks[bank.id() as usize].copy_from_slice(data);
        Ok(())
    }
}

impl Default for Vram {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw sprite attribute table ($FE00-$FE9F)
#[derive(Clone, Debug)]
pub struct Oam {
    bytes: [u8; OAM_SIZE],
}

impl Oam {
    /// Create a zero-filled table
    pub fn new() -> Self {
        Oam {
            bytes: [0; OAM_SIZE],
        }
    }

    /// Build a table from a raw memory image
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::InvalidOamSize` if `bytes` is not exactly 160 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MemoryError> {
        let bytes: [u8; OAM_SIZE] =
            bytes
                .try_into()
                .map_err(|_| MemoryError::InvalidOamSize {
                    expected: OAM_SIZE,
                    found: bytes.len(),
                })?;
        Ok(Oam { bytes })
    }

    /// Read a byte at the given table offset (0-159)
    ///
    /// Offsets past the end of the table read as 0xFF.
    pub fn read(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0xFF)
    }

    /// Write a byte at the given table offset (0-159); writes past the end are ignored
    pub fn write(&mut self, offset: usize, data: u8) {
        if let Some(byte) = self.bytes.get_mut(offset) {
            *byte = data;
        }
    }

    /// Raw table contents
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Oam {
    fn default() -> Self {
        Self::new()
    }
}
