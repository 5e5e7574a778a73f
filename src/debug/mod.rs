// Debug module - Inspection tools for the video state
//
// Read-only views over a `Ppu`: register capture, OAM listings and
// palette dumps. Nothing here affects compositing.

pub mod ppu;

pub use ppu::{PpuDebugger, PpuState, SpriteInfo};
