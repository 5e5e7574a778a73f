// Game Boy / Game Boy Color scanline compositing library
// Sprite compositing, video memory, palettes and frame output

// Public modules
pub mod debug;
pub mod display;
pub mod ppu;
pub mod session;

// Re-export main types for convenience
pub use debug::{PpuDebugger, PpuState, SpriteInfo};
pub use display::{FrameBuffer, PixelFormat};
pub use ppu::{
    BackgroundLayer, BlankBackground, DrawOrder, PixelSink, Ppu, RecordingSink, SpriteOrdering,
};
pub use session::{
    RendererConfig, ScreenshotError, Session, SnapshotError, VideoSnapshot,
};
