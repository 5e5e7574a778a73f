// PPU rendering logic

use log::trace;

use super::constants::SCREEN_HEIGHT;
use super::memory::{Vram, VramBank};
use super::oam::{sprite_height, OamTable, Sprite};
use super::order::{sort_for_drawing, DrawOrder};
use super::output::PixelSink;
use super::palette::{Layer, PaletteSelector, Palettes};
use super::priority::{BackgroundPriority, PriorityBuffer, PriorityEntry};
use super::registers::{LcdControl, RenderContext};
use super::tile::{fetch_tile_row, TileAddressing};
use super::Ppu;

/// Read-only view of video state handed to the background/window pass
pub struct BackgroundLine<'a> {
    /// Scanline being rendered (0-143)
    pub scanline: u8,
    /// Rendering context for this pass
    pub ctx: RenderContext,
    /// Current LCDC value (tile map / tile data / window selection)
    pub lcdc: LcdControl,
    /// Video RAM
    pub vram: &'a Vram,
    /// Palettes
    pub palettes: &'a Palettes,
}

/// Background/window renderer run before the sprite pass of each scanline
///
/// Implementations write background pixels to the sink and record, for every
/// column they cover, the color index and BG-to-OBJ priority bit in the
/// priority buffer. Columns left unrecorded read as color 0 without priority.
pub trait BackgroundLayer {
    fn render_line(
        &mut self,
        line: &BackgroundLine<'_>,
        priority: &mut PriorityBuffer,
        sink: &mut dyn PixelSink,
    );
}

impl<F> BackgroundLayer for F
where
    F: FnMut(&BackgroundLine<'_>, &mut PriorityBuffer, &mut dyn PixelSink),
{
    fn render_line(
        &mut self,
        line: &BackgroundLine<'_>,
        priority: &mut PriorityBuffer,
        sink: &mut dyn PixelSink,
    ) {
        self(line, priority, sink)
    }
}

/// Background that draws nothing and leaves every column at color 0
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankBackground;

impl BackgroundLayer for BlankBackground {
    fn render_line(
        &mut self,
        _line: &BackgroundLine<'_>,
        _priority: &mut PriorityBuffer,
        _sink: &mut dyn PixelSink,
    ) {
    }
}

/// Decide whether an opaque sprite pixel is drawn over the background
///
/// `background` is only consulted when the LCDC override does not apply.
#[inline]
pub fn sprite_pixel_visible<F>(ctx: &RenderContext, behind_background: bool, background: F) -> bool
where
    F: FnOnce() -> PriorityEntry,
{
    // Color mode with LCDC bit 0 clear: sprites always on top
    if ctx.sprites_always_on_top() {
        return true;
    }

    let background = background();
    if behind_background && background.color_index != 0 {
        return false;
    }
    if ctx.color_mode && background.bg_priority {
        return false;
    }
    true
}

/// Composites the sprites of one scanline
///
/// A pure function of its inputs apart from the writes pushed into the sink.
pub struct SpriteCompositor<'a, O: DrawOrder + ?Sized> {
    pub oam: &'a OamTable,
    pub vram: &'a Vram,
    pub palettes: &'a Palettes,
    pub order: &'a O,
}

impl<'a, O: DrawOrder + ?Sized> SpriteCompositor<'a, O> {
    /// Sprites covering `scanline` with their covered row, lowest-ranked first
    pub fn visible_sprites(&self, scanline: u8, tall: bool) -> Vec<(Sprite, u8)> {
        let mut visible: Vec<(Sprite, u8)> = self.oam.on_scanline(scanline, tall).collect();
        sort_for_drawing(&mut visible, self.order, |(sprite, _)| sprite);
        visible
    }

    /// Composite every visible sprite pixel of `scanline` into `sink`
    ///
    /// # Arguments
    ///
    /// * `ctx` - Rendering context
    /// * `scanline` - Scanline being rendered
    /// * `tall` - 8x16 sprite mode
    /// * `priority` - Background/window priority for this scanline
    /// * `sink` - Pixel destination
    pub fn render_scanline<P, S>(
        &self,
        ctx: &RenderContext,
        scanline: u8,
        tall: bool,
        priority: &P,
        sink: &mut S,
    ) where
        P: BackgroundPriority + ?Sized,
        S: PixelSink + ?Sized,
    {
        let visible = self.visible_sprites(scanline, tall);
        trace!(
            "scanline {}: {} sprite(s) visible (tall={})",
            scanline,
            visible.len(),
            tall
        );

        for (sprite, row) in visible {
            self.render_sprite(ctx, &sprite, row, scanline, tall, priority, sink);
        }
    }

    /// Composite one row of one sprite
    fn render_sprite<P, S>(
        &self,
        ctx: &RenderContext,
        sprite: &Sprite,
        row: u8,
        scanline: u8,
        tall: bool,
        priority: &P,
        sink: &mut S,
    ) where
        P: BackgroundPriority + ?Sized,
        S: PixelSink + ?Sized,
    {
        let attributes = sprite.attributes;

        // Vertical flip mirrors the row within the full sprite height
        let row = if attributes.y_flip {
            sprite_height(tall) - 1 - row
        } else {
            row
        };

        // Bank 1 only exists in color mode
        let bank = if ctx.color_mode {
            attributes.vram_bank
        } else {
            VramBank::Bank0
        };

        let tile_row = fetch_tile_row(
            self.vram,
            TileAddressing::Unsigned,
            sprite.effective_tile(tall),
            bank,
            row,
        );
        if tile_row.is_transparent() {
            return;
        }

        let selector = PaletteSelector {
            monochrome: attributes.monochrome_palette,
            color: attributes.color_palette,
        };
        let left = sprite.screen_x();

        for column in 0..8u8 {
            let color_index = tile_row.color_index(column, attributes.x_flip);
            if color_index == 0 {
                continue;
            }

            let x = left.wrapping_add(column);
            let visible = sprite_pixel_visible(ctx, attributes.behind_background, || {
                priority.priority_at(x, scanline)
            });
            if !visible {
                continue;
            }

            let color = self
                .palettes
                .resolve(ctx, selector, color_index, Layer::Sprite);
            sink.write_pixel(x, scanline, color.channels());
        }
    }
}

impl Ppu {
    /// Render all sprites for `scanline`
    ///
    /// Must run after the background/window pass of the same scanline has
    /// filled the priority buffer.
    ///
    /// # Arguments
    ///
    /// * `scanline` - Scanline being rendered (0-143)
    /// * `tall_sprites` - 8x16 sprite mode
    /// * `sink` - Pixel destination
    ///
    /// # Example
    ///
    /// ```
    /// use gbc_ppu::ppu::{Ppu, RecordingSink};
    ///
    /// let ppu = Ppu::new();
    /// let mut sink = RecordingSink::new();
    /// ppu.render_sprites(0, false, &mut sink);
    /// assert!(sink.writes.is_empty());
    /// ```
    pub fn render_sprites<S: PixelSink + ?Sized>(&self, scanline: u8, tall_sprites: bool, sink: &mut S) {
        let table = OamTable::decode(&self.oam);
        let compositor = SpriteCompositor {
            oam: &table,
            vram: &self.vram,
            palettes: &self.palettes,
            order: &self.sprite_order,
        };
        compositor.render_scanline(&self.context(), scanline, tall_sprites, &self.priority, sink);
    }

    /// Render one scanline: background/window pass, then sprites
    ///
    /// Does nothing while the display is disabled. Sprites are skipped when
    /// LCDC bit 1 is clear; LCDC bit 2 selects the sprite height.
    pub fn render_scanline<B, S>(&mut self, scanline: u8, background: &mut B, sink: &mut S)
    where
        B: BackgroundLayer + ?Sized,
        S: PixelSink,
    {
        if !self.lcdc.display_enabled() {
            return;
        }

        self.priority.begin_line(scanline);
        let line = BackgroundLine {
            scanline,
            ctx: self.context(),
            lcdc: self.lcdc,
            vram: &self.vram,
            palettes: &self.palettes,
        };
        background.render_line(&line, &mut self.priority, sink);

        if self.lcdc.sprites_enabled() {
            self.render_sprites(scanline, self.lcdc.tall_sprites(), sink);
        }
    }

    /// Render every visible scanline of a frame in order
    ///
    /// # Example
    ///
    /// ```
    /// use gbc_ppu::display::FrameBuffer;
    /// use gbc_ppu::ppu::{BlankBackground, Ppu};
    ///
    /// let mut ppu = Ppu::new();
    /// let mut frame = FrameBuffer::new();
    /// ppu.render_frame(&mut BlankBackground, &mut frame);
    /// ```
    pub fn render_frame<B, S>(&mut self, background: &mut B, sink: &mut S)
    where
        B: BackgroundLayer + ?Sized,
        S: PixelSink,
    {
        for scanline in 0..SCREEN_HEIGHT as u8 {
            self.render_scanline(scanline, background, sink);
        }
        self.priority.clear();
    }
}
