//! PPU edge cases and hardware quirks tests
//!
//! Covers sprite placement at the screen edges, flipping, 8x16 tile
//! pairing and the priority buffer's behavior for columns or scanlines
//! the background pass never recorded.

use super::*;

/// Color indices of the row of pixels written at `scanline`, by x position
fn shades_on_line(sink: &RecordingSink, scanline: u8, xs: std::ops::Range<u8>) -> Vec<Option<u8>> {
    xs.map(|x| sink.last_pixel(x, scanline).map(|[r, _, _]| r))
        .collect()
}

// ========================================
// Screen Edge Wrapping
// ========================================

#[test]
fn test_sprite_partially_left_of_screen() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    // Raw X = 4 puts the left edge 4 columns off screen
    place_sprite(&mut ppu, 0, 10, 0u8.wrapping_sub(4), 1, 0x00);

    let sink = sprite_writes(&ppu, 10, false);

    // Wrapped columns land at 252..255; visible columns at 0..3
    let columns: Vec<u8> = sink.writes.iter().step_by(3).map(|w| w.x).collect();
    assert_eq!(columns, vec![252, 253, 254, 255, 0, 1, 2, 3]);
}

#[test]
fn test_sprite_with_top_edge_above_screen_not_drawn() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);

    // Raw Y = 10 in 8x8 mode, raw Y = 1 in 8x16 mode
    place_sprite(&mut ppu, 0, 0u8.wrapping_sub(6), 0, 1, 0x00);
    for scanline in 0..16u8 {
        assert!(sprite_writes(&ppu, scanline, false).writes.is_empty());
    }

    place_sprite(&mut ppu, 0, 0u8.wrapping_sub(15), 0, 1, 0x00);
    for scanline in 0..16u8 {
        assert!(sprite_writes(&ppu, scanline, true).writes.is_empty());
    }
}

#[test]
fn test_sprite_at_top_edge_drawn_from_scanline_zero() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, 0x00);

    assert_eq!(sprite_writes(&ppu, 0, false).writes.len(), 24);
    assert_eq!(sprite_writes(&ppu, 7, false).writes.len(), 24);
    assert!(sprite_writes(&ppu, 8, false).writes.is_empty());
}

#[test]
fn test_sprite_past_right_edge_passes_raw_coordinates() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 156, 1, 0x00);

    // The recorder does not clip, so columns past the edge are still seen
    let sink = sprite_writes(&ppu, 0, false);
    let max_x = sink.writes.iter().map(|w| w.x).max();
    assert_eq!(max_x, Some(163));
}

#[test]
fn test_hidden_sprite_positions() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    // Raw Y = 0 and raw Y = 160 are fully off screen in 8x8 mode
    ppu.write_oam(0, 0);
    ppu.write_oam(1, 20);
    ppu.write_oam(2, 1);
    ppu.write_oam(4, 160);
    ppu.write_oam(5, 20);
    ppu.write_oam(6, 1);

    for scanline in 0..SCREEN_HEIGHT as u8 {
        assert!(
            sprite_writes(&ppu, scanline, false).writes.is_empty(),
            "scanline {}",
            scanline
        );
    }
}

// ========================================
// Flipping
// ========================================

#[test]
fn test_x_flip_mirrors_columns() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    // Column 0 = index 1, column 1 = index 2, column 2 = index 3
    write_tile_row(&mut ppu, VramBank::Bank0, 1, 0, 0b1010_0000, 0b0110_0000);
    place_sprite(&mut ppu, 0, 0, 0, 1, 0x00);
    place_sprite(&mut ppu, 1, 0, 20, 1, ATTR_X_FLIP);

    let sink = sprite_writes(&ppu, 0, false);
    assert_eq!(
        shades_on_line(&sink, 0, 0..3),
        vec![Some(1), Some(2), Some(3)]
    );
    assert_eq!(
        shades_on_line(&sink, 0, 25..28),
        vec![Some(3), Some(2), Some(1)]
    );
}

#[test]
fn test_y_flip_mirrors_rows() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    write_tile_row(&mut ppu, VramBank::Bank0, 1, 0, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 30, 0, 1, ATTR_Y_FLIP);

    // Row 0 of the tile is drawn on the last line of the sprite
    assert!(sprite_writes(&ppu, 30, false).writes.is_empty());
    assert_eq!(sprite_writes(&ppu, 37, false).writes.len(), 24);
}

#[test]
fn test_double_flip_matches_unflipped_output() {
    // Asymmetric tile so a single flip is observable
    let rows: [(u8, u8); 8] = [
        (0x80, 0x00),
        (0xC0, 0x40),
        (0x0F, 0x03),
        (0x01, 0x81),
        (0x55, 0x33),
        (0x00, 0xF0),
        (0x3C, 0x18),
        (0xE1, 0x07),
    ];

    let render = |attributes: u8| {
        let mut ppu = monochrome_ppu(0xE4, 0xE4);
        for (row, (low, high)) in rows.iter().enumerate() {
            write_tile_row(&mut ppu, VramBank::Bank0, 1, row as u8, *low, *high);
        }
        place_sprite(&mut ppu, 0, 40, 40, 1, attributes);
        (40..48u8)
            .map(|scanline| sprite_writes(&ppu, scanline, false).writes)
            .collect::<Vec<_>>()
    };

    let plain = render(0x00);
    let x_flipped = render(ATTR_X_FLIP);
    let y_flipped = render(ATTR_Y_FLIP);
    let both = render(ATTR_X_FLIP | ATTR_Y_FLIP);

    assert_ne!(plain, x_flipped);
    assert_ne!(plain, y_flipped);

    // X-flip twice: mirror the X-flipped output horizontally
    let mirror_x = |lines: &Vec<Vec<PixelWrite>>| -> Vec<Vec<(u8, Channel, u8)>> {
        lines
            .iter()
            .map(|line| {
                let mut writes: Vec<_> = line
                    .iter()
                    .map(|w| (40 + 47 - w.x, w.channel, w.value))
                    .collect();
                writes.sort_by_key(|(x, channel, _)| (*x, channel.index()));
                writes
            })
            .collect()
    };
    let as_tuples = |lines: &Vec<Vec<PixelWrite>>| -> Vec<Vec<(u8, Channel, u8)>> {
        lines
            .iter()
            .map(|line| line.iter().map(|w| (w.x, w.channel, w.value)).collect())
            .collect()
    };

    assert_eq!(mirror_x(&x_flipped), as_tuples(&plain));

    // Y-flip twice: the flipped sprite drawn bottom-up equals the unflipped one
    let mut y_restored: Vec<_> = as_tuples(&y_flipped);
    y_restored.reverse();
    assert_eq!(y_restored, as_tuples(&plain));

    // Both flips at once equal the two flips applied one after the other
    let mut both_restored = mirror_x(&both);
    both_restored.reverse();
    assert_eq!(both_restored, as_tuples(&plain));
}

// ========================================
// 8x16 Sprites
// ========================================

#[test]
fn test_tall_sprite_odd_tile_uses_even_pair() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 4, 0xF0, 0x00);
    fill_tile(&mut ppu, VramBank::Bank0, 5, 0x0F, 0xFF);

    for (index, tile) in [(0u8, 4u8), (1, 5)] {
        place_sprite(&mut ppu, index, 0, index * 20, tile, 0x00);
    }

    for scanline in 0..16u8 {
        let sink = sprite_writes(&ppu, scanline, true);
        assert_eq!(
            shades_on_line(&sink, scanline, 0..8),
            shades_on_line(&sink, scanline, 20..28),
            "scanline {}",
            scanline
        );
    }
}

#[test]
fn test_tall_sprite_lower_half_comes_from_next_tile() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 6, 0xFF, 0x00);
    fill_tile(&mut ppu, VramBank::Bank0, 7, 0xFF, 0xFF);
    place_sprite(&mut ppu, 0, 50, 0, 6, 0x00);

    let top = sprite_writes(&ppu, 57, true);
    let bottom = sprite_writes(&ppu, 58, true);
    assert_eq!(top.last_pixel(0, 57), Some([1, 1, 1]));
    assert_eq!(bottom.last_pixel(0, 58), Some([3, 3, 3]));
    assert!(sprite_writes(&ppu, 66, true).writes.is_empty());
}

#[test]
fn test_tall_sprite_y_flip_spans_both_tiles() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    // Only the first row of the upper tile is opaque
    write_tile_row(&mut ppu, VramBank::Bank0, 2, 0, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 2, ATTR_Y_FLIP);

    for scanline in 0..15u8 {
        assert!(sprite_writes(&ppu, scanline, true).writes.is_empty());
    }
    assert_eq!(sprite_writes(&ppu, 15, true).writes.len(), 24);
}

// ========================================
// Priority Buffer Edge Cases
// ========================================

#[test]
fn test_unrecorded_columns_read_as_color_zero() {
    let mut ppu = color_ppu(LCDC_SPRITES_8X8);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, ATTR_BEHIND_BG);
    ppu.priority_buffer_mut().begin_line(0);

    assert_eq!(sprite_writes(&ppu, 0, false).writes.len(), 24);
}

#[test]
fn test_priority_from_other_scanline_is_ignored() {
    let mut ppu = color_ppu(LCDC_SPRITES_8X8);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 5, 0, 1, ATTR_BEHIND_BG);
    fill_priority(&mut ppu, 4, 3, true);

    // The buffer holds scanline 4, so scanline 5 sees no background
    assert_eq!(sprite_writes(&ppu, 5, false).writes.len(), 24);
}

#[test]
fn test_off_screen_columns_have_no_background() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0u8.wrapping_sub(4), 1, ATTR_BEHIND_BG);
    fill_priority(&mut ppu, 0, 3, false);

    // On-screen columns are hidden, the wrapped ones are not
    let sink = sprite_writes(&ppu, 0, false);
    let columns: Vec<u8> = sink.writes.iter().step_by(3).map(|w| w.x).collect();
    assert_eq!(columns, vec![252, 253, 254, 255]);
}

#[test]
fn test_behind_background_ignored_when_lcdc_override_active() {
    let mut ppu = color_ppu(0x82);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, ATTR_BEHIND_BG);
    fill_priority(&mut ppu, 0, 1, true);

    assert_eq!(sprite_writes(&ppu, 0, false).writes.len(), 24);
}

#[test]
fn test_lcdc_bit_zero_has_no_override_in_monochrome_mode() {
    let mut ppu = monochrome_ppu(0xE4, 0xE4);
    ppu.write_register(super::super::registers::LCDC, 0x82);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, ATTR_BEHIND_BG);
    fill_priority(&mut ppu, 0, 1, false);

    assert!(sprite_writes(&ppu, 0, false).writes.is_empty());
}

// ========================================
// Monochrome Palette Selection
// ========================================

#[test]
fn test_obp1_selected_by_attribute_bit() {
    let mut ppu = monochrome_ppu(0b1110_0100, 0b0001_1011);
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, 0x00);
    place_sprite(&mut ppu, 1, 0, 20, 1, ATTR_OBP1);

    let sink = sprite_writes(&ppu, 0, false);
    assert_eq!(sink.last_pixel(0, 0), Some([1, 1, 1]));
    assert_eq!(sink.last_pixel(20, 0), Some([2, 2, 2]));
}

#[test]
fn test_color_palette_bits_ignored_in_monochrome_mode() {
    let mut ppu = monochrome_ppu(0b0000_1100, 0x00);
    ppu.palettes_mut()
        .sprite
        .set_color(7, 1, Rgb555::from_components(31, 0, 0));
    fill_tile(&mut ppu, VramBank::Bank0, 1, 0xFF, 0x00);
    place_sprite(&mut ppu, 0, 0, 0, 1, 0x07);

    assert_eq!(sprite_writes(&ppu, 0, false).last_pixel(0, 0), Some([3, 3, 3]));
}
