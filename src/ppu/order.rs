// Sprite draw order
//
// When two opaque sprite pixels land on the same screen pixel, the sprite
// that ranks higher wins. The compositor sorts the sprites on a scanline so
// the highest-ranked one is drawn last; the comparator alone decides the
// outcome of overlaps.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::oam::Sprite;

/// Overlap tie-break policy
pub trait DrawOrder {
    /// Compare the drawing priority of two sprites
    ///
    /// `Ordering::Greater` means `a` wins over `b` where both are opaque.
    fn rank(&self, a: &Sprite, b: &Sprite) -> Ordering;
}

/// Lower OAM index wins
#[derive(Debug, Clone, Copy, Default)]
pub struct OamIndexOrder;

impl DrawOrder for OamIndexOrder {
    #[inline]
    fn rank(&self, a: &Sprite, b: &Sprite) -> Ordering {
        b.index.cmp(&a.index)
    }
}

/// Smaller X position wins, lower OAM index breaks ties
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateOrder;

impl DrawOrder for CoordinateOrder {
    #[inline]
    fn rank(&self, a: &Sprite, b: &Sprite) -> Ordering {
        b.raw_x
            .cmp(&a.raw_x)
            .then_with(|| OamIndexOrder.rank(a, b))
    }
}

/// Configurable draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteOrdering {
    /// Lower OAM index wins
    #[default]
    OamIndex,
    /// Smaller X wins, then lower OAM index
    CoordinateThenIndex,
}

impl DrawOrder for SpriteOrdering {
    #[inline]
    fn rank(&self, a: &Sprite, b: &Sprite) -> Ordering {
        match self {
            SpriteOrdering::OamIndex => OamIndexOrder.rank(a, b),
            SpriteOrdering::CoordinateThenIndex => CoordinateOrder.rank(a, b),
        }
    }
}

/// Sort sprites so the lowest-ranked comes first and the winner last
pub fn sort_for_drawing<T, O, F>(items: &mut [T], order: &O, sprite: F)
where
    O: DrawOrder + ?Sized,
    F: Fn(&T) -> &Sprite,
{
    items.sort_by(|a, b| order.rank(sprite(a), sprite(b)));
}
