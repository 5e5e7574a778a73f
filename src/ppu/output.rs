// Pixel output interface
//
// The compositor never owns the frame; it pushes channel writes into a sink
// provided by the presentation layer. The sink decides what to do with
// coordinates outside the visible area.

/// Color channel of a frame buffer pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in R, G, B order
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Channel index (0-2)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Destination of composited pixels
pub trait PixelSink {
    /// Write one channel of the pixel at (x, y)
    ///
    /// Coordinates come straight from the compositor and may lie outside the
    /// visible frame; implementations must clip them.
    fn write_channel(&mut self, x: u8, y: u8, channel: Channel, value: u8);

    /// Write all three channels of a pixel
    #[inline]
    fn write_pixel(&mut self, x: u8, y: u8, channels: [u8; 3]) {
        for channel in Channel::ALL {
            self.write_channel(x, y, channel, channels[channel.index()]);
        }
    }
}

/// One recorded channel write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    pub x: u8,
    pub y: u8,
    pub channel: Channel,
    pub value: u8,
}

/// Sink that records every write in order, without clipping
///
/// Used to observe exactly what the compositor emits.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub writes: Vec<PixelWrite>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to a pixel channel, if any
    pub fn last_value(&self, x: u8, y: u8, channel: Channel) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.x == x && w.y == y && w.channel == channel)
            .map(|w| w.value)
    }

    /// Last full RGB value written to a pixel, if every channel was written
    pub fn last_pixel(&self, x: u8, y: u8) -> Option<[u8; 3]> {
        Some([
            self.last_value(x, y, Channel::Red)?,
            self.last_value(x, y, Channel::Green)?,
            self.last_value(x, y, Channel::Blue)?,
        ])
    }
}

impl PixelSink for RecordingSink {
    fn write_channel(&mut self, x: u8, y: u8, channel: Channel, value: u8) {
        self.writes.push(PixelWrite {
            x,
            y,
            channel,
            value,
        });
    }
}
