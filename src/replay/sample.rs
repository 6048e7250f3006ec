//! Quantized input samples.
//!
//! Wire format per sample: i16 X, i16 Y at 0.1 px resolution, one byte of
//! button flags.

use serde::{Deserialize, Serialize};

use crate::sim::input::PointerInput;

/// Coordinates are stored as `round(v * SCALE_FACTOR)`.
pub const SCALE_FACTOR: f32 = 10.0;

/// One tick of quantized pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSample {
    /// X in tenths of a pixel.
    pub x: i16,
    /// Y in tenths of a pixel.
    pub y: i16,
    /// Button flags.
    pub buttons: u8,
}

impl InputSample {
    /// Primary button flag.
    pub const PRIMARY: u8 = 0x01;
    /// Secondary button flag.
    pub const SECONDARY: u8 = 0x02;

    /// Quantize pointer coordinates and buttons.
    ///
    /// Rounds half to even. Coordinates beyond the i16 range saturate and
    /// NaN maps to 0.
    pub fn quantize(x: f32, y: f32, primary: bool, secondary: bool) -> Self {
        let mut buttons = 0;
        if primary {
            buttons |= Self::PRIMARY;
        }
        if secondary {
            buttons |= Self::SECONDARY;
        }
        Self {
            x: quantize_axis(x),
            y: quantize_axis(y),
            buttons,
        }
    }

    /// Quantize a live pointer sample.
    pub fn from_pointer(input: &PointerInput) -> Self {
        Self::quantize(input.x, input.y, input.primary_down, input.secondary_down)
    }

    /// Coordinates back in pixels.
    pub fn dequantize(&self) -> (f32, f32) {
        (self.x as f32 / SCALE_FACTOR, self.y as f32 / SCALE_FACTOR)
    }

    /// Pointer input for replay. The timestamp is always zero.
    pub fn to_pointer(&self) -> PointerInput {
        let (x, y) = self.dequantize();
        PointerInput {
            x,
            y,
            primary_down: self.primary_down(),
            secondary_down: self.secondary_down(),
            timestamp_ticks: 0,
        }
    }

    /// `input` exactly as a replay of it will see it.
    pub fn snap(input: &PointerInput) -> PointerInput {
        Self::from_pointer(input).to_pointer()
    }

    /// Primary button held.
    pub fn primary_down(&self) -> bool {
        self.buttons & Self::PRIMARY != 0
    }

    /// Secondary button held.
    pub fn secondary_down(&self) -> bool {
        self.buttons & Self::SECONDARY != 0
    }
}

#[inline]
fn quantize_axis(v: f32) -> i16 {
    // `as` saturates out-of-range floats
    (v * SCALE_FACTOR).round_ties_even() as i16
}
