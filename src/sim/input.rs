//! Pointer Input
//!
//! Host-sampled pointer state in virtual playfield coordinates. Sampled once
//! per host frame and fed unchanged to every fixed tick stepped in that frame.

use serde::{Deserialize, Serialize};

/// Pointer state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// X in playfield pixels.
    pub x: f32,
    /// Y in playfield pixels.
    pub y: f32,
    /// Primary button held.
    pub primary_down: bool,
    /// Secondary button held.
    pub secondary_down: bool,
    /// Host timestamp of the sample. Never read by gameplay.
    pub timestamp_ticks: i64,
}

impl PointerInput {
    /// Pointer at `(x, y)` with no buttons held.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Set primary button state.
    pub fn with_primary(mut self, pressed: bool) -> Self {
        self.primary_down = pressed;
        self
    }

    /// Set secondary button state.
    pub fn with_secondary(mut self, pressed: bool) -> Self {
        self.secondary_down = pressed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let input = PointerInput::at(960.0, 540.0).with_primary(true);
        assert_eq!(input.x, 960.0);
        assert_eq!(input.y, 540.0);
        assert!(input.primary_down);
        assert!(!input.secondary_down);
        assert_eq!(input.timestamp_ticks, 0);
    }
}
