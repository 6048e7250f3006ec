//! Gate geometry.

use serde::{Deserialize, Serialize};

use crate::core::math::{sin_f32, PI};

/// One oscillating obstacle.
///
/// A gate is a wall at `wall_x` with an opening of `aperture_height` whose
/// center moves as `rest_center_y + amplitude * sin(phase + 2*pi*freq_hz*t)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Horizontal position of the wall in playfield pixels.
    pub wall_x: f32,
    /// Center of the opening at zero displacement.
    pub rest_center_y: f32,
    /// Full height of the opening.
    pub aperture_height: f32,
    /// Peak vertical displacement.
    pub amplitude: f32,
    /// Phase offset in radians.
    pub phase: f32,
    /// Oscillation frequency.
    pub freq_hz: f32,
}

impl Gate {
    /// Center of the opening at simulation time `t` (seconds).
    #[inline]
    pub fn current_center_y(&self, t: f32) -> f32 {
        self.rest_center_y + self.amplitude * sin_f32(self.phase + 2.0 * PI * self.freq_hz * t)
    }

    /// Distance of `cursor_y` from the current center in half-apertures.
    ///
    /// `<= 1` means inside the opening. A degenerate aperture yields `f32::MAX`.
    #[inline]
    pub fn normalized_offset(&self, cursor_y: f32, t: f32) -> f32 {
        let center_y = self.current_center_y(t);
        let half_aperture = self.aperture_height * 0.5;
        if half_aperture <= 0.0 {
            return f32::MAX;
        }
        (cursor_y - center_y).abs() / half_aperture
    }

    /// Bitwise equality, distinguishing `-0.0` from `0.0`.
    pub fn bits_eq(&self, other: &Gate) -> bool {
        self.to_bits() == other.to_bits()
    }

    /// Raw bits of every field in declaration order.
    pub fn to_bits(&self) -> [u32; 6] {
        [
            self.wall_x.to_bits(),
            self.rest_center_y.to_bits(),
            self.aperture_height.to_bits(),
            self.amplitude.to_bits(),
            self.phase.to_bits(),
            self.freq_hz.to_bits(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_gate() -> Gate {
        Gate {
            wall_x: 400.0,
            rest_center_y: 540.0,
            aperture_height: 200.0,
            amplitude: 0.0,
            phase: 0.0,
            freq_hz: 1.0,
        }
    }

    #[test]
    fn test_center_without_amplitude() {
        let gate = still_gate();
        assert_eq!(gate.current_center_y(0.0), 540.0);
        assert_eq!(gate.current_center_y(3.7), 540.0);
    }

    #[test]
    fn test_center_at_quarter_period() {
        let gate = Gate {
            amplitude: 100.0,
            phase: PI * 0.5,
            ..still_gate()
        };
        assert_eq!(gate.current_center_y(0.0), 640.0);
    }

    #[test]
    fn test_normalized_offset() {
        let gate = still_gate();
        assert_eq!(gate.normalized_offset(540.0, 0.0), 0.0);
        assert_eq!(gate.normalized_offset(640.0, 0.0), 1.0);
        assert_eq!(gate.normalized_offset(440.0, 0.0), 1.0);
        assert_eq!(gate.normalized_offset(740.0, 0.0), 2.0);
    }

    #[test]
    fn test_degenerate_aperture() {
        let gate = Gate {
            aperture_height: 0.0,
            ..still_gate()
        };
        assert_eq!(gate.normalized_offset(540.0, 0.0), f32::MAX);
    }
}
