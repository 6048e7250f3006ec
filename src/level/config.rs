//! Reflex gate tuning.

use serde::{Deserialize, Serialize};

/// All tuning knobs for a reflex gate level.
///
/// Changing any default changes generated geometry, so a new set of values
/// must ship under a new generator or ruleset version.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflexGateConfig {
    /// Virtual playfield width (pixels).
    pub playfield_width: f32,
    /// Virtual playfield height (pixels).
    pub playfield_height: f32,

    /// Number of gates per level.
    pub gate_count: usize,
    /// X of the first wall.
    pub first_gate_x: f32,
    /// Spacing between walls.
    pub gate_spacing_x: f32,

    /// Aperture of the first gate.
    pub base_aperture_height: f32,
    /// Aperture of the last gate.
    pub min_aperture_height: f32,

    /// Amplitude of the first gate.
    pub base_amplitude: f32,
    /// Amplitude of the last gate.
    pub max_amplitude: f32,
    /// Frequency of the first gate.
    pub base_freq_hz: f32,
    /// Frequency of the last gate.
    pub max_freq_hz: f32,

    /// Corridor scroll speed (pixels/second).
    pub scroll_speed: f32,

    /// Score for a dead-center pass.
    pub center_score: i32,
    /// Score for a pass at the very edge; also the floor.
    pub edge_score: i32,
    /// A combo event fires every this many consecutive passes.
    pub combo_threshold: i32,
}

impl Default for ReflexGateConfig {
    fn default() -> Self {
        Self {
            playfield_width: 1920.0,
            playfield_height: 1080.0,
            gate_count: 12,
            first_gate_x: 400.0,
            gate_spacing_x: 300.0,
            base_aperture_height: 200.0,
            min_aperture_height: 80.0,
            base_amplitude: 150.0,
            max_amplitude: 350.0,
            base_freq_hz: 0.4,
            max_freq_hz: 1.2,
            scroll_speed: 200.0,
            center_score: 100,
            edge_score: 50,
            combo_threshold: 3,
        }
    }
}
