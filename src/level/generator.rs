//! Level Generation
//!
//! Pure `(seed, config) -> LevelBlueprint`. Gate `i` of `N` interpolates its
//! aperture, amplitude and frequency along normalized progress `i / (N - 1)`,
//! then draws exactly two RNG values: phase first, center offset second.

use crate::core::math::{lerp, progress, PI};
use crate::core::rng::DeterministicRng;
use crate::level::blueprint::LevelBlueprint;
use crate::level::config::ReflexGateConfig;
use crate::level::gate::Gate;
use crate::run::descriptor::RunDescriptor;

/// Produces a blueprint for a run.
///
/// Implementations must be pure functions of the descriptor.
pub trait LevelGenerator {
    /// Generate the blueprint for `run`.
    fn generate(&self, run: &RunDescriptor) -> LevelBlueprint;
}

/// Generator for the reflex gate mode, version 1.
#[derive(Clone, Debug, Default)]
pub struct ReflexGateGenerator {
    config: ReflexGateConfig,
}

impl ReflexGateGenerator {
    /// Generator with custom tuning.
    pub fn new(config: ReflexGateConfig) -> Self {
        Self { config }
    }

    /// Tuning in use.
    pub fn config(&self) -> &ReflexGateConfig {
        &self.config
    }

    /// Blueprint for a bare seed.
    pub fn generate_for_seed(&self, seed: u32) -> LevelBlueprint {
        LevelBlueprint {
            gates: generate_gates(&self.config, seed),
            playfield_width: self.config.playfield_width,
            playfield_height: self.config.playfield_height,
            scroll_speed: self.config.scroll_speed,
        }
    }
}

impl LevelGenerator for ReflexGateGenerator {
    fn generate(&self, run: &RunDescriptor) -> LevelBlueprint {
        self.generate_for_seed(run.seed())
    }
}

/// Generate the gate sequence for `seed`.
pub fn generate_gates(cfg: &ReflexGateConfig, seed: u32) -> Vec<Gate> {
    let mut rng = DeterministicRng::new(seed);
    let center_y = cfg.playfield_height * 0.5;
    let count = cfg.gate_count;

    (0..count)
        .map(|i| {
            let t = progress(i, count);
            let aperture = lerp(cfg.base_aperture_height, cfg.min_aperture_height, t);
            let amplitude = lerp(cfg.base_amplitude, cfg.max_amplitude, t);
            let freq = lerp(cfg.base_freq_hz, cfg.max_freq_hz, t);

            // Draw order is load-bearing: phase, then center offset.
            let phase = rng.next_float01() * 2.0 * PI;

            let max_variation = (center_y - amplitude - aperture * 0.5).max(0.0);
            let variation = (rng.next_float01() * 2.0 - 1.0) * max_variation * 0.3;

            Gate {
                wall_x: cfg.first_gate_x + i as f32 * cfg.gate_spacing_x,
                rest_center_y: center_y + variation,
                aperture_height: aperture,
                amplitude,
                phase,
                freq_hz: freq,
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
