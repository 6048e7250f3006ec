//! Gate jitter mutator.
//!
//! Offsets each rest center by `sin(wall_x * 0.015 + phase) * strength * 25`.
//! No RNG: the offset is reproducible from blueprint contents alone, which is
//! also why its result depends on whether phase was quantized first.

use crate::core::math::sin_f32;
use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::gate::Gate;
use crate::mutator::{check_range, BlueprintMutator};
use crate::run::mutator_spec::MutatorSpec;

const MAX_JITTER_PX: f32 = 25.0;
const CORRIDOR_MARGIN: f32 = 10.0;
const JITTER_FREQ: f32 = 0.015;

/// Deterministic center jitter with `strength` in `[0, 1]` (default 0.35).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateJitterMutator {
    strength: f32,
}

impl GateJitterMutator {
    /// Default strength.
    pub const DEFAULT_STRENGTH: f32 = 0.35;

    /// Validate and build.
    pub fn new(strength: f32) -> Result<Self, ConfigError> {
        let strength = check_range("GateJitter", "str", strength, 0.0, 1.0)?;
        Ok(Self { strength })
    }

    /// Build from a spec (`str`).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(spec.param_or("str", Self::DEFAULT_STRENGTH))
    }
}

impl BlueprintMutator for GateJitterMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        let height = blueprint.playfield_height;
        let half_height = height * 0.5;

        blueprint.map_gates(|_, src| {
            let offset = sin_f32(src.wall_x * JITTER_FREQ + src.phase) * self.strength * MAX_JITTER_PX;
            let half_aperture = src.aperture_height * 0.5;
            let min_y = half_aperture + CORRIDOR_MARGIN;
            let max_y = height - half_aperture - CORRIDOR_MARGIN;

            // Aperture too tall for the corridor: park it in the middle
            let center = if min_y > max_y {
                half_height
            } else {
                (src.rest_center_y + offset).min(max_y).max(min_y)
            };

            Gate {
                rest_center_y: center,
                ..*src
            }
        })
    }
}
