//! Segment bias mutator.
//!
//! Splits the gate sequence into `seg` segments and biases each one harder
//! or easier by `amt` along a shape. Not idempotent: applying it twice
//! compounds the multipliers.

use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::gate::Gate;
use crate::mutator::{check_choice, check_range, BlueprintMutator};
use crate::run::mutator_spec::MutatorSpec;

/// Allowed segment counts.
pub const ALLOWED_SEGMENTS: &[i32] = &[2, 3, 4];

/// Allowed shape codes.
pub const ALLOWED_SHAPES: &[i32] = &[0, 1, 2];

/// Aperture floor after biasing.
pub const MIN_APERTURE_HEIGHT: f32 = 20.0;

/// Per-segment direction profile. `d > 0` is harder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiasShape {
    /// Ramp from easy (-1) to hard (+1).
    Crescendo,
    /// Hard (+1) in the middle, easy (-1) at the ends.
    Valley,
    /// Alternating easy/hard.
    Wave,
}

impl BiasShape {
    fn from_code(code: i32) -> Result<Self, ConfigError> {
        match check_choice("SegmentBias", "shape", code, ALLOWED_SHAPES)? {
            0 => Ok(BiasShape::Crescendo),
            1 => Ok(BiasShape::Valley),
            _ => Ok(BiasShape::Wave),
        }
    }
}

/// Segment bias with `segments` in {2, 3, 4}, `amount` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentBiasMutator {
    segments: i32,
    amount: f32,
    shape: BiasShape,
}

impl SegmentBiasMutator {
    /// Validate and build.
    pub fn new(segments: i32, amount: f32, shape: i32) -> Result<Self, ConfigError> {
        let segments = check_choice("SegmentBias", "seg", segments, ALLOWED_SEGMENTS)?;
        let amount = check_range("SegmentBias", "amt", amount, 0.0, 1.0)?;
        let shape = BiasShape::from_code(shape)?;
        Ok(Self {
            segments,
            amount,
            shape,
        })
    }

    /// Build from a spec (`seg` = 3, `amt` = 0.35, `shape` = 0 by default).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(
            spec.param_or("seg", 3.0) as i32,
            spec.param_or("amt", 0.35),
            spec.param_or("shape", 0.0) as i32,
        )
    }

    /// Direction for a segment index.
    fn direction(&self, segment: i32) -> f32 {
        let t = segment as f32 / (self.segments - 1) as f32;
        match self.shape {
            BiasShape::Crescendo => 2.0 * t - 1.0,
            BiasShape::Valley => 8.0 * t * (1.0 - t) - 1.0,
            BiasShape::Wave => {
                if segment % 2 == 0 {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }
}

impl BlueprintMutator for SegmentBiasMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        let n = blueprint.gate_count();
        if n <= 1 {
            return blueprint.clone();
        }

        blueprint.map_gates(|i, src| {
            let segment = (i as i64 * self.segments as i64 / n as i64) as i32;
            let d = self.direction(segment);
            let aperture_mul = 1.0 - self.amount * d;
            let motion_mul = 1.0 + self.amount * d;

            Gate {
                aperture_height: (src.aperture_height * aperture_mul).max(MIN_APERTURE_HEIGHT),
                amplitude: src.amplitude * motion_mul,
                freq_hz: src.freq_hz * motion_mul,
                ..*src
            }
        })
    }
}
