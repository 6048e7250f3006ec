//! Rhythm lock mutator.

use crate::core::math::{PI, TWO_PI};
use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::gate::Gate;
use crate::mutator::{check_choice, BlueprintMutator};
use crate::run::mutator_spec::MutatorSpec;

/// Allowed phase divisions per cycle.
pub const ALLOWED_DIVISIONS: &[i32] = &[2, 3, 4, 6, 8];

/// Snap every gate phase to the nearest of `div` equal angular steps.
///
/// Idempotent: a snapped phase snaps to itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RhythmLockMutator {
    divisions: i32,
    step: f32,
}

impl RhythmLockMutator {
    /// Validate and build (`divisions` in {2, 3, 4, 6, 8}, default 4).
    pub fn new(divisions: i32) -> Result<Self, ConfigError> {
        let divisions = check_choice("RhythmLock", "div", divisions, ALLOWED_DIVISIONS)?;
        Ok(Self {
            divisions,
            step: 2.0 * PI / divisions as f32,
        })
    }

    /// Build from a spec (`div`, truncated to an integer).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(spec.param_or("div", 4.0) as i32)
    }

    /// Divisions per cycle.
    pub fn divisions(&self) -> i32 {
        self.divisions
    }

    /// Quantize one phase into `[0, 2*pi)`.
    pub fn quantize(&self, phase: f32) -> f32 {
        let mut normalized = phase % TWO_PI;
        if normalized < 0.0 {
            normalized += TWO_PI;
        }

        let k = (normalized / self.step + 0.5).floor();
        let mut snapped = (k * self.step) % TWO_PI;
        if snapped < 0.0 {
            snapped += TWO_PI;
        }
        snapped
    }
}

impl BlueprintMutator for RhythmLockMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        blueprint.map_gates(|_, g| Gate {
            phase: self.quantize(g.phase),
            ..*g
        })
    }
}
