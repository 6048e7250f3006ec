//! Aperture scaling mutators.

use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::gate::Gate;
use crate::mutator::{check_range, BlueprintMutator};
use crate::run::mutator_spec::MutatorSpec;

fn scale_aperture(blueprint: &LevelBlueprint, factor: f32) -> LevelBlueprint {
    blueprint.map_gates(|_, g| Gate {
        aperture_height: g.aperture_height * factor,
        ..*g
    })
}

/// Shrink every aperture by `factor` in `[0.1, 1.0]` (default 0.75).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NarrowMarginMutator {
    factor: f32,
}

impl NarrowMarginMutator {
    /// Default factor.
    pub const DEFAULT_FACTOR: f32 = 0.75;

    /// Validate and build.
    pub fn new(factor: f32) -> Result<Self, ConfigError> {
        let factor = check_range("NarrowMargin", "factor", factor, 0.1, 1.0)?;
        Ok(Self { factor })
    }

    /// Build from a spec (`factor`).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(spec.param_or("factor", Self::DEFAULT_FACTOR))
    }
}

impl BlueprintMutator for NarrowMarginMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        scale_aperture(blueprint, self.factor)
    }
}

/// Grow every aperture by `factor` in `[1.0, 3.0]` (default 1.4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WideMarginMutator {
    factor: f32,
}

impl WideMarginMutator {
    /// Default factor.
    pub const DEFAULT_FACTOR: f32 = 1.4;

    /// Validate and build.
    pub fn new(factor: f32) -> Result<Self, ConfigError> {
        let factor = check_range("WideMargin", "factor", factor, 1.0, 3.0)?;
        Ok(Self { factor })
    }

    /// Build from a spec (`factor`).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(spec.param_or("factor", Self::DEFAULT_FACTOR))
    }
}

impl BlueprintMutator for WideMarginMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        scale_aperture(blueprint, self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::test_support::{generated, spec};

    #[test]
    fn test_narrow_scales_only_aperture() {
        let bp = generated();
        let out = NarrowMarginMutator::new(0.5).unwrap().apply(&bp);
        for (src, dst) in bp.gates.iter().zip(&out.gates) {
            assert_eq!(dst.aperture_height, src.aperture_height * 0.5);
            assert_eq!(dst.wall_x, src.wall_x);
            assert_eq!(dst.rest_center_y, src.rest_center_y);
            assert_eq!(dst.amplitude, src.amplitude);
            assert_eq!(dst.phase, src.phase);
            assert_eq!(dst.freq_hz, src.freq_hz);
        }
    }

    #[test]
    fn test_narrow_default_from_spec() {
        let bp = generated();
        let mutator = NarrowMarginMutator::from_spec(&spec("NarrowMargin", &[])).unwrap();
        assert_eq!(mutator, NarrowMarginMutator::new(0.75).unwrap());
        assert_eq!(mutator.apply(&bp).gates[0].aperture_height, 150.0);
    }

    #[test]
    fn test_narrow_range() {
        assert!(NarrowMarginMutator::new(0.1).is_ok());
        assert!(NarrowMarginMutator::new(1.0).is_ok());
        assert!(NarrowMarginMutator::new(0.05).is_err());
        assert!(NarrowMarginMutator::new(1.01).is_err());
        assert!(NarrowMarginMutator::new(f32::NAN).is_err());
        assert!(NarrowMarginMutator::from_spec(&spec("NarrowMargin", &[("factor", 2.0)])).is_err());
    }

    #[test]
    fn test_wide_scales_aperture() {
        let bp = generated();
        let out = WideMarginMutator::from_spec(&spec("WideMargin", &[("factor", 2.0)]))
            .unwrap()
            .apply(&bp);
        assert_eq!(out.gates[0].aperture_height, 400.0);
        assert_eq!(out.gate_count(), bp.gate_count());
    }

    #[test]
    fn test_wide_range() {
        assert!(WideMarginMutator::new(0.99).is_err());
        assert!(WideMarginMutator::new(3.5).is_err());
        assert_eq!(
            WideMarginMutator::new(1.4).unwrap(),
            WideMarginMutator::from_spec(&spec("WideMargin", &[])).unwrap()
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let bp = generated();
        let before = bp.clone();
        let _ = WideMarginMutator::new(3.0).unwrap().apply(&bp);
        assert!(bp.bits_eq(&before));
    }
}
