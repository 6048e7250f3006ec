//! Difficulty curve mutator.
//!
//! Re-ramps aperture, amplitude and frequency between the first and last gate
//! along `t' = t ^ (2 ^ curve)`. The endpoints are kept bit-exact; only the
//! interior progress is reshaped.

use crate::core::math::{lerp, pow_f32, progress};
use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::gate::Gate;
use crate::mutator::{check_range, BlueprintMutator};
use crate::run::mutator_spec::MutatorSpec;

/// Power-curve re-interpolation with `curve` in `[-2, 2]` (default 0).
///
/// Positive curves keep the early gates easy for longer; negative curves
/// front-load the difficulty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyCurveMutator {
    curve: f32,
}

impl DifficultyCurveMutator {
    /// Validate and build.
    pub fn new(curve: f32) -> Result<Self, ConfigError> {
        let curve = check_range("DifficultyCurve", "curve", curve, -2.0, 2.0)?;
        Ok(Self { curve })
    }

    /// Build from a spec (`curve`).
    pub fn from_spec(spec: &MutatorSpec) -> Result<Self, ConfigError> {
        Self::new(spec.param_or("curve", 0.0))
    }

    /// Exponent applied to normalized progress.
    pub fn exponent(&self) -> f32 {
        pow_f32(2.0, self.curve)
    }
}

impl BlueprintMutator for DifficultyCurveMutator {
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint {
        let n = blueprint.gate_count();
        if n <= 1 || self.curve == 0.0 {
            return blueprint.clone();
        }

        let first = blueprint.gates[0];
        let last = blueprint.gates[n - 1];
        let exponent = self.exponent();

        blueprint.map_gates(|i, src| {
            if i == 0 || i == n - 1 {
                return *src;
            }
            let t = pow_f32(progress(i, n), exponent);
            Gate {
                aperture_height: lerp(first.aperture_height, last.aperture_height, t),
                amplitude: lerp(first.amplitude, last.amplitude, t),
                freq_hz: lerp(first.freq_hz, last.freq_hz, t),
                ..*src
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::test_support::{generated, spec};
    use proptest::prelude::*;

    #[test]
    fn test_zero_curve_is_identity() {
        let bp = generated();
        let out = DifficultyCurveMutator::from_spec(&spec("DifficultyCurve", &[]))
            .unwrap()
            .apply(&bp);
        assert!(out.bits_eq(&bp));
    }

    #[test]
    fn test_positive_curve_eases_interior() {
        let bp = generated();
        let out = DifficultyCurveMutator::new(1.0).unwrap().apply(&bp);
        // t^2 < t inside (0, 1): apertures stay wider for longer
        for i in 1..bp.gate_count() - 1 {
            assert!(out.gates[i].aperture_height > bp.gates[i].aperture_height);
            assert!(out.gates[i].amplitude < bp.gates[i].amplitude);
        }
    }

    #[test]
    fn test_negative_curve_front_loads() {
        let bp = generated();
        let out = DifficultyCurveMutator::new(-1.0).unwrap().apply(&bp);
        for i in 1..bp.gate_count() - 1 {
            assert!(out.gates[i].aperture_height < bp.gates[i].aperture_height);
        }
    }

    #[test]
    fn test_preserves_untouched_fields() {
        let bp = generated();
        let out = DifficultyCurveMutator::new(2.0).unwrap().apply(&bp);
        for (src, dst) in bp.gates.iter().zip(&out.gates) {
            assert_eq!(dst.wall_x, src.wall_x);
            assert_eq!(dst.rest_center_y, src.rest_center_y);
            assert_eq!(dst.phase, src.phase);
        }
    }

    #[test]
    fn test_single_gate_unchanged() {
        let mut bp = generated();
        bp.gates.truncate(1);
        let out = DifficultyCurveMutator::new(1.5).unwrap().apply(&bp);
        assert!(out.bits_eq(&bp));
    }

    #[test]
    fn test_range() {
        assert!(DifficultyCurveMutator::new(-2.0).is_ok());
        assert!(DifficultyCurveMutator::new(2.0).is_ok());
        assert!(DifficultyCurveMutator::new(-2.1).is_err());
        assert!(DifficultyCurveMutator::new(2.1).is_err());
    }

    #[test]
    fn test_exponent() {
        assert_eq!(DifficultyCurveMutator::new(0.0).unwrap().exponent(), 1.0);
        assert_eq!(DifficultyCurveMutator::new(1.0).unwrap().exponent(), 2.0);
        assert_eq!(DifficultyCurveMutator::new(-1.0).unwrap().exponent(), 0.5);
    }

    proptest! {
        #[test]
        fn prop_endpoints_preserved(curve in -2.0f32..=2.0) {
            let bp = generated();
            let out = DifficultyCurveMutator::new(curve).unwrap().apply(&bp);
            let n = bp.gate_count();
            prop_assert!(out.gates[0].bits_eq(&bp.gates[0]));
            prop_assert!(out.gates[n - 1].bits_eq(&bp.gates[n - 1]));
        }
    }
}
