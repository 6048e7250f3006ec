//! Blueprint Mutators
//!
//! Pure `LevelBlueprint -> LevelBlueprint` transforms, resolved from a
//! versioned registry and folded left to right by the pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MUTATOR PIPELINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  margin.rs   - NarrowMargin / WideMargin (aperture scale)    │
//! │  curve.rs    - DifficultyCurve (power-curve re-ramp)         │
//! │  rhythm.rs   - RhythmLock (phase quantization)               │
//! │  jitter.rs   - GateJitter (deterministic center offset)      │
//! │  segment.rs  - SegmentBias (per-segment difficulty)          │
//! │  registry.rs - (id, version) -> factory                      │
//! │  pipeline.rs - Ordered left fold over specs                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Composition is not commutative: later mutators read what earlier ones wrote.

pub mod margin;
pub mod curve;
pub mod rhythm;
pub mod jitter;
pub mod segment;
pub mod registry;
pub mod pipeline;

use crate::error::ConfigError;
use crate::level::blueprint::LevelBlueprint;

/// A pure blueprint transform.
///
/// Reads only its input and its own validated parameters, and always returns
/// a new blueprint.
pub trait BlueprintMutator {
    /// Produce the transformed blueprint.
    fn apply(&self, blueprint: &LevelBlueprint) -> LevelBlueprint;
}

/// Reject a continuous parameter outside `[min, max]` (NaN included).
pub(crate) fn check_range(
    mutator: &'static str,
    key: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<f32, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ParamOutOfRange {
            mutator,
            key,
            value,
            min,
            max,
        })
    }
}

/// Reject a discrete parameter not in `allowed`.
pub(crate) fn check_choice(
    mutator: &'static str,
    key: &'static str,
    value: i32,
    allowed: &'static [i32],
) -> Result<i32, ConfigError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidChoice {
            mutator,
            key,
            value,
            allowed,
        })
    }
}

pub use margin::{NarrowMarginMutator, WideMarginMutator};
pub use curve::DifficultyCurveMutator;
pub use rhythm::RhythmLockMutator;
pub use jitter::GateJitterMutator;
pub use segment::{BiasShape, SegmentBiasMutator};
pub use registry::{MutatorFactory, MutatorRegistry};
pub use pipeline::{build_blueprint, MutatorPipeline};
