//! Permanent protocol identifiers.
//!
//! Ids are strings so new modes and mutators need no enum change. Once an id
//! ships it is frozen; new behavior gets a new version, never a reused id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a game mode.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    /// The reflex gate mode.
    pub const REFLEX_GATES: &'static str = "ReflexGates";

    /// Wrap an arbitrary mode name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The built-in reflex gate mode.
    pub fn reflex_gates() -> Self {
        Self::new(Self::REFLEX_GATES)
    }

    /// Raw string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a blueprint mutator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutatorId(String);

impl MutatorId {
    /// Scale aperture down.
    pub const NARROW_MARGIN: &'static str = "NarrowMargin";
    /// Scale aperture up.
    pub const WIDE_MARGIN: &'static str = "WideMargin";
    /// Reshape the difficulty ramp along a power curve.
    pub const DIFFICULTY_CURVE: &'static str = "DifficultyCurve";
    /// Quantize oscillation phase.
    pub const RHYTHM_LOCK: &'static str = "RhythmLock";
    /// Deterministic center offset.
    pub const GATE_JITTER: &'static str = "GateJitter";
    /// Per-segment difficulty bias.
    pub const SEGMENT_BIAS: &'static str = "SegmentBias";

    /// Wrap an arbitrary mutator name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty id, which is never valid in a spec.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MutatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Difficulty tier, hashed as its integer value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTier(pub i32);

impl DifficultyTier {
    /// The only tier the current generator distinguishes.
    pub const STANDARD: DifficultyTier = DifficultyTier(0);
}
