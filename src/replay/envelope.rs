//! Replay Envelope
//!
//! Self-contained replay artifact: run identity fields, compressed input and
//! the claimed outcome. Events are never stored; replay re-derives them.
//! Compact enough to persist next to a personal best (~4 bytes per span).

use serde::{Deserialize, Serialize};

use crate::replay::hash::VerificationHash;
use crate::replay::trace::InputTrace;
use crate::run::descriptor::{RunDescriptor, RunId};
use crate::run::ids::{DifficultyTier, ModeId};
use crate::run::mutator_spec::MutatorSpec;

/// Current envelope format version.
pub const FORMAT_VERSION: u16 = 1;

/// Errors from envelope serialization.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// JSON encoding or decoding failed.
    #[error("Envelope JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed.
    #[error("Envelope binary error: {0}")]
    Binary(#[from] bincode::Error),

    /// Decoded envelope has an unknown format version.
    #[error("Unsupported envelope format version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the data.
        found: u16,
        /// Version this build reads.
        expected: u16,
    },
}

/// Immutable recorded session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayEnvelope {
    format_version: u16,
    run_id: RunId,
    mode: ModeId,
    seed: u32,
    difficulty: DifficultyTier,
    generator_version: i32,
    ruleset_version: i32,
    mutators: Vec<MutatorSpec>,
    fixed_hz: u32,
    trace: InputTrace,
    hash: VerificationHash,
    final_score: i32,
    final_max_combo: i32,
}

impl ReplayEnvelope {
    /// Stamp `run`'s identity onto a trace and claimed outcome.
    pub fn new(
        run: &RunDescriptor,
        fixed_hz: u32,
        trace: InputTrace,
        hash: VerificationHash,
        final_score: i32,
        final_max_combo: i32,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            run_id: run.id(),
            mode: run.mode().clone(),
            seed: run.seed(),
            difficulty: run.difficulty(),
            generator_version: run.generator_version(),
            ruleset_version: run.ruleset_version(),
            mutators: run.mutators().to_vec(),
            fixed_hz,
            trace,
            hash,
            final_score,
            final_max_combo,
        }
    }

    /// Rebuild the descriptor from the stored identity fields.
    ///
    /// Its id is recomputed and may differ from [`run_id`](Self::run_id) if
    /// the envelope was altered.
    pub fn reconstruct_run(&self) -> RunDescriptor {
        RunDescriptor::create_with_mutators(
            self.mode.clone(),
            self.seed,
            self.difficulty,
            self.generator_version,
            self.ruleset_version,
            self.mutators.clone(),
        )
    }

    /// Format version.
    pub fn format_version(&self) -> u16 {
        self.format_version
    }

    /// Claimed run id.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Mode.
    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    /// Session seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Difficulty tier.
    pub fn difficulty(&self) -> DifficultyTier {
        self.difficulty
    }

    /// Generator version.
    pub fn generator_version(&self) -> i32 {
        self.generator_version
    }

    /// Ruleset version.
    pub fn ruleset_version(&self) -> i32 {
        self.ruleset_version
    }

    /// Mutator specs in application order.
    pub fn mutators(&self) -> &[MutatorSpec] {
        &self.mutators
    }

    /// Tick rate the session was recorded at.
    pub fn fixed_hz(&self) -> u32 {
        self.fixed_hz
    }

    /// Recorded input.
    pub fn trace(&self) -> &InputTrace {
        &self.trace
    }

    /// Claimed event stream hash.
    pub fn hash(&self) -> VerificationHash {
        self.hash
    }

    /// Claimed final score.
    pub fn final_score(&self) -> i32 {
        self.final_score
    }

    /// Claimed max combo.
    pub fn final_max_combo(&self) -> i32 {
        self.final_max_combo
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, EnvelopeError> {
        let envelope: Self = serde_json::from_str(s)?;
        envelope.check_version()
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, EnvelopeError> {
        let envelope: Self = bincode::deserialize(data)?;
        envelope.check_version()
    }

    fn check_version(self) -> Result<Self, EnvelopeError> {
        if self.format_version != FORMAT_VERSION {
            return Err(EnvelopeError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(self)
    }
}
