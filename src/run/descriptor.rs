//! Run Identity
//!
//! A `RunDescriptor` is the complete, immutable configuration of one attempt.
//! Its `RunId` is an FNV-1a 64 hash over a canonical byte layout, computed once
//! at construction and used for personal-best bucketing and replay pairing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hash::Fnv1a;
use crate::run::ids::{DifficultyTier, ModeId};
use crate::run::mutator_spec::MutatorSpec;

/// Content-addressed identity of a run configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl RunId {
    /// Raw 64-bit value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", hex::encode_upper(self.0.to_be_bytes()))
    }
}

/// Failure parsing a prefixed 64-bit hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expected '{prefix}' followed by 16 hex digits, got '{input}'")]
pub struct ParseHashError {
    /// Required prefix.
    pub prefix: &'static str,
    /// Rejected input.
    pub input: String,
}

/// Parse `<prefix><16 hex digits>` into a u64.
pub(crate) fn parse_prefixed_hex(prefix: &'static str, input: &str) -> Result<u64, ParseHashError> {
    let err = || ParseHashError {
        prefix,
        input: input.to_string(),
    };
    let digits = input.strip_prefix(prefix).ok_or_else(err)?;
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| err())?;
    Ok(u64::from_be_bytes(bytes))
}

impl FromStr for RunId {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex("R-", s).map(RunId)
    }
}

/// Complete immutable run configuration.
///
/// Mutator order is part of the identity as well as the execution order.
/// Deserializing recomputes the id from the other fields; a stored id is
/// ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RunFields")]
pub struct RunDescriptor {
    mode: ModeId,
    seed: u32,
    difficulty: DifficultyTier,
    generator_version: i32,
    ruleset_version: i32,
    mutators: Vec<MutatorSpec>,
    id: RunId,
}

impl RunDescriptor {
    /// Descriptor without mutators.
    pub fn create(
        mode: ModeId,
        seed: u32,
        difficulty: DifficultyTier,
        generator_version: i32,
        ruleset_version: i32,
    ) -> Self {
        Self::create_with_mutators(
            mode,
            seed,
            difficulty,
            generator_version,
            ruleset_version,
            Vec::new(),
        )
    }

    /// Descriptor for the default ruleset: standard difficulty, version 1 everywhere.
    pub fn standard(mode: ModeId, seed: u32) -> Self {
        Self::create(mode, seed, DifficultyTier::STANDARD, 1, 1)
    }

    /// Descriptor with an ordered mutator list.
    pub fn create_with_mutators(
        mode: ModeId,
        seed: u32,
        difficulty: DifficultyTier,
        generator_version: i32,
        ruleset_version: i32,
        mutators: Vec<MutatorSpec>,
    ) -> Self {
        let id = compute_run_id(
            &mode,
            seed,
            difficulty,
            generator_version,
            ruleset_version,
            &mutators,
        );
        Self {
            mode,
            seed,
            difficulty,
            generator_version,
            ruleset_version,
            mutators,
            id,
        }
    }

    /// Game mode.
    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    /// Level seed.
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

    /// Ordered mutator specs.
    pub fn mutators(&self) -> &[MutatorSpec] {
        &self.mutators
    }

    /// Identity hash.
    pub fn id(&self) -> RunId {
        self.id
    }
}

#[derive(Deserialize)]
struct RunFields {
    mode: ModeId,
    seed: u32,
    difficulty: DifficultyTier,
    generator_version: i32,
    ruleset_version: i32,
    mutators: Vec<MutatorSpec>,
    // Positional formats still carry it
    #[serde(default)]
    id: RunId,
}

impl From<RunFields> for RunDescriptor {
    fn from(f: RunFields) -> Self {
        let run = Self::create_with_mutators(
            f.mode,
            f.seed,
            f.difficulty,
            f.generator_version,
            f.ruleset_version,
            f.mutators,
        );
        if f.id != run.id {
            debug!("Stored run id {} replaced by recomputed {}", f.id, run.id);
        }
        run
    }
}

/// Canonical identity hash.
///
/// Layout: mode, seed (u32), difficulty, generator version, ruleset version.
/// The mutator block is appended only when there is at least one mutator, so
/// descriptors without mutators keep their pre-mutator identities.
pub fn compute_run_id(
    mode: &ModeId,
    seed: u32,
    difficulty: DifficultyTier,
    generator_version: i32,
    ruleset_version: i32,
    mutators: &[MutatorSpec],
) -> RunId {
    let mut hasher = Fnv1a::new();
    hasher.update_str(mode.as_str());
    hasher.update_u32(seed);
    hasher.update_i32(difficulty.0);
    hasher.update_i32(generator_version);
    hasher.update_i32(ruleset_version);

    if !mutators.is_empty() {
        hasher.update_i32(mutators.len() as i32);
        for spec in mutators {
            hasher.update_str(spec.id().as_str());
            hasher.update_i32(spec.version());
            hasher.update_i32(spec.params().len() as i32);
            for param in spec.params() {
                hasher.update_str(param.key());
                hasher.update_f32_bits(param.value());
            }
        }
    }

    RunId(hasher.finish())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::ids::MutatorId;
    use crate::run::mutator_spec::MutatorParam;

    const SEED: u32 = 0xC0FFEE;

    fn base() -> RunDescriptor {
        RunDescriptor::standard(ModeId::reflex_gates(), SEED)
    }

    fn narrow(factor: Option<f32>) -> MutatorSpec {
        let params = factor
            .map(|f| vec![MutatorParam::new("factor", f).unwrap()])
            .unwrap_or_default();
        MutatorSpec::create(MutatorId::new(MutatorId::NARROW_MARGIN), 1, params).unwrap()
    }

    #[test]
    fn test_golden_run_id() {
        assert_eq!(base().id(), RunId(0xA185_D397_4C93_6996));
    }

    #[test]
    fn test_golden_run_id_with_mutator() {
        let run = RunDescriptor::create_with_mutators(
            ModeId::reflex_gates(),
            SEED,
            DifficultyTier::STANDARD,
            1,
            1,
            vec![narrow(None)],
        );
        assert_eq!(run.id(), RunId(0x855A_5B93_9E8A_BC2F));
    }

    #[test]
    fn test_golden_run_id_with_param() {
        let run = RunDescriptor::create_with_mutators(
            ModeId::reflex_gates(),
            SEED,
            DifficultyTier::STANDARD,
            1,
            1,
            vec![narrow(Some(0.8))],
        );
        assert_eq!(run.id(), RunId(0x4A7F_B94F_7D50_A251));
    }

    #[test]
    fn test_empty_mutators_keep_legacy_id() {
        let run = RunDescriptor::create_with_mutators(
            ModeId::reflex_gates(),
            SEED,
            DifficultyTier::STANDARD,
            1,
            1,
            Vec::new(),
        );
        assert_eq!(run.id(), base().id());
    }

    #[test]
    fn test_every_field_changes_id() {
        let id = base().id();
        let mode = ModeId::reflex_gates();
        let std = DifficultyTier::STANDARD;
        assert_ne!(id, RunDescriptor::standard(mode.clone(), 0xDEADBEEF).id());
        assert_ne!(id, RunDescriptor::standard(ModeId::new("OtherMode"), SEED).id());
        assert_ne!(id, RunDescriptor::create(mode.clone(), SEED, DifficultyTier(1), 1, 1).id());
        assert_ne!(id, RunDescriptor::create(mode.clone(), SEED, std, 2, 1).id());
        assert_ne!(id, RunDescriptor::create(mode, SEED, std, 1, 2).id());
    }

    #[test]
    fn test_mutator_order_is_identity() {
        let rhythm = MutatorSpec::simple(MutatorId::RHYTHM_LOCK).unwrap();
        let jitter = MutatorSpec::simple(MutatorId::GATE_JITTER).unwrap();
        let make = |specs| {
            RunDescriptor::create_with_mutators(
                ModeId::reflex_gates(),
                SEED,
                DifficultyTier::STANDARD,
                1,
                1,
                specs,
            )
        };
        let a = make(vec![rhythm.clone(), jitter.clone()]);
        let b = make(vec![jitter, rhythm]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_param_value_changes_id() {
        let make = |f| {
            RunDescriptor::create_with_mutators(
                ModeId::reflex_gates(),
                SEED,
                DifficultyTier::STANDARD,
                1,
                1,
                vec![narrow(Some(f))],
            )
        };
        assert_ne!(make(0.8).id(), make(0.75).id());
    }

    #[test]
    fn test_run_id_text_form() {
        let id = RunId(0xA185_D397_4C93_6996);
        assert_eq!(id.to_string(), "R-A185D3974C936996");
        assert_eq!("R-A185D3974C936996".parse::<RunId>(), Ok(id));
        assert_eq!(RunId(1).to_string(), "R-0000000000000001");
        assert!("V-A185D3974C936996".parse::<RunId>().is_err());
        assert!("R-XYZ".parse::<RunId>().is_err());
    }

    #[test]
    fn test_descriptor_json_roundtrip_keeps_id() {
        let run = RunDescriptor::create_with_mutators(
            ModeId::reflex_gates(),
            SEED,
            DifficultyTier::STANDARD,
            1,
            1,
            vec![narrow(Some(0.8))],
        );
        let json = serde_json::to_string(&run).unwrap();
        let back: RunDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, run);
        assert_eq!(back.id(), RunId(0x4A7F_B94F_7D50_A251));
    }

    #[test]
    fn test_deserialize_recomputes_id() {
        let mut value = serde_json::to_value(base()).unwrap();
        value["id"] = serde_json::json!(1);
        let back: RunDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(back.id(), RunId(0xA185_D397_4C93_6996));

        let bytes = bincode::serialize(&base()).unwrap();
        let back: RunDescriptor = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, base());
    }
}
