//! Replay Verification
//!
//! Re-executes an envelope's trace tick by tick through a fresh simulation,
//! bypassing the fixed-step loop, and compares the recomputed event hash,
//! score and max combo against the envelope's claims.

use tracing::{debug, warn};

use crate::error::TraceError;
use crate::replay::envelope::ReplayEnvelope;
use crate::replay::hash::{EventStreamHasher, VerificationHash};
use crate::sim::events::{GameEvent, GameEventType};
use crate::sim::GameSimulation;

/// Outcome of verifying one envelope.
///
/// A mismatch is a normal result, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayVerification {
    /// Run id, hash, score and combo all matched.
    pub is_valid: bool,
    /// Recomputed run id matched the envelope's.
    pub run_id_match: bool,
    /// Claimed hash.
    pub expected_hash: VerificationHash,
    /// Recomputed hash.
    pub actual_hash: VerificationHash,
    /// Claimed score.
    pub expected_score: i32,
    /// Recomputed score.
    pub actual_score: i32,
    /// Claimed max combo.
    pub expected_max_combo: i32,
    /// Recomputed max combo.
    pub actual_max_combo: i32,
}

impl ReplayVerification {
    /// Hashes agree.
    pub fn hash_match(&self) -> bool {
        self.expected_hash == self.actual_hash
    }

    /// Scores agree.
    pub fn score_match(&self) -> bool {
        self.expected_score == self.actual_score
    }

    /// Max combos agree.
    pub fn combo_match(&self) -> bool {
        self.expected_max_combo == self.actual_max_combo
    }
}

/// Score and combo rebuilt from gate events alone.
#[derive(Default)]
struct Tally {
    score: i32,
    combo: i32,
    max_combo: i32,
}

impl Tally {
    fn apply(&mut self, event: &GameEvent) {
        match event.event_type {
            GameEventType::EnteredGate => {
                self.score += event.arg1;
                self.combo += 1;
                self.max_combo = self.max_combo.max(self.combo);
            }
            GameEventType::HitWall => self.combo = 0,
            _ => {}
        }
    }
}

/// Stateless envelope verifier.
pub struct ReplayVerifier;

impl ReplayVerifier {
    /// Verify by resetting `sim` with the envelope's seed.
    pub fn verify(
        envelope: &ReplayEnvelope,
        sim: &mut dyn GameSimulation,
    ) -> Result<ReplayVerification, TraceError> {
        Self::verify_with(envelope, sim, |sim| sim.reset(envelope.seed()))
    }

    /// Verify with a caller-supplied reset, e.g. from a mutated blueprint.
    ///
    /// `reset` runs only after the run id check passes.
    pub fn verify_with<S, F>(
        envelope: &ReplayEnvelope,
        sim: &mut S,
        reset: F,
    ) -> Result<ReplayVerification, TraceError>
    where
        S: GameSimulation + ?Sized,
        F: FnOnce(&mut S),
    {
        let recomputed = envelope.reconstruct_run().id();
        if recomputed != envelope.run_id() {
            warn!(
                "Replay rejected: run id {} does not match recomputed {}",
                envelope.run_id(),
                recomputed
            );
            return Ok(ReplayVerification {
                is_valid: false,
                run_id_match: false,
                expected_hash: envelope.hash(),
                actual_hash: VerificationHash::default(),
                expected_score: envelope.final_score(),
                actual_score: 0,
                expected_max_combo: envelope.final_max_combo(),
                actual_max_combo: 0,
            });
        }

        reset(sim);

        let dt = 1.0 / envelope.fixed_hz().max(1) as f32;
        let trace = envelope.trace();
        let mut events = Vec::with_capacity(8);
        let mut hasher = EventStreamHasher::new();
        let mut tally = Tally::default();

        for tick in 0..trace.total_ticks() {
            let input = trace.at(tick)?.to_pointer();
            events.clear();
            sim.fixed_update(tick, dt, &input, &mut events);
            for event in &events {
                hasher.update(event);
                tally.apply(event);
            }
        }

        let actual_hash = hasher.finish();
        let mut verification = ReplayVerification {
            is_valid: false,
            run_id_match: true,
            expected_hash: envelope.hash(),
            actual_hash,
            expected_score: envelope.final_score(),
            actual_score: tally.score,
            expected_max_combo: envelope.final_max_combo(),
            actual_max_combo: tally.max_combo,
        };
        verification.is_valid =
            verification.hash_match() && verification.score_match() && verification.combo_match();

        if verification.is_valid {
            debug!("Replay {} verified ({} ticks)", envelope.run_id(), trace.total_ticks());
        } else {
            warn!(
                "Replay {} failed: hash {} vs {}, score {} vs {}, combo {} vs {}",
                envelope.run_id(),
                verification.expected_hash,
                verification.actual_hash,
                verification.expected_score,
                verification.actual_score,
                verification.expected_max_combo,
                verification.actual_max_combo
            );
        }
        Ok(verification)
    }
}

// =============================================================================
// TESTS
// =============================================================================
