//! Session Controller
//!
//! Ready -> Playing -> Results for one attempt. Consumes simulation events,
//! keeps per-gate results and the score ledger, and folds the event hash the
//! replay verifier will later recompute. Never touches the simulation itself.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::replay::hash::{EventStreamHasher, VerificationHash};
use crate::run::descriptor::{RunDescriptor, RunId};
use crate::session::score::{ScoreBreakdown, ScoreComponentId, ScoreDelta};
use crate::sim::events::{GameEvent, GameEventType};

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for start.
    #[default]
    Ready,
    /// Consuming events.
    Playing,
    /// Level complete; result available.
    Results,
}

/// Outcome of one gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    /// Gate index.
    pub gate_index: i32,
    /// Cursor was inside the opening.
    pub passed: bool,
    /// Points awarded (0 on a miss).
    pub score: i32,
    /// Offset in half-apertures recovered from the event. `<= 1` on a pass.
    pub offset_normalized: f32,
}

/// Immutable summary of a completed session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Session seed.
    pub seed: u32,
    /// Time between start and level complete.
    pub elapsed: Duration,
    /// Final score.
    pub total_score: i32,
    /// Longest pass streak.
    pub max_combo: i32,
    /// Gates passed.
    pub gates_passed: usize,
    /// Gates in the level.
    pub gates_total: usize,
    /// Per-gate outcomes in resolution order.
    pub gates: Vec<GateResult>,
    /// Run identity when started from a descriptor.
    pub run_id: Option<RunId>,
    /// Ledger summary.
    pub breakdown: Option<ScoreBreakdown>,
    /// Hash of the consumed event stream.
    pub event_hash: Option<VerificationHash>,
}

/// State machine for one session.
#[derive(Debug, Default)]
pub struct SessionController {
    state: SessionState,
    seed: u32,
    gates_total: usize,
    run: Option<RunDescriptor>,
    started_at: Option<Instant>,
    elapsed: Duration,
    total_score: i32,
    current_combo: i32,
    max_combo: i32,
    gate_results: Vec<GateResult>,
    ledger: Vec<ScoreDelta>,
    hasher: EventStreamHasher,
}

impl SessionController {
    /// Controller in `Ready` with seed 0 and no gates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to `Ready` for a bare seed.
    pub fn reset_to_ready(&mut self, seed: u32, gates_total: usize) {
        *self = Self {
            seed,
            gates_total,
            gate_results: Vec::with_capacity(gates_total),
            ledger: Vec::with_capacity(gates_total),
            ..Self::default()
        };
        debug!("Session ready (seed {:#010x}, {} gates)", seed, gates_total);
    }

    /// Back to `Ready` for a run descriptor; the result carries its id.
    pub fn reset_to_ready_with_run(&mut self, run: &RunDescriptor, gates_total: usize) {
        self.reset_to_ready(run.seed(), gates_total);
        self.run = Some(run.clone());
    }

    /// `Ready` -> `Playing`. Ignored in any other state.
    pub fn start(&mut self) {
        if self.state != SessionState::Ready {
            return;
        }
        self.state = SessionState::Playing;
        self.started_at = Some(Instant::now());
        debug!("Session playing (seed {:#010x})", self.seed);
    }

    /// Consume one frame's events. Ignored unless `Playing`.
    ///
    /// Returns true when `LevelComplete` moved the session to `Results`;
    /// events after it in the same slice are not consumed.
    pub fn apply_events(&mut self, events: &[GameEvent]) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }

        for event in events {
            self.hasher.update(event);

            match event.event_type {
                GameEventType::EnteredGate => {
                    let score = event.arg1;
                    self.total_score += score;
                    self.current_combo += 1;
                    self.max_combo = self.max_combo.max(self.current_combo);
                    // Inverse of intensity = 1 - offset / 2
                    let offset = (1.0 - event.intensity) * 2.0;
                    self.record_gate(event.arg0, true, score, offset);
                }
                GameEventType::HitWall => {
                    self.current_combo = 0;
                    let offset = 1.0 + event.arg1 as f32 / 1000.0;
                    self.record_gate(event.arg0, false, 0, offset);
                }
                GameEventType::LevelComplete => {
                    self.finish();
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    fn record_gate(&mut self, gate_index: i32, passed: bool, score: i32, offset_normalized: f32) {
        self.gate_results.push(GateResult {
            gate_index,
            passed,
            score,
            offset_normalized,
        });
        self.ledger.push(ScoreDelta {
            component: ScoreComponentId::GateScore,
            amount: score,
            gate_index,
            combo_after: self.current_combo,
        });
    }

    fn finish(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.elapsed = started.elapsed();
        }
        self.state = SessionState::Results;
        debug!(
            "Session complete: score {} max combo {} hash {}",
            self.total_score,
            self.max_combo,
            self.hasher.finish()
        );
    }

    /// Final result. `None` unless in `Results`.
    pub fn get_result(&self) -> Option<SessionResult> {
        if self.state != SessionState::Results {
            return None;
        }
        Some(SessionResult {
            seed: self.seed,
            elapsed: self.elapsed,
            total_score: self.total_score,
            max_combo: self.max_combo,
            gates_passed: self.gate_results.iter().filter(|g| g.passed).count(),
            gates_total: self.gates_total,
            gates: self.gate_results.clone(),
            run_id: self.run.as_ref().map(RunDescriptor::id),
            breakdown: Some(ScoreBreakdown::from_deltas(&self.ledger)),
            event_hash: Some(self.hasher.finish()),
        })
    }

    /// Current phase.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Score so far.
    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    /// Current pass streak.
    pub fn current_combo(&self) -> i32 {
        self.current_combo
    }

    /// Longest pass streak so far.
    pub fn max_combo(&self) -> i32 {
        self.max_combo
    }

    /// Wall time since start, frozen at level complete.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started) => started.elapsed(),
            None => self.elapsed,
        }
    }

    /// Descriptor the session was reset with, if any.
    pub fn run(&self) -> Option<&RunDescriptor> {
        self.run.as_ref()
    }

    /// Ledger so far.
    pub fn ledger(&self) -> &[ScoreDelta] {
        &self.ledger
    }
}

// =============================================================================
// TESTS
// =============================================================================
