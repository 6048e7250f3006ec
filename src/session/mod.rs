//! Session orchestration.
//!
//! The controller turns a simulation's event stream into a per-session
//! result and an auditable score ledger.

pub mod controller;
pub mod score;

pub use controller::{GateResult, SessionController, SessionResult, SessionState};
pub use score::{ScoreBreakdown, ScoreComponentId, ScoreDelta};
