//! Deterministic simulation.
//!
//! A [`GameSimulation`] is advanced one fixed tick at a time by the
//! [`DeterministicLoop`]. Given the same seed and the same per-tick input it
//! must emit the same events in the same order on every platform.
//!
//! ```text
//!   host frame ──> DeterministicLoop::step ──> N x fixed_update(tick, dt, input)
//!                        (accumulator)                 │
//!                                                      └──> Vec<GameEvent>
//! ```

pub mod events;
pub mod input;
pub mod tick;
pub mod stub;
pub mod reflex;

pub use events::{GameEvent, GameEventType};
pub use input::PointerInput;
pub use tick::{DeterministicLoop, FrameResult, LoopConfig};
pub use stub::HeartbeatSimulation;
pub use reflex::{GatePreview, ReflexGateSimulation};

/// A fixed-step simulation.
pub trait GameSimulation {
    /// Reinitialize all state from a session seed.
    fn reset(&mut self, seed: u32);

    /// Advance exactly one tick, appending any events to `events`.
    ///
    /// `events` is shared across the ticks of a frame; implementations only
    /// push and must not clear it.
    fn fixed_update(&mut self, tick: u64, dt: f32, input: &PointerInput, events: &mut Vec<GameEvent>);
}

/// Read-only preview of the next gate for debug overlays.
pub trait SimDebugOverlay {
    /// Geometry of the upcoming gate at `sim_time`, or `None` once every gate
    /// has been resolved.
    fn gate_preview(&self, sim_time: f32) -> Option<GatePreview>;
}
