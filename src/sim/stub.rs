//! Heartbeat simulation. Emits one tick event per fixed step and nothing else.
//! Used to exercise the loop without gameplay.

use crate::sim::{GameEvent, GameSimulation, PointerInput};

/// Simulation that only counts ticks.
#[derive(Clone, Debug, Default)]
pub struct HeartbeatSimulation {
    seed: u32,
    ticks: u64,
}

impl HeartbeatSimulation {
    /// New heartbeat simulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed passed to the last reset.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Ticks stepped since reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl GameSimulation for HeartbeatSimulation {
    fn reset(&mut self, seed: u32) {
        self.seed = seed;
        self.ticks = 0;
    }

    fn fixed_update(&mut self, tick: u64, _dt: f32, _input: &PointerInput, events: &mut Vec<GameEvent>) {
        self.ticks += 1;
        events.push(GameEvent::heartbeat(tick));
    }
}
