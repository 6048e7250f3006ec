//! Fixed-Step Loop
//!
//! Converts host wall-clock time into whole simulation ticks. The host owns
//! the clock; the simulation only ever sees `tick` and a constant `dt`.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GameSimulation, PointerInput};
use crate::{MAX_STEPS_PER_FRAME, TICK_RATE};

/// Loop configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Simulation rate in ticks per second.
    pub fixed_hz: u32,
    /// Most ticks stepped in one host frame. Excess time stays in the
    /// accumulator for the next frame.
    pub max_steps_per_frame: u32,
    /// Seed passed to the simulation on reset.
    pub session_seed: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fixed_hz: TICK_RATE,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
            session_seed: 0,
        }
    }
}

/// Output of one host frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameResult {
    /// Tick counter after this frame.
    pub tick: u64,
    /// Events from every tick stepped this frame, in order.
    pub events: Vec<GameEvent>,
    /// Fraction of the next tick already accumulated, in `[0, 1)`.
    /// For render interpolation only.
    pub alpha: f32,
}

/// Accumulator-driven fixed-step loop owning its simulation.
pub struct DeterministicLoop<S: GameSimulation> {
    sim: S,
    config: LoopConfig,
    tick: u64,
    accumulator: f64,
    last_host_ticks: Option<i64>,
    fixed_dt: f32,
    fixed_dt_d: f64,
}

impl<S: GameSimulation> DeterministicLoop<S> {
    /// Create a loop and reset the simulation with `config.session_seed`.
    ///
    /// A `fixed_hz` of 0 is treated as 1.
    pub fn new(sim: S, config: LoopConfig) -> Self {
        let hz = config.fixed_hz.max(1);
        let mut this = Self {
            sim,
            config,
            tick: 0,
            accumulator: 0.0,
            last_host_ticks: None,
            fixed_dt: 1.0 / hz as f32,
            fixed_dt_d: 1.0 / hz as f64,
        };
        this.reset();
        this
    }

    /// Zero the tick counter and accumulator, forget the host baseline and
    /// reset the simulation.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.accumulator = 0.0;
        self.last_host_ticks = None;
        self.sim.reset(self.config.session_seed);
    }

    /// Advance by however many whole ticks the host time since the last call
    /// covers, up to `max_steps_per_frame`.
    ///
    /// The first call only records the baseline. A host clock that moves
    /// backwards contributes zero time.
    pub fn step(&mut self, input: &PointerInput, host_now_ticks: i64, ticks_per_second: f64) -> FrameResult {
        let last = match self.last_host_ticks.replace(host_now_ticks) {
            Some(last) => last,
            None => {
                return FrameResult {
                    tick: self.tick,
                    events: Vec::new(),
                    alpha: 0.0,
                }
            }
        };

        let delta_seconds = (host_now_ticks - last) as f64 / ticks_per_second;
        if delta_seconds > 0.0 {
            self.accumulator += delta_seconds;
        }

        let mut events = Vec::with_capacity(64);
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt_d && steps < self.config.max_steps_per_frame {
            self.sim.fixed_update(self.tick, self.fixed_dt, input, &mut events);
            self.tick += 1;
            self.accumulator -= self.fixed_dt_d;
            steps += 1;
        }

        let mut alpha = (self.accumulator / self.fixed_dt_d) as f32;
        if alpha < 0.0 {
            alpha = 0.0;
        }
        if alpha >= 1.0 {
            alpha = 0.9999;
        }

        FrameResult {
            tick: self.tick,
            events,
            alpha,
        }
    }

    /// Current tick counter.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Fixed step in seconds.
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Seconds accumulated but not yet stepped.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Loop configuration.
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// The driven simulation.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Mutable access to the simulation, e.g. to reset it from a blueprint.
    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }
}

// =============================================================================
// TESTS
// =============================================================================
