//! Reflex Gates Simulation
//!
//! Auto-scrolling corridor of oscillating gate openings. Each tick the
//! corridor advances by `scroll_speed * dt`; every wall the scroll position
//! has reached is resolved against the pointer's Y in the same tick.
//!
//! Pure gameplay: no rendering, no clock, no allocation beyond the event sink.

use serde::{Deserialize, Serialize};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::level::blueprint::LevelBlueprint;
use crate::level::config::ReflexGateConfig;
use crate::level::gate::Gate;
use crate::level::generator::generate_gates;
use crate::sim::{GameEvent, GameEventType, GameSimulation, PointerInput, SimDebugOverlay};

/// Snapshot of the next unresolved gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatePreview {
    /// Wall X of the gate.
    pub wall_x: f32,
    /// Opening center at the queried time.
    pub center_y: f32,
    /// Opening height.
    pub aperture_height: f32,
    /// Index of the gate.
    pub gate_index: usize,
    /// Current scroll position.
    pub scroll_x: f32,
}

/// The reflex gates game mode.
#[derive(Clone, Debug)]
pub struct ReflexGateSimulation {
    config: ReflexGateConfig,
    gates: Vec<Gate>,
    scroll_speed: f32,
    next_gate_index: usize,
    scroll_position: f32,
    combo_streak: i32,
    total_score: i32,
    level_complete: bool,
    start_tick: Option<u64>,
}

impl Default for ReflexGateSimulation {
    fn default() -> Self {
        Self::new(ReflexGateConfig::default())
    }
}

impl ReflexGateSimulation {
    /// Simulation with the given tuning. Holds no gates until reset.
    pub fn new(config: ReflexGateConfig) -> Self {
        let scroll_speed = config.scroll_speed;
        Self {
            config,
            gates: Vec::new(),
            scroll_speed,
            next_gate_index: 0,
            scroll_position: 0.0,
            combo_streak: 0,
            total_score: 0,
            level_complete: false,
            start_tick: None,
        }
    }

    /// Reset from a prebuilt (possibly mutated or reloaded) blueprint.
    ///
    /// Identical to `reset(seed)` when the blueprint was generated from the
    /// same seed and config.
    pub fn reset_with_blueprint(&mut self, blueprint: &LevelBlueprint) {
        self.gates = blueprint.gates.clone();
        self.scroll_speed = blueprint.scroll_speed;
        self.clear_progress();
    }

    fn clear_progress(&mut self) {
        self.next_gate_index = 0;
        self.scroll_position = 0.0;
        self.combo_streak = 0;
        self.total_score = 0;
        self.level_complete = false;
        self.start_tick = None;
    }

    /// Tuning in use.
    pub fn config(&self) -> &ReflexGateConfig {
        &self.config
    }

    /// Gates of the current level.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Index of the next unresolved gate.
    pub fn next_gate_index(&self) -> usize {
        self.next_gate_index
    }

    /// Corridor scroll position in pixels.
    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    /// Consecutive passes.
    pub fn combo_streak(&self) -> i32 {
        self.combo_streak
    }

    /// Score so far.
    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    /// True once every gate has been resolved.
    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    fn pass_score(&self, offset: f32) -> i32 {
        let center = self.config.center_score;
        let edge = self.config.edge_score;
        let score = (center as f32 + offset * (edge - center) as f32) as i32;
        score.max(edge)
    }

    fn resolve_gate(&mut self, index: usize, offset: f32, events: &mut Vec<GameEvent>) {
        let arg0 = index as i32;
        if offset <= 1.0 {
            let score = self.pass_score(offset);
            self.total_score += score;
            self.combo_streak += 1;
            events.push(GameEvent::new(GameEventType::EnteredGate, 1.0 - offset * 0.5, arg0, score));

            let threshold = self.config.combo_threshold;
            if threshold > 0 && self.combo_streak % threshold == 0 {
                events.push(GameEvent::new(GameEventType::ComboUp, 1.0, self.combo_streak, 0));
            }
        } else {
            self.combo_streak = 0;
            let miss = offset - 1.0;
            // x1000 keeps three decimals in an integer argument
            let miss_encoded = (miss.min(10.0) * 1000.0) as i32;
            events.push(GameEvent::new(GameEventType::HitWall, miss.min(1.0), arg0, miss_encoded));
        }
    }
}

impl GameSimulation for ReflexGateSimulation {
    fn reset(&mut self, seed: u32) {
        self.gates = generate_gates(&self.config, seed);
        self.scroll_speed = self.config.scroll_speed;
        self.clear_progress();
    }

    fn fixed_update(&mut self, tick: u64, dt: f32, input: &PointerInput, events: &mut Vec<GameEvent>) {
        if self.level_complete {
            return;
        }

        let start = *self.start_tick.get_or_insert(tick);

        self.scroll_position += self.scroll_speed * dt;

        // Time from the tick count, never from accumulated dt
        let sim_time = (tick - start) as f32 * dt;

        while let Some(gate) = self.gates.get(self.next_gate_index).copied() {
            if self.scroll_position < gate.wall_x {
                break;
            }
            let index = self.next_gate_index;
            let offset = gate.normalized_offset(input.y, sim_time);

            #[cfg(feature = "debug-tracing")]
            trace!(tick, index, offset, "gate crossed");

            self.resolve_gate(index, offset, events);
            self.next_gate_index += 1;
        }

        if self.next_gate_index >= self.gates.len() {
            self.level_complete = true;
            events.push(GameEvent::new(
                GameEventType::LevelComplete,
                1.0,
                self.total_score,
                self.combo_streak,
            ));
        }

        events.push(GameEvent::heartbeat(tick));
    }
}

impl SimDebugOverlay for ReflexGateSimulation {
    fn gate_preview(&self, sim_time: f32) -> Option<GatePreview> {
        let gate = self.gates.get(self.next_gate_index)?;
        Some(GatePreview {
            wall_x: gate.wall_x,
            center_y: gate.current_center_y(sim_time),
            aperture_height: gate.aperture_height,
            gate_index: self.next_gate_index,
            scroll_x: self.scroll_position,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::generator::ReflexGateGenerator;

    const DT: f32 = 1.0 / 60.0;

    fn run_to_completion(sim: &mut ReflexGateSimulation, y: f32) -> Vec<(u64, GameEvent)> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        let input = PointerInput::at(960.0, y);
        let mut tick = 0;
        while !sim.is_level_complete() && tick < 10_000 {
            events.clear();
            sim.fixed_update(tick, DT, &input, &mut events);
            log.extend(
                events
                    .iter()
                    .filter(|e| e.event_type != GameEventType::Tick)
                    .map(|e| (tick, *e)),
            );
            tick += 1;
        }
        log
    }

    #[test]
    fn test_center_run_outcome() {
        let mut sim = ReflexGateSimulation::default();
        sim.reset(0xC0FFEE);
        let log = run_to_completion(&mut sim, 540.0);

        assert!(sim.is_level_complete());
        assert_eq!(sim.total_score(), 221);
        assert_eq!(sim.next_gate_index(), 12);

        let passed: Vec<i32> = log
            .iter()
            .filter(|(_, e)| e.event_type == GameEventType::EnteredGate)
            .map(|(_, e)| e.arg0)
            .collect();
        assert_eq!(passed, vec![2, 4, 5]);

        let (last_tick, last) = log.last().copied().unwrap();
        assert_eq!(last.event_type, GameEventType::LevelComplete);
        assert_eq!(last.arg0, 221);
        assert_eq!(last_tick, 1110);
    }

    #[test]
    fn test_gate_resolves_on_wall_tick() {
        let mut sim = ReflexGateSimulation::default();
        sim.reset(0xC0FFEE);
        let log = run_to_completion(&mut sim, 540.0);
        // First wall at x = 400 at 200 px/s is reached on tick 119
        assert_eq!(log[0].0, 119);
        assert_eq!(log[0].1.arg0, 0);
    }

    #[test]
    fn test_heartbeat_closes_every_tick() {
        let mut sim = ReflexGateSimulation::default();
        sim.reset(1);
        let mut events = Vec::new();
        sim.fixed_update(0, DT, &PointerInput::default(), &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], GameEvent::heartbeat(0));
    }

    #[test]
    fn test_no_events_after_completion() {
        let mut sim = ReflexGateSimulation::default();
        sim.reset(9);
        run_to_completion(&mut sim, 540.0);
        let mut events = Vec::new();
        sim.fixed_update(99_999, DT, &PointerInput::default(), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_empty_level_completes_immediately() {
        let mut sim = ReflexGateSimulation::new(ReflexGateConfig {
            gate_count: 0,
            ..ReflexGateConfig::default()
        });
        sim.reset(3);
        let mut events = Vec::new();
        sim.fixed_update(0, DT, &PointerInput::default(), &mut events);
        assert_eq!(events[0].event_type, GameEventType::LevelComplete);
        assert_eq!(events[0].arg0, 0);
        assert_eq!(events[1].event_type, GameEventType::Tick);
    }

    #[test]
    fn test_pass_score_bounds() {
        let sim = ReflexGateSimulation::default();
        assert_eq!(sim.pass_score(0.0), 100);
        assert_eq!(sim.pass_score(0.5), 75);
        assert_eq!(sim.pass_score(1.0), 50);
    }

    #[test]
    fn test_combo_up_every_third_pass() {
        // Wide static openings: every gate passes
        let generator = ReflexGateGenerator::default();
        let bp = generator.generate_for_seed(5).map_gates(|_, g| Gate {
            aperture_height: 2000.0,
            amplitude: 0.0,
            rest_center_y: 540.0,
            ..*g
        });
        let mut sim = ReflexGateSimulation::default();
        sim.reset_with_blueprint(&bp);
        let log = run_to_completion(&mut sim, 540.0);

        let combos: Vec<i32> = log
            .iter()
            .filter(|(_, e)| e.event_type == GameEventType::ComboUp)
            .map(|(_, e)| e.arg0)
            .collect();
        assert_eq!(combos, vec![3, 6, 9, 12]);
        assert_eq!(sim.total_score(), 1200);
        assert_eq!(sim.combo_streak(), 12);
    }

    #[test]
    fn test_miss_encoding() {
        let generator = ReflexGateGenerator::default();
        let bp = generator.generate_for_seed(5).map_gates(|_, g| Gate {
            aperture_height: 100.0,
            amplitude: 0.0,
            rest_center_y: 540.0,
            ..*g
        });
        let mut sim = ReflexGateSimulation::default();
        sim.reset_with_blueprint(&bp);
        // 75 px off a 50 px half-aperture: offset 1.5
        let log = run_to_completion(&mut sim, 615.0);
        let (_, first) = log[0];
        assert_eq!(first.event_type, GameEventType::HitWall);
        assert_eq!(first.intensity, 0.5);
        assert_eq!(first.arg1, 500);

        // Far miss is capped at 10 half-apertures
        let mut sim = ReflexGateSimulation::default();
        sim.reset_with_blueprint(&bp);
        let log = run_to_completion(&mut sim, 5000.0);
        assert_eq!(log[0].1.arg1, 10_000);
        assert_eq!(log[0].1.intensity, 1.0);
    }

    #[test]
    fn test_blueprint_reset_matches_seed_reset() {
        let generator = ReflexGateGenerator::default();
        let mut a = ReflexGateSimulation::default();
        let mut b = ReflexGateSimulation::default();
        a.reset(0xC0FFEE);
        b.reset_with_blueprint(&generator.generate_for_seed(0xC0FFEE));
        assert_eq!(run_to_completion(&mut a, 600.0), run_to_completion(&mut b, 600.0));
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut sim = ReflexGateSimulation::default();
        sim.reset(4);
        run_to_completion(&mut sim, 500.0);
        sim.reset(4);
        assert_eq!(sim.next_gate_index(), 0);
        assert_eq!(sim.total_score(), 0);
        assert_eq!(sim.scroll_position(), 0.0);
        assert!(!sim.is_level_complete());
    }

    #[test]
    fn test_sim_time_starts_at_first_tick() {
        // Starting at tick 500 must produce the same outcome as tick 0
        let mut a = ReflexGateSimulation::default();
        let mut b = ReflexGateSimulation::default();
        a.reset(11);
        b.reset(11);
        let input = PointerInput::at(0.0, 540.0);
        let (mut ea, mut eb) = (Vec::new(), Vec::new());
        for t in 0..1200u64 {
            sim_step(&mut a, t, &input, &mut ea);
            sim_step(&mut b, t + 500, &input, &mut eb);
        }
        assert_eq!(a.total_score(), b.total_score());
        assert_eq!(a.combo_streak(), b.combo_streak());
    }

    fn sim_step(sim: &mut ReflexGateSimulation, tick: u64, input: &PointerInput, out: &mut Vec<GameEvent>) {
        sim.fixed_update(tick, DT, input, out);
    }

    #[test]
    fn test_gate_preview() {
        let mut sim = ReflexGateSimulation::default();
        assert!(sim.gate_preview(0.0).is_none());

        sim.reset(0xC0FFEE);
        let preview = sim.gate_preview(0.0).unwrap();
        assert_eq!(preview.gate_index, 0);
        assert_eq!(preview.wall_x, 400.0);
        assert_eq!(preview.center_y, sim.gates()[0].current_center_y(0.0));

        run_to_completion(&mut sim, 540.0);
        assert!(sim.gate_preview(1.0).is_none());
    }
}
