//! Criterion benchmarks for level generation, event hashing and replay.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reflex_kernel::level::ReflexGateGenerator;
use reflex_kernel::replay::EventStreamHasher;
use reflex_kernel::sim::GameSimulation;
use reflex_kernel::{
    GameEvent, GameEventType, ModeId, PointerInput, ReflexGateSimulation, ReplayEnvelope,
    ReplayRecorder, ReplayVerifier, RunDescriptor, SessionController, TICK_RATE,
};

/// Record a full center-line session for `seed`.
fn record_center_run(seed: u32) -> ReplayEnvelope {
    let run = RunDescriptor::standard(ModeId::reflex_gates(), seed);
    let mut sim = ReflexGateSimulation::default();
    sim.reset(seed);
    let mut session = SessionController::new();
    session.reset_to_ready_with_run(&run, sim.gates().len());
    session.start();
    let mut recorder = ReplayRecorder::new();

    let input = PointerInput::at(960.0, 540.0);
    let dt = 1.0 / TICK_RATE as f32;
    let mut events = Vec::new();
    let mut tick = 0;
    while session.get_result().is_none() {
        let replayed = recorder.record_tick(&input).unwrap();
        events.clear();
        sim.fixed_update(tick, dt, &replayed, &mut events);
        session.apply_events(&events);
        tick += 1;
    }
    let result = session.get_result().unwrap();
    let hash = result.event_hash.unwrap();
    recorder.finalize(&run, TICK_RATE, &result, hash).unwrap()
}

/// Benchmark: generate a 12-gate level.
fn bench_generate(c: &mut Criterion) {
    let generator = ReflexGateGenerator::default();
    c.bench_function("generate_12_gates", |b| {
        b.iter(|| generator.generate_for_seed(black_box(0xC0FFEE)))
    });
}

/// Benchmark: hash 1000 scoring events.
fn bench_event_hash(c: &mut Criterion) {
    let events: Vec<GameEvent> = (0..1000)
        .map(|i| GameEvent::new(GameEventType::EnteredGate, 0.75, i, 100 - i % 50))
        .collect();
    c.bench_function("event_hash_1000", |b| {
        b.iter(|| EventStreamHasher::compute(black_box(&events)))
    });
}

/// Benchmark: verify a complete recorded session.
fn bench_verify_replay(c: &mut Criterion) {
    let envelope = record_center_run(0xC0FFEE);
    c.bench_function("verify_center_replay", |b| {
        b.iter(|| {
            let mut sim = ReflexGateSimulation::default();
            ReplayVerifier::verify(black_box(&envelope), &mut sim).unwrap()
        })
    });
}

criterion_group!(benches, bench_generate, bench_event_hash, bench_verify_replay);
criterion_main!(benches);
