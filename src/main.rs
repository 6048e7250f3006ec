//! Reflex Kernel demo
//!
//! Plays one ReflexGates session with a scripted pointer, records it,
//! round-trips the envelope through JSON and bincode, and verifies the replay.
//!
//! Usage: `reflex-kernel [seed]` where seed is decimal or `0x`-prefixed hex.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reflex_kernel::{
    replay::InputSample,
    sim::{tick::LoopConfig, SimDebugOverlay},
    DeterministicLoop, ModeId, PointerInput, ReflexGateSimulation, ReplayEnvelope, ReplayRecorder,
    ReplayVerifier, RunDescriptor, SessionController, TICK_RATE, VERSION,
};

/// Host clock resolution for the simulated frames (microseconds).
const HOST_TICKS_PER_SECOND: f64 = 1_000_000.0;

/// Simulated host frame length: a slightly uneven ~60 fps display.
const FRAME_MICROS: [i64; 4] = [16_000, 17_000, 16_500, 18_000];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => parse_seed(&arg)?,
        None => 0xC0FFEE,
    };

    info!("Reflex Kernel v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let run = RunDescriptor::standard(ModeId::reflex_gates(), seed);
    info!("Run {} (seed {:#010x})", run.id(), seed);

    let envelope = play_session(&run)?;
    check_envelope(&envelope)?;
    Ok(())
}

fn parse_seed(arg: &str) -> Result<u32> {
    let seed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => arg.parse(),
    };
    seed.with_context(|| format!("Invalid seed '{}'", arg))
}

/// Play one session through the fixed-step loop and record it.
fn play_session(run: &RunDescriptor) -> Result<ReplayEnvelope> {
    info!("=== Playing Session ===");

    let config = LoopConfig {
        session_seed: run.seed(),
        ..LoopConfig::default()
    };
    let mut game = DeterministicLoop::new(ReflexGateSimulation::default(), config);
    let mut session = SessionController::new();
    session.reset_to_ready_with_run(run, game.sim().gates().len());
    session.start();
    let mut recorder = ReplayRecorder::new();

    let mut now: i64 = 1;
    let mut frame = 0usize;
    let mut input = PointerInput::at(960.0, 540.0);
    game.step(&input, now, HOST_TICKS_PER_SECOND);

    while session.get_result().is_none() {
        // Chase the next opening as of the current tick
        let sim_time = game.tick() as f32 * game.fixed_dt();
        if let Some(preview) = game.sim().gate_preview(sim_time) {
            // Step with what the replay will see, not the raw float
            input = InputSample::snap(&PointerInput::at(960.0, preview.center_y));
        }

        now += FRAME_MICROS[frame % FRAME_MICROS.len()];
        frame += 1;

        let before = game.tick();
        let result = game.step(&input, now, HOST_TICKS_PER_SECOND);
        for _ in before..result.tick {
            recorder.record_tick(&input)?;
        }

        for event in result.events.iter().filter(|e| e.event_type.is_scoring()) {
            info!(
                "Tick {}: {:?} gate={} arg1={}",
                result.tick, event.event_type, event.arg0, event.arg1
            );
        }
        session.apply_events(&result.events);

        if frame > 100_000 {
            bail!("Session did not complete");
        }
    }

    let result = session
        .get_result()
        .context("Session has no result")?;
    let hash = result.event_hash.context("Session has no event hash")?;

    info!("=== Session Results ===");
    info!(
        "Score {} | max combo {} | gates {}/{} | {} frames",
        result.total_score, result.max_combo, result.gates_passed, result.gates_total, frame
    );
    if let Some(breakdown) = &result.breakdown {
        for (component, total) in &breakdown.totals_by_component {
            info!("  {}: {} over {} deltas", component, total, breakdown.delta_count);
        }
    }
    info!("Verification hash: {}", hash);

    Ok(recorder.finalize(run, TICK_RATE, &result, hash)?)
}

/// Serialize, reload and verify an envelope.
fn check_envelope(envelope: &ReplayEnvelope) -> Result<()> {
    info!("=== Verifying Replay ===");

    let json = envelope.to_json()?;
    let bytes = envelope.to_bytes()?;
    info!(
        "Envelope: {} ticks in {} spans, {} bytes JSON, {} bytes binary",
        envelope.trace().total_ticks(),
        envelope.trace().spans().len(),
        json.len(),
        bytes.len()
    );
    info!("Binary header: {}", hex::encode(&bytes[..bytes.len().min(16)]));

    let reloaded = [ReplayEnvelope::from_json(&json)?, ReplayEnvelope::from_bytes(&bytes)?];
    for (label, candidate) in ["json", "binary"].iter().zip(reloaded.iter()) {
        let mut fresh = ReflexGateSimulation::default();
        let verification = ReplayVerifier::verify(candidate, &mut fresh)?;
        if verification.is_valid {
            info!("REPLAY VERIFIED ({}): {} matches", label, verification.actual_hash);
        } else {
            warn!(
                "REPLAY FAILURE ({}): hash {} vs {}",
                label, verification.expected_hash, verification.actual_hash
            );
            bail!("Replay verification failed");
        }
    }
    Ok(())
}
