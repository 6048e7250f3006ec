//! # Reflex Kernel
//!
//! Deterministic simulation, run identity and replay verification for the
//! ReflexGates pointer-reflex game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       REFLEX KERNEL                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - xorshift32 PRNG and avalanche mixer       │
//! │  ├── hash.rs     - FNV-1a 64 canonical hashing               │
//! │  └── math.rs     - Reproducible f32 trig                     │
//! │                                                              │
//! │  run/            - Run identity                              │
//! │  ├── ids.rs      - Mode, mutator and difficulty ids          │
//! │  ├── mutator_spec.rs - Validated mutator parameters          │
//! │  └── descriptor.rs   - RunDescriptor and RunId               │
//! │                                                              │
//! │  level/          - Gate geometry and generation              │
//! │  mutator/        - Versioned blueprint transforms            │
//! │                                                              │
//! │  sim/            - Fixed-step simulation                     │
//! │  ├── tick.rs     - Accumulator loop                          │
//! │  ├── reflex.rs   - Reflex gates game mode                    │
//! │  └── stub.rs     - Heartbeat simulation                      │
//! │                                                              │
//! │  session/        - Ready/Playing/Results and score ledger    │
//! │  replay/         - Recorder, envelope and verifier           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Given the same run descriptor and the same per-tick input, every platform
//! produces bit-identical gates, events, scores and hashes:
//! - Single-threaded, no clock reads inside a tick
//! - Ordered containers only (`BTreeMap`, `Vec`)
//! - f32 arithmetic in a fixed evaluation order, trig rounded through f64
//! - All randomness from a seeded xorshift32
//! - Floats hashed by raw IEEE-754 bits, never by text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod run;
pub mod level;
pub mod mutator;
pub mod sim;
pub mod session;
pub mod replay;

// Re-export commonly used types
pub use core::rng::DeterministicRng;
pub use error::{BuildError, ConfigError, RecorderError, ResolveError, TraceError};
pub use run::{DifficultyTier, ModeId, MutatorId, MutatorParam, MutatorSpec, RunDescriptor, RunId};
pub use level::{Gate, LevelBlueprint, LevelGeneratorRegistry, ReflexGateConfig};
pub use mutator::{build_blueprint, MutatorPipeline, MutatorRegistry};
pub use sim::{DeterministicLoop, GameEvent, GameEventType, GameSimulation, PointerInput, ReflexGateSimulation};
pub use session::{SessionController, SessionResult, SessionState};
pub use replay::{ReplayEnvelope, ReplayRecorder, ReplayVerification, ReplayVerifier, VerificationHash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Most fixed ticks stepped per host frame
pub const MAX_STEPS_PER_FRAME: u32 = 6;
