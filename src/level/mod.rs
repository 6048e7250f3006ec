//! Level Module
//!
//! Gate geometry, tuning, the seeded generator and its versioned registry.
//!
//! ## Module Structure
//!
//! - `gate`: Oscillating obstacle and its hit test
//! - `config`: Generator and scoring constants
//! - `blueprint`: Immutable level geometry (serializable)
//! - `generator`: Seeded generator
//! - `registry`: `(mode, version) -> generator`

pub mod gate;
pub mod config;
pub mod blueprint;
pub mod generator;
pub mod registry;

// Re-export key types
pub use gate::Gate;
pub use config::ReflexGateConfig;
pub use blueprint::{BlueprintError, LevelBlueprint};
pub use generator::{generate_gates, LevelGenerator, ReflexGateGenerator};
pub use registry::LevelGeneratorRegistry;
