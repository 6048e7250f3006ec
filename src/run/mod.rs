//! Run Identity Module
//!
//! Protocol types describing what an attempt *is*: mode, seed, versions and the
//! ordered mutator list, plus the canonical hash that names it.

pub mod ids;
pub mod mutator_spec;
pub mod descriptor;

// Re-export key types
pub use ids::{DifficultyTier, ModeId, MutatorId};
pub use mutator_spec::{MutatorParam, MutatorSpec};
pub use descriptor::{compute_run_id, ParseHashError, RunDescriptor, RunId};
