//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform determinism.
//! They form the foundation for run identity and replay verification.

pub mod rng;
pub mod hash;
pub mod math;

// Re-export core types
pub use rng::{mix, DeterministicRng};
pub use hash::{Fnv1a, FNV_OFFSET_BASIS, FNV_PRIME};
pub use math::{sin_f32, pow_f32, PI, TWO_PI};
