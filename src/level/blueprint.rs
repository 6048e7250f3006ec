//! Level Blueprint
//!
//! Fully resolved level geometry. Pure data: no reference back to the seed or
//! the generator, so a serialized blueprint reloaded elsewhere drives an
//! identical simulation.

use serde::{Deserialize, Serialize};

use crate::level::gate::Gate;

/// Immutable level geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelBlueprint {
    /// Gates in encounter order.
    pub gates: Vec<Gate>,
    /// Playfield width.
    pub playfield_width: f32,
    /// Playfield height.
    pub playfield_height: f32,
    /// Scroll speed (pixels/second).
    pub scroll_speed: f32,
}

/// Errors from blueprint serialization.
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    /// JSON encoding or decoding failed.
    #[error("Blueprint JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed.
    #[error("Blueprint binary error: {0}")]
    Binary(#[from] bincode::Error),
}

impl LevelBlueprint {
    /// Number of gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Same playfield and scroll, new gates.
    pub fn with_gates(&self, gates: Vec<Gate>) -> Self {
        Self {
            gates,
            playfield_width: self.playfield_width,
            playfield_height: self.playfield_height,
            scroll_speed: self.scroll_speed,
        }
    }

    /// New blueprint with `f` applied to every gate together with its index.
    pub fn map_gates<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &Gate) -> Gate,
    {
        let gates = self.gates.iter().enumerate().map(|(i, g)| f(i, g)).collect();
        self.with_gates(gates)
    }

    /// Bitwise comparison of all geometry.
    pub fn bits_eq(&self, other: &LevelBlueprint) -> bool {
        self.playfield_width.to_bits() == other.playfield_width.to_bits()
            && self.playfield_height.to_bits() == other.playfield_height.to_bits()
            && self.scroll_speed.to_bits() == other.scroll_speed.to_bits()
            && self.gates.len() == other.gates.len()
            && self.gates.iter().zip(&other.gates).all(|(a, b)| a.bits_eq(b))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, BlueprintError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BlueprintError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BlueprintError> {
        Ok(bincode::deserialize(data)?)
    }
}
