//! Event stream hashing.
//!
//! Per event, in order: type code, arg0, arg1 (all i32 little-endian) and the
//! raw bits of intensity. Heartbeat events are skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::hash::{Fnv1a, FNV_OFFSET_BASIS};
use crate::run::descriptor::{parse_prefixed_hex, ParseHashError};
use crate::sim::events::{GameEvent, GameEventType};

/// FNV-1a 64 digest of a scoring event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationHash(pub u64);

impl Default for VerificationHash {
    /// Digest of an empty stream.
    fn default() -> Self {
        VerificationHash(FNV_OFFSET_BASIS)
    }
}

impl VerificationHash {
    /// Raw 64-bit value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VerificationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V-{}", hex::encode_upper(self.0.to_be_bytes()))
    }
}

impl FromStr for VerificationHash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex("V-", s).map(VerificationHash)
    }
}

/// Running hash over an event stream.
#[derive(Clone, Debug, Default)]
pub struct EventStreamHasher {
    inner: Fnv1a,
}

impl EventStreamHasher {
    /// Hasher over an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a complete event list.
    pub fn compute(events: &[GameEvent]) -> VerificationHash {
        let mut hasher = Self::new();
        hasher.extend(events);
        hasher.finish()
    }

    /// Fold one event into a raw running hash. Heartbeats leave it unchanged.
    pub fn fold_event(hash: u64, event: &GameEvent) -> u64 {
        let mut inner = Fnv1a::from_state(hash);
        Self::write_event(&mut inner, event);
        inner.finish()
    }

    /// Fold one event.
    pub fn update(&mut self, event: &GameEvent) {
        Self::write_event(&mut self.inner, event);
    }

    /// Fold every event in order.
    pub fn extend<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a GameEvent>,
    {
        for event in events {
            self.update(event);
        }
    }

    /// Digest so far.
    pub fn finish(&self) -> VerificationHash {
        VerificationHash(self.inner.finish())
    }

    fn write_event(inner: &mut Fnv1a, event: &GameEvent) {
        if event.event_type == GameEventType::Tick {
            return;
        }
        inner.update_i32(event.event_type.code());
        inner.update_i32(event.arg0);
        inner.update_i32(event.arg1);
        inner.update_f32_bits(event.intensity);
    }
}
