//! Game Events
//!
//! Events emitted by the simulation each tick. Consumed by the session
//! controller, the event-stream hasher and host-side feedback (audio, effects).

use serde::{Deserialize, Serialize};

/// Event kind. The numeric value is part of the verification hash and must
/// never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum GameEventType {
    /// Heartbeat, one per simulated tick. Excluded from hashing.
    Tick = 0,
    /// Cursor missed a gate opening.
    HitWall = 1,
    /// Cursor passed through a gate opening.
    EnteredGate = 2,
    /// Combo milestone reached.
    ComboUp = 3,
    /// Drag gesture began.
    DragStart = 4,
    /// Drag gesture ended.
    DragEnd = 5,
    /// Last gate resolved.
    LevelComplete = 6,
}

impl GameEventType {
    /// Stable numeric code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// True for scoring-relevant events (everything except the heartbeat).
    #[inline]
    pub fn is_scoring(self) -> bool {
        self != GameEventType::Tick
    }
}

/// A single simulation event.
///
/// `intensity` is nominally in `[0, 1]`; `arg0`/`arg1` are type specific:
///
/// | type          | arg0        | arg1                     |
/// |---------------|-------------|--------------------------|
/// | EnteredGate   | gate index  | gate score               |
/// | HitWall       | gate index  | miss distance x1000      |
/// | ComboUp       | combo       | 0                        |
/// | LevelComplete | total score | combo at completion      |
/// | Tick          | tick        | 0                        |
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Event kind.
    pub event_type: GameEventType,
    /// Feedback strength.
    pub intensity: f32,
    /// First argument.
    pub arg0: i32,
    /// Second argument.
    pub arg1: i32,
}

impl GameEvent {
    /// Create an event.
    pub fn new(event_type: GameEventType, intensity: f32, arg0: i32, arg1: i32) -> Self {
        Self {
            event_type,
            intensity,
            arg0,
            arg1,
        }
    }

    /// Heartbeat for `tick`. The tick wraps below `i32::MAX`.
    pub fn heartbeat(tick: u64) -> Self {
        Self::new(GameEventType::Tick, 1.0, (tick % i32::MAX as u64) as i32, 0)
    }
}
