//! Replay recording and verification.
//!
//! ```text
//!   live:    PointerInput ──> ReplayRecorder ──finalize──> ReplayEnvelope
//!                                                              │
//!   later:   ReplayVerifier::verify(envelope, fresh sim) <─────┘
//!              └─> per tick: trace.at(t) -> fixed_update -> hash + tally
//! ```
//!
//! The envelope stores input only. Score, combo and the event hash are
//! claims that replay must reproduce.

pub mod sample;
pub mod trace;
pub mod hash;
pub mod envelope;
pub mod recorder;
pub mod verifier;

pub use sample::InputSample;
pub use trace::{InputSpan, InputTrace};
pub use hash::{EventStreamHasher, VerificationHash};
pub use envelope::{EnvelopeError, ReplayEnvelope, FORMAT_VERSION};
pub use recorder::ReplayRecorder;
pub use verifier::{ReplayVerification, ReplayVerifier};
