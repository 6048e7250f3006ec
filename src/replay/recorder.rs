//! Replay Recorder
//!
//! Append-only per-tick input capture for one live session. `finalize`
//! freezes the samples into an envelope exactly once.

use tracing::debug;

use crate::error::RecorderError;
use crate::replay::envelope::ReplayEnvelope;
use crate::replay::hash::VerificationHash;
use crate::replay::sample::InputSample;
use crate::replay::trace::InputTrace;
use crate::run::descriptor::RunDescriptor;
use crate::session::controller::SessionResult;
use crate::sim::input::PointerInput;

/// Session-scoped input recorder.
#[derive(Debug)]
pub struct ReplayRecorder {
    samples: Vec<InputSample>,
    finalized: bool,
}

impl Default for ReplayRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayRecorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(1024), // ~17 s at 60 Hz
            finalized: false,
        }
    }

    /// Quantize and append the input for one advanced tick.
    ///
    /// Returns the input as replay will reproduce it. Stepping the live
    /// simulation with anything else lets sub-0.1 px differences leak into
    /// the event hash.
    pub fn record_tick(&mut self, input: &PointerInput) -> Result<PointerInput, RecorderError> {
        if self.finalized {
            return Err(RecorderError::RecordAfterFinalize);
        }
        let sample = InputSample::from_pointer(input);
        self.samples.push(sample);
        Ok(sample.to_pointer())
    }

    /// Ticks recorded so far.
    pub fn tick_count(&self) -> usize {
        self.samples.len()
    }

    /// True once `finalize` has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Build the envelope for `run` with the claimed outcome.
    pub fn finalize(
        &mut self,
        run: &RunDescriptor,
        fixed_hz: u32,
        result: &SessionResult,
        hash: VerificationHash,
    ) -> Result<ReplayEnvelope, RecorderError> {
        if self.finalized {
            return Err(RecorderError::AlreadyFinalized);
        }
        self.finalized = true;

        let trace = InputTrace::from_tick_samples(&self.samples);
        debug!(
            "Finalized replay {} with {} ticks in {} spans",
            run.id(),
            trace.total_ticks(),
            trace.spans().len()
        );
        Ok(ReplayEnvelope::new(
            run,
            fixed_hz,
            trace,
            hash,
            result.total_score,
            result.max_combo,
        ))
    }
}
