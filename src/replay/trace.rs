//! Input Trace
//!
//! Run-length encoded per-tick input. Adjacent identical samples collapse
//! into one span; lookups binary search the span start offsets.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::replay::sample::InputSample;

/// One sample held for `duration_ticks` consecutive ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpan {
    duration_ticks: u32,
    sample: InputSample,
}

impl InputSpan {
    /// Span of at least one tick.
    pub fn new(duration_ticks: u32, sample: InputSample) -> Result<Self, TraceError> {
        if duration_ticks == 0 {
            return Err(TraceError::ZeroDuration { index: 0 });
        }
        Ok(Self {
            duration_ticks,
            sample,
        })
    }

    /// Ticks covered.
    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    /// Held sample.
    pub fn sample(&self) -> InputSample {
        self.sample
    }
}

/// Immutable compressed input timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<InputSpan>", into = "Vec<InputSpan>")]
pub struct InputTrace {
    spans: Vec<InputSpan>,
    /// First tick of each span.
    starts: Vec<u64>,
    total_ticks: u64,
}

impl InputTrace {
    /// Compress per-tick samples.
    pub fn from_tick_samples(samples: &[InputSample]) -> Self {
        let mut spans: Vec<InputSpan> = Vec::new();
        for &sample in samples {
            match spans.last_mut() {
                Some(last) if last.sample == sample && last.duration_ticks < u32::MAX => {
                    last.duration_ticks += 1;
                }
                _ => spans.push(InputSpan {
                    duration_ticks: 1,
                    sample,
                }),
            }
        }
        Self::index(spans)
    }

    /// Trace from prebuilt spans. Rejects zero-length spans.
    pub fn from_spans(spans: Vec<InputSpan>) -> Result<Self, TraceError> {
        if let Some(index) = spans.iter().position(|s| s.duration_ticks == 0) {
            return Err(TraceError::ZeroDuration { index });
        }
        Ok(Self::index(spans))
    }

    fn index(spans: Vec<InputSpan>) -> Self {
        let mut starts = Vec::with_capacity(spans.len());
        let mut total = 0u64;
        for span in &spans {
            starts.push(total);
            total += span.duration_ticks as u64;
        }
        Self {
            spans,
            starts,
            total_ticks: total,
        }
    }

    /// Sample active at `tick`.
    pub fn at(&self, tick: u64) -> Result<InputSample, TraceError> {
        if tick >= self.total_ticks {
            return Err(TraceError::TickOutOfRange {
                tick,
                total: self.total_ticks,
            });
        }
        // Last span starting at or before the tick
        let idx = self.starts.partition_point(|&start| start <= tick);
        Ok(self.spans[idx - 1].sample)
    }

    /// Every tick's sample in order.
    pub fn samples(&self) -> impl Iterator<Item = InputSample> + '_ {
        self.spans
            .iter()
            .flat_map(|span| std::iter::repeat(span.sample).take(span.duration_ticks as usize))
    }

    /// Trace length in ticks.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Compressed spans.
    pub fn spans(&self) -> &[InputSpan] {
        &self.spans
    }

    /// True if the trace covers no ticks.
    pub fn is_empty(&self) -> bool {
        self.total_ticks == 0
    }
}

impl TryFrom<Vec<InputSpan>> for InputTrace {
    type Error = TraceError;

    fn try_from(spans: Vec<InputSpan>) -> Result<Self, Self::Error> {
        Self::from_spans(spans)
    }
}

impl From<InputTrace> for Vec<InputSpan> {
    fn from(trace: InputTrace) -> Self {
        trace.spans
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(x: i16) -> InputSample {
        InputSample { x, y: 0, buttons: 0 }
    }

    #[test]
    fn test_rle_merges_runs() {
        let trace = InputTrace::from_tick_samples(&[s(1), s(1), s(1), s(2), s(1), s(1)]);
        assert_eq!(trace.total_ticks(), 6);
        let durations: Vec<u32> = trace.spans().iter().map(|sp| sp.duration_ticks()).collect();
        assert_eq!(durations, vec![3, 1, 2]);
    }

    #[test]
    fn test_at_lookup() {
        let trace = InputTrace::from_tick_samples(&[s(1), s(1), s(2), s(3), s(3)]);
        assert_eq!(trace.at(0).unwrap(), s(1));
        assert_eq!(trace.at(1).unwrap(), s(1));
        assert_eq!(trace.at(2).unwrap(), s(2));
        assert_eq!(trace.at(4).unwrap(), s(3));
        assert_eq!(
            trace.at(5),
            Err(TraceError::TickOutOfRange { tick: 5, total: 5 })
        );
    }

    #[test]
    fn test_empty_trace() {
        let trace = InputTrace::from_tick_samples(&[]);
        assert!(trace.is_empty());
        assert!(trace.spans().is_empty());
        assert!(trace.at(0).is_err());
        assert_eq!(trace.samples().count(), 0);
    }

    #[test]
    fn test_from_spans_rejects_zero_duration() {
        let good = InputSpan::new(2, s(1)).unwrap();
        let bad = InputSpan {
            duration_ticks: 0,
            sample: s(2),
        };
        assert_eq!(
            InputTrace::from_spans(vec![good, bad]),
            Err(TraceError::ZeroDuration { index: 1 })
        );
        assert!(InputSpan::new(0, s(1)).is_err());
    }

    #[test]
    fn test_from_spans_totals() {
        let trace = InputTrace::from_spans(vec![
            InputSpan::new(4, s(1)).unwrap(),
            InputSpan::new(6, s(2)).unwrap(),
        ])
        .unwrap();
        assert_eq!(trace.total_ticks(), 10);
        assert_eq!(trace.at(3).unwrap(), s(1));
        assert_eq!(trace.at(4).unwrap(), s(2));
    }

    #[test]
    fn test_serde_rejects_zero_span() {
        let json = r#"[{"duration_ticks":0,"sample":{"x":0,"y":0,"buttons":0}}]"#;
        assert!(serde_json::from_str::<InputTrace>(json).is_err());
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let trace = InputTrace::from_tick_samples(&[s(5), s(5), s(7)]);
        let json = serde_json::to_string(&trace).unwrap();
        let back: InputTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
        assert_eq!(back.at(2).unwrap(), s(7));
    }

    proptest! {
        #[test]
        fn test_rle_reconstructs_samples(xs in proptest::collection::vec(0i16..4, 0..300)) {
            let samples: Vec<InputSample> = xs.iter().map(|&x| s(x)).collect();
            let trace = InputTrace::from_tick_samples(&samples);

            prop_assert_eq!(trace.total_ticks(), samples.len() as u64);
            prop_assert_eq!(trace.samples().collect::<Vec<_>>(), samples.clone());
            for (tick, sample) in samples.iter().enumerate() {
                prop_assert_eq!(trace.at(tick as u64).unwrap(), *sample);
            }
            // No two adjacent spans hold the same sample
            for pair in trace.spans().windows(2) {
                prop_assert_ne!(pair[0].sample(), pair[1].sample());
            }
        }
    }
}
