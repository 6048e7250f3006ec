//! Shared Error Types
//!
//! Configuration errors are caller-fixable and raised at construction time.
//! Resolution errors mean a generator or mutator version is not deployed.
//! Trace and recorder errors are usage or data faults in the replay layer.
//! Replay integrity outcomes are not errors; see `replay::ReplayVerification`.

/// Invalid run, mutator spec or mutator parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Parameter key was empty.
    #[error("Parameter key must not be empty")]
    EmptyParamKey,

    /// Parameter value was NaN or infinite.
    #[error("Parameter '{key}' must be finite, got {value}")]
    NonFiniteParam {
        /// Offending key.
        key: String,
        /// Offending value.
        value: f32,
    },

    /// Mutator id was empty.
    #[error("Mutator id must not be empty")]
    EmptyMutatorId,

    /// Mutator version below 1.
    #[error("Mutator version must be >= 1, got {0}")]
    InvalidVersion(i32),

    /// Same key supplied twice.
    #[error("Duplicate parameter key '{0}'")]
    DuplicateParamKey(String),

    /// Continuous parameter outside its declared range.
    #[error("{mutator}: parameter '{key}' = {value} outside [{min}, {max}]")]
    ParamOutOfRange {
        /// Mutator name.
        mutator: &'static str,
        /// Parameter key.
        key: &'static str,
        /// Supplied value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },

    /// Discrete parameter not in its allowed set.
    #[error("{mutator}: parameter '{key}' = {value} not in {allowed:?}")]
    InvalidChoice {
        /// Mutator name.
        mutator: &'static str,
        /// Parameter key.
        key: &'static str,
        /// Supplied value (truncated).
        value: i32,
        /// Allowed values.
        allowed: &'static [i32],
    },
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No generator for this mode/version.
    #[error("No generator registered for mode '{mode}' version {version}")]
    UnknownGenerator {
        /// Requested mode.
        mode: String,
        /// Requested generator version.
        version: i32,
    },

    /// No mutator factory for this id/version.
    #[error("No mutator registered for '{id}' version {version}")]
    UnknownMutator {
        /// Requested mutator id.
        id: String,
        /// Requested mutator version.
        version: i32,
    },
}

/// Any failure while building a level from a run descriptor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A mutator rejected its parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Malformed input trace or out-of-range lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// Span with a zero tick duration.
    #[error("Input span {index} has zero duration")]
    ZeroDuration {
        /// Position of the span in the trace.
        index: usize,
    },

    /// Lookup past the end of the trace.
    #[error("Tick {tick} is out of range [0, {total})")]
    TickOutOfRange {
        /// Requested tick.
        tick: u64,
        /// Trace length in ticks.
        total: u64,
    },
}

/// Recorder used after it was finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecorderError {
    /// `record_tick` called after `finalize`.
    #[error("Cannot record after finalize")]
    RecordAfterFinalize,

    /// `finalize` called twice.
    #[error("Recorder has already been finalized")]
    AlreadyFinalized,
}
