//! Mutator registry.
//!
//! Maps `(mutator id, version)` to a factory. Every shipped version stays
//! registered so old run ids keep resolving to the same transform.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{BuildError, ConfigError, ResolveError};
use crate::mutator::{
    BlueprintMutator, DifficultyCurveMutator, GateJitterMutator, NarrowMarginMutator,
    RhythmLockMutator, SegmentBiasMutator, WideMarginMutator,
};
use crate::run::ids::MutatorId;
use crate::run::mutator_spec::MutatorSpec;

/// Builds a validated mutator from its spec.
pub type MutatorFactory = fn(&MutatorSpec) -> Result<Box<dyn BlueprintMutator>, ConfigError>;

fn boxed<M, F>(build: F, spec: &MutatorSpec) -> Result<Box<dyn BlueprintMutator>, ConfigError>
where
    M: BlueprintMutator + 'static,
    F: Fn(&MutatorSpec) -> Result<M, ConfigError>,
{
    Ok(Box::new(build(spec)?))
}

/// Explicit `(id, version) -> factory` table.
#[derive(Default)]
pub struct MutatorRegistry {
    factories: BTreeMap<(String, i32), MutatorFactory>,
}

impl MutatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every shipped mutator at version 1.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(MutatorId::new(MutatorId::NARROW_MARGIN), 1, |s| {
            boxed(NarrowMarginMutator::from_spec, s)
        });
        registry.register(MutatorId::new(MutatorId::WIDE_MARGIN), 1, |s| {
            boxed(WideMarginMutator::from_spec, s)
        });
        registry.register(MutatorId::new(MutatorId::DIFFICULTY_CURVE), 1, |s| {
            boxed(DifficultyCurveMutator::from_spec, s)
        });
        registry.register(MutatorId::new(MutatorId::RHYTHM_LOCK), 1, |s| {
            boxed(RhythmLockMutator::from_spec, s)
        });
        registry.register(MutatorId::new(MutatorId::GATE_JITTER), 1, |s| {
            boxed(GateJitterMutator::from_spec, s)
        });
        registry.register(MutatorId::new(MutatorId::SEGMENT_BIAS), 1, |s| {
            boxed(SegmentBiasMutator::from_spec, s)
        });
        registry
    }

    /// Register (or replace) a factory.
    pub fn register(&mut self, id: MutatorId, version: i32, factory: MutatorFactory) {
        self.factories.insert((id.as_str().to_string(), version), factory);
    }

    /// Build the mutator a spec names.
    ///
    /// Unknown id/version is a resolution error; bad parameters are a
    /// configuration error from the mutator itself.
    pub fn resolve(&self, spec: &MutatorSpec) -> Result<Box<dyn BlueprintMutator>, BuildError> {
        let key = (spec.id().as_str().to_string(), spec.version());
        let factory = self.factories.get(&key).ok_or_else(|| ResolveError::UnknownMutator {
            id: key.0.clone(),
            version: key.1,
        })?;
        debug!("Resolved mutator {} v{}", key.0, key.1);
        Ok(factory(spec)?)
    }

    /// True if a factory exists for `(id, version)`.
    pub fn contains(&self, id: &str, version: i32) -> bool {
        self.factories.contains_key(&(id.to_string(), version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::test_support::{generated, spec};

    #[test]
    fn test_builtin_has_all_six() {
        let registry = MutatorRegistry::with_builtin();
        for id in [
            MutatorId::NARROW_MARGIN,
            MutatorId::WIDE_MARGIN,
            MutatorId::DIFFICULTY_CURVE,
            MutatorId::RHYTHM_LOCK,
            MutatorId::GATE_JITTER,
            MutatorId::SEGMENT_BIAS,
        ] {
            assert!(registry.contains(id, 1), "{} missing", id);
            assert!(!registry.contains(id, 2));
        }
    }

    #[test]
    fn test_resolve_and_apply() {
        let registry = MutatorRegistry::with_builtin();
        let mutator = registry
            .resolve(&spec("NarrowMargin", &[("factor", 0.5)]))
            .unwrap();
        assert_eq!(mutator.apply(&generated()).gates[0].aperture_height, 100.0);
    }

    #[test]
    fn test_unknown_id() {
        let registry = MutatorRegistry::with_builtin();
        let err = registry.resolve(&spec("Telekinesis", &[])).err().unwrap();
        assert_eq!(
            err,
            BuildError::Resolve(ResolveError::UnknownMutator {
                id: "Telekinesis".into(),
                version: 1
            })
        );
    }

    #[test]
    fn test_unknown_version() {
        let registry = MutatorRegistry::with_builtin();
        let spec = MutatorSpec::create(MutatorId::new(MutatorId::RHYTHM_LOCK), 2, Vec::new()).unwrap();
        assert!(matches!(
            registry.resolve(&spec),
            Err(BuildError::Resolve(ResolveError::UnknownMutator { version: 2, .. }))
        ));
    }

    #[test]
    fn test_bad_params_surface_as_config_error() {
        let registry = MutatorRegistry::with_builtin();
        let result = registry.resolve(&spec("RhythmLock", &[("div", 7.0)]));
        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::InvalidChoice { key: "div", value: 7, .. }))
        ));
    }
}
