//! Generator registry.
//!
//! Maps `(mode, generator version)` to a generator. Versions are registered
//! explicitly and never removed, so historical run ids stay reproducible.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ResolveError;
use crate::level::generator::{LevelGenerator, ReflexGateGenerator};
use crate::run::descriptor::RunDescriptor;
use crate::run::ids::ModeId;

/// Explicit `(mode, version) -> generator` table.
#[derive(Default)]
pub struct LevelGeneratorRegistry {
    generators: BTreeMap<(String, i32), Box<dyn LevelGenerator>>,
}

impl LevelGeneratorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every shipped generator.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            ModeId::reflex_gates(),
            1,
            Box::new(ReflexGateGenerator::default()),
        );
        registry
    }

    /// Register (or replace) a generator.
    pub fn register(&mut self, mode: ModeId, version: i32, generator: Box<dyn LevelGenerator>) {
        self.generators
            .insert((mode.as_str().to_string(), version), generator);
    }

    /// Generator for the run's mode and generator version.
    pub fn resolve(&self, run: &RunDescriptor) -> Result<&dyn LevelGenerator, ResolveError> {
        let key = (run.mode().as_str().to_string(), run.generator_version());
        match self.generators.get(&key) {
            Some(generator) => {
                debug!("Resolved generator {} v{}", key.0, key.1);
                Ok(generator.as_ref())
            }
            None => Err(ResolveError::UnknownGenerator {
                mode: key.0,
                version: key.1,
            }),
        }
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
