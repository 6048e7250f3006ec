//! Mutator pipeline.

use tracing::debug;

use crate::error::BuildError;
use crate::level::blueprint::LevelBlueprint;
use crate::level::registry::LevelGeneratorRegistry;
use crate::mutator::registry::MutatorRegistry;
use crate::run::descriptor::RunDescriptor;
use crate::run::mutator_spec::MutatorSpec;

/// Strict left fold of resolved mutators over a blueprint.
pub struct MutatorPipeline<'a> {
    registry: &'a MutatorRegistry,
}

impl<'a> MutatorPipeline<'a> {
    /// Pipeline resolving through `registry`.
    pub fn new(registry: &'a MutatorRegistry) -> Self {
        Self { registry }
    }

    /// Apply `specs` in order. An empty list returns an unchanged copy.
    ///
    /// Every spec is resolved before any is applied, so a bad spec late in
    /// the list fails without wasted work.
    pub fn apply(
        &self,
        blueprint: &LevelBlueprint,
        specs: &[MutatorSpec],
    ) -> Result<LevelBlueprint, BuildError> {
        let mutators = specs
            .iter()
            .map(|spec| self.registry.resolve(spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(mutators
            .iter()
            .fold(blueprint.clone(), |current, mutator| mutator.apply(&current)))
    }
}

/// Generate the run's level and apply its mutators.
pub fn build_blueprint(
    run: &RunDescriptor,
    generators: &LevelGeneratorRegistry,
    mutators: &MutatorRegistry,
) -> Result<LevelBlueprint, BuildError> {
    let base = generators.resolve(run)?.generate(run);
    let blueprint = MutatorPipeline::new(mutators).apply(&base, run.mutators())?;
    debug!(
        "Built level {} with {} gates and {} mutators",
        run.id(),
        blueprint.gate_count(),
        run.mutators().len()
    );
    Ok(blueprint)
}

// =============================================================================
// TESTS
// =============================================================================
