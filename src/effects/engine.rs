//! The effect engine: builds definitions and runs them against a context.

use tracing::debug;

use crate::world::Bestiary;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::registry::EffectRegistry;
use super::result::EffectResult;

/// Shared read-only game data the executors draw on.
pub struct Resources {
    pub bestiary: Bestiary,
}

impl Resources {
    #[must_use]
    pub fn new(bestiary: Bestiary) -> Self {
        Self { bestiary }
    }
}

/// Builds and executes effects. One engine serves a whole game session;
/// per-cast state lives in the [`ExecutionContext`].
pub struct EffectEngine {
    registry: EffectRegistry,
    resources: Resources,
}

impl EffectEngine {
    #[must_use]
    pub fn new(registry: EffectRegistry, resources: Resources) -> Self {
        Self {
            registry,
            resources,
        }
    }

    /// An engine with the standard effect catalog.
    #[must_use]
    pub fn standard(bestiary: Bestiary) -> Self {
        Self::new(EffectRegistry::standard(), Resources::new(bestiary))
    }

    #[must_use]
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Build one definition and run it.
    ///
    /// A definition that fails to build is a content error and returns
    /// `Err`. A built effect whose targeting mode the context does not
    /// satisfy yields a hard failure (no turn consumed); everything else
    /// executes and reports through the result.
    pub fn run(
        &self,
        def: &EffectDefinition,
        ctx: &mut ExecutionContext,
    ) -> Result<EffectResult, EffectError> {
        let kind = self.registry.build(def)?;
        debug!(effect = %def.kind, actor = ctx.actor.raw(), "executing effect");
        if !kind.can_execute(ctx) {
            return Ok(EffectResult::failure("You need a target for that."));
        }
        Ok(kind.execute(ctx, &self.resources))
    }

    /// Run a list of definitions in declared order against one context,
    /// folding their results together. All definitions are built and
    /// target-checked up front, so a content error anywhere in the list
    /// aborts the whole cast before any effect runs.
    pub fn run_list(
        &self,
        defs: &[EffectDefinition],
        ctx: &mut ExecutionContext,
    ) -> Result<EffectResult, EffectError> {
        let kinds = defs
            .iter()
            .map(|def| self.registry.build(def))
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.iter().any(|kind| !kind.can_execute(ctx)) {
            return Ok(EffectResult::failure("You need a target for that."));
        }
        debug!(count = kinds.len(), actor = ctx.actor.raw(), "executing effect list");
        Ok(EffectResult::combine(
            kinds.iter().map(|kind| kind.execute(ctx, &self.resources)),
        ))
    }
}
