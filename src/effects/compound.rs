//! Compound random effects: wonder and call chaos.
//!
//! Pools are built eagerly at registry-build time (with bounded nesting),
//! so execution never re-enters the factory. One draw selects the
//! sub-effect; its result merges into the compound's own, behind an
//! explanatory message. A drawn sub-effect may demand a target the
//! compound itself does not (the compound only targets the caster), so
//! the draw is re-checked against the context before it executes.

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::engine::Resources;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

pub(crate) fn build_wonder(
    def: &EffectDefinition,
    registry: &EffectRegistry,
    depth: usize,
) -> Result<EffectKind, EffectError> {
    let pool = build_pool(def, registry, depth)?
        .into_iter()
        .map(|(_, kind)| kind)
        .collect();
    Ok(EffectKind::Wonder { pool })
}

pub(crate) fn build_call_chaos(
    def: &EffectDefinition,
    registry: &EffectRegistry,
    depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::CallChaos {
        pool: build_pool(def, registry, depth)?,
    })
}

fn build_pool(
    def: &EffectDefinition,
    registry: &EffectRegistry,
    depth: usize,
) -> Result<Vec<(u32, EffectKind)>, EffectError> {
    if def.sub_effects.is_empty() {
        return Err(EffectError::BadParam {
            effect: def.kind.clone(),
            param: "sub_effects".to_string(),
            reason: "compound effect needs a non-empty pool".to_string(),
        });
    }
    def.sub_effects
        .iter()
        .map(|sub| {
            let kind = registry.build_at(&sub.definition, depth + 1)?;
            Ok((sub.weight, kind))
        })
        .collect()
}

/// Wonder: pick uniformly from the pool and delegate.
pub(crate) fn wonder(
    ctx: &mut ExecutionContext,
    resources: &Resources,
    pool: &[EffectKind],
) -> EffectResult {
    let Some(chosen) = ctx.rng.choose(pool) else {
        return EffectResult::noop("Nothing happens.");
    };
    let chosen = chosen.clone();
    if !chosen.can_execute(ctx) {
        return EffectResult::failure("You need a target for that.");
    }
    let sub = chosen.execute(ctx, resources);
    EffectResult::combine([EffectResult::success("You feel a surge of wild magic!"), sub])
}

/// Call chaos: pick by weight from the pool and delegate.
pub(crate) fn call_chaos(
    ctx: &mut ExecutionContext,
    resources: &Resources,
    pool: &[(u32, EffectKind)],
) -> EffectResult {
    let weights: Vec<u32> = pool.iter().map(|(w, _)| *w).collect();
    let Some(idx) = ctx.rng.choose_weighted(&weights) else {
        return EffectResult::noop("Nothing happens.");
    };
    let chosen = pool[idx].1.clone();
    if !chosen.can_execute(ctx) {
        return EffectResult::failure("You need a target for that.");
    }
    let sub = chosen.execute(ctx, resources);
    EffectResult::combine([EffectResult::success("Chaos erupts around you!"), sub])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Position};
    use crate::world::{Actor, Bestiary, Level};

    fn heal_def() -> EffectDefinition {
        EffectDefinition::new("heal").with_param("amount", 10)
    }

    fn bolt_def() -> EffectDefinition {
        EffectDefinition::new("bolt")
            .with_param("element", "fire")
            .with_param("damage", "3d8")
    }

    #[test]
    fn test_untargeted_draw_fails_instead_of_executing() {
        let registry = EffectRegistry::standard();
        let mut level = Level::new(10, 10, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(5, 5)));
        let mut rng = GameRng::new(3);
        let resources = Resources::new(Bestiary::new());

        // Both compounds target only the caster, so nothing upstream
        // guarantees the drawn bolt's position target is resolved.
        for name in ["wonder", "call_chaos"] {
            let def = EffectDefinition::new(name).with_sub_effect(1, bolt_def());
            let kind = registry.build(&def).unwrap();
            let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

            let result = kind.execute(&mut ctx, &resources);
            assert!(!result.success);
            assert!(!result.turn_consumed);
            assert_eq!(result.messages, vec!["You need a target for that."]);
        }
    }

    #[test]
    fn test_wonder_prefixes_and_merges() {
        let registry = EffectRegistry::standard();
        let def = EffectDefinition::new("wonder").with_sub_effect(1, heal_def());
        let kind = registry.build(&def).unwrap();

        let mut level = Level::new(10, 10, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(5, 5)));
        level.actor_mut(id).unwrap().take_damage(15);
        let mut rng = GameRng::new(42);
        let resources = Resources::new(Bestiary::new());
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = kind.execute(&mut ctx, &resources);
        assert!(result.success);
        assert_eq!(result.messages[0], "You feel a surge of wild magic!");
        assert_eq!(result.amount_healed, 10);
    }

    #[test]
    fn test_call_chaos_respects_weights() {
        let registry = EffectRegistry::standard();
        // One sub-effect with all the weight: always chosen.
        let def = EffectDefinition::new("call_chaos")
            .with_sub_effect(100, heal_def())
            .with_sub_effect(
                0,
                EffectDefinition::new("teleport_self").with_param("range", 5),
            );
        let kind = registry.build(&def).unwrap();

        let mut level = Level::new(10, 10, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(5, 5)));
        level.actor_mut(id).unwrap().take_damage(15);
        let mut rng = GameRng::new(7);
        let resources = Resources::new(Bestiary::new());
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = kind.execute(&mut ctx, &resources);
        assert_eq!(result.amount_healed, 10);
        assert_eq!(level.actor(id).unwrap().pos, Position::new(5, 5));
    }

    #[test]
    fn test_empty_pool_is_config_error() {
        let registry = EffectRegistry::standard();
        let def = EffectDefinition::new("wonder");
        assert!(matches!(
            registry.build(&def),
            Err(EffectError::BadParam { .. })
        ));
    }

    #[test]
    fn test_nesting_bound() {
        let registry = EffectRegistry::standard();
        // wonder -> wonder -> wonder -> wonder -> heal nests past the bound.
        let mut def = heal_def();
        for _ in 0..4 {
            def = EffectDefinition::new("wonder").with_sub_effect(1, def);
        }
        assert!(matches!(
            registry.build(&def),
            Err(EffectError::NestingTooDeep(_))
        ));
    }
}
