//! Mass crowd control: charm, banishment, mass stasis.
//!
//! These iterate every qualifying monster within sight range in id order
//! (so per-monster draws replay deterministically). Uniques and named
//! immunity flags short-circuit before any draw; the rest resist
//! probabilistically, level versus power.

use crate::core::{ActorId, Dice};
use crate::world::{MonsterFlag, Status, StatusId};

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

/// How far crowd-control effects reach.
pub(crate) const SIGHT_RADIUS: i32 = 18;

/// Which monsters a charm effect addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrowdScope {
    Monsters,
    Animals,
    Evil,
}

impl CrowdScope {
    fn matches(self, actor: &crate::world::Actor) -> bool {
        match self {
            CrowdScope::Monsters => true,
            CrowdScope::Animals => actor.has_flag(MonsterFlag::Animal),
            CrowdScope::Evil => actor.has_flag(MonsterFlag::Evil),
        }
    }
}

pub(crate) fn build_charm(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    let scope = match def.text_or("scope", "monsters")? {
        "monsters" => CrowdScope::Monsters,
        "animals" => CrowdScope::Animals,
        "evil" => CrowdScope::Evil,
        other => {
            return Err(EffectError::BadParam {
                effect: def.kind.clone(),
                param: "scope".to_string(),
                reason: format!("unknown scope {other:?}"),
            })
        }
    };
    Ok(EffectKind::CharmCrowd {
        scope,
        power: def.int_or("power", 20)? as u32,
        duration: def.dice_or("duration", Dice::new(1, 20).plus(20))?,
    })
}

pub(crate) fn build_banish(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Banish {
        power: def.int_or("power", 20)? as u32,
    })
}

pub(crate) fn build_mass_stasis(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::MassStasis {
        power: def.int_or("power", 20)? as u32,
        duration: def.dice_or("duration", Dice::new(1, 10).plus(10))?,
    })
}

/// Monsters within sight of the caster, in id order.
fn crowd(ctx: &ExecutionContext) -> Vec<ActorId> {
    let center = ctx.caster_pos();
    ctx.level
        .actors_in_radius(center, SIGHT_RADIUS)
        .into_iter()
        .filter(|&id| {
            id != ctx.actor
                && ctx
                    .level
                    .actor(id)
                    .expect("radius query returned a live id")
                    .is_monster()
        })
        .collect()
}

/// Charm qualifying monsters in sight.
///
/// Per monster: scope filter, unique/immunity short-circuit, saving throw,
/// then the duration roll.
pub(crate) fn charm_crowd(
    ctx: &mut ExecutionContext,
    scope: CrowdScope,
    power: u32,
    duration: Dice,
) -> EffectResult {
    let mut result = EffectResult::default();
    let mut touched = false;
    for id in crowd(ctx) {
        let target = ctx.level.actor(id).expect("crowd member is live");
        if !scope.matches(target) {
            continue;
        }
        touched = true;
        let name = target.name.clone();
        if target.has_flag(MonsterFlag::Unique) || target.has_flag(MonsterFlag::NoConfuse) {
            result.messages.push(format!("The {name} is unaffected."));
            continue;
        }
        if target.saving_throw(power, ctx.rng) {
            result.messages.push(format!("The {name} resists."));
            continue;
        }
        let turns = duration.roll(ctx.rng).max(1) as u32;
        let target = ctx.level.actor_mut(id).expect("crowd member is live");
        target.apply_status(Status::new(StatusId::Charmed, turns));
        result.messages.push(format!("The {name} is charmed."));
        result.statuses_applied.push(StatusId::Charmed);
    }

    if !touched {
        return EffectResult::noop("Nothing responds.");
    }
    result.success = true;
    result.turn_consumed = true;
    result
}

/// Teleport every monster in sight far away. Teleport resistance
/// short-circuits; the rest roll a save, then destination tries.
pub(crate) fn banish(ctx: &mut ExecutionContext, power: u32) -> EffectResult {
    let mut result = EffectResult::default();
    let mut touched = false;
    for id in crowd(ctx) {
        touched = true;
        let target = ctx.level.actor(id).expect("crowd member is live");
        let name = target.name.clone();
        let pos = target.pos;
        if target.has_flag(MonsterFlag::Unique) || target.has_flag(MonsterFlag::ResistTeleport) {
            result.messages.push(format!("The {name} is unaffected."));
            continue;
        }
        if target.saving_throw(power, ctx.rng) {
            result.messages.push(format!("The {name} resists."));
            continue;
        }
        let Some(dest) = ctx.level.random_destination(pos, 40, ctx.rng) else {
            continue;
        };
        let target = ctx.level.actor_mut(id).expect("crowd member is live");
        target.pos = dest;
        result.messages.push(format!("The {name} vanishes."));
    }

    if !touched {
        return EffectResult::noop("Nothing responds.");
    }
    result.success = true;
    result.turn_consumed = true;
    result
}

/// Hold every monster in sight in stasis.
pub(crate) fn mass_stasis(ctx: &mut ExecutionContext, power: u32, duration: Dice) -> EffectResult {
    let mut result = EffectResult::default();
    let mut touched = false;
    for id in crowd(ctx) {
        touched = true;
        let target = ctx.level.actor(id).expect("crowd member is live");
        let name = target.name.clone();
        if target.has_flag(MonsterFlag::Unique) || target.has_flag(MonsterFlag::NoSleep) {
            result.messages.push(format!("The {name} is unaffected."));
            continue;
        }
        if target.saving_throw(power, ctx.rng) {
            result.messages.push(format!("The {name} resists."));
            continue;
        }
        let turns = duration.roll(ctx.rng).max(1) as u32;
        let target = ctx.level.actor_mut(id).expect("crowd member is live");
        target.apply_status(Status::new(StatusId::Stasis, turns));
        result.messages.push(format!("The {name} freezes in place."));
        result.statuses_applied.push(StatusId::Stasis);
    }

    if !touched {
        return EffectResult::noop("Nothing responds.");
    }
    result.success = true;
    result.turn_consumed = true;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Position};
    use crate::world::{Actor, Level};

    fn setup() -> (Level, ActorId) {
        let mut level = Level::new(30, 30, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(15, 15)));
        (level, id)
    }

    #[test]
    fn test_charm_unique_never_succeeds() {
        let (mut level, id) = setup();
        let boss = level.add_actor(
            Actor::monster("king", "Serpent King", 'J', 1, 50, Position::new(17, 15))
                .with_flag(MonsterFlag::Unique)
                .with_flag(MonsterFlag::Animal),
        );

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);
            let result = charm_crowd(&mut ctx, CrowdScope::Animals, 200, Dice::constant(20));
            assert_eq!(result.messages, vec!["The Serpent King is unaffected."]);
            assert!(result.statuses_applied.is_empty());
        }
        assert!(!level.actor(boss).unwrap().has_status(StatusId::Charmed));
    }

    #[test]
    fn test_charm_scope_filters() {
        let (mut level, id) = setup();
        let wolf = level.add_actor(
            Actor::monster("wolf", "Wolf", 'C', 1, 10, Position::new(17, 15))
                .with_flag(MonsterFlag::Animal),
        );
        let ghost = level.add_actor(Actor::monster(
            "ghost",
            "Ghost",
            'G',
            1,
            10,
            Position::new(13, 15),
        ));

        let mut rng = GameRng::new(42);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);
        let result = charm_crowd(&mut ctx, CrowdScope::Animals, 200, Dice::constant(20));

        assert!(result.success);
        assert!(level.actor(wolf).unwrap().has_status(StatusId::Charmed));
        assert!(!level.actor(ghost).unwrap().has_status(StatusId::Charmed));
    }

    #[test]
    fn test_empty_sight_is_noop() {
        let (mut level, id) = setup();
        let mut rng = GameRng::new(1);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = charm_crowd(&mut ctx, CrowdScope::Monsters, 20, Dice::constant(20));
        assert!(result.success);
        assert!(result.turn_consumed);
        assert_eq!(result.messages, vec!["Nothing responds."]);
    }

    #[test]
    fn test_banish_scatters_crowd() {
        let (mut level, id) = setup();
        let a = level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(16, 15)));
        let b = level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(14, 15)));

        let mut rng = GameRng::new(42);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);
        let result = banish(&mut ctx, 200);

        assert!(result.success);
        // Level-1 rats cannot save against power 200.
        assert_ne!(level.actor(a).unwrap().pos, Position::new(16, 15));
        assert_ne!(level.actor(b).unwrap().pos, Position::new(14, 15));
    }

    #[test]
    fn test_mass_stasis_applies_in_id_order() {
        let (mut level, id) = setup();
        let a = level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(16, 15)));
        let b = level.add_actor(Actor::monster("bat", "Bat", 'b', 1, 5, Position::new(14, 15)));

        let mut rng = GameRng::new(42);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);
        let result = mass_stasis(&mut ctx, 200, Dice::constant(10));

        assert_eq!(
            result.messages,
            vec!["The Rat freezes in place.", "The Bat freezes in place."]
        );
        assert!(level.actor(a).unwrap().has_status(StatusId::Stasis));
        assert!(level.actor(b).unwrap().has_status(StatusId::Stasis));
    }
}
