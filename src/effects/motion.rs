//! Movement effects: teleports, level transitions, word of recall.
//!
//! Level-changing effects never mutate level identity themselves; they
//! emit an [`Outcome`] payload the turn loop inspects.

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::{EffectResult, Outcome};
use crate::world::MonsterFlag;

pub(crate) fn build_teleport_self(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::TeleportSelf {
        range: def.int_or("range", 10)? as i32,
    })
}

pub(crate) fn build_teleport_other(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::TeleportOther {
        range: def.int_or("range", 40)? as i32,
        power: def.int_or("power", 20)? as u32,
    })
}

pub(crate) fn build_teleport_level(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::TeleportLevel)
}

pub(crate) fn build_word_of_recall(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::WordOfRecall)
}

/// Teleport the caster to a random passable tile within range.
///
/// A fully walled-in caster goes nowhere; that is an expected no-op.
pub(crate) fn teleport_self(ctx: &mut ExecutionContext, range: i32) -> EffectResult {
    let from = ctx.caster_pos();
    let Some(dest) = ctx.level.random_destination(from, range, ctx.rng) else {
        return EffectResult::noop("You feel briefly disoriented.");
    };
    ctx.caster_mut().pos = dest;
    EffectResult::success("Your surroundings blur.")
}

/// Teleport whatever stands at the target position far away.
///
/// Teleport-resistant monsters short-circuit; the rest roll a save.
pub(crate) fn teleport_other(ctx: &mut ExecutionContext, range: i32, power: u32) -> EffectResult {
    let pos = ctx.position();
    let Some(id) = ctx.level.actor_at(pos) else {
        return EffectResult::noop("There is nothing there.");
    };

    let target = ctx.level.actor(id).expect("occupant is on the level");
    let name = target.name.clone();
    if target.has_flag(MonsterFlag::ResistTeleport) {
        return EffectResult::noop(format!("The {name} is unaffected."));
    }
    if target.saving_throw(power, ctx.rng) {
        return EffectResult::noop(format!("The {name} resists."));
    }

    let Some(dest) = ctx.level.random_destination(pos, range, ctx.rng) else {
        return EffectResult::noop(format!("The {name} stays put."));
    };
    let target = ctx.level.actor_mut(id).expect("occupant is on the level");
    target.pos = dest;
    EffectResult::success(format!("The {name} vanishes."))
}

/// Request a dungeon-level transition. Draws once to pick the direction;
/// the turn loop performs the actual transition. At the surface the only
/// way is down.
pub(crate) fn teleport_level(ctx: &mut ExecutionContext) -> EffectResult {
    let up = ctx.level.depth > 0 && ctx.rng.one_in(2);
    let message = if up {
        "You rise up through the ceiling."
    } else {
        "You sink through the floor."
    };
    EffectResult::success(message).with_payload(Outcome::LevelTransition { up })
}

/// Request recall to the surface (or back to the depths).
pub(crate) fn word_of_recall(_ctx: &mut ExecutionContext) -> EffectResult {
    EffectResult::success("The air about you becomes charged.")
        .with_payload(Outcome::RecallRequested)
}
