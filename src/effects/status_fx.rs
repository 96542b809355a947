//! Status application: self buffs and targeted afflictions.
//!
//! Targeted afflictions honor the target's own saving throw and the named
//! immunity flags (a monster that cannot be confused never rolls a save
//! against confusion).

use crate::core::Dice;
use crate::world::{MonsterFlag, Status, StatusId};

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::restore::parse_status;
use super::result::EffectResult;

pub(crate) fn build_apply_status(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::ApplyStatus {
        status: parse_status(def, "status", def.text("status")?)?,
        duration: def.dice("duration")?,
        intensity: def.dice_or("intensity", Dice::constant(0))?,
    })
}

pub(crate) fn build_status_bolt(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::StatusBolt {
        status: parse_status(def, "status", def.text("status")?)?,
        duration: def.dice("duration")?,
        power: def.int_or("power", 10)? as u32,
    })
}

/// The flag that makes a monster outright immune to a status, if any.
fn immunity_flag(status: StatusId) -> Option<MonsterFlag> {
    match status {
        StatusId::Confused | StatusId::Charmed => Some(MonsterFlag::NoConfuse),
        StatusId::Paralyzed | StatusId::Stasis => Some(MonsterFlag::NoSleep),
        StatusId::Afraid => Some(MonsterFlag::NoFear),
        StatusId::Stunned => Some(MonsterFlag::NoStun),
        _ => None,
    }
}

/// Apply a status to the caster. Duration then intensity are rolled, in
/// that order.
pub(crate) fn apply_status(
    ctx: &mut ExecutionContext,
    status: StatusId,
    duration: Dice,
    intensity: Dice,
) -> EffectResult {
    let turns = duration.roll(ctx.rng).max(1) as u32;
    let strength = intensity.roll(ctx.rng).max(0) as u32;
    ctx.caster_mut()
        .apply_status(Status::new(status, turns).with_intensity(strength));
    EffectResult::success(format!("You feel {status}.")).with_status_applied(status)
}

/// Apply a status to whatever stands at the target position.
///
/// Empty tile is an expected no-op. Immunity flags short-circuit before
/// the saving throw; the save draws once from the shared RNG.
pub(crate) fn status_bolt(
    ctx: &mut ExecutionContext,
    status: StatusId,
    duration: Dice,
    power: u32,
) -> EffectResult {
    let pos = ctx.position();
    let Some(id) = ctx.level.actor_at(pos) else {
        return EffectResult::noop("There is nothing there.");
    };

    let target = ctx.level.actor(id).expect("occupant is on the level");
    let name = target.name.clone();
    if immunity_flag(status).is_some_and(|flag| target.has_flag(flag)) {
        return EffectResult::noop(format!("The {name} is unaffected."));
    }
    if target.saving_throw(power, ctx.rng) {
        return EffectResult::noop(format!("The {name} resists."));
    }

    let turns = duration.roll(ctx.rng).max(1) as u32;
    let target = ctx.level.actor_mut(id).expect("occupant is on the level");
    target.apply_status(Status::new(status, turns));
    EffectResult::success(format!("The {name} is {status}.")).with_status_applied(status)
}
