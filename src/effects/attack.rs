//! Damage effects: bolt, beam, ball, breath, drain life.
//!
//! Draw order is fixed per variant so fixed seeds replay identically:
//! bolts and beams roll damage per struck target in trace order, then
//! resolve resistance (one more draw at most, monster-side only); balls
//! and breaths roll the base once, then resolve per-target resistance in
//! entity-id order.

use crate::combat::{apply_elemental_damage, Element};
use crate::core::{distance, line_between, point_line_distance, ActorId, Dice, Position};
use crate::world::MonsterFlag;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::result::EffectResult;

pub(crate) fn build_bolt(
    def: &EffectDefinition,
    _registry: &super::registry::EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Bolt {
        element: def.element("element")?,
        damage: def.dice("damage")?,
    })
}

pub(crate) fn build_beam(
    def: &EffectDefinition,
    _registry: &super::registry::EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Beam {
        element: def.element("element")?,
        damage: def.dice("damage")?,
    })
}

pub(crate) fn build_ball(
    def: &EffectDefinition,
    _registry: &super::registry::EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Ball {
        element: def.element("element")?,
        damage: def.dice("damage")?,
        radius: def.int_or("radius", 2)? as i32,
    })
}

pub(crate) fn build_breath(
    def: &EffectDefinition,
    _registry: &super::registry::EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Breath {
        element: def.element("element")?,
        damage: def.dice("damage")?,
        radius: def.int_or("radius", 3)? as i32,
    })
}

pub(crate) fn build_drain_life(
    def: &EffectDefinition,
    _registry: &super::registry::EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::DrainLife {
        damage: def.dice("damage")?,
    })
}

/// Trace the projectile line from `from` toward `to`, stopping at the
/// first wall. Returns every tile reached, in order.
fn trace_line(ctx: &ExecutionContext, from: Position, to: Position) -> Vec<Position> {
    let mut path = Vec::new();
    for pos in line_between(from, to) {
        if ctx.level.blocks_projectiles(pos) {
            break;
        }
        path.push(pos);
    }
    path
}

/// Apply one elemental hit to an actor, recording damage and messages.
fn strike(ctx: &mut ExecutionContext, id: ActorId, element: Element, amount: u32, result: &mut EffectResult) {
    let target = ctx.level.actor_mut(id).expect("struck actor is on the level");
    let name = target.name.clone();
    let hit = apply_elemental_damage(target, element, amount, ctx.rng);

    if hit.unaffected {
        result.messages.push(format!("The {name} is unaffected."));
        return;
    }
    result.damage_dealt += hit.dealt;
    if target.is_alive() {
        result.messages.push(format!("The {name} is hit."));
    } else {
        result.messages.push(format!("The {name} dies."));
    }
}

/// Bolt: straight line, stops at the first living entity or wall, one
/// damage roll.
pub(crate) fn bolt(ctx: &mut ExecutionContext, element: Element, damage: Dice) -> EffectResult {
    let from = ctx.caster_pos();
    let to = ctx.position();

    let hit_id = trace_line(ctx, from, to)
        .into_iter()
        .find_map(|pos| ctx.level.actor_at(pos));

    let Some(id) = hit_id else {
        return EffectResult::noop(format!("The {element} bolt strikes nothing."));
    };

    let amount = damage.roll(ctx.rng).max(0) as u32;
    let mut result = EffectResult::success(format!("The {element} bolt fires."));
    strike(ctx, id, element, amount, &mut result);
    result
}

/// Beam: same line trace as a bolt, but pierces - every entity on the
/// line is hit with an independently rolled damage value.
pub(crate) fn beam(ctx: &mut ExecutionContext, element: Element, damage: Dice) -> EffectResult {
    let from = ctx.caster_pos();
    let to = ctx.position();

    let targets: Vec<ActorId> = trace_line(ctx, from, to)
        .into_iter()
        .filter_map(|pos| ctx.level.actor_at(pos))
        .collect();

    if targets.is_empty() {
        return EffectResult::noop(format!("The {element} beam strikes nothing."));
    }

    let mut result = EffectResult::success(format!("A beam of {element} lances out."));
    for id in targets {
        let amount = damage.roll(ctx.rng).max(0) as u32;
        strike(ctx, id, element, amount, &mut result);
    }
    result
}

/// Linear ball falloff: full damage at the center, `base / (radius + 1)`
/// at the rim, never below 1.
#[must_use]
pub(crate) fn ball_falloff(base: u32, radius: i32, dist: i32) -> u32 {
    let radius = radius.max(0) as u32;
    let dist = dist.max(0) as u32;
    (base * (radius + 1 - dist.min(radius)) / (radius + 1)).max(1)
}

/// Ball: every living entity within the radius of the target point, base
/// rolled once, linear falloff, per-entity resistance in id order.
pub(crate) fn ball(
    ctx: &mut ExecutionContext,
    element: Element,
    damage: Dice,
    radius: i32,
) -> EffectResult {
    let center = ctx.position();
    let targets = ctx.level.actors_in_radius(center, radius);

    let base = damage.roll(ctx.rng).max(0) as u32;
    let mut result = EffectResult::success(format!("The {element} ball explodes."));

    if targets.is_empty() {
        return result.with_message("It catches nothing in the blast.");
    }
    for id in targets {
        let pos = ctx.level.actor(id).expect("radius query returned a live id").pos;
        let amount = ball_falloff(base, radius, distance(center, pos));
        strike(ctx, id, element, amount, &mut result);
    }
    result
}

/// Breath: a cone from the caster toward the target. The cone's width at
/// distance `d` is `radius * d / target_distance`; damage is rolled once
/// and not re-rolled per entity.
pub(crate) fn breath(
    ctx: &mut ExecutionContext,
    element: Element,
    damage: Dice,
    radius: i32,
) -> EffectResult {
    let from = ctx.caster_pos();
    let to = ctx.position();
    let target_dist = distance(from, to);
    if target_dist == 0 {
        return EffectResult::noop("The breath dissipates harmlessly.");
    }

    let amount = damage.roll(ctx.rng).max(0) as u32;
    let mut result = EffectResult::success(format!("You breathe {element}."));

    let mut caught = false;
    for id in ctx.level.all_actors() {
        if id == ctx.actor {
            continue;
        }
        let pos = ctx.level.actor(id).expect("enumerated actor is live").pos;
        let d = distance(from, pos);
        if d == 0 || d > target_dist {
            continue;
        }
        // Width and perpendicular distance both scaled by 10.
        let width = radius * d * 10 / target_dist;
        if point_line_distance(from, to, pos) <= width {
            caught = true;
            strike(ctx, id, element, amount, &mut result);
        }
    }

    if !caught {
        result.messages.push("The breath scorches empty ground.".to_string());
    }
    result
}

/// Drain life: bolt-like trace, living targets only; the caster heals for
/// the damage dealt. The undead and demons have no life to drain.
pub(crate) fn drain_life(ctx: &mut ExecutionContext, damage: Dice) -> EffectResult {
    let from = ctx.caster_pos();
    let to = ctx.position();

    let hit_id = trace_line(ctx, from, to)
        .into_iter()
        .find_map(|pos| ctx.level.actor_at(pos));

    let Some(id) = hit_id else {
        return EffectResult::noop("The dark bolt strikes nothing.");
    };

    let target = ctx.level.actor(id).expect("struck actor is on the level");
    let name = target.name.clone();
    if target.has_flag(MonsterFlag::Undead) || target.has_flag(MonsterFlag::Demon) {
        return EffectResult::noop(format!("The {name} is unaffected."));
    }

    let amount = damage.roll(ctx.rng).max(0) as u32;
    let target = ctx.level.actor_mut(id).expect("struck actor is on the level");
    let dealt = target.take_damage(amount);
    let died = !target.is_alive();

    let healed = ctx.caster_mut().heal(dealt);

    let mut result = EffectResult::success(format!("You drain life from the {name}."))
        .with_damage(dealt)
        .with_healed(healed);
    if died {
        result = result.with_message(format!("The {name} dies."));
    }
    result
}
