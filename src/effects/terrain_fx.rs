//! Terrain mutation: stone to mud, digging, earthquakes, stairs, glyphs.

use crate::core::Dice;
use crate::world::Terrain;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

pub(crate) fn build_stone_to_mud(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::StoneToMud {
        range: def.int_or("range", 8)? as i32,
    })
}

pub(crate) fn build_dig(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Dig {
        range: def.int_or("range", 1)? as i32,
    })
}

pub(crate) fn build_earthquake(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Earthquake {
        radius: def.int_or("radius", 8)? as i32,
        damage: def.dice_or("damage", Dice::new(4, 8))?,
    })
}

pub(crate) fn build_create_stairs(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::CreateStairs)
}

pub(crate) fn build_glyph_of_warding(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::GlyphOfWarding)
}

/// Walk a ray in the given direction and melt the first diggable tile.
///
/// Running out of range with nothing to melt is an expected no-op.
pub(crate) fn stone_to_mud(ctx: &mut ExecutionContext, range: i32) -> EffectResult {
    let dir = ctx.direction();
    let mut pos = ctx.caster_pos();
    for _ in 0..range {
        pos = pos.step(dir);
        if !ctx.level.in_bounds(pos) {
            break;
        }
        let terrain = ctx.level.terrain(pos);
        if terrain.is_diggable() {
            ctx.level.set_terrain(pos, Terrain::Floor);
            ctx.level.mark_known(pos);
            return EffectResult::success("The wall turns into mud!");
        }
        if terrain.blocks_projectiles() {
            break;
        }
    }
    EffectResult::noop("Nothing happens.")
}

/// Tunnel one tile in the given direction.
pub(crate) fn dig(ctx: &mut ExecutionContext, range: i32) -> EffectResult {
    let dir = ctx.direction();
    let mut pos = ctx.caster_pos();
    for _ in 0..range {
        pos = pos.step(dir);
        if !ctx.level.in_bounds(pos) {
            break;
        }
        match ctx.level.terrain(pos) {
            Terrain::Wall | Terrain::Rubble => {
                ctx.level.set_terrain(pos, Terrain::Floor);
                ctx.level.mark_known(pos);
                return EffectResult::success("You tunnel through the rock.");
            }
            terrain if terrain.is_passable() => continue,
            _ => break,
        }
    }
    EffectResult::noop("There is nothing to dig.")
}

/// Shake the dungeon around the caster.
///
/// Tiles collapse at random (one draw per tile, row-major within the
/// radius). Occupied tiles are spared so no actor is entombed; their
/// occupants take rolled damage instead. The caster's own tile is exempt.
pub(crate) fn earthquake(ctx: &mut ExecutionContext, radius: i32, damage: Dice) -> EffectResult {
    let center = ctx.caster_pos();
    let mut result = EffectResult::success("The ground shakes violently!");

    for pos in ctx.level.positions().collect::<Vec<_>>() {
        if pos == center || crate::core::distance(center, pos) > radius {
            continue;
        }
        if let Some(id) = ctx.level.actor_at(pos) {
            let amount = damage.roll(ctx.rng).max(0) as u32;
            let victim = ctx.level.actor_mut(id).expect("occupant is on the level");
            let name = victim.name.clone();
            let dealt = victim.take_damage(amount);
            result.damage_dealt += dealt;
            if victim.is_alive() {
                result.messages.push(format!("The {name} is pummeled by debris."));
            } else {
                result.messages.push(format!("The {name} is crushed!"));
            }
            continue;
        }
        if !ctx.rng.one_in(3) {
            continue;
        }
        let terrain = ctx.level.terrain(pos);
        let collapsed = match terrain {
            Terrain::Floor => Some(Terrain::Rubble),
            Terrain::Wall | Terrain::Rubble => Some(Terrain::Floor),
            _ => None,
        };
        if let Some(new_terrain) = collapsed {
            ctx.level.set_terrain(pos, new_terrain);
        }
    }
    result
}

/// Conjure a staircase under the caster. Down at the surface, random
/// otherwise (one draw).
pub(crate) fn create_stairs(ctx: &mut ExecutionContext) -> EffectResult {
    let pos = ctx.caster_pos();
    match ctx.level.terrain(pos) {
        Terrain::StairsUp | Terrain::StairsDown => {
            return EffectResult::noop("There is already a staircase here.")
        }
        _ => {}
    }
    let down = ctx.level.depth == 0 || ctx.rng.one_in(2);
    let terrain = if down {
        Terrain::StairsDown
    } else {
        Terrain::StairsUp
    };
    ctx.level.set_terrain(pos, terrain);
    ctx.level.mark_known(pos);
    EffectResult::success("A staircase takes shape beneath you.")
}

/// Inscribe a warding glyph on the caster's tile.
pub(crate) fn glyph_of_warding(ctx: &mut ExecutionContext) -> EffectResult {
    let pos = ctx.caster_pos();
    if ctx.level.terrain(pos) == Terrain::Glyph {
        return EffectResult::noop("There is already a glyph here.");
    }
    if !ctx.level.is_passable(pos) {
        return EffectResult::noop("The floor here will not take the glyph.");
    }
    ctx.level.set_terrain(pos, Terrain::Glyph);
    ctx.level.mark_known(pos);
    EffectResult::success("You inscribe a glyph of warding.")
}
