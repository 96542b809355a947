//! Detection, magic mapping, and area light.
//!
//! All read-only with respect to HP and positions: they mark tiles known
//! and count what they found. Compound detection runs several sub-kinds in
//! one declaration; per-kind counts land in the result payload.

use crate::world::Terrain;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::{DetectKind, EffectResult, Outcome};

/// Default detection radius, matching unaided sight.
pub(crate) const DETECT_RADIUS: i64 = 18;

pub(crate) fn build_detect(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    let text = def.text("kinds")?;
    let kinds = if text == "all" {
        vec![DetectKind::Monsters, DetectKind::Doors, DetectKind::Stairs]
    } else {
        text.split(',')
            .map(|tag| match tag.trim() {
                "monsters" => Ok(DetectKind::Monsters),
                "doors" => Ok(DetectKind::Doors),
                "stairs" => Ok(DetectKind::Stairs),
                other => Err(EffectError::BadParam {
                    effect: def.kind.clone(),
                    param: "kinds".to_string(),
                    reason: format!("unknown detection kind {other:?}"),
                }),
            })
            .collect::<Result<_, _>>()?
    };
    Ok(EffectKind::Detect {
        kinds,
        radius: def.int_or("radius", DETECT_RADIUS)? as i32,
    })
}

pub(crate) fn build_magic_mapping(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::MagicMapping {
        radius: def.int_or("radius", 30)? as i32,
    })
}

pub(crate) fn build_light_area(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::LightArea {
        radius: def.int_or("radius", 3)? as i32,
    })
}

fn detect_one(ctx: &mut ExecutionContext, kind: DetectKind, radius: i32) -> u32 {
    let center = ctx.caster_pos();
    match kind {
        DetectKind::Monsters => {
            let mut count = 0;
            for id in ctx.level.actors_in_radius(center, radius) {
                if id == ctx.actor {
                    continue;
                }
                let pos = ctx.level.actor(id).expect("radius query returned a live id").pos;
                ctx.level.mark_known(pos);
                count += 1;
            }
            count
        }
        DetectKind::Doors | DetectKind::Stairs => {
            let wanted: &[Terrain] = match kind {
                DetectKind::Doors => &[Terrain::Door],
                _ => &[Terrain::StairsUp, Terrain::StairsDown],
            };
            let mut count = 0;
            for pos in ctx.level.positions().collect::<Vec<_>>() {
                if crate::core::distance(center, pos) <= radius
                    && wanted.contains(&ctx.level.terrain(pos))
                {
                    ctx.level.mark_known(pos);
                    count += 1;
                }
            }
            count
        }
    }
}

/// Run each detection sub-kind, aggregating per-kind counts into the
/// payload. Finding nothing is an expected no-op.
pub(crate) fn detect(ctx: &mut ExecutionContext, kinds: &[DetectKind], radius: i32) -> EffectResult {
    let mut counts = Vec::with_capacity(kinds.len());
    let mut total = 0;
    for &kind in kinds {
        let found = detect_one(ctx, kind, radius);
        total += found;
        counts.push((kind, found));
    }

    if total == 0 {
        return EffectResult::noop("You sense nothing nearby.")
            .with_payload(Outcome::Detected(counts));
    }

    let mut result = EffectResult::default().with_payload(Outcome::Detected(counts.clone()));
    result.success = true;
    result.turn_consumed = true;
    for (kind, found) in counts {
        if found == 0 {
            continue;
        }
        let what = match kind {
            DetectKind::Monsters => "monsters",
            DetectKind::Doors => "doors",
            DetectKind::Stairs => "stairs",
        };
        result.messages.push(format!("You sense the presence of {what}."));
    }
    result
}

/// Reveal the level layout within a radius of the caster.
pub(crate) fn magic_mapping(ctx: &mut ExecutionContext, radius: i32) -> EffectResult {
    let center = ctx.caster_pos();
    for pos in ctx.level.positions().collect::<Vec<_>>() {
        if crate::core::distance(center, pos) <= radius {
            ctx.level.mark_known(pos);
        }
    }
    EffectResult::success("A map of your surroundings forms in your mind.")
}

/// Light the area around the caster.
pub(crate) fn light_area(ctx: &mut ExecutionContext, radius: i32) -> EffectResult {
    let center = ctx.caster_pos();
    for pos in ctx.level.positions().collect::<Vec<_>>() {
        if crate::core::distance(center, pos) <= radius {
            ctx.level.mark_known(pos);
        }
    }
    EffectResult::success("You are surrounded by a white light.")
}
