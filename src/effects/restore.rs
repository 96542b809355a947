//! Self-targeted restoration: healing, mana, status cures, stat restores.

use crate::core::Dice;
use crate::world::{Stat, StatusId};

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

pub(crate) fn build_heal(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Heal {
        amount: def.dice("amount")?,
    })
}

pub(crate) fn build_restore_mana(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::RestoreMana {
        amount: def.dice("amount")?,
    })
}

pub(crate) fn build_cure(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::CureStatuses {
        statuses: parse_status_list(def, "statuses")?,
    })
}

pub(crate) fn build_restore_stats(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::RestoreStats {
        stats: parse_stat_list(def, "stats")?,
    })
}

/// Parse a status tag from effect content.
pub(crate) fn parse_status(
    def: &EffectDefinition,
    param: &str,
    tag: &str,
) -> Result<StatusId, EffectError> {
    let status = match tag {
        "poisoned" => StatusId::Poisoned,
        "confused" => StatusId::Confused,
        "afraid" => StatusId::Afraid,
        "stunned" => StatusId::Stunned,
        "blind" => StatusId::Blind,
        "paralyzed" => StatusId::Paralyzed,
        "slowed" => StatusId::Slowed,
        "hasted" => StatusId::Hasted,
        "blessed" => StatusId::Blessed,
        "heroism" => StatusId::Heroism,
        "shielded" => StatusId::Shielded,
        "charmed" => StatusId::Charmed,
        "stasis" => StatusId::Stasis,
        "oppose_fire" => StatusId::OpposeFire,
        "oppose_cold" => StatusId::OpposeCold,
        "oppose_elec" => StatusId::OpposeElec,
        "oppose_acid" => StatusId::OpposeAcid,
        "oppose_poison" => StatusId::OpposePoison,
        _ => {
            return Err(EffectError::BadParam {
                effect: def.kind.clone(),
                param: param.to_string(),
                reason: format!("unknown status {tag:?}"),
            })
        }
    };
    Ok(status)
}

/// Parse a comma-separated status list. `"afflictions"` expands to every
/// harmful condition.
fn parse_status_list(def: &EffectDefinition, param: &str) -> Result<Vec<StatusId>, EffectError> {
    let text = def.text(param)?;
    if text == "afflictions" {
        return Ok(vec![
            StatusId::Poisoned,
            StatusId::Confused,
            StatusId::Afraid,
            StatusId::Stunned,
            StatusId::Blind,
            StatusId::Paralyzed,
            StatusId::Slowed,
        ]);
    }
    text.split(',')
        .map(|tag| parse_status(def, param, tag.trim()))
        .collect()
}

/// Parse a comma-separated stat list. `"all"` expands to every stat.
fn parse_stat_list(def: &EffectDefinition, param: &str) -> Result<Vec<Stat>, EffectError> {
    let text = def.text(param)?;
    if text == "all" {
        return Ok(Stat::ALL.to_vec());
    }
    text.split(',')
        .map(|tag| match tag.trim() {
            "str" => Ok(Stat::Str),
            "int" => Ok(Stat::Int),
            "wis" => Ok(Stat::Wis),
            "dex" => Ok(Stat::Dex),
            "con" => Ok(Stat::Con),
            "chr" => Ok(Stat::Chr),
            other => Err(EffectError::BadParam {
                effect: def.kind.clone(),
                param: param.to_string(),
                reason: format!("unknown stat {other:?}"),
            }),
        })
        .collect()
}

/// Heal the caster. Already at full HP is an expected no-op.
pub(crate) fn heal(ctx: &mut ExecutionContext, amount: Dice) -> EffectResult {
    let rolled = amount.roll(ctx.rng).max(0) as u32;
    let healed = ctx.caster_mut().heal(rolled);
    if healed == 0 {
        return EffectResult::noop("You feel no different.");
    }
    EffectResult::success("You feel much better.").with_healed(healed)
}

/// Restore the caster's mana. Already full is an expected no-op.
pub(crate) fn restore_mana(ctx: &mut ExecutionContext, amount: Dice) -> EffectResult {
    let rolled = amount.roll(ctx.rng).max(0) as u32;
    let gained = ctx.caster_mut().restore_mana(rolled);
    if gained == 0 {
        return EffectResult::noop("Your mind is already clear.");
    }
    EffectResult::success("Your mind clears.").with_mana_gained(gained)
}

/// Cure a set of statuses. Nothing to cure is an expected no-op.
pub(crate) fn cure_statuses(ctx: &mut ExecutionContext, statuses: &[StatusId]) -> EffectResult {
    let caster = ctx.caster_mut();
    let mut result = EffectResult::default();
    for &id in statuses {
        if caster.statuses.cure(id) {
            result.messages.push(format!("You are no longer {id}."));
            result.statuses_cured.push(id);
        }
    }
    if result.statuses_cured.is_empty() {
        return EffectResult::noop("You feel no different.");
    }
    result.success = true;
    result.turn_consumed = true;
    result
}

/// Restore drained stats. Nothing drained is an expected no-op.
pub(crate) fn restore_stats(ctx: &mut ExecutionContext, stats: &[Stat]) -> EffectResult {
    let caster = ctx.caster_mut();
    let Some(player) = caster.player_state_mut() else {
        return EffectResult::noop("Nothing happens.");
    };

    let mut restored = Vec::new();
    for &stat in stats {
        if player.stats.restore(stat) {
            restored.push(stat);
        }
    }
    if restored.is_empty() {
        return EffectResult::noop("You feel no different.");
    }

    let mut result = EffectResult::default();
    result.success = true;
    result.turn_consumed = true;
    for stat in restored {
        result.messages.push(format!("Your {stat} returns."));
    }
    result
}
