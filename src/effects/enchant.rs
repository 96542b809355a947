//! Item effects: enchantment, identification, curses, recharging.
//!
//! Enchantment has diminishing returns: per-attempt failure probability is
//! looked up from a fixed table indexed by the item's current bonus, and
//! the increment shrinks as the bonus rises. To-hit and armor bonuses cap
//! at 15; to-damage caps at 10, with its own steeper failure table.

use crate::core::{Dice, GameRng};
use crate::world::Item;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

/// Cap for to-hit and armor-class bonuses.
pub(crate) const ENCHANT_CAP_HIT_AC: i32 = 15;
/// Cap for to-damage bonuses.
pub(crate) const ENCHANT_CAP_DAM: i32 = 10;

/// Failure chance out of 1000, indexed by current to-hit or to-ac bonus.
/// The last entry is a hard ceiling: attempts always fail there.
const FAILURE_HIT_AC: [u32; 16] = [
    0, 10, 50, 100, 200, 300, 400, 500, 650, 800, 950, 987, 993, 995, 998, 1000,
];

/// Failure chance out of 1000, indexed by current to-damage bonus.
/// Steeper than the to-hit table; damage bonuses are harder to push.
const FAILURE_DAM: [u32; 11] = [0, 100, 200, 400, 600, 700, 800, 900, 950, 990, 1000];

pub(crate) fn build_identify(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Identify)
}

pub(crate) fn build_enchant_weapon(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::EnchantWeapon {
        to_hit: def.flag_or("to_hit", true)?,
        to_dam: def.flag_or("to_dam", false)?,
    })
}

pub(crate) fn build_enchant_armor(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::EnchantArmor)
}

pub(crate) fn build_remove_curse(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::RemoveCurse)
}

pub(crate) fn build_curse_item(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::CurseItem)
}

pub(crate) fn build_recharge(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Recharge {
        amount: def.dice("amount")?,
    })
}

/// One enchantment attempt against one bonus value.
///
/// Draws the failure roll first, then the increment roll when the attempt
/// lands. At or past the cap no draw happens and the gain is always zero.
fn attempt(current: i32, cap: i32, table: &[u32], rng: &mut GameRng) -> i32 {
    if current >= cap {
        return 0;
    }
    let idx = (current.max(0) as usize).min(table.len() - 1);
    if rng.range(1, 1000) <= table[idx] as i32 {
        return 0;
    }
    // Increment shrinks as the bonus climbs.
    let gain = if current < 4 {
        rng.range(1, 3)
    } else if current < 8 {
        rng.range(1, 2)
    } else {
        1
    };
    (current + gain).min(cap) - current
}

fn fetch_item<'a>(ctx: &'a mut ExecutionContext) -> Option<&'a mut Item> {
    let id = ctx.item();
    ctx.caster_mut().item_mut(id)
}

/// Identify the targeted item. Already identified is an expected no-op.
pub(crate) fn identify(ctx: &mut ExecutionContext) -> EffectResult {
    let Some(item) = fetch_item(ctx) else {
        return EffectResult::failure("You are not carrying that.");
    };
    let id = item.id;
    let name = item.name.clone();
    if item.identified {
        return EffectResult::noop(format!("The {name} is already identified."));
    }
    item.identified = true;
    EffectResult::success(format!("It is a {name}.")).with_item(id)
}

/// Enchant a weapon's to-hit and/or to-damage bonus.
///
/// A non-weapon is a hard failure: the turn is not spent.
pub(crate) fn enchant_weapon(ctx: &mut ExecutionContext, to_hit: bool, to_dam: bool) -> EffectResult {
    let id = ctx.item();
    let Some(item) = ctx.caster().item(id) else {
        return EffectResult::failure("You are not carrying that.");
    };
    if !item.is_weapon() {
        return EffectResult::failure("That is not a weapon.");
    }
    let name = item.name.clone();
    let (cur_hit, cur_dam) = (item.to_hit, item.to_dam);

    let mut hit_gain = 0;
    let mut dam_gain = 0;
    if to_hit {
        hit_gain = attempt(cur_hit, ENCHANT_CAP_HIT_AC, &FAILURE_HIT_AC, ctx.rng);
    }
    if to_dam {
        dam_gain = attempt(cur_dam, ENCHANT_CAP_DAM, &FAILURE_DAM, ctx.rng);
    }

    if hit_gain == 0 && dam_gain == 0 {
        return EffectResult::noop("The enchantment fails.");
    }

    let item = ctx.caster_mut().item_mut(id).expect("item checked above");
    item.to_hit += hit_gain;
    item.to_dam += dam_gain;
    EffectResult::success(format!("Your {name} glows brightly!")).with_item(id)
}

/// Enchant armor's armor-class bonus. A non-armor item is a hard failure.
pub(crate) fn enchant_armor(ctx: &mut ExecutionContext) -> EffectResult {
    let id = ctx.item();
    let Some(item) = ctx.caster().item(id) else {
        return EffectResult::failure("You are not carrying that.");
    };
    if !item.is_armor() {
        return EffectResult::failure("That is not armor.");
    }
    let name = item.name.clone();
    let gain = attempt(item.to_ac, ENCHANT_CAP_HIT_AC, &FAILURE_HIT_AC, ctx.rng);
    if gain == 0 {
        return EffectResult::noop("The enchantment fails.");
    }

    let item = ctx.caster_mut().item_mut(id).expect("item checked above");
    item.to_ac += gain;
    EffectResult::success(format!("Your {name} glows brightly!")).with_item(id)
}

/// Lift a curse. An uncursed item is an expected no-op.
pub(crate) fn remove_curse(ctx: &mut ExecutionContext) -> EffectResult {
    let Some(item) = fetch_item(ctx) else {
        return EffectResult::failure("You are not carrying that.");
    };
    let id = item.id;
    let name = item.name.clone();
    if !item.cursed {
        return EffectResult::noop("Nothing happens.");
    }
    item.cursed = false;
    EffectResult::success(format!("The curse on your {name} is broken.")).with_item(id)
}

/// Lay a curse. Artifacts resist; an already cursed item is a no-op.
pub(crate) fn curse_item(ctx: &mut ExecutionContext) -> EffectResult {
    let Some(item) = fetch_item(ctx) else {
        return EffectResult::failure("You are not carrying that.");
    };
    let id = item.id;
    let name = item.name.clone();
    if item.artifact {
        return EffectResult::noop(format!("Your {name} resists the curse!"));
    }
    if item.cursed {
        return EffectResult::noop(format!("The {name} is already cursed."));
    }
    item.cursed = true;
    EffectResult::success(format!("A black aura surrounds your {name}.")).with_item(id)
}

/// Add charges to a wand-like item, clamped to its maximum. Chargeless and
/// already-full items are expected no-ops.
pub(crate) fn recharge(ctx: &mut ExecutionContext, amount: Dice) -> EffectResult {
    let rolled = amount.roll(ctx.rng).max(0) as u32;
    let Some(item) = fetch_item(ctx) else {
        return EffectResult::failure("You are not carrying that.");
    };
    let id = item.id;
    let name = item.name.clone();
    let (Some(charges), Some(max)) = (item.charges, item.max_charges) else {
        return EffectResult::noop("Nothing happens.");
    };
    if charges >= max {
        return EffectResult::noop(format!("The {name} is already fully charged."));
    }
    item.charges = Some((charges + rolled).min(max));
    EffectResult::success(format!("The {name} glows briefly.")).with_item(id)
}
