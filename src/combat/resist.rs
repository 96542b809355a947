//! The shared elemental damage and resistance calculator.
//!
//! Two independent models:
//!
//! - **Player side**: a numeric resistance level starting at 9 (no
//!   resistance). Immunity pins it to 0; every independent resistance
//!   source (equipment grant, temporary oppose buff) divides it by 3;
//!   vulnerability doubles it. Final damage is `(damage * level + 8) / 9`
//!   - ceiling-biased integer scaling - and level 0 always means zero.
//!
//! - **Monster side**: a four-way status derived from flag membership only.
//!   Immune divides by 9, resists scales by `3/r` with `r` uniform in
//!   `[7, 12]`, vulnerable doubles, normal passes through.
//!
//! Everything is pure except the monster resist divisor roll, which draws
//! from the shared RNG so that a fixed seed replays identically.

use crate::core::GameRng;
use crate::world::Actor;

use super::element::Element;

/// Baseline resistance level: no resistance at all.
pub const NO_RESISTANCE: u32 = 9;

/// How a monster's flags relate to one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterResistStatus {
    Immune,
    Resists,
    Vulnerable,
    Normal,
}

/// Compute a player-side resistance level from its sources.
///
/// `resist_sources` counts independent divisors (equipment grant and
/// temporary oppose buff are each one source).
#[must_use]
pub fn resistance_level(immune: bool, resist_sources: u32, vulnerable: bool) -> u32 {
    if immune {
        return 0;
    }
    let mut level = NO_RESISTANCE;
    for _ in 0..resist_sources {
        level /= 3;
    }
    if vulnerable {
        level *= 2;
    }
    level
}

/// The player-side resistance level of an actor for one element.
///
/// Reads equipment-granted element sets and temporary oppose statuses.
/// Monsters do not use this model; see [`monster_resist_status`].
#[must_use]
pub fn player_resist_level(actor: &Actor, element: Element) -> u32 {
    let Some(player) = actor.player_state() else {
        return NO_RESISTANCE;
    };

    let immune = player.immunities.contains(&element);
    let mut sources = 0;
    if player.resists.contains(&element) {
        sources += 1;
    }
    if actor.has_oppose(element) {
        sources += 1;
    }
    let vulnerable = player.vulnerabilities.contains(&element);

    resistance_level(immune, sources, vulnerable)
}

/// Scale damage by a player-side resistance level.
///
/// Level 0 is total immunity and yields exactly 0, bypassing the formula.
#[must_use]
pub fn scale_player_damage(damage: u32, level: u32) -> u32 {
    if level == 0 {
        return 0;
    }
    (damage * level + 8) / 9
}

/// Derive a monster's resist status for one element from its flags.
///
/// Precedence: immune over resists over vulnerable. Elements with no flag
/// mapping are always `Normal`.
#[must_use]
pub fn monster_resist_status(actor: &Actor, element: Element) -> MonsterResistStatus {
    let Some(flags) = element.flags() else {
        return MonsterResistStatus::Normal;
    };

    if flags.immune.is_some_and(|f| actor.has_flag(f)) {
        MonsterResistStatus::Immune
    } else if flags.resist.is_some_and(|f| actor.has_flag(f)) {
        MonsterResistStatus::Resists
    } else if flags.vulnerable.is_some_and(|f| actor.has_flag(f)) {
        MonsterResistStatus::Vulnerable
    } else {
        MonsterResistStatus::Normal
    }
}

/// Scale damage by a monster's resist status.
///
/// The resist divisor is the only random draw in the calculator.
#[must_use]
pub fn scale_monster_damage(damage: u32, status: MonsterResistStatus, rng: &mut GameRng) -> u32 {
    match status {
        MonsterResistStatus::Immune => damage / 9,
        MonsterResistStatus::Resists => {
            let divisor = rng.range(7, 12) as u32;
            damage * 3 / divisor
        }
        MonsterResistStatus::Vulnerable => damage * 2,
        MonsterResistStatus::Normal => damage,
    }
}

/// Outcome of applying elemental damage to one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementalHit {
    /// Damage actually subtracted from the target's HP.
    pub dealt: u32,
    /// True when resistance reduced the hit to nothing.
    pub unaffected: bool,
}

/// Apply elemental damage to an actor through the appropriate model.
///
/// Draw order is fixed: at most one draw (the monster resist divisor),
/// after the caller has already rolled the base damage.
pub fn apply_elemental_damage(
    target: &mut Actor,
    element: Element,
    damage: u32,
    rng: &mut GameRng,
) -> ElementalHit {
    let scaled = if target.is_player() {
        let level = player_resist_level(target, element);
        scale_player_damage(damage, level)
    } else {
        let status = monster_resist_status(target, element);
        scale_monster_damage(damage, status, rng)
    };

    let dealt = target.take_damage(scaled);
    ElementalHit {
        dealt,
        unaffected: scaled == 0,
    }
}
