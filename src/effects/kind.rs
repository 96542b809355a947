//! The closed effect enumeration.
//!
//! Every one-shot effect is one variant here, grouped by targeting mode.
//! A variant carries its parsed parameters; the registry builds variants
//! from definitions, and `execute` pattern-matches into the executor for
//! that family. New effects are added by introducing a variant and its
//! executor, never by touching dispatch call sites.

use crate::combat::Element;
use crate::core::Dice;
use crate::world::{Stat, StatusId};

use super::context::{ExecutionContext, TargetingMode};
use super::crowd::CrowdScope;
use super::engine::Resources;
use super::result::{DetectKind, EffectResult};
use super::{attack, compound, crowd, detect, enchant, motion, restore, status_fx, summon, terrain_fx};

/// A constructed, executable effect.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectKind {
    // Caster-targeted.
    Heal { amount: Dice },
    RestoreMana { amount: Dice },
    CureStatuses { statuses: Vec<StatusId> },
    RestoreStats { stats: Vec<Stat> },
    ApplyStatus { status: StatusId, duration: Dice, intensity: Dice },
    Detect { kinds: Vec<DetectKind>, radius: i32 },
    MagicMapping { radius: i32 },
    LightArea { radius: i32 },
    TeleportSelf { range: i32 },
    TeleportLevel,
    WordOfRecall,
    Earthquake { radius: i32, damage: Dice },
    CreateStairs,
    GlyphOfWarding,
    SummonMonsters { count: Dice },
    MassGenocide { radius: i32, strain: u32 },
    Omnicide { strain: u32 },
    CharmCrowd { scope: CrowdScope, power: u32, duration: Dice },
    Banish { power: u32 },
    MassStasis { power: u32, duration: Dice },
    Wonder { pool: Vec<EffectKind> },
    CallChaos { pool: Vec<(u32, EffectKind)> },

    // Item-targeted.
    Identify,
    EnchantWeapon { to_hit: bool, to_dam: bool },
    EnchantArmor,
    RemoveCurse,
    CurseItem,
    Recharge { amount: Dice },

    // Symbol-targeted.
    Genocide { strain: u32 },

    // Direction-targeted.
    StoneToMud { range: i32 },
    Dig { range: i32 },

    // Position-targeted.
    Bolt { element: Element, damage: Dice },
    Beam { element: Element, damage: Dice },
    Ball { element: Element, damage: Dice, radius: i32 },
    Breath { element: Element, damage: Dice, radius: i32 },
    DrainLife { damage: Dice },
    StatusBolt { status: StatusId, duration: Dice, power: u32 },
    TeleportOther { range: i32, power: u32 },
    Polymorph { power: u32 },
    CloneMonster,
}

impl EffectKind {
    /// The single targeting mode this effect declares.
    #[must_use]
    pub fn targeting(&self) -> TargetingMode {
        use EffectKind::*;
        match self {
            Heal { .. } | RestoreMana { .. } | CureStatuses { .. } | RestoreStats { .. }
            | ApplyStatus { .. } | Detect { .. } | MagicMapping { .. } | LightArea { .. }
            | TeleportSelf { .. } | TeleportLevel | WordOfRecall | Earthquake { .. }
            | CreateStairs | GlyphOfWarding | SummonMonsters { .. } | MassGenocide { .. }
            | Omnicide { .. } | CharmCrowd { .. } | Banish { .. } | MassStasis { .. }
            | Wonder { .. } | CallChaos { .. } => TargetingMode::Caster,

            Identify | EnchantWeapon { .. } | EnchantArmor | RemoveCurse | CurseItem
            | Recharge { .. } => TargetingMode::Item,

            Genocide { .. } => TargetingMode::Symbol,

            StoneToMud { .. } | Dig { .. } => TargetingMode::Direction,

            Bolt { .. } | Beam { .. } | Ball { .. } | Breath { .. } | DrainLife { .. }
            | StatusBolt { .. } | TeleportOther { .. } | Polymorph { .. } | CloneMonster => {
                TargetingMode::Position
            }
        }
    }

    /// Can this effect run against the given context? True iff the
    /// context's resolved target satisfies the declared targeting mode.
    #[must_use]
    pub fn can_execute(&self, ctx: &ExecutionContext) -> bool {
        ctx.satisfies(self.targeting())
    }

    /// Execute against a context. Call only after [`can_execute`]
    /// (the target accessors panic otherwise).
    ///
    /// [`can_execute`]: Self::can_execute
    pub fn execute(&self, ctx: &mut ExecutionContext, resources: &Resources) -> EffectResult {
        match self {
            EffectKind::Heal { amount } => restore::heal(ctx, *amount),
            EffectKind::RestoreMana { amount } => restore::restore_mana(ctx, *amount),
            EffectKind::CureStatuses { statuses } => restore::cure_statuses(ctx, statuses),
            EffectKind::RestoreStats { stats } => restore::restore_stats(ctx, stats),
            EffectKind::ApplyStatus {
                status,
                duration,
                intensity,
            } => status_fx::apply_status(ctx, *status, *duration, *intensity),
            EffectKind::Detect { kinds, radius } => detect::detect(ctx, kinds, *radius),
            EffectKind::MagicMapping { radius } => detect::magic_mapping(ctx, *radius),
            EffectKind::LightArea { radius } => detect::light_area(ctx, *radius),
            EffectKind::TeleportSelf { range } => motion::teleport_self(ctx, *range),
            EffectKind::TeleportLevel => motion::teleport_level(ctx),
            EffectKind::WordOfRecall => motion::word_of_recall(ctx),
            EffectKind::Earthquake { radius, damage } => {
                terrain_fx::earthquake(ctx, *radius, *damage)
            }
            EffectKind::CreateStairs => terrain_fx::create_stairs(ctx),
            EffectKind::GlyphOfWarding => terrain_fx::glyph_of_warding(ctx),
            EffectKind::SummonMonsters { count } => {
                summon::summon_monsters(ctx, resources, *count)
            }
            EffectKind::MassGenocide { radius, strain } => {
                summon::mass_genocide(ctx, *radius, *strain)
            }
            EffectKind::Omnicide { strain } => summon::omnicide(ctx, *strain),
            EffectKind::CharmCrowd {
                scope,
                power,
                duration,
            } => crowd::charm_crowd(ctx, *scope, *power, *duration),
            EffectKind::Banish { power } => crowd::banish(ctx, *power),
            EffectKind::MassStasis { power, duration } => {
                crowd::mass_stasis(ctx, *power, *duration)
            }
            EffectKind::Wonder { pool } => compound::wonder(ctx, resources, pool),
            EffectKind::CallChaos { pool } => compound::call_chaos(ctx, resources, pool),

            EffectKind::Identify => enchant::identify(ctx),
            EffectKind::EnchantWeapon { to_hit, to_dam } => {
                enchant::enchant_weapon(ctx, *to_hit, *to_dam)
            }
            EffectKind::EnchantArmor => enchant::enchant_armor(ctx),
            EffectKind::RemoveCurse => enchant::remove_curse(ctx),
            EffectKind::CurseItem => enchant::curse_item(ctx),
            EffectKind::Recharge { amount } => enchant::recharge(ctx, *amount),

            EffectKind::Genocide { strain } => summon::genocide(ctx, *strain),

            EffectKind::StoneToMud { range } => terrain_fx::stone_to_mud(ctx, *range),
            EffectKind::Dig { range } => terrain_fx::dig(ctx, *range),

            EffectKind::Bolt { element, damage } => attack::bolt(ctx, *element, *damage),
            EffectKind::Beam { element, damage } => attack::beam(ctx, *element, *damage),
            EffectKind::Ball {
                element,
                damage,
                radius,
            } => attack::ball(ctx, *element, *damage, *radius),
            EffectKind::Breath {
                element,
                damage,
                radius,
            } => attack::breath(ctx, *element, *damage, *radius),
            EffectKind::DrainLife { damage } => attack::drain_life(ctx, *damage),
            EffectKind::StatusBolt {
                status,
                duration,
                power,
            } => status_fx::status_bolt(ctx, *status, *duration, *power),
            EffectKind::TeleportOther { range, power } => {
                motion::teleport_other(ctx, *range, *power)
            }
            EffectKind::Polymorph { power } => summon::polymorph(ctx, resources, *power),
            EffectKind::CloneMonster => summon::clone_monster(ctx),
        }
    }
}
