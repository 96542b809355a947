//! Combat: elements and the shared damage/resistance calculator.

mod element;
mod resist;

pub use element::{Element, ElementFlags};
pub use resist::{
    apply_elemental_damage, monster_resist_status, player_resist_level, resistance_level,
    scale_monster_damage, scale_player_damage, ElementalHit, MonsterResistStatus, NO_RESISTANCE,
};
