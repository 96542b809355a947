//! World model: levels, terrain, actors, items, statuses, and the bestiary.
//!
//! These are the collaborator surfaces the effect engine runs against:
//! level queries, actor capabilities, and monster-definition lookup.
//! Dungeon generation, item generation, and the turn scheduler live
//! outside this crate and populate these types.

mod actor;
mod bestiary;
mod item;
mod level;
mod status;
mod terrain;

pub use actor::{Actor, ActorKind, MonsterState, PlayerState, Stat, StatValue, Stats};
pub use bestiary::{Bestiary, MonsterFlag, MonsterKind};
pub use item::{Item, ItemKind};
pub use level::Level;
pub use status::{Status, StatusBook, StatusId};
pub use terrain::{Terrain, Tile};
