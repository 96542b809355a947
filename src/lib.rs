//! # rogue-effects
//!
//! A deterministic gameplay-effect engine for a turn-based dungeon game.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Effects are declared as [`EffectDefinition`] values
//!    (externally authored, serde-friendly) and built into executable
//!    [`EffectKind`] variants by the [`EffectRegistry`].
//!
//! 2. **Deterministic**: A single seeded [`GameRng`] is threaded through
//!    every execution; each effect documents its draw order, so a seed
//!    replays a whole cast exactly.
//!
//! 3. **Explicit Dependencies**: No globals. The [`EffectEngine`] owns the
//!    registry and shared resources and is passed to every call site.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, seeded RNG, dice expressions, grid geometry
//! - `world`: Levels, terrain, actors, items, statuses, the bestiary
//! - `combat`: Elements and the resistance/damage calculator
//! - `effects`: One-shot effect definitions, registry, and executors
//! - `active`: Persistent multi-turn effects (clouds, projectiles,
//!   fuses, wards)

pub mod active;
pub mod combat;
pub mod core;
pub mod effects;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    ActiveEffectId, ActorId, Dice, DiceError, Direction, GameRng, GameRngState, ItemId, Position,
};

pub use crate::world::{Actor, Bestiary, Item, Level, Stat, Status, StatusId, Terrain};

pub use crate::combat::{apply_elemental_damage, Element};

pub use crate::effects::{
    EffectDefinition, EffectEngine, EffectError, EffectKind, EffectRegistry, EffectResult,
    ExecutionContext, Outcome, Resources, Target, TargetingMode,
};

pub use crate::active::{
    ActiveEffect, ActiveEffectBook, Archetype, GameEvent, SpawnedEffect, TickResult,
};
