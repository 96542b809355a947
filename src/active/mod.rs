//! Persistent, multi-turn world effects.
//!
//! Active effects live in a level-owned book and are advanced once per
//! game turn. An advance never executes anything itself: archetypes report
//! follow-up work as [`SpawnedEffect`] declarations, and the turn loop
//! feeds those back through the one-shot engine. That keeps the dependency
//! one-way - the active subsystem produces declarations, it never consumes
//! them.

mod area;
mod delayed;
mod projectile;
mod reactive;

pub use area::AreaEffect;
pub use delayed::DelayedEffect;
pub use projectile::ProjectileEffect;
pub use reactive::{GameEvent, ReactiveEffect, TriggerKind};

use tracing::trace;

use crate::core::ActiveEffectId;
use crate::effects::{EffectDefinition, Target};
use crate::world::Level;

/// A one-shot declaration produced by an active effect, to be executed by
/// the owning turn loop.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnedEffect {
    pub definition: EffectDefinition,
    pub target: Target,
}

/// Everything one advance (or event dispatch) produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickResult {
    pub messages: Vec<String>,
    pub spawned: Vec<SpawnedEffect>,
}

impl TickResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.spawned.is_empty()
    }
}

/// One of the four behavioral archetypes.
#[derive(Clone, Debug)]
pub enum Archetype {
    Area(AreaEffect),
    Projectile(ProjectileEffect),
    Delayed(DelayedEffect),
    Reactive(ReactiveEffect),
}

/// A persistent effect resident in the world.
#[derive(Clone, Debug)]
pub struct ActiveEffect {
    pub id: ActiveEffectId,
    pub archetype: Archetype,
}

impl ActiveEffect {
    fn advance(&mut self, level: &Level, out: &mut TickResult) {
        match &mut self.archetype {
            Archetype::Area(area) => area.advance(level, out),
            Archetype::Projectile(shot) => shot.advance(level, out),
            Archetype::Delayed(fuse) => fuse.advance(out),
            Archetype::Reactive(ward) => ward.advance(),
        }
    }

    #[must_use]
    fn expired(&self, level: &Level) -> bool {
        match &self.archetype {
            Archetype::Area(area) => area.expired(),
            Archetype::Projectile(shot) => shot.expired(),
            Archetype::Delayed(fuse) => fuse.expired(),
            Archetype::Reactive(ward) => ward.expired(level),
        }
    }
}

/// The level-owned list of active effects.
#[derive(Clone, Debug, Default)]
pub struct ActiveEffectBook {
    effects: Vec<ActiveEffect>,
    next_id: u32,
}

impl ActiveEffectBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect, returning its id.
    pub fn add(&mut self, archetype: Archetype) -> ActiveEffectId {
        self.next_id += 1;
        let id = ActiveEffectId::new(self.next_id);
        self.effects.push(ActiveEffect { id, archetype });
        id
    }

    #[must_use]
    pub fn get(&self, id: ActiveEffectId) -> Option<&ActiveEffect> {
        self.effects.iter().find(|effect| effect.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Advance every effect one turn in insertion order, then drop the
    /// expired ones.
    pub fn advance_all(&mut self, level: &Level) -> TickResult {
        let mut out = TickResult::default();
        for effect in &mut self.effects {
            effect.advance(level, &mut out);
        }
        let before = self.effects.len();
        self.effects.retain(|effect| !effect.expired(level));
        trace!(
            advanced = before,
            expired = before - self.effects.len(),
            spawned = out.spawned.len(),
            "advanced active effects"
        );
        out
    }

    /// Offer a game event to every reactive effect, collecting the
    /// responses of those that trigger. Non-reactive effects ignore events.
    pub fn dispatch_event(&self, event: GameEvent, level: &Level) -> TickResult {
        let mut out = TickResult::default();
        for effect in &self.effects {
            let Archetype::Reactive(ward) = &effect.archetype else {
                continue;
            };
            if !ward.should_trigger(event) {
                continue;
            }
            if let Some(spawned) = ward.on_trigger(event, level) {
                trace!(id = effect.id.raw(), "reactive effect triggered");
                out.spawned.push(spawned);
            }
        }
        out
    }
}
