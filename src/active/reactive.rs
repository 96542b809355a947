//! Reactive archetype: a ward attached to an actor, triggered by events.

use crate::core::ActorId;
use crate::effects::{EffectDefinition, Target};
use crate::world::Level;

use super::SpawnedEffect;

/// A qualifying game event, reported out-of-band by the turn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DamageTaken { actor: ActorId, amount: u32 },
    AttackMade { attacker: ActorId, target: ActorId },
}

/// Which event class a reactive effect listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    DamageTaken,
    AttackMade,
}

/// A ward attached to a host actor. Its duration ticks down once per turn
/// like any other active effect, but its response fires out-of-band when a
/// qualifying event touches the host. It dies with the host.
#[derive(Clone, Debug)]
pub struct ReactiveEffect {
    pub attached: ActorId,
    pub remaining: u32,
    pub trigger: TriggerKind,
    /// Declaration spawned on each trigger.
    pub response: EffectDefinition,
}

impl ReactiveEffect {
    #[must_use]
    pub fn new(attached: ActorId, duration: u32, trigger: TriggerKind, response: EffectDefinition) -> Self {
        Self {
            attached,
            remaining: duration,
            trigger,
            response,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Does this event concern the host and match the listened-for kind?
    #[must_use]
    pub fn should_trigger(&self, event: GameEvent) -> bool {
        if self.remaining == 0 {
            return false;
        }
        match (self.trigger, event) {
            (TriggerKind::DamageTaken, GameEvent::DamageTaken { actor, .. }) => {
                actor == self.attached
            }
            (TriggerKind::AttackMade, GameEvent::AttackMade { target, .. }) => {
                target == self.attached
            }
            _ => false,
        }
    }

    /// Build the response declaration for a triggering event. Retaliatory
    /// triggers aim at the attacker; the rest aim at the host's own tile.
    #[must_use]
    pub fn on_trigger(&self, event: GameEvent, level: &Level) -> Option<SpawnedEffect> {
        let aim_at = match event {
            GameEvent::AttackMade { attacker, .. } => attacker,
            GameEvent::DamageTaken { actor, .. } => actor,
        };
        let pos = level.actor(aim_at)?.pos;
        Some(SpawnedEffect {
            definition: self.response.clone(),
            target: Target::Position(pos),
        })
    }

    #[must_use]
    pub fn expired(&self, level: &Level) -> bool {
        self.remaining == 0
            || level
                .actor(self.attached)
                .map_or(true, |host| !host.is_alive())
    }
}
