//! Area archetype: a lingering cloud that pulses every turn.

use crate::core::Position;
use crate::effects::{EffectDefinition, Target};
use crate::world::Level;

use super::{SpawnedEffect, TickResult};

/// A stationary field that applies its pulse to everything inside it once
/// per turn, then fades when its duration runs out.
#[derive(Clone, Debug)]
pub struct AreaEffect {
    pub pos: Position,
    pub radius: i32,
    /// Turns left. A duration of 1 pulses exactly once.
    pub remaining: u32,
    /// Declaration spawned once per occupant per tick.
    pub pulse: EffectDefinition,
}

impl AreaEffect {
    #[must_use]
    pub fn new(pos: Position, radius: i32, duration: u32, pulse: EffectDefinition) -> Self {
        Self {
            pos,
            radius,
            remaining: duration,
            pulse,
        }
    }

    pub(crate) fn advance(&mut self, level: &Level, out: &mut TickResult) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        // Tile scan, not a player handle: the caster is caught like anyone
        // else standing in the cloud.
        for id in level.actors_in_radius(self.pos, self.radius) {
            let occupant = level.actor(id).expect("radius query returned a live id");
            out.spawned.push(SpawnedEffect {
                definition: self.pulse.clone(),
                target: Target::Position(occupant.pos),
            });
        }
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Actor;

    fn pulse() -> EffectDefinition {
        EffectDefinition::new("ball")
            .with_param("element", "poison")
            .with_param("damage", "2d4")
            .with_param("radius", 0)
    }

    #[test]
    fn test_pulses_once_per_occupant() {
        let mut level = Level::new(20, 20, 1);
        level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(10, 10)));
        level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(11, 10)));
        level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(18, 18)));

        let mut cloud = AreaEffect::new(Position::new(10, 10), 2, 3, pulse());
        let mut out = TickResult::default();
        cloud.advance(&level, &mut out);

        // The far rat is outside the radius; the caster is not exempt.
        assert_eq!(out.spawned.len(), 2);
        assert_eq!(cloud.remaining, 2);
        assert!(!cloud.expired());
    }

    #[test]
    fn test_duration_one_expires_after_single_advance() {
        let level = Level::new(10, 10, 1);
        let mut cloud = AreaEffect::new(Position::new(5, 5), 2, 1, pulse());
        assert!(!cloud.expired());

        let mut out = TickResult::default();
        cloud.advance(&level, &mut out);
        assert!(cloud.expired());

        // A further advance does nothing.
        let mut out = TickResult::default();
        cloud.advance(&level, &mut out);
        assert!(out.spawned.is_empty());
    }
}
