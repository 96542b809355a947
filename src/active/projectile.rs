//! Projectile archetype: a payload in flight toward a fixed target tile.

use crate::core::{distance, line_between, Position};
use crate::effects::{EffectDefinition, Target};
use crate::world::Level;

use super::{SpawnedEffect, TickResult};

/// A payload travelling in a straight line. Each turn it covers up to
/// `speed` tiles; it detonates where it first meets an actor, or at the
/// target tile on arrival.
#[derive(Clone, Debug)]
pub struct ProjectileEffect {
    pub pos: Position,
    pub target: Position,
    pub speed: i32,
    /// Declaration spawned at the impact tile.
    pub on_hit: EffectDefinition,
    landed: bool,
}

impl ProjectileEffect {
    #[must_use]
    pub fn new(pos: Position, target: Position, speed: i32, on_hit: EffectDefinition) -> Self {
        Self {
            pos,
            target,
            speed,
            on_hit,
            landed: false,
        }
    }

    fn land(&mut self, at: Position, out: &mut TickResult) {
        self.pos = at;
        self.landed = true;
        out.spawned.push(SpawnedEffect {
            definition: self.on_hit.clone(),
            target: Target::Position(at),
        });
    }

    pub(crate) fn advance(&mut self, level: &Level, out: &mut TickResult) {
        if self.landed {
            return;
        }
        if distance(self.pos, self.target) <= self.speed {
            self.land(self.target, out);
            return;
        }
        let path = line_between(self.pos, self.target);
        let mut travelled = self.pos;
        for &tile in path.iter().take(self.speed.max(0) as usize) {
            travelled = tile;
            if level.actor_at(tile).is_some() {
                self.land(tile, out);
                return;
            }
        }
        self.pos = travelled;
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.landed
    }
}
