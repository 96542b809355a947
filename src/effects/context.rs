//! Targeting modes and the execution context.
//!
//! The context is transient: the caller resolves a target, builds a
//! context, runs the effect(s), and discards it. Exactly one target field
//! matters per targeting mode; the accessors panic when read without the
//! mode's precondition having been checked, because that is a programming
//! error, never a gameplay condition.

use crate::core::{ActorId, Direction, GameRng, ItemId, Position};
use crate::world::{Actor, Level};

/// The category of target an effect requires before it may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetingMode {
    /// The acting entity itself; always satisfiable.
    Caster,
    Item,
    Symbol,
    Direction,
    Position,
}

/// The resolved target carried by a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    None,
    Item(ItemId),
    Symbol(char),
    Direction(Direction),
    Position(Position),
}

/// Per-invocation execution context.
///
/// Holds the acting entity, the level, the shared RNG, and zero or one
/// resolved target. Never persisted.
pub struct ExecutionContext<'a> {
    pub actor: ActorId,
    pub level: &'a mut Level,
    pub rng: &'a mut GameRng,
    pub target: Target,
}

impl<'a> ExecutionContext<'a> {
    /// Create a context with no target resolved.
    pub fn new(actor: ActorId, level: &'a mut Level, rng: &'a mut GameRng) -> Self {
        Self {
            actor,
            level,
            rng,
            target: Target::None,
        }
    }

    /// Set the resolved target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Does the resolved target satisfy a targeting mode? This is the
    /// `can_execute` answer for every effect of that mode.
    #[must_use]
    pub fn satisfies(&self, mode: TargetingMode) -> bool {
        match mode {
            TargetingMode::Caster => true,
            TargetingMode::Item => matches!(self.target, Target::Item(_)),
            TargetingMode::Symbol => matches!(self.target, Target::Symbol(_)),
            TargetingMode::Direction => matches!(self.target, Target::Direction(_)),
            TargetingMode::Position => matches!(self.target, Target::Position(_)),
        }
    }

    /// The resolved item target.
    ///
    /// Panics if the target is not an item - call only after `can_execute`.
    #[must_use]
    pub fn item(&self) -> ItemId {
        match self.target {
            Target::Item(id) => id,
            _ => panic!("effect executed without a resolved item target"),
        }
    }

    /// The resolved symbol target.
    ///
    /// Panics if the target is not a symbol - call only after `can_execute`.
    #[must_use]
    pub fn symbol(&self) -> char {
        match self.target {
            Target::Symbol(symbol) => symbol,
            _ => panic!("effect executed without a resolved symbol target"),
        }
    }

    /// The resolved direction target.
    ///
    /// Panics if the target is not a direction - call only after
    /// `can_execute`.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self.target {
            Target::Direction(dir) => dir,
            _ => panic!("effect executed without a resolved direction target"),
        }
    }

    /// The resolved position target.
    ///
    /// Panics if the target is not a position - call only after
    /// `can_execute`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self.target {
            Target::Position(pos) => pos,
            _ => panic!("effect executed without a resolved position target"),
        }
    }

    /// The acting entity. Panics if it is not on the level, which is an
    /// invariant violation by the caller.
    #[must_use]
    pub fn caster(&self) -> &Actor {
        self.level
            .actor(self.actor)
            .expect("acting entity not on level")
    }

    /// The acting entity, mutably.
    pub fn caster_mut(&mut self) -> &mut Actor {
        self.level
            .actor_mut(self.actor)
            .expect("acting entity not on level")
    }

    /// The acting entity's position.
    #[must_use]
    pub fn caster_pos(&self) -> Position {
        self.caster().pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Actor;

    fn setup() -> (Level, ActorId) {
        let mut level = Level::new(10, 10, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(5, 5)));
        (level, id)
    }

    #[test]
    fn test_caster_mode_always_satisfied() {
        let (mut level, id) = setup();
        let mut rng = GameRng::new(1);
        let ctx = ExecutionContext::new(id, &mut level, &mut rng);

        assert!(ctx.satisfies(TargetingMode::Caster));
        assert!(!ctx.satisfies(TargetingMode::Item));
        assert!(!ctx.satisfies(TargetingMode::Position));
    }

    #[test]
    fn test_target_satisfies_only_its_mode() {
        let (mut level, id) = setup();
        let mut rng = GameRng::new(1);
        let ctx = ExecutionContext::new(id, &mut level, &mut rng)
            .with_target(Target::Position(Position::new(2, 2)));

        assert!(ctx.satisfies(TargetingMode::Caster));
        assert!(ctx.satisfies(TargetingMode::Position));
        assert!(!ctx.satisfies(TargetingMode::Direction));
        assert_eq!(ctx.position(), Position::new(2, 2));
    }

    #[test]
    #[should_panic(expected = "without a resolved item target")]
    fn test_unchecked_accessor_panics() {
        let (mut level, id) = setup();
        let mut rng = GameRng::new(1);
        let ctx = ExecutionContext::new(id, &mut level, &mut rng);
        let _ = ctx.item();
    }

    #[test]
    fn test_caster_access() {
        let (mut level, id) = setup();
        let mut rng = GameRng::new(1);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        assert_eq!(ctx.caster_pos(), Position::new(5, 5));
        ctx.caster_mut().take_damage(5);
        assert_eq!(ctx.caster().hp, 25);
    }
}
