//! Core types: identifiers, deterministic RNG, dice expressions, geometry.

mod dice;
mod entity;
mod geometry;
mod rng;

pub use dice::{Dice, DiceError};
pub use entity::{ActiveEffectId, ActorId, ItemId};
pub use geometry::{distance, line_between, point_line_distance, Direction, Position};
pub use rng::{GameRng, GameRngState};
