//! Dice expressions.
//!
//! Effect definitions encode random magnitudes as strings: `"3d8"`,
//! `"2d6+4"`, `"15+1d25"`, or a plain constant like `"7"`. The grammar is
//! `[base+]NdM[+bonus]` where any piece may be absent. Parsing happens at
//! effect construction time, so a malformed expression is a configuration
//! error, never a gameplay one.
//!
//! Rolling consumes exactly `rolls` draws from the shared RNG, in order,
//! which keeps replays of a fixed seed stable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::GameRng;

/// A parsed dice expression: `base + rolls d sides`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    /// Constant added to the rolled total.
    pub base: i32,
    /// Number of dice rolled.
    pub rolls: u32,
    /// Sides per die. Zero when the expression is a plain constant.
    pub sides: u32,
}

/// Error parsing a dice expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("empty dice expression")]
    Empty,
    #[error("malformed dice expression: {0:?}")]
    Malformed(String),
}

impl Dice {
    /// A fixed, non-random amount.
    #[must_use]
    pub const fn constant(value: i32) -> Self {
        Self {
            base: value,
            rolls: 0,
            sides: 0,
        }
    }

    /// A plain `NdM` roll.
    #[must_use]
    pub const fn new(rolls: u32, sides: u32) -> Self {
        Self {
            base: 0,
            rolls,
            sides,
        }
    }

    /// Add a constant to the roll.
    #[must_use]
    pub const fn plus(mut self, base: i32) -> Self {
        self.base += base;
        self
    }

    /// Roll the dice. Consumes exactly `rolls` draws.
    pub fn roll(&self, rng: &mut GameRng) -> i32 {
        let mut total = self.base;
        if self.sides > 0 {
            for _ in 0..self.rolls {
                total += rng.range(1, self.sides as i32);
            }
        }
        total
    }

    /// Smallest possible result.
    #[must_use]
    pub fn min(&self) -> i32 {
        if self.sides > 0 {
            self.base + self.rolls as i32
        } else {
            self.base
        }
    }

    /// Largest possible result.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.base + (self.rolls * self.sides) as i32
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DiceError::Empty);
        }

        let malformed = || DiceError::Malformed(s.to_string());

        let mut base: i32 = 0;
        let mut rolls: u32 = 0;
        let mut sides: u32 = 0;

        for part in s.split('+') {
            let part = part.trim();
            if part.is_empty() {
                return Err(malformed());
            }
            if let Some((n, m)) = part.split_once(['d', 'D']) {
                if sides != 0 {
                    // Only one dice term allowed per expression.
                    return Err(malformed());
                }
                // "d8" reads as "1d8"
                rolls = if n.is_empty() {
                    1
                } else {
                    n.parse().map_err(|_| malformed())?
                };
                sides = m.parse().map_err(|_| malformed())?;
                if rolls == 0 || sides == 0 {
                    return Err(malformed());
                }
            } else {
                let value: i32 = part.parse().map_err(|_| malformed())?;
                base += value;
            }
        }

        Ok(Self { base, rolls, sides })
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.base, self.sides) {
            (b, 0) => write!(f, "{}", b),
            (0, _) => write!(f, "{}d{}", self.rolls, self.sides),
            (b, _) => write!(f, "{}+{}d{}", b, self.rolls, self.sides),
        }
    }
}
