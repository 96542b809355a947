//! The seeded RNG behind every dice roll, saving throw, and pool draw.
//!
//! One `GameRng` is threaded through an entire effect execution, and each
//! effect fixes the order of its draws, so a saved seed replays a cast
//! move for move. The primitive surface is deliberately small: uniform
//! integers in `[a, b]` and uniform floats in `[0, 1)`; dice expressions,
//! percentile checks, and weighted pools all bottom out in those two.
//!
//! State capture is a seed plus a ChaCha8 word position, so checkpoints
//! cost the same no matter how many values have been drawn.
//!
//! ```
//! use rogue_effects::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.range(1, 100), b.range(1, 100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic game RNG.
///
/// ChaCha8 underneath, picked for speed and for its cheap word-position
/// state capture.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform integer in `[min, max]` inclusive.
    ///
    /// If `min >= max`, returns `min` without consuming a draw.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }

    /// One chance in `n`. `one_in(1)` is always true.
    pub fn one_in(&mut self, n: u32) -> bool {
        if n <= 1 {
            return true;
        }
        self.range(1, n as i32) == 1
    }

    /// True with probability `percent / 100`.
    pub fn percent(&mut self, percent: u32) -> bool {
        if percent >= 100 {
            return true;
        }
        self.range(1, 100) <= percent as i32
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let idx = self.range(0, slice.len() as i32 - 1) as usize;
        Some(&slice[idx])
    }

    /// Choose a random index with weighted probability.
    ///
    /// Weights do not need to sum to anything. Returns `None` if weights
    /// are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let mut threshold = (self.unit() * total as f64) as u64;
        for (i, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if threshold < weight {
                return Some(i);
            }
            threshold -= weight;
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|&w| w > 0)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for replay checkpoints.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
