//! Delayed archetype: a countdown fuse.

use crate::effects::{EffectDefinition, Target};

use super::{SpawnedEffect, TickResult};

/// A fuse that fires its payload when the countdown runs out, with an
/// optional warning window in the final turns.
#[derive(Clone, Debug)]
pub struct DelayedEffect {
    /// Turns until the payload fires. A countdown of 3 fires on the
    /// third advance.
    pub countdown: u32,
    /// Emit a warning message while `countdown <= warning_turns`.
    pub warning_turns: u32,
    pub payload: EffectDefinition,
    pub target: Target,
    fired: bool,
}

impl DelayedEffect {
    #[must_use]
    pub fn new(countdown: u32, warning_turns: u32, payload: EffectDefinition, target: Target) -> Self {
        Self {
            countdown,
            warning_turns,
            payload,
            target,
            fired: false,
        }
    }

    pub(crate) fn advance(&mut self, out: &mut TickResult) {
        if self.fired {
            return;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.fired = true;
            out.spawned.push(SpawnedEffect {
                definition: self.payload.clone(),
                target: self.target,
            });
            return;
        }
        if self.countdown <= self.warning_turns {
            out.messages.push("You hear an ominous rumbling.".to_string());
        }
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.fired
    }
}
