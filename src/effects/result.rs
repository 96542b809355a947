//! Effect results and the combination algebra.
//!
//! Every execution path produces an [`EffectResult`]: a success flag,
//! whether the game turn was consumed, ordered player-facing messages, and
//! aggregable magnitudes/lists. Zero and empty are the identity values -
//! an absent magnitude is zero, never "unknown".
//!
//! Results fold through [`EffectResult::combine`]: success and
//! turn-consumption are OR'd, messages concatenate in input order, numeric
//! fields sum, list fields concatenate. The fold is associative and
//! order-insensitive on everything except messages, and the empty fold is
//! the failure identity (`success: false`, `turn_consumed: false`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ItemId;
use crate::world::StatusId;

/// What a detection effect looked for. Per-kind counts land in the
/// [`Outcome::Detected`] payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectKind {
    Monsters,
    Doors,
    Stairs,
}

/// Structured payload for effects whose outcome downstream code inspects.
///
/// Effects that would change level identity (recall, level teleport) never
/// perform the transition themselves; they emit a payload and the turn
/// loop acts on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A dungeon-level transition was requested.
    LevelTransition { up: bool },
    /// Word of recall was invoked.
    RecallRequested,
    /// Per-kind counts from a detection effect.
    Detected(Vec<(DetectKind, u32)>),
}

/// The output contract of every effect execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectResult {
    /// Did the effect accomplish anything? Expected no-ops still report
    /// true; false is reserved for actions that should not cost a turn.
    pub success: bool,
    /// Should the game clock advance? Independent of `success`.
    pub turn_consumed: bool,
    /// Player-facing messages, in order of occurrence.
    pub messages: Vec<String>,
    /// Total damage dealt to all targets.
    pub damage_dealt: u32,
    /// Total HP restored.
    pub amount_healed: u32,
    /// Total mana restored.
    pub mana_gained: u32,
    pub statuses_applied: SmallVec<[StatusId; 4]>,
    pub statuses_cured: SmallVec<[StatusId; 4]>,
    pub statuses_reduced: SmallVec<[StatusId; 4]>,
    pub items_affected: SmallVec<[ItemId; 2]>,
    /// Structured outcome, when downstream code must inspect it. Folding
    /// keeps the first payload present.
    pub payload: Option<Outcome>,
}

impl EffectResult {
    /// A successful, turn-consuming result with one message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            turn_consumed: true,
            messages: vec![message.into()],
            ..Self::default()
        }
    }

    /// An expected no-op: nothing there, already done, already at cap.
    ///
    /// Same shape as [`success`](Self::success) - the turn is spent and the
    /// message explains why nothing changed.
    pub fn noop(message: impl Into<String>) -> Self {
        Self::success(message)
    }

    /// A hard failure: the action structurally cannot apply, and the turn
    /// is not consumed. The caller may re-prompt.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            turn_consumed: false,
            messages: vec![message.into()],
            ..Self::default()
        }
    }

    /// Append a message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Add dealt damage (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, amount: u32) -> Self {
        self.damage_dealt += amount;
        self
    }

    /// Add healed HP (builder pattern).
    #[must_use]
    pub fn with_healed(mut self, amount: u32) -> Self {
        self.amount_healed += amount;
        self
    }

    /// Add gained mana (builder pattern).
    #[must_use]
    pub fn with_mana_gained(mut self, amount: u32) -> Self {
        self.mana_gained += amount;
        self
    }

    /// Record an applied status (builder pattern).
    #[must_use]
    pub fn with_status_applied(mut self, id: StatusId) -> Self {
        self.statuses_applied.push(id);
        self
    }

    /// Record a cured status (builder pattern).
    #[must_use]
    pub fn with_status_cured(mut self, id: StatusId) -> Self {
        self.statuses_cured.push(id);
        self
    }

    /// Record a reduced status (builder pattern).
    #[must_use]
    pub fn with_status_reduced(mut self, id: StatusId) -> Self {
        self.statuses_reduced.push(id);
        self
    }

    /// Record an affected item (builder pattern).
    #[must_use]
    pub fn with_item(mut self, id: ItemId) -> Self {
        self.items_affected.push(id);
        self
    }

    /// Attach a structured payload (builder pattern).
    #[must_use]
    pub fn with_payload(mut self, payload: Outcome) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: EffectResult) {
        self.success |= other.success;
        self.turn_consumed |= other.turn_consumed;
        self.messages.extend(other.messages);
        self.damage_dealt += other.damage_dealt;
        self.amount_healed += other.amount_healed;
        self.mana_gained += other.mana_gained;
        self.statuses_applied.extend(other.statuses_applied);
        self.statuses_cured.extend(other.statuses_cured);
        self.statuses_reduced.extend(other.statuses_reduced);
        self.items_affected.extend(other.items_affected);
        if self.payload.is_none() {
            self.payload = other.payload;
        }
    }

    /// Fold a sequence of results into one.
    ///
    /// The empty fold is the failure identity: no success, no turn, no
    /// messages.
    pub fn combine(results: impl IntoIterator<Item = EffectResult>) -> EffectResult {
        let mut combined = EffectResult::default();
        for result in results {
            combined.merge(result);
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fold_is_failure() {
        let combined = EffectResult::combine([]);
        assert!(!combined.success);
        assert!(!combined.turn_consumed);
        assert!(combined.messages.is_empty());
        assert_eq!(combined, EffectResult::default());
    }

    #[test]
    fn test_single_fold_is_identity() {
        let result = EffectResult::success("You feel better.")
            .with_healed(12)
            .with_status_cured(StatusId::Poisoned);
        let combined = EffectResult::combine([result.clone()]);
        assert_eq!(combined, result);
    }

    #[test]
    fn test_success_and_turn_are_any() {
        let combined = EffectResult::combine([
            EffectResult::failure("You cannot do that."),
            EffectResult::success("The orc burns."),
        ]);
        assert!(combined.success);
        assert!(combined.turn_consumed);

        let all_failed = EffectResult::combine([
            EffectResult::failure("a"),
            EffectResult::failure("b"),
        ]);
        assert!(!all_failed.success);
        assert!(!all_failed.turn_consumed);
    }

    #[test]
    fn test_messages_keep_input_order() {
        let combined = EffectResult::combine([
            EffectResult::success("first"),
            EffectResult::success("second").with_message("third"),
        ]);
        assert_eq!(combined.messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_numeric_fields_sum() {
        let combined = EffectResult::combine([
            EffectResult::success("a").with_damage(5).with_healed(2),
            EffectResult::success("b").with_damage(7).with_mana_gained(3),
        ]);
        assert_eq!(combined.damage_dealt, 12);
        assert_eq!(combined.amount_healed, 2);
        assert_eq!(combined.mana_gained, 3);
    }

    #[test]
    fn test_lists_concatenate() {
        let combined = EffectResult::combine([
            EffectResult::success("a")
                .with_status_applied(StatusId::Poisoned)
                .with_item(ItemId::new(1)),
            EffectResult::success("b").with_status_applied(StatusId::Blind),
        ]);
        assert_eq!(
            combined.statuses_applied.as_slice(),
            &[StatusId::Poisoned, StatusId::Blind]
        );
        assert_eq!(combined.items_affected.as_slice(), &[ItemId::new(1)]);
    }

    #[test]
    fn test_first_payload_wins() {
        let combined = EffectResult::combine([
            EffectResult::success("a"),
            EffectResult::success("b").with_payload(Outcome::RecallRequested),
            EffectResult::success("c").with_payload(Outcome::LevelTransition { up: true }),
        ]);
        assert_eq!(combined.payload, Some(Outcome::RecallRequested));
    }

    #[test]
    fn test_fold_associativity() {
        let a = EffectResult::success("a").with_damage(3);
        let b = EffectResult::failure("b").with_healed(2);
        let c = EffectResult::success("c")
            .with_damage(4)
            .with_status_applied(StatusId::Stunned);

        let all = EffectResult::combine([a.clone(), b.clone(), c.clone()]);
        let left = EffectResult::combine([EffectResult::combine([a, b]), c]);
        assert_eq!(all, left);
    }

    #[test]
    fn test_serde_round_trip() {
        let result = EffectResult::success("The orc burns.")
            .with_damage(9)
            .with_payload(Outcome::Detected(vec![(DetectKind::Monsters, 4)]));
        let json = serde_json::to_string(&result).unwrap();
        let back: EffectResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
