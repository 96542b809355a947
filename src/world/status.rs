//! Status effects and the per-actor status collection.
//!
//! A `Status` is a named condition with a remaining duration (in turns) and
//! an optional intensity. The `StatusBook` is the actor-side collection
//! contract that status-application effects delegate to: add merges
//! durations, cure removes outright, reduce shortens.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::combat::Element;

/// Named status conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusId {
    Poisoned,
    Confused,
    Afraid,
    Stunned,
    Blind,
    Paralyzed,
    Slowed,
    Hasted,
    Blessed,
    Heroism,
    Shielded,
    Charmed,
    Stasis,
    /// Temporary elemental wards ("oppose" buffs). Each counts as an
    /// independent resistance source in the player-side calculator.
    OpposeFire,
    OpposeCold,
    OpposeElec,
    OpposeAcid,
    OpposePoison,
}

impl StatusId {
    /// The element this status opposes, if it is an elemental ward.
    #[must_use]
    pub const fn opposes(self) -> Option<Element> {
        match self {
            StatusId::OpposeFire => Some(Element::Fire),
            StatusId::OpposeCold => Some(Element::Cold),
            StatusId::OpposeElec => Some(Element::Elec),
            StatusId::OpposeAcid => Some(Element::Acid),
            StatusId::OpposePoison => Some(Element::Poison),
            _ => None,
        }
    }

    /// Is this a harmful condition (cured by healing-type effects)?
    #[must_use]
    pub const fn is_affliction(self) -> bool {
        matches!(
            self,
            StatusId::Poisoned
                | StatusId::Confused
                | StatusId::Afraid
                | StatusId::Stunned
                | StatusId::Blind
                | StatusId::Paralyzed
                | StatusId::Slowed
                | StatusId::Charmed
                | StatusId::Stasis
        )
    }
}

impl std::fmt::Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusId::Poisoned => "poisoned",
            StatusId::Confused => "confused",
            StatusId::Afraid => "afraid",
            StatusId::Stunned => "stunned",
            StatusId::Blind => "blind",
            StatusId::Paralyzed => "paralyzed",
            StatusId::Slowed => "slowed",
            StatusId::Hasted => "hasted",
            StatusId::Blessed => "blessed",
            StatusId::Heroism => "heroic",
            StatusId::Shielded => "shielded",
            StatusId::Charmed => "charmed",
            StatusId::Stasis => "held",
            StatusId::OpposeFire => "resistant to fire",
            StatusId::OpposeCold => "resistant to cold",
            StatusId::OpposeElec => "resistant to electricity",
            StatusId::OpposeAcid => "resistant to acid",
            StatusId::OpposePoison => "resistant to poison",
        };
        f.write_str(name)
    }
}

/// A live status: identifier, remaining duration, intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    /// Remaining duration in game turns.
    pub remaining: u32,
    /// Magnitude, for statuses where it matters (0 otherwise).
    pub intensity: u32,
}

impl Status {
    /// Create a status with a duration and no intensity.
    #[must_use]
    pub const fn new(id: StatusId, remaining: u32) -> Self {
        Self {
            id,
            remaining,
            intensity: 0,
        }
    }

    /// Set the intensity (builder pattern).
    #[must_use]
    pub const fn with_intensity(mut self, intensity: u32) -> Self {
        self.intensity = intensity;
        self
    }
}

/// Per-actor status collection.
///
/// Most actors carry zero or one status at a time, hence the small vec.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatusBook {
    statuses: SmallVec<[Status; 4]>,
}

impl StatusBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a status. If already present, durations add and the higher
    /// intensity wins.
    pub fn add(&mut self, status: Status) {
        if let Some(existing) = self.statuses.iter_mut().find(|s| s.id == status.id) {
            existing.remaining = existing.remaining.saturating_add(status.remaining);
            existing.intensity = existing.intensity.max(status.intensity);
        } else {
            self.statuses.push(status);
        }
    }

    /// Remove a status outright. Returns true if it was present.
    pub fn cure(&mut self, id: StatusId) -> bool {
        let before = self.statuses.len();
        self.statuses.retain(|s| s.id != id);
        self.statuses.len() != before
    }

    /// Shorten a status by `turns`. Removes it if the duration runs out.
    /// Returns true if the status was present.
    pub fn reduce(&mut self, id: StatusId, turns: u32) -> bool {
        if let Some(status) = self.statuses.iter_mut().find(|s| s.id == id) {
            status.remaining = status.remaining.saturating_sub(turns);
            if status.remaining == 0 {
                self.cure(id);
            }
            true
        } else {
            false
        }
    }

    /// Is a status present?
    #[must_use]
    pub fn has(&self, id: StatusId) -> bool {
        self.statuses.iter().any(|s| s.id == id)
    }

    /// Get a status by ID.
    #[must_use]
    pub fn get(&self, id: StatusId) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    /// Tick every status down by one turn, dropping expired ones.
    pub fn advance_turn(&mut self) {
        for status in self.statuses.iter_mut() {
            status.remaining = status.remaining.saturating_sub(1);
        }
        self.statuses.retain(|s| s.remaining > 0);
    }

    /// Iterate over live statuses.
    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter()
    }

    /// Number of live statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Is the book empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_has() {
        let mut book = StatusBook::new();
        book.add(Status::new(StatusId::Poisoned, 5));

        assert!(book.has(StatusId::Poisoned));
        assert!(!book.has(StatusId::Confused));
    }

    #[test]
    fn test_add_merges_duration() {
        let mut book = StatusBook::new();
        book.add(Status::new(StatusId::Hasted, 5).with_intensity(2));
        book.add(Status::new(StatusId::Hasted, 3).with_intensity(1));

        let status = book.get(StatusId::Hasted).unwrap();
        assert_eq!(status.remaining, 8);
        assert_eq!(status.intensity, 2);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_cure() {
        let mut book = StatusBook::new();
        book.add(Status::new(StatusId::Blind, 10));

        assert!(book.cure(StatusId::Blind));
        assert!(!book.has(StatusId::Blind));
        assert!(!book.cure(StatusId::Blind));
    }

    #[test]
    fn test_reduce() {
        let mut book = StatusBook::new();
        book.add(Status::new(StatusId::Stunned, 10));

        assert!(book.reduce(StatusId::Stunned, 4));
        assert_eq!(book.get(StatusId::Stunned).unwrap().remaining, 6);

        assert!(book.reduce(StatusId::Stunned, 100));
        assert!(!book.has(StatusId::Stunned));

        assert!(!book.reduce(StatusId::Stunned, 1));
    }

    #[test]
    fn test_advance_turn_expires() {
        let mut book = StatusBook::new();
        book.add(Status::new(StatusId::Afraid, 1));
        book.add(Status::new(StatusId::Blessed, 2));

        book.advance_turn();
        assert!(!book.has(StatusId::Afraid));
        assert!(book.has(StatusId::Blessed));

        book.advance_turn();
        assert!(book.is_empty());
    }

    #[test]
    fn test_oppose_mapping() {
        assert_eq!(StatusId::OpposeFire.opposes(), Some(Element::Fire));
        assert_eq!(StatusId::OpposeCold.opposes(), Some(Element::Cold));
        assert_eq!(StatusId::Hasted.opposes(), None);
    }

    #[test]
    fn test_affliction_classification() {
        assert!(StatusId::Poisoned.is_affliction());
        assert!(StatusId::Stasis.is_affliction());
        assert!(!StatusId::Hasted.is_affliction());
        assert!(!StatusId::OpposeFire.is_affliction());
    }
}
