//! Monster definitions and the bestiary registry.
//!
//! The bestiary is the monster-definition lookup the engine's resources
//! bundle carries: effects that need content knowledge beyond the immediate
//! context (summon, polymorph, clone) resolve kinds here.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{Dice, GameRng, Position};

use super::actor::Actor;

/// Behavioral and resistance flags on a monster definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterFlag {
    /// Named, one-of-a-kind monster. Exempt from charm, genocide,
    /// polymorph, and similar crowd control.
    Unique,
    Animal,
    Evil,
    Undead,
    Demon,
    Dragon,
    /// Cannot be confused.
    NoConfuse,
    /// Cannot be put to sleep or held.
    NoSleep,
    /// Cannot be frightened.
    NoFear,
    /// Cannot be stunned.
    NoStun,
    /// Takes extra damage from rock-destroying effects.
    HurtRock,
    HurtFire,
    HurtCold,
    HurtLight,
    ImmuneFire,
    ImmuneCold,
    ImmuneElec,
    ImmuneAcid,
    ImmunePoison,
    ResistFire,
    ResistCold,
    ResistElec,
    ResistAcid,
    ResistPoison,
    ResistLight,
    ResistDark,
    ResistNether,
    ResistNexus,
    ResistChaos,
    ResistSound,
    ResistShards,
    ResistDisenchant,
    ResistConfusion,
    ResistWater,
    ResistPlasma,
    /// Cannot be teleported away.
    ResistTeleport,
}

/// An externally authored monster definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonsterKind {
    /// Stable content key ("orc", "fire_drake", ...).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Map symbol; genocide targets by this.
    pub symbol: char,
    /// Monster level, used for depth gating and resistance rolls.
    pub level: u32,
    /// Hit dice rolled at spawn time.
    pub hp: Dice,
    pub flags: FxHashSet<MonsterFlag>,
}

impl MonsterKind {
    /// Create a definition with no flags.
    pub fn new(key: impl Into<String>, name: impl Into<String>, symbol: char, level: u32, hp: Dice) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            symbol,
            level,
            hp,
            flags: FxHashSet::default(),
        }
    }

    /// Add a flag (builder pattern).
    #[must_use]
    pub fn with_flag(mut self, flag: MonsterFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Check a flag.
    #[must_use]
    pub fn has_flag(&self, flag: MonsterFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Registry of monster definitions.
///
/// Content loading owns populating this; the engine only reads it.
#[derive(Clone, Debug, Default)]
pub struct Bestiary {
    kinds: FxHashMap<String, MonsterKind>,
}

impl Bestiary {
    /// Create an empty bestiary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a monster kind.
    ///
    /// Panics if a kind with the same key already exists - duplicate keys
    /// are a content bug.
    pub fn register(&mut self, kind: MonsterKind) {
        if self.kinds.contains_key(&kind.key) {
            panic!("Monster kind {:?} already registered", kind.key);
        }
        self.kinds.insert(kind.key.clone(), kind);
    }

    /// Get a kind by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MonsterKind> {
        self.kinds.get(key)
    }

    /// Get a kind by key, panicking if not found.
    ///
    /// Use when the key has already been validated by content loading.
    #[must_use]
    pub fn get_unchecked(&self, key: &str) -> &MonsterKind {
        self.kinds
            .get(key)
            .expect("Monster kind not found in bestiary")
    }

    /// Candidate kinds for summoning or polymorph at a dungeon depth:
    /// non-unique kinds of level at most `depth + 5`, sorted by key for
    /// deterministic selection order.
    #[must_use]
    pub fn candidates_at_depth(&self, depth: u32) -> Vec<&MonsterKind> {
        let mut candidates: Vec<_> = self
            .kinds
            .values()
            .filter(|k| !k.has_flag(MonsterFlag::Unique) && k.level <= depth + 5)
            .collect();
        candidates.sort_by(|a, b| a.key.cmp(&b.key));
        candidates
    }

    /// Construct a live monster from a kind, rolling its hit dice.
    ///
    /// The caller still has to place it on a level (which allocates its id).
    #[must_use]
    pub fn instantiate(&self, kind: &MonsterKind, pos: Position, rng: &mut GameRng) -> Actor {
        let hp = kind.hp.roll(rng).max(1) as u32;
        Actor::monster(&kind.key, &kind.name, kind.symbol, kind.level, hp, pos)
            .with_flags(kind.flags.clone())
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Is the bestiary empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate over all kinds.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterKind> {
        self.kinds.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orc() -> MonsterKind {
        MonsterKind::new("orc", "Orc", 'o', 5, Dice::new(3, 8)).with_flag(MonsterFlag::Evil)
    }

    #[test]
    fn test_register_and_get() {
        let mut bestiary = Bestiary::new();
        bestiary.register(orc());

        let found = bestiary.get("orc").unwrap();
        assert_eq!(found.name, "Orc");
        assert!(found.has_flag(MonsterFlag::Evil));
        assert!(bestiary.get("dragon").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_key_panics() {
        let mut bestiary = Bestiary::new();
        bestiary.register(orc());
        bestiary.register(orc());
    }

    #[test]
    fn test_candidates_at_depth() {
        let mut bestiary = Bestiary::new();
        bestiary.register(MonsterKind::new("rat", "Giant Rat", 'r', 1, Dice::new(1, 4)));
        bestiary.register(MonsterKind::new("drake", "Fire Drake", 'd', 20, Dice::new(10, 10)));
        bestiary.register(
            MonsterKind::new("king", "The Goblin King", 'k', 3, Dice::new(8, 8))
                .with_flag(MonsterFlag::Unique),
        );

        let shallow = bestiary.candidates_at_depth(1);
        assert_eq!(shallow.len(), 1);
        assert_eq!(shallow[0].key, "rat");

        // Uniques never appear, even at depth.
        let deep = bestiary.candidates_at_depth(50);
        assert_eq!(deep.len(), 2);
        assert!(deep.iter().all(|k| !k.has_flag(MonsterFlag::Unique)));
    }

    #[test]
    fn test_candidates_sorted_by_key() {
        let mut bestiary = Bestiary::new();
        bestiary.register(MonsterKind::new("zombie", "Zombie", 'z', 2, Dice::new(2, 8)));
        bestiary.register(MonsterKind::new("bat", "Bat", 'b', 1, Dice::new(1, 4)));

        let keys: Vec<_> = bestiary
            .candidates_at_depth(10)
            .iter()
            .map(|k| k.key.clone())
            .collect();
        assert_eq!(keys, vec!["bat", "zombie"]);
    }

    #[test]
    fn test_instantiate_rolls_hp() {
        let bestiary = Bestiary::new();
        let kind = orc();
        let mut rng = GameRng::new(42);

        let monster = bestiary.instantiate(&kind, Position::new(3, 3), &mut rng);
        assert!((3..=24).contains(&(monster.hp as i32)));
        assert_eq!(monster.pos, Position::new(3, 3));
        assert!(monster.has_flag(MonsterFlag::Evil));
    }
}
