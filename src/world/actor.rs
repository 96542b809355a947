//! Actors: the player and live monsters.
//!
//! This is the actor capability surface the effect engine mutates: HP,
//! position, statuses, stats, inventory, and resistance inputs. Turn
//! scheduling, AI, and rendering live outside the engine.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::combat::Element;
use crate::core::{ActorId, GameRng, ItemId, Position};

use super::bestiary::MonsterFlag;
use super::item::Item;
use super::status::{Status, StatusBook, StatusId};

/// The six primary stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Str,
    Int,
    Wis,
    Dex,
    Con,
    Chr,
}

impl Stat {
    /// All stats, in display order.
    pub const ALL: [Stat; 6] = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr];
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stat::Str => "strength",
            Stat::Int => "intelligence",
            Stat::Wis => "wisdom",
            Stat::Dex => "dexterity",
            Stat::Con => "constitution",
            Stat::Chr => "charisma",
        };
        f.write_str(name)
    }
}

/// Current and maximum value for one stat. Draining lowers `cur`;
/// restoration pulls it back up to `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub cur: u32,
    pub max: u32,
}

impl StatValue {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self {
            cur: value,
            max: value,
        }
    }

    /// Is this stat below its maximum?
    #[must_use]
    pub const fn is_drained(self) -> bool {
        self.cur < self.max
    }
}

/// The player's stat block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stats {
    values: [StatValue; 6],
}

impl Stats {
    /// All stats at the same starting value.
    #[must_use]
    pub const fn uniform(value: u32) -> Self {
        Self {
            values: [StatValue::new(value); 6],
        }
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> StatValue {
        self.values[stat as usize]
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut StatValue {
        &mut self.values[stat as usize]
    }

    /// Restore one stat to its maximum. Returns true if it was drained.
    pub fn restore(&mut self, stat: Stat) -> bool {
        let value = self.get_mut(stat);
        let was_drained = value.is_drained();
        value.cur = value.max;
        was_drained
    }
}

/// Player-specific state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    pub stats: Stats,
    pub inventory: Vec<Item>,
    /// Equipment-granted immunities, per element.
    pub immunities: FxHashSet<Element>,
    /// Equipment-granted resistances, per element.
    pub resists: FxHashSet<Element>,
    /// Equipment- or curse-granted vulnerabilities, per element.
    pub vulnerabilities: FxHashSet<Element>,
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: Stats::uniform(10),
            inventory: Vec::new(),
            immunities: FxHashSet::default(),
            resists: FxHashSet::default(),
            vulnerabilities: FxHashSet::default(),
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Monster-specific state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonsterState {
    /// Bestiary key this monster was spawned from.
    pub kind_key: String,
    pub symbol: char,
    pub flags: FxHashSet<MonsterFlag>,
}

/// Player-or-monster discriminator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ActorKind {
    Player(PlayerState),
    Monster(MonsterState),
}

/// A live actor on a level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub pos: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    /// Experience level (player) or monster level; drives saving throws.
    pub level: u32,
    pub statuses: StatusBook,
    pub kind: ActorKind,
}

impl Actor {
    /// Create a player actor. The id is assigned when added to a level.
    pub fn player(name: impl Into<String>, hp: u32, mana: u32, level: u32, pos: Position) -> Self {
        Self {
            id: ActorId::new(0),
            name: name.into(),
            pos,
            hp,
            max_hp: hp,
            mana,
            max_mana: mana,
            level,
            statuses: StatusBook::new(),
            kind: ActorKind::Player(PlayerState::new()),
        }
    }

    /// Create a monster actor. The id is assigned when added to a level.
    pub fn monster(
        kind_key: impl Into<String>,
        name: impl Into<String>,
        symbol: char,
        level: u32,
        hp: u32,
        pos: Position,
    ) -> Self {
        Self {
            id: ActorId::new(0),
            name: name.into(),
            pos,
            hp,
            max_hp: hp,
            mana: 0,
            max_mana: 0,
            level,
            statuses: StatusBook::new(),
            kind: ActorKind::Monster(MonsterState {
                kind_key: kind_key.into(),
                symbol,
                flags: FxHashSet::default(),
            }),
        }
    }

    /// Replace the monster flag set (builder pattern). No-op for players.
    #[must_use]
    pub fn with_flags(mut self, flags: FxHashSet<MonsterFlag>) -> Self {
        if let ActorKind::Monster(ref mut monster) = self.kind {
            monster.flags = flags;
        }
        self
    }

    /// Add a single monster flag (builder pattern). No-op for players.
    #[must_use]
    pub fn with_flag(mut self, flag: MonsterFlag) -> Self {
        if let ActorKind::Monster(ref mut monster) = self.kind {
            monster.flags.insert(flag);
        }
        self
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player(_))
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, ActorKind::Monster(_))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Check a monster flag. Players have none.
    #[must_use]
    pub fn has_flag(&self, flag: MonsterFlag) -> bool {
        match &self.kind {
            ActorKind::Monster(monster) => monster.flags.contains(&flag),
            ActorKind::Player(_) => false,
        }
    }

    /// Map symbol, for symbol-targeted effects. Players are '@'.
    #[must_use]
    pub fn symbol(&self) -> char {
        match &self.kind {
            ActorKind::Monster(monster) => monster.symbol,
            ActorKind::Player(_) => '@',
        }
    }

    /// Apply damage. Returns the amount actually subtracted.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.hp);
        self.hp -= actual;
        actual
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_hp - self.hp);
        self.hp += actual;
        actual
    }

    /// Restore mana up to the maximum. Returns the amount gained.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_mana - self.mana);
        self.mana += actual;
        actual
    }

    /// Entity-supplied saving throw against an effect of the given power.
    ///
    /// The actor saves when its level beats a uniform roll against the
    /// power; higher power or lower level means fewer saves. Draws exactly
    /// one value from the shared RNG.
    pub fn saving_throw(&self, power: u32, rng: &mut GameRng) -> bool {
        self.level as i32 > rng.range(1, power.max(1) as i32)
    }

    /// Apply a status (the status-collection contract).
    pub fn apply_status(&mut self, status: Status) {
        self.statuses.add(status);
    }

    /// Access player state, if this is the player.
    #[must_use]
    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            ActorKind::Player(state) => Some(state),
            ActorKind::Monster(_) => None,
        }
    }

    /// Mutable player state, if this is the player.
    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            ActorKind::Player(state) => Some(state),
            ActorKind::Monster(_) => None,
        }
    }

    /// Look up an inventory item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.player_state()?.inventory.iter().find(|i| i.id == id)
    }

    /// Look up an inventory item mutably.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.player_state_mut()?
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
    }

    /// Add an item to the inventory. No-op for monsters.
    pub fn add_item(&mut self, item: Item) {
        if let Some(player) = self.player_state_mut() {
            player.inventory.push(item);
        }
    }

    /// Does the player have a temporary oppose buff for this element?
    #[must_use]
    pub fn has_oppose(&self, element: Element) -> bool {
        self.statuses
            .iter()
            .any(|s| s.id.opposes() == Some(element))
    }

    /// Check a status by id.
    #[must_use]
    pub fn has_status(&self, id: StatusId) -> bool {
        self.statuses.has(id)
    }
}
