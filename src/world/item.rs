//! Items: the slice of the inventory model the effect engine touches.
//!
//! Item generation (egos, artifacts, store stock) is an external
//! collaborator; the engine only inspects and mutates the fields below:
//! enchantment bonuses, identification, curses, and wand charges.

use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// Broad item category, enough to gate effect applicability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Wand,
    Potion,
    Scroll,
    Other,
}

/// An item instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// To-hit enchantment bonus (weapons).
    pub to_hit: i32,
    /// To-damage enchantment bonus (weapons).
    pub to_dam: i32,
    /// Armor-class enchantment bonus (armor).
    pub to_ac: i32,
    /// Has the player identified this item?
    pub identified: bool,
    pub cursed: bool,
    /// Artifacts resist curses and some destructive effects.
    pub artifact: bool,
    /// Charges, for wand-like items. `None` means not chargeable.
    pub charges: Option<u32>,
    /// Charge ceiling for recharge effects.
    pub max_charges: Option<u32>,
}

impl Item {
    /// Create a plain item of a kind.
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            to_hit: 0,
            to_dam: 0,
            to_ac: 0,
            identified: false,
            cursed: false,
            artifact: false,
            charges: None,
            max_charges: None,
        }
    }

    /// Set enchantment bonuses (builder pattern).
    #[must_use]
    pub fn with_bonuses(mut self, to_hit: i32, to_dam: i32, to_ac: i32) -> Self {
        self.to_hit = to_hit;
        self.to_dam = to_dam;
        self.to_ac = to_ac;
        self
    }

    /// Mark as cursed (builder pattern).
    #[must_use]
    pub fn cursed(mut self) -> Self {
        self.cursed = true;
        self
    }

    /// Mark as an artifact (builder pattern).
    #[must_use]
    pub fn artifact(mut self) -> Self {
        self.artifact = true;
        self
    }

    /// Mark as identified (builder pattern).
    #[must_use]
    pub fn identified(mut self) -> Self {
        self.identified = true;
        self
    }

    /// Give the item charges (builder pattern). Sets both current and max.
    #[must_use]
    pub fn with_charges(mut self, current: u32, max: u32) -> Self {
        self.charges = Some(current.min(max));
        self.max_charges = Some(max);
        self
    }

    /// Can this item take weapon enchantments?
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.kind == ItemKind::Weapon
    }

    /// Can this item take armor enchantments?
    #[must_use]
    pub fn is_armor(&self) -> bool {
        self.kind == ItemKind::Armor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = Item::new(ItemId::new(1), "Long Sword", ItemKind::Weapon)
            .with_bonuses(2, 3, 0)
            .identified();

        assert_eq!(item.to_hit, 2);
        assert_eq!(item.to_dam, 3);
        assert!(item.identified);
        assert!(!item.cursed);
        assert!(item.is_weapon());
        assert!(!item.is_armor());
    }

    #[test]
    fn test_charges_clamped_to_max() {
        let wand = Item::new(ItemId::new(2), "Wand of Light", ItemKind::Wand).with_charges(10, 6);
        assert_eq!(wand.charges, Some(6));
        assert_eq!(wand.max_charges, Some(6));
    }

    #[test]
    fn test_uncharged_by_default() {
        let sword = Item::new(ItemId::new(3), "Dagger", ItemKind::Weapon);
        assert_eq!(sword.charges, None);
    }
}
