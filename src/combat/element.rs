//! Elements and the element-to-monster-flag table.
//!
//! Each element maps to at most one immune flag, one resist flag, and one
//! vulnerability flag. Some elements (raw physical force, magic, time...)
//! have no mapping at all and always deal full damage to monsters.

use serde::{Deserialize, Serialize};

use crate::world::MonsterFlag;

/// Damage elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Cold,
    Elec,
    Acid,
    Poison,
    Light,
    Dark,
    Nether,
    Nexus,
    Chaos,
    Sound,
    Shards,
    Disenchant,
    Confusion,
    Water,
    Ice,
    Plasma,
    // No resistance mapping: always full damage.
    Physical,
    Magic,
    Force,
    Time,
    Mana,
    Gravity,
    Holy,
    Arrow,
}

/// The monster flags consulted for one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementFlags {
    pub immune: Option<MonsterFlag>,
    pub resist: Option<MonsterFlag>,
    pub vulnerable: Option<MonsterFlag>,
}

impl Element {
    /// Parse the element tag used in effect definitions.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let element = match tag {
            "fire" => Element::Fire,
            "cold" => Element::Cold,
            "elec" => Element::Elec,
            "acid" => Element::Acid,
            "poison" => Element::Poison,
            "light" => Element::Light,
            "dark" => Element::Dark,
            "nether" => Element::Nether,
            "nexus" => Element::Nexus,
            "chaos" => Element::Chaos,
            "sound" => Element::Sound,
            "shards" => Element::Shards,
            "disenchant" => Element::Disenchant,
            "confusion" => Element::Confusion,
            "water" => Element::Water,
            "ice" => Element::Ice,
            "plasma" => Element::Plasma,
            "physical" => Element::Physical,
            "magic" => Element::Magic,
            "force" => Element::Force,
            "time" => Element::Time,
            "mana" => Element::Mana,
            "gravity" => Element::Gravity,
            "holy" => Element::Holy,
            "arrow" => Element::Arrow,
            _ => return None,
        };
        Some(element)
    }

    /// The monster-flag table for this element, or `None` for elements that
    /// have no resistance mapping.
    #[must_use]
    pub const fn flags(self) -> Option<ElementFlags> {
        use MonsterFlag as F;
        let flags = match self {
            Element::Fire => ElementFlags {
                immune: Some(F::ImmuneFire),
                resist: Some(F::ResistFire),
                vulnerable: Some(F::HurtFire),
            },
            Element::Cold | Element::Ice => ElementFlags {
                immune: Some(F::ImmuneCold),
                resist: Some(F::ResistCold),
                vulnerable: Some(F::HurtCold),
            },
            Element::Elec => ElementFlags {
                immune: Some(F::ImmuneElec),
                resist: Some(F::ResistElec),
                vulnerable: None,
            },
            Element::Acid => ElementFlags {
                immune: Some(F::ImmuneAcid),
                resist: Some(F::ResistAcid),
                vulnerable: None,
            },
            Element::Poison => ElementFlags {
                immune: Some(F::ImmunePoison),
                resist: Some(F::ResistPoison),
                vulnerable: None,
            },
            Element::Light => ElementFlags {
                immune: None,
                resist: Some(F::ResistLight),
                vulnerable: Some(F::HurtLight),
            },
            Element::Dark => ElementFlags {
                immune: None,
                resist: Some(F::ResistDark),
                vulnerable: None,
            },
            Element::Nether => ElementFlags {
                immune: None,
                resist: Some(F::ResistNether),
                vulnerable: None,
            },
            Element::Nexus => ElementFlags {
                immune: None,
                resist: Some(F::ResistNexus),
                vulnerable: None,
            },
            Element::Chaos => ElementFlags {
                immune: None,
                resist: Some(F::ResistChaos),
                vulnerable: None,
            },
            Element::Sound => ElementFlags {
                immune: None,
                resist: Some(F::ResistSound),
                vulnerable: None,
            },
            Element::Shards => ElementFlags {
                immune: None,
                resist: Some(F::ResistShards),
                vulnerable: None,
            },
            Element::Disenchant => ElementFlags {
                immune: None,
                resist: Some(F::ResistDisenchant),
                vulnerable: None,
            },
            Element::Confusion => ElementFlags {
                immune: None,
                resist: Some(F::ResistConfusion),
                vulnerable: None,
            },
            Element::Water => ElementFlags {
                immune: None,
                resist: Some(F::ResistWater),
                vulnerable: None,
            },
            Element::Plasma => ElementFlags {
                immune: None,
                resist: Some(F::ResistPlasma),
                vulnerable: None,
            },
            Element::Physical
            | Element::Magic
            | Element::Force
            | Element::Time
            | Element::Mana
            | Element::Gravity
            | Element::Holy
            | Element::Arrow => return None,
        };
        Some(flags)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "fire",
            Element::Cold => "cold",
            Element::Elec => "lightning",
            Element::Acid => "acid",
            Element::Poison => "poison",
            Element::Light => "light",
            Element::Dark => "darkness",
            Element::Nether => "nether",
            Element::Nexus => "nexus",
            Element::Chaos => "chaos",
            Element::Sound => "sound",
            Element::Shards => "shards",
            Element::Disenchant => "disenchantment",
            Element::Confusion => "confusion",
            Element::Water => "water",
            Element::Ice => "ice",
            Element::Plasma => "plasma",
            Element::Physical => "force",
            Element::Magic => "magic",
            Element::Force => "force",
            Element::Time => "time",
            Element::Mana => "mana",
            Element::Gravity => "gravity",
            Element::Holy => "holy fire",
            Element::Arrow => "arrows",
        };
        f.write_str(name)
    }
}
