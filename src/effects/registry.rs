//! Registry mapping effect names to constructors.
//!
//! The registry is populated once at startup. Registering the same name
//! twice is a programming error and panics; building from an unregistered
//! name is a content error and returns [`EffectError::UnknownEffect`].

use rustc_hash::FxHashMap;

use super::definition::EffectDefinition;
use super::error::EffectError;
use super::kind::EffectKind;
use super::{attack, compound, crowd, detect, enchant, motion, restore, status_fx, summon, terrain_fx};

/// Constructor for one registered effect name. The registry and depth are
/// threaded through so compound effects can build their pools.
type BuilderFn = fn(&EffectDefinition, &EffectRegistry, usize) -> Result<EffectKind, EffectError>;

/// How many layers of compound nesting a definition may declare.
const MAX_NESTING_DEPTH: usize = 3;

/// The set of known effect constructors.
pub struct EffectRegistry {
    builders: FxHashMap<String, BuilderFn>,
}

impl EffectRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: FxHashMap::default(),
        }
    }

    /// The full standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("bolt", attack::build_bolt);
        registry.register("beam", attack::build_beam);
        registry.register("ball", attack::build_ball);
        registry.register("breath", attack::build_breath);
        registry.register("drain_life", attack::build_drain_life);

        registry.register("heal", restore::build_heal);
        registry.register("restore_mana", restore::build_restore_mana);
        registry.register("cure", restore::build_cure);
        registry.register("restore_stats", restore::build_restore_stats);

        registry.register("apply_status", status_fx::build_apply_status);
        registry.register("status_bolt", status_fx::build_status_bolt);

        registry.register("detect", detect::build_detect);
        registry.register("magic_mapping", detect::build_magic_mapping);
        registry.register("light_area", detect::build_light_area);

        registry.register("identify", enchant::build_identify);
        registry.register("enchant_weapon", enchant::build_enchant_weapon);
        registry.register("enchant_armor", enchant::build_enchant_armor);
        registry.register("remove_curse", enchant::build_remove_curse);
        registry.register("curse_item", enchant::build_curse_item);
        registry.register("recharge", enchant::build_recharge);

        registry.register("teleport_self", motion::build_teleport_self);
        registry.register("teleport_other", motion::build_teleport_other);
        registry.register("teleport_level", motion::build_teleport_level);
        registry.register("word_of_recall", motion::build_word_of_recall);

        registry.register("summon_monsters", summon::build_summon_monsters);
        registry.register("polymorph", summon::build_polymorph);
        registry.register("clone_monster", summon::build_clone_monster);
        registry.register("genocide", summon::build_genocide);
        registry.register("mass_genocide", summon::build_mass_genocide);
        registry.register("omnicide", summon::build_omnicide);

        registry.register("charm", crowd::build_charm);
        registry.register("banish", crowd::build_banish);
        registry.register("mass_stasis", crowd::build_mass_stasis);

        registry.register("stone_to_mud", terrain_fx::build_stone_to_mud);
        registry.register("dig", terrain_fx::build_dig);
        registry.register("earthquake", terrain_fx::build_earthquake);
        registry.register("create_stairs", terrain_fx::build_create_stairs);
        registry.register("glyph_of_warding", terrain_fx::build_glyph_of_warding);

        registry.register("wonder", compound::build_wonder);
        registry.register("call_chaos", compound::build_call_chaos);

        registry
    }

    /// Register a constructor under a name.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered.
    pub fn register(&mut self, name: impl Into<String>, builder: BuilderFn) {
        let name = name.into();
        if self.builders.insert(name.clone(), builder).is_some() {
            panic!("effect {name:?} registered twice");
        }
    }

    /// Build an executable effect from a definition.
    pub fn build(&self, def: &EffectDefinition) -> Result<EffectKind, EffectError> {
        self.build_at(def, 0)
    }

    /// Build at a given nesting depth. Compound constructors call back
    /// here at `depth + 1` for each pool member.
    pub(crate) fn build_at(
        &self,
        def: &EffectDefinition,
        depth: usize,
    ) -> Result<EffectKind, EffectError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(EffectError::NestingTooDeep(def.kind.clone()));
        }
        let builder = self
            .builders
            .get(&def.kind)
            .ok_or_else(|| EffectError::UnknownEffect(def.kind.clone()))?;
        builder(def, self, depth)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
