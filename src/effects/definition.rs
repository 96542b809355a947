//! Effect definitions: the externally authored, immutable declarations.
//!
//! A definition names its variant (`type`) and carries an open map of
//! typed parameters plus, for compound effects, a pool of sub-effect
//! declarations. The engine never mutates a definition; each variant's
//! constructor enforces its own parameter contract through the typed
//! getters here, turning content mistakes into [`EffectError`]s at build
//! time.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::Element;
use crate::core::Dice;

use super::error::EffectError;

/// One typed parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// A weighted sub-effect declaration inside a compound pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubEffect {
    /// Selection weight. Uniform pools use equal weights.
    pub weight: u32,
    pub definition: EffectDefinition,
}

/// An externally authored effect declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Discriminator naming the registered variant.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: FxHashMap<String, ParamValue>,
    /// Sub-effect pool, for compound variants only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_effects: Vec<SubEffect>,
}

impl EffectDefinition {
    /// Create a definition with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: FxHashMap::default(),
            sub_effects: Vec::new(),
        }
    }

    /// Set a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a weighted sub-effect to the pool (builder pattern).
    #[must_use]
    pub fn with_sub_effect(mut self, weight: u32, definition: EffectDefinition) -> Self {
        self.sub_effects.push(SubEffect { weight, definition });
        self
    }

    fn missing(&self, param: &str) -> EffectError {
        EffectError::MissingParam {
            effect: self.kind.clone(),
            param: param.to_string(),
        }
    }

    fn bad(&self, param: &str, reason: impl Into<String>) -> EffectError {
        EffectError::BadParam {
            effect: self.kind.clone(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// Required integer parameter.
    pub fn int(&self, param: &str) -> Result<i64, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Number(n)) => Ok(*n),
            Some(_) => Err(self.bad(param, "expected a number")),
            None => Err(self.missing(param)),
        }
    }

    /// Optional integer parameter with a default.
    pub fn int_or(&self, param: &str, default: i64) -> Result<i64, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Number(n)) => Ok(*n),
            Some(_) => Err(self.bad(param, "expected a number")),
            None => Ok(default),
        }
    }

    /// Required text parameter.
    pub fn text(&self, param: &str) -> Result<&str, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Text(s)) => Ok(s),
            Some(_) => Err(self.bad(param, "expected a string")),
            None => Err(self.missing(param)),
        }
    }

    /// Optional text parameter with a default.
    pub fn text_or<'a>(&'a self, param: &str, default: &'a str) -> Result<&'a str, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Text(s)) => Ok(s),
            Some(_) => Err(self.bad(param, "expected a string")),
            None => Ok(default),
        }
    }

    /// Optional flag parameter with a default.
    pub fn flag_or(&self, param: &str, default: bool) -> Result<bool, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Flag(b)) => Ok(*b),
            Some(_) => Err(self.bad(param, "expected a flag")),
            None => Ok(default),
        }
    }

    /// Required dice-expression parameter. A bare number reads as a
    /// constant roll.
    pub fn dice(&self, param: &str) -> Result<Dice, EffectError> {
        match self.params.get(param) {
            Some(ParamValue::Text(s)) => {
                Dice::from_str(s).map_err(|source| EffectError::BadDice {
                    effect: self.kind.clone(),
                    param: param.to_string(),
                    source,
                })
            }
            Some(ParamValue::Number(n)) => Ok(Dice::constant(*n as i32)),
            Some(_) => Err(self.bad(param, "expected a dice expression")),
            None => Err(self.missing(param)),
        }
    }

    /// Optional dice-expression parameter with a default.
    pub fn dice_or(&self, param: &str, default: Dice) -> Result<Dice, EffectError> {
        if self.params.contains_key(param) {
            self.dice(param)
        } else {
            Ok(default)
        }
    }

    /// Required element-tag parameter.
    pub fn element(&self, param: &str) -> Result<Element, EffectError> {
        let tag = self.text(param)?;
        Element::from_tag(tag).ok_or_else(|| self.bad(param, format!("unknown element {tag:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let def = EffectDefinition::new("bolt")
            .with_param("element", "fire")
            .with_param("damage", "3d8")
            .with_param("radius", 2)
            .with_param("pierce", true);

        assert_eq!(def.element("element").unwrap(), Element::Fire);
        assert_eq!(def.dice("damage").unwrap(), Dice::new(3, 8));
        assert_eq!(def.int("radius").unwrap(), 2);
        assert!(def.flag_or("pierce", false).unwrap());
        assert_eq!(def.int_or("range", 18).unwrap(), 18);
        assert!(!def.flag_or("missing", false).unwrap());
    }

    #[test]
    fn test_number_reads_as_constant_dice() {
        let def = EffectDefinition::new("heal").with_param("amount", 25);
        assert_eq!(def.dice("amount").unwrap(), Dice::constant(25));
    }

    #[test]
    fn test_missing_param() {
        let def = EffectDefinition::new("bolt");
        assert_eq!(
            def.dice("damage"),
            Err(EffectError::MissingParam {
                effect: "bolt".to_string(),
                param: "damage".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_type_param() {
        let def = EffectDefinition::new("bolt").with_param("damage", true);
        assert!(matches!(
            def.int("damage"),
            Err(EffectError::BadParam { .. })
        ));
    }

    #[test]
    fn test_bad_dice_param() {
        let def = EffectDefinition::new("bolt").with_param("damage", "3dx");
        assert!(matches!(
            def.dice("damage"),
            Err(EffectError::BadDice { .. })
        ));
    }

    #[test]
    fn test_bad_element_param() {
        let def = EffectDefinition::new("bolt").with_param("element", "tachyon");
        assert!(matches!(
            def.element("element"),
            Err(EffectError::BadParam { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let def = EffectDefinition::new("wonder")
            .with_sub_effect(1, EffectDefinition::new("heal").with_param("amount", "2d8"))
            .with_sub_effect(
                3,
                EffectDefinition::new("bolt")
                    .with_param("element", "fire")
                    .with_param("damage", "3d8"),
            );

        let json = serde_json::to_string(&def).unwrap();
        let back: EffectDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn test_deserialize_from_content_json() {
        let json = r#"{
            "type": "ball",
            "params": { "element": "cold", "damage": "6d8", "radius": 2 }
        }"#;
        let def: EffectDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.kind, "ball");
        assert_eq!(def.element("element").unwrap(), Element::Cold);
        assert_eq!(def.int("radius").unwrap(), 2);
    }
}
