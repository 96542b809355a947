//! Configuration errors.
//!
//! These cover content bugs only: unknown effect names, missing or
//! ill-typed parameters, malformed dice expressions, and compound pools
//! nested past the bound. They surface out of the registry/factory layer
//! at content-load or first-use time. Gameplay conditions (no target,
//! resisted, already identified) never produce an error; they are encoded
//! in [`EffectResult`](super::EffectResult).

use thiserror::Error;

use crate::core::DiceError;

/// A fatal effect-configuration error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("unknown effect type {0:?}")]
    UnknownEffect(String),

    #[error("effect {effect:?} is missing required parameter {param:?}")]
    MissingParam { effect: String, param: String },

    #[error("effect {effect:?} parameter {param:?} is invalid: {reason}")]
    BadParam {
        effect: String,
        param: String,
        reason: String,
    },

    #[error("effect {effect:?} parameter {param:?}: {source}")]
    BadDice {
        effect: String,
        param: String,
        #[source]
        source: DiceError,
    },

    #[error("compound effect {0:?} is nested too deeply")]
    NestingTooDeep(String),
}
