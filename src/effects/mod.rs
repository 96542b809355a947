//! One-shot effect execution.
//!
//! Effects travel through three shapes: an [`EffectDefinition`] is the
//! externally authored declaration; the [`EffectRegistry`] builds it into
//! an executable [`EffectKind`]; executing against an [`ExecutionContext`]
//! yields an [`EffectResult`]. The [`EffectEngine`] ties the three
//! together for callers that hold a definition and a game state.

pub(crate) mod attack;
pub(crate) mod compound;
pub mod context;
pub(crate) mod crowd;
pub mod definition;
pub(crate) mod detect;
pub(crate) mod enchant;
pub mod engine;
pub mod error;
pub mod kind;
pub(crate) mod motion;
pub mod registry;
pub(crate) mod restore;
pub mod result;
pub(crate) mod status_fx;
pub(crate) mod summon;
pub(crate) mod terrain_fx;

pub use context::{ExecutionContext, Target, TargetingMode};
pub use crowd::CrowdScope;
pub use definition::{EffectDefinition, ParamValue, SubEffect};
pub use engine::{EffectEngine, Resources};
pub use error::EffectError;
pub use kind::EffectKind;
pub use registry::EffectRegistry;
pub use result::{DetectKind, EffectResult, Outcome};
