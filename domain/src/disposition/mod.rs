//! Disposition of the pending question: the effect registry and the
//! dispatcher that applies it.

pub mod dispatcher;
pub mod effects;

pub use dispatcher::{Decision, Resolution, resolve};
pub use effects::{EffectHandler, Transition, effect_handler, transition_for};
