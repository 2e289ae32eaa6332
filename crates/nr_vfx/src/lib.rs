//! Short-lived visual entities and the character animation layer.
//!
//! Nothing in this crate feeds back into the simulation. Effects read the
//! shared RNG for cosmetic variation only, and are updated after gameplay has
//! resolved for the step.

pub mod animation;
pub mod effects;
pub mod engine;
pub mod shake;

pub use animation::{AnimationDirector, AnimationParams, PlayerShape};
pub use effects::Effect;
pub use engine::{EffectId, EffectsEngine, EngineLimits};
pub use shake::ScreenShake;
