//! The closed set of effect kinds.
//!
//! Every kind follows the same contract: `update` first applies the camera
//! scroll, then its own kinematics and decay; `draw` is read-only; alpha (and
//! size, where the kind has one) never grows as life drains. Lives are in
//! reference ticks and drain by the frame multiplier.

mod bolt;
mod burst;
mod flash;
mod ghost;
mod orb;
mod rings;
mod spark;
mod streak;
mod trail;

pub use bolt::Bolt;
pub use burst::{Burst, BurstParticle};
pub use flash::Flash;
pub use ghost::Ghost;
pub use orb::Orb;
pub use rings::{Ring, RingBurst};
pub use spark::Spark;
pub use streak::Streak;
pub use trail::Trail;

use nr_core::SimRng;
use nr_render::RenderTarget;

/// Remaining life in reference ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    remaining: f32,
    initial: f32,
}

impl Lifetime {
    pub fn new(ticks: f32) -> Self {
        let ticks = ticks.max(f32::EPSILON);
        Self {
            remaining: ticks,
            initial: ticks,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Remaining life over initial life, in [0, 1].
    pub fn ratio(&self) -> f32 {
        (self.remaining / self.initial).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn is_over(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// `factor` applied once per reference tick, scaled to a step of `dt`.
pub(crate) fn decay(factor: f32, dt: f32) -> f32 {
    factor.powf(dt)
}

#[derive(Debug, Clone)]
pub enum Effect {
    Spark(Spark),
    Rings(RingBurst),
    Bolt(Bolt),
    Trail(Trail),
    Burst(Burst),
    Streak(Streak),
    Flash(Flash),
    Ghost(Ghost),
    Orb(Orb),
}

impl Effect {
    pub fn update(&mut self, camera_speed: f32, dt: f32, rng: &mut SimRng) {
        let dx = -camera_speed * dt;
        match self {
            Effect::Spark(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            Effect::Rings(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            Effect::Bolt(e) => {
                e.scroll(dx);
                e.advance(dt, rng);
            }
            Effect::Trail(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            Effect::Burst(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            Effect::Streak(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            // Screen-space overlay, unaffected by scroll.
            Effect::Flash(e) => e.advance(dt),
            Effect::Ghost(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
            Effect::Orb(e) => {
                e.scroll(dx);
                e.advance(dt);
            }
        }
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        match self {
            Effect::Spark(e) => e.draw(target),
            Effect::Rings(e) => e.draw(target),
            Effect::Bolt(e) => e.draw(target),
            Effect::Trail(e) => e.draw(target),
            Effect::Burst(e) => e.draw(target),
            Effect::Streak(e) => e.draw(target),
            Effect::Flash(e) => e.draw(target),
            Effect::Ghost(e) => e.draw(target),
            Effect::Orb(e) => e.draw(target),
        }
    }

    pub fn is_expired(&self) -> bool {
        match self {
            Effect::Spark(e) => e.is_expired(),
            Effect::Rings(e) => e.is_expired(),
            Effect::Bolt(e) => e.is_expired(),
            Effect::Trail(e) => e.is_expired(),
            Effect::Burst(e) => e.is_expired(),
            Effect::Streak(e) => e.is_expired(),
            Effect::Flash(e) => e.is_expired(),
            Effect::Ghost(e) => e.is_expired(),
            Effect::Orb(e) => e.is_expired(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Spark(_) => "spark",
            Effect::Rings(_) => "rings",
            Effect::Bolt(_) => "bolt",
            Effect::Trail(_) => "trail",
            Effect::Burst(_) => "burst",
            Effect::Streak(_) => "streak",
            Effect::Flash(_) => "flash",
            Effect::Ghost(_) => "ghost",
            Effect::Orb(_) => "orb",
        }
    }
}

macro_rules! effect_from {
    ($($kind:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$kind> for Effect {
                fn from(effect: $kind) -> Self {
                    Effect::$variant(effect)
                }
            }
        )*
    };
}

effect_from! {
    Spark => Spark,
    RingBurst => Rings,
    Bolt => Bolt,
    Trail => Trail,
    Burst => Burst,
    Streak => Streak,
    Flash => Flash,
    Ghost => Ghost,
    Orb => Orb,
}
