//! Procedural character animation.
//!
//! The director recomputes a full [`AnimationParams`] every step from the
//! current locomotion state and how long the player has been in it. The only
//! thing it carries across steps is its side channel of short-lived cosmetic
//! emissions and its own screen shake.

mod avatar;
mod director;
mod side_channel;

pub use avatar::{draw_avatar, PlayerShape};
pub use director::{AnimationDirector, DEFAULT_INTENSITY, FRAME_COUNT, FRAME_DELAY};
pub use side_channel::{
    Afterimage, DashLine, ElectricArc, ImpactParticle, SideChannel, SideWave, TrailMote,
};

/// Minimum value for any scale-like parameter before it reaches geometry.
pub const MIN_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub squash: f32,
    pub stretch: f32,
    pub rotation: f32,
    pub scale: f32,
    pub pulse: f32,
    pub color_pulse: f32,
    pub glow_intensity: f32,
    pub shadow_size: f32,
    pub energy_pulse: f32,
    pub frame_index: u8,
}

impl AnimationParams {
    /// Rest pose.
    pub const REST: AnimationParams = AnimationParams {
        squash: 1.0,
        stretch: 1.0,
        rotation: 0.0,
        scale: 1.0,
        pulse: 1.0,
        color_pulse: 1.0,
        glow_intensity: 0.0,
        shadow_size: 0.0,
        energy_pulse: 0.0,
        frame_index: 0,
    };

    /// Overall drawn scale (base scale times pulse).
    pub fn draw_scale(&self) -> f32 {
        self.scale * self.pulse
    }

    /// Copy with every scale-like parameter clamped to [`MIN_SCALE`].
    pub fn sanitized(&self) -> AnimationParams {
        let clamp = |v: f32| if v.is_finite() { v.max(MIN_SCALE) } else { 1.0 };
        AnimationParams {
            squash: clamp(self.squash),
            stretch: clamp(self.stretch),
            scale: clamp(self.scale),
            pulse: clamp(self.pulse),
            ..*self
        }
    }
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self::REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_negative_and_nan_scales() {
        let raw = AnimationParams {
            squash: -0.4,
            stretch: f32::NAN,
            scale: 0.0,
            pulse: 0.05,
            ..AnimationParams::REST
        };
        let safe = raw.sanitized();
        assert_eq!(safe.squash, MIN_SCALE);
        assert_eq!(safe.stretch, 1.0);
        assert_eq!(safe.scale, MIN_SCALE);
        assert_eq!(safe.pulse, MIN_SCALE);
    }
}
