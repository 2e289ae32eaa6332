use super::side_channel::{SideChannel, SideWave};
use super::AnimationParams;
use crate::shake::ScreenShake;
use glam::Vec2;
use nr_core::{Locomotion, SimRng, REFERENCE_HZ};
use nr_render::Rgba;

pub const DEFAULT_INTENSITY: f32 = 2.0;
const MIN_INTENSITY: f32 = 0.8;
const MAX_INTENSITY: f32 = 3.0;

/// Steps between frame-index advances.
pub const FRAME_DELAY: f32 = 3.0;
pub const FRAME_COUNT: u8 = 8;

/// (delay in seconds after entering the slam, color, speed multiplier)
const SLAM_WAVES: [(f32, Rgba, f32); 3] = [
    (0.0, Rgba::rgb(255, 100, 50), 1.2),
    (0.05, Rgba::rgb(255, 200, 100), 1.0),
    (0.10, Rgba::rgb(255, 255, 200), 0.8),
];
const SLAM_SHAKE_INTENSITY: f32 = 25.0;
const SLAM_SHAKE_SECONDS: f32 = 0.8;

/// Drives the character's procedural animation.
///
/// `update` is called once per simulation step after gameplay has resolved.
/// Everything in [`AnimationParams`] is a closed-form function of the
/// effective state, the time spent in it and the intensity knob.
pub struct AnimationDirector {
    intensity: f32,
    state: Locomotion,
    time: f32,
    state_entered_at: f32,
    frame_timer: f32,
    frame_index: u8,
    waves_scheduled: usize,
    params: AnimationParams,
    side: SideChannel,
    shake: ScreenShake,
}

impl AnimationDirector {
    pub fn new(intensity: f32) -> Self {
        let mut director = Self {
            intensity: DEFAULT_INTENSITY,
            state: Locomotion::Idle,
            time: 0.0,
            state_entered_at: 0.0,
            frame_timer: 0.0,
            frame_index: 0,
            waves_scheduled: 0,
            params: AnimationParams::REST,
            side: SideChannel::default(),
            shake: ScreenShake::new(),
        };
        director.set_intensity(intensity);
        director.apply_idle();
        director
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_finite() {
            intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
        } else {
            DEFAULT_INTENSITY
        };
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Back to the rest pose with an empty side channel; intensity is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.intensity);
    }

    /// Which animation a player in `locomotion` should show.
    pub fn effective_state(locomotion: Locomotion, is_grounded: bool, vertical_velocity: f32) -> Locomotion {
        match locomotion {
            Locomotion::Dashing | Locomotion::Slamming => locomotion,
            _ if !is_grounded => {
                if vertical_velocity < 0.0 {
                    Locomotion::Jumping
                } else {
                    Locomotion::Falling
                }
            }
            grounded => grounded,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        locomotion: Locomotion,
        is_grounded: bool,
        vertical_velocity: f32,
        rng: &mut SimRng,
    ) {
        self.time += dt / REFERENCE_HZ as f32;

        let next = Self::effective_state(locomotion, is_grounded, vertical_velocity);
        if next != self.state {
            self.enter_state(next);
        }

        match self.state {
            Locomotion::Idle => self.apply_idle(),
            Locomotion::Running => self.apply_running(),
            Locomotion::Jumping => self.apply_jumping(vertical_velocity),
            Locomotion::Falling => self.apply_falling(vertical_velocity),
            Locomotion::Dashing => {
                self.apply_dashing();
                let (scale, rotation) = (self.params.scale, self.params.rotation);
                self.side.emit_dash(dt, scale, rotation, rng);
            }
            Locomotion::Slamming => {
                self.apply_slamming();
                self.schedule_slam_waves();
                self.side.emit_impact(dt, rng);
            }
        }

        self.frame_timer += dt;
        while self.frame_timer >= FRAME_DELAY {
            self.frame_timer -= FRAME_DELAY;
            self.frame_index = (self.frame_index + 1) % FRAME_COUNT;
        }
        self.params.frame_index = self.frame_index;

        self.side.update(dt, rng);
        self.shake.update(dt, rng);
    }

    fn enter_state(&mut self, next: Locomotion) {
        log::trace!("Animation state {} -> {}", self.state, next);
        match self.state {
            Locomotion::Dashing => self.side.clear_dash(),
            Locomotion::Slamming => self.side.clear_slam(),
            _ => {}
        }
        self.state = next;
        self.state_entered_at = self.time;
        self.frame_timer = 0.0;
        self.frame_index = 0;
        self.waves_scheduled = 0;
    }

    fn state_time(&self) -> f32 {
        self.time - self.state_entered_at
    }

    fn schedule_slam_waves(&mut self) {
        let elapsed = self.state_time();
        while let Some(&(delay, color, speed)) = SLAM_WAVES.get(self.waves_scheduled) {
            if elapsed + 1e-4 < delay {
                break;
            }
            if self.waves_scheduled == 0 {
                self.shake.shake(
                    SLAM_SHAKE_INTENSITY,
                    SLAM_SHAKE_SECONDS * REFERENCE_HZ as f32,
                );
            }
            self.side.push_wave(SideWave::new(color, speed));
            self.waves_scheduled += 1;
        }
    }

    fn apply_idle(&mut self) {
        self.params = AnimationParams {
            glow_intensity: 0.1,
            ..AnimationParams::REST
        };
    }

    fn apply_running(&mut self) {
        let i = self.intensity;
        let t = self.time * 12.0 * i;
        self.params = AnimationParams {
            squash: 1.0 + 0.3 * i * t.sin().abs(),
            stretch: 1.0 - 0.25 * i * (t + 0.5).sin().abs(),
            rotation: 0.15 * i * (t * 0.4).sin(),
            color_pulse: 1.0 + 0.15 * i * (t * 1.5).sin(),
            glow_intensity: 0.4 + 0.3 * t.sin(),
            shadow_size: 0.2 * t.sin().abs(),
            ..AnimationParams::REST
        };
    }

    fn apply_jumping(&mut self, vy: f32) {
        let i = self.intensity;
        let progress = self.state_time() * 3.0 * i;
        let t = self.time * 4.0;
        let (squash, stretch) = if progress < 0.8 {
            let k = progress / 0.8;
            (0.6 + 0.4 * k, 1.6 - 0.6 * k)
        } else {
            (
                1.0 + 0.2 * i * (t * 2.0).sin(),
                1.0 - 0.15 * i * (t * 2.0 + 0.5).sin(),
            )
        };
        self.params = AnimationParams {
            squash,
            stretch,
            rotation: -vy * 0.1 * i,
            color_pulse: 1.0 + 0.5 * i * (0.7 + 0.3 * (t * 3.0).sin()),
            glow_intensity: 0.5 + 0.4 * (t * 2.5).sin(),
            energy_pulse: 0.8 + 0.7 * (t * 4.0).sin(),
            ..AnimationParams::REST
        };
    }

    fn apply_falling(&mut self, vy: f32) {
        let i = self.intensity;
        let t = self.time * 3.0;
        self.params = AnimationParams {
            squash: 1.0 - 0.25 * i * (t * 3.0).sin(),
            stretch: 1.0 + 0.4 * i * (t * 3.0 + 0.3).sin(),
            rotation: vy * 0.05 * i,
            color_pulse: 1.0 - 0.3 * i * (vy.abs() / 35.0).min(1.0),
            glow_intensity: 0.3 + 0.2 * (t * 2.0).sin(),
            shadow_size: 0.3 * (1.0 + (t * 2.0).sin()),
            ..AnimationParams::REST
        };
    }

    fn apply_dashing(&mut self) {
        let i = self.intensity * 1.8;
        let t = self.time * 40.0 * i;
        self.params = AnimationParams {
            pulse: 1.0 + 0.4 * i * t.sin(),
            scale: 1.2 + 0.4 * i * (t * 0.5).sin(),
            squash: 1.0 + 0.5 * i * (t * 0.8 + 0.2).sin(),
            stretch: 1.8 + 0.6 * i * (t * 0.6 + 0.4).sin(),
            // Energy carries over from the jump that usually precedes a dash.
            energy_pulse: self.params.energy_pulse,
            ..AnimationParams::REST
        };
    }

    fn apply_slamming(&mut self) {
        self.params = AnimationParams {
            scale: 1.5,
            squash: 0.5,
            stretch: 1.5,
            glow_intensity: 2.0,
            energy_pulse: self.params.energy_pulse,
            ..AnimationParams::REST
        };
    }

    pub fn state(&self) -> Locomotion {
        self.state
    }

    pub fn params(&self) -> &AnimationParams {
        &self.params
    }

    pub fn side_channel(&self) -> &SideChannel {
        &self.side
    }

    /// Shake offset sampled during the last `update`.
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    pub fn frame_index(&self) -> u8 {
        self.frame_index
    }

    /// Player body color after pulse, state tint and glow boost.
    pub fn modified_color(&self, base: Rgba) -> Rgba {
        let p = &self.params;
        let pulsed = base.scale(p.color_pulse);
        let energy = p.energy_pulse;
        let (r, g, b) = (pulsed.r as f32, pulsed.g as f32, pulsed.b as f32);
        let (r, g, b) = match self.state {
            Locomotion::Dashing => (r + 100.0 * energy, g + 80.0 * energy, b + 60.0 * energy),
            Locomotion::Slamming => (r + 150.0 * energy, g + 60.0 * energy, b - 40.0 * energy),
            Locomotion::Jumping => (r + 30.0 * energy, g + 30.0 * energy, b + 30.0 * energy),
            _ => (r, g, b),
        };
        let tinted = Rgba::new(channel(r), channel(g), channel(b), base.a);
        if p.glow_intensity > 0.5 {
            tinted.scale(1.0 + (p.glow_intensity - 0.5) * 2.0)
        } else {
            tinted
        }
    }

    /// Halo color for the glow pass; alpha follows glow intensity.
    pub fn glow_color(&self, base: Rgba) -> Rgba {
        let glow = self.params.glow_intensity;
        base.scale(1.0 + glow).with_alpha(200.0 * glow)
    }
}

impl Default for AnimationDirector {
    fn default() -> Self {
        Self::new(DEFAULT_INTENSITY)
    }
}

fn channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
