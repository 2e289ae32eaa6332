use super::Lifetime;
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_render::{RenderTarget, Rgba};

const MIN_SIZE: f32 = 3.0;
const PULSE_DEPTH: f32 = 0.2;

/// Small energy ball that pulses inside a shrinking envelope.
#[derive(Debug, Clone)]
pub struct Orb {
    pos: Vec2,
    color: Rgba,
    initial_size: f32,
    life: Lifetime,
    age: f32,
    pulse_speed: f32,
    pulse_offset: f32,
}

impl Orb {
    pub fn new(pos: Vec2, color: Rgba, size: f32, life: f32, rng: &mut SimRng) -> Self {
        Self {
            pos,
            color,
            initial_size: size,
            life: Lifetime::new(life),
            age: 0.0,
            pulse_speed: rng::range(rng, 0.1, 0.3),
            pulse_offset: rng::angle(rng),
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.age += dt;
        self.life.tick(dt);
    }

    pub fn alpha(&self) -> f32 {
        255.0 * self.life.ratio()
    }

    /// Upper bound on the drawn size; the pulse only ever shrinks or grows
    /// the orb within `1 ± PULSE_DEPTH` of it.
    pub fn envelope(&self) -> f32 {
        self.initial_size * self.life.ratio()
    }

    pub fn size(&self) -> f32 {
        let pulse = PULSE_DEPTH * (self.age * self.pulse_speed + self.pulse_offset).sin();
        (self.envelope() * (1.0 + pulse)).max(MIN_SIZE)
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if self.is_expired() {
            return;
        }
        let (alpha, size) = (self.alpha(), self.size());
        let ring = size * 2.0;
        for i in 0..3 {
            let i = i as f32;
            let radius = ring - i * 4.0;
            if radius > 0.0 {
                target.stroke_circle(self.pos, radius, self.color.with_alpha(alpha / (i + 2.0)), 2.0);
            }
        }
        for i in 0..3 {
            let i = i as f32;
            target.fill_circle(
                self.pos,
                size * (1.0 - i * 0.3),
                self.color.brighten(i * 30.0).with_alpha(alpha * (0.8 - i * 0.2)),
            );
        }
    }
}
