use super::{decay, Lifetime};
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_render::{RenderTarget, Rgba};

const SIZE_DECAY: f32 = 0.8;
const ORBIT_RATE: f32 = 0.08;

#[derive(Debug, Clone, Copy)]
struct Sparkle {
    angle: f32,
    distance: f32,
    size: f32,
    speed: f32,
    alpha: f32,
}

/// Glowing mote left behind a dashing or slamming player, with a few
/// sparkles orbiting it.
#[derive(Debug, Clone)]
pub struct Trail {
    pos: Vec2,
    color: Rgba,
    size: f32,
    life: Lifetime,
    sparkles: Vec<Sparkle>,
}

impl Trail {
    pub fn new(pos: Vec2, color: Rgba, size: f32, life: f32, rng: &mut SimRng) -> Self {
        let count = rng::count(rng, 5, 10);
        let sparkles = (0..count)
            .map(|_| Sparkle {
                angle: rng::angle(rng),
                distance: rng::range(rng, 0.3, 1.0),
                size: rng::range(rng, 0.3, 0.6) * size,
                speed: rng::range(rng, 0.8, 2.0),
                alpha: rng::range(rng, 180.0, 240.0),
            })
            .collect();
        Self {
            pos,
            color,
            size: size.max(0.0),
            life: Lifetime::new(life),
            sparkles,
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.life.tick(dt);
        self.size *= decay(SIZE_DECAY, dt);
        for s in &mut self.sparkles {
            s.angle += s.speed * ORBIT_RATE * dt;
        }
    }

    pub fn alpha(&self) -> f32 {
        255.0 * self.life.ratio()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if self.is_expired() {
            return;
        }
        let alpha = self.alpha();
        let glow_size = self.size * 3.0;

        for i in (1..=6).rev() {
            let i = i as f32;
            target.fill_circle(
                self.pos,
                glow_size * (1.0 - i * 0.12),
                self.color.with_alpha(alpha / (i + 2.0)),
            );
        }
        target.fill_circle(self.pos, self.size, self.color.with_alpha(alpha));
        for i in 0..3 {
            let i = i as f32;
            target.fill_circle(
                self.pos,
                self.size * (0.8 - i * 0.2),
                self.color.brighten(80.0 - i * 20.0).with_alpha(alpha * (0.9 - i * 0.3)),
            );
        }
        for s in &self.sparkles {
            let at = self.pos + Vec2::from_angle(s.angle) * s.distance * self.size;
            target.fill_circle(at, s.size, Rgba::WHITE.with_alpha(s.alpha * alpha / 255.0));
        }
    }
}
