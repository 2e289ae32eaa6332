use super::decay;
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_render::{RenderTarget, Rgba};
use rand::Rng;

const GRAVITY: f32 = 0.1;
const DAMPING: f32 = 0.98;
const SPEED_RANGE: (f32, f32) = (2.0, 8.0);
const SIZE_RANGE: (f32, f32) = (3.0, 8.0);
const LIFE_RANGE: (u32, u32) = (20, 40);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub initial_life: f32,
}

impl BurstParticle {
    pub fn ratio(&self) -> f32 {
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }

    pub fn alpha(&self) -> f32 {
        255.0 * self.ratio()
    }

    pub fn current_size(&self) -> f32 {
        self.size * self.ratio()
    }
}

/// Radial explosion of independently aging particles. Particles are dropped
/// as their life runs out; the burst expires when none remain.
#[derive(Debug, Clone)]
pub struct Burst {
    color: Rgba,
    particles: Vec<BurstParticle>,
}

impl Burst {
    pub fn new(center: Vec2, color: Rgba, count: usize, rng: &mut SimRng) -> Self {
        Self::with_ranges(center, color, count, SIZE_RANGE, LIFE_RANGE, rng)
    }

    /// Life range is in whole reference ticks.
    pub fn with_ranges(
        center: Vec2,
        color: Rgba,
        count: usize,
        size_range: (f32, f32),
        life_range: (u32, u32),
        rng: &mut SimRng,
    ) -> Self {
        let (life_lo, life_hi) = (life_range.0.max(1), life_range.1.max(life_range.0.max(1)));
        let particles = (0..count)
            .map(|_| {
                let speed = rng::range(rng, SPEED_RANGE.0, SPEED_RANGE.1);
                let life = rng.gen_range(life_lo..=life_hi) as f32;
                BurstParticle {
                    pos: center,
                    vel: rng::polar(rng, speed),
                    size: rng::range(rng, size_range.0, size_range.1),
                    life,
                    initial_life: life,
                }
            })
            .collect();
        Self { color, particles }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        for p in &mut self.particles {
            p.pos.x += dx;
        }
    }

    pub(super) fn advance(&mut self, dt: f32) {
        let damping = decay(DAMPING, dt);
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel.y += GRAVITY * dt;
            p.vel *= damping;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    pub fn is_expired(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let inner = self.color.brighten(50.0);
        for p in &self.particles {
            let (alpha, size) = (p.alpha(), p.current_size());
            target.fill_circle(p.pos, size * 1.5, self.color.with_alpha(alpha / 3.0));
            target.fill_circle(p.pos, size, self.color.with_alpha(alpha));
            target.fill_circle(p.pos, size * 0.5, inner.with_alpha(alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_core::rng::seeded;

    #[test]
    fn seeded_burst_has_exact_count_and_clears_by_max_life() {
        let mut rng = seeded(21);
        let mut burst = Burst::new(Vec2::new(100.0, 100.0), Rgba::WHITE, 25, &mut rng);
        assert_eq!(burst.particles().len(), 25);
        let longest = burst
            .particles()
            .iter()
            .map(|p| p.initial_life)
            .fold(0.0_f32, f32::max);

        let mut ticks = 0.0;
        while ticks < longest {
            assert!(!burst.is_expired());
            burst.advance(1.0);
            ticks += 1.0;
        }
        assert!(burst.is_expired());
    }

    #[test]
    fn particle_alpha_and_size_never_increase() {
        let mut rng = seeded(22);
        let mut burst = Burst::new(Vec2::ZERO, Rgba::WHITE, 1, &mut rng);
        let mut last = burst.particles()[0];
        while !burst.is_expired() {
            burst.advance(1.0);
            if let Some(p) = burst.particles().first() {
                assert!(p.alpha() <= last.alpha());
                assert!(p.current_size() <= last.current_size());
                last = *p;
            }
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let a = Burst::new(Vec2::ZERO, Rgba::WHITE, 8, &mut seeded(5));
        let b = Burst::new(Vec2::ZERO, Rgba::WHITE, 8, &mut seeded(5));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn empty_burst_is_immediately_expired() {
        let burst = Burst::new(Vec2::ZERO, Rgba::WHITE, 0, &mut seeded(1));
        assert!(burst.is_expired());
    }
}
