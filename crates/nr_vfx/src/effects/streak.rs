use super::Lifetime;
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_render::{RenderTarget, Rgba};
use rand::Rng;

const SPEED_LINE_LIFE: f32 = 20.0;
const SPEED_LINE_ALPHA: f32 = 180.0;
const WARP_SPEED: f32 = 15.0 * 0.8;
const WARP_LIFE: f32 = 8.0;
// Warps drawing below this alpha are skipped.
const WARP_MIN_VISIBLE_ALPHA: f32 = 10.0;

/// Straight motion streak with a tail pointing back along its velocity.
/// Covers both the long speed lines and the short, bright warp streaks.
#[derive(Debug, Clone)]
pub struct Streak {
    pos: Vec2,
    vel: Vec2,
    color: Rgba,
    tail: f32,
    base_alpha: f32,
    initial_width: f32,
    min_visible_alpha: f32,
    life: Lifetime,
}

impl Streak {
    pub fn speed_line(pos: Vec2, angle: f32, speed: f32, color: Rgba, rng: &mut SimRng) -> Self {
        let vel = Vec2::from_angle(angle) * speed;
        Self {
            pos,
            vel,
            color,
            tail: speed * rng::range(rng, 1.5, 2.5),
            base_alpha: SPEED_LINE_ALPHA,
            initial_width: rng.gen_range(2..=4) as f32,
            min_visible_alpha: 0.0,
            life: Lifetime::new(SPEED_LINE_LIFE),
        }
    }

    pub fn warp(pos: Vec2, angle: f32, color: Rgba, rng: &mut SimRng) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(angle) * WARP_SPEED,
            color,
            tail: 15.0 * rng::range(rng, 10.0, 18.0) * 1.5,
            base_alpha: 255.0,
            initial_width: rng.gen_range(2..=4) as f32,
            min_visible_alpha: WARP_MIN_VISIBLE_ALPHA,
            life: Lifetime::new(WARP_LIFE),
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life.tick(dt);
    }

    pub fn alpha(&self) -> f32 {
        self.base_alpha * self.life.ratio()
    }

    pub fn width(&self) -> f32 {
        (self.initial_width * self.life.ratio()).max(1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    fn tail_end(&self) -> Vec2 {
        self.pos - self.vel.normalize_or_zero() * self.tail
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let alpha = self.alpha();
        if self.is_expired() || alpha <= self.min_visible_alpha {
            return;
        }
        let (head, end, width) = (self.pos, self.tail_end(), self.width());
        target.line(head, end, self.color.with_alpha(alpha / 3.0), width + 4.0);
        target.line(head, end, self.color.with_alpha(alpha), width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_core::rng::seeded;

    #[test]
    fn speed_line_alpha_and_width_track_life() {
        let mut rng = seeded(30);
        let mut line = Streak::speed_line(Vec2::ZERO, 0.0, 8.0, Rgba::WHITE, &mut rng);
        assert_eq!(line.alpha(), 180.0);
        let (mut alpha, mut width) = (line.alpha(), line.width());
        let mut ticks = 0;
        while !line.is_expired() {
            line.advance(1.0);
            ticks += 1;
            assert!(line.alpha() <= alpha && line.width() <= width);
            alpha = line.alpha();
            width = line.width();
        }
        assert_eq!(ticks, 20);
    }

    #[test]
    fn warp_is_short_lived_and_fast() {
        let mut rng = seeded(31);
        let mut warp = Streak::warp(Vec2::ZERO, 0.0, Rgba::WHITE, &mut rng);
        warp.advance(1.0);
        assert!((warp.pos.x - 12.0).abs() < 1e-4);
        for _ in 0..7 {
            warp.advance(1.0);
        }
        assert!(warp.is_expired());
    }

    #[test]
    fn faint_warp_is_not_drawn() {
        let mut rng = seeded(32);
        let mut warp = Streak::warp(Vec2::ZERO, 0.0, Rgba::WHITE, &mut rng);
        for _ in 0..7 {
            warp.advance(1.0);
        }
        // 255 / 8 is just under 32, still visible.
        let mut list = nr_render::DrawList::new(100, 100);
        warp.draw(&mut list);
        assert_eq!(list.len(), 2);
    }
}
