use super::{decay, Lifetime};
use glam::Vec2;
use nr_render::{RenderTarget, Rgba};

const GRAVITY: f32 = 0.15;
const DAMPING: f32 = 0.97;
const MIN_SIZE: f32 = 2.0;

/// Hot ember with damped ballistic motion and a layered glow.
#[derive(Debug, Clone)]
pub struct Spark {
    pos: Vec2,
    vel: Vec2,
    color: Rgba,
    life: Lifetime,
    initial_size: f32,
}

impl Spark {
    pub fn new(pos: Vec2, angle: f32, speed: f32, color: Rgba, life: f32, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            color,
            life: Lifetime::new(life),
            initial_size: size.max(MIN_SIZE),
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;
        self.vel *= decay(DAMPING, dt);
        self.life.tick(dt);
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn alpha(&self) -> f32 {
        255.0 * self.life.ratio()
    }

    pub fn size(&self) -> f32 {
        (self.initial_size * self.life.ratio().powf(0.7)).max(MIN_SIZE)
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if self.is_expired() {
            return;
        }
        let (alpha, size) = (self.alpha(), self.size());

        let glow_size = size * 2.5;
        let glow_alpha = alpha * 0.15;
        for i in 0..3 {
            let i = i as f32;
            target.fill_circle(
                self.pos,
                glow_size * (1.0 - i * 0.2),
                self.color.with_alpha(glow_alpha * (0.8 - i * 0.2)),
            );
        }

        let hot = Rgba::new(
            self.color.r.saturating_add(100),
            self.color.g.saturating_add(100),
            self.color.b.saturating_add(50),
            255,
        );
        target.fill_circle(self.pos, size * 1.5, hot.with_alpha(alpha * 0.5));
        target.fill_circle(self.pos, size, Rgba::rgb(255, 255, 220).with_alpha(alpha));
        target.fill_circle(self.pos, size * 0.5, Rgba::WHITE.with_alpha(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_and_size_never_increase() {
        let mut spark = Spark::new(Vec2::ZERO, 1.0, 8.0, Rgba::WHITE, 15.0, 6.0);
        let (mut alpha, mut size) = (spark.alpha(), spark.size());
        while !spark.is_expired() {
            spark.advance(1.0);
            assert!(spark.alpha() <= alpha);
            assert!(spark.size() <= size);
            alpha = spark.alpha();
            size = spark.size();
        }
        assert_eq!(spark.size(), MIN_SIZE);
    }

    #[test]
    fn expires_on_exact_tick() {
        let mut spark = Spark::new(Vec2::ZERO, 0.0, 1.0, Rgba::WHITE, 15.0, 4.0);
        for _ in 0..14 {
            spark.advance(1.0);
        }
        assert!(!spark.is_expired());
        spark.advance(1.0);
        assert!(spark.is_expired());
    }

    #[test]
    fn gravity_bends_path_downward() {
        let mut spark = Spark::new(Vec2::ZERO, 0.0, 5.0, Rgba::WHITE, 30.0, 4.0);
        for _ in 0..10 {
            spark.advance(1.0);
        }
        assert!(spark.position().y > 0.0);
        assert!(spark.position().x > 0.0);
    }
}
