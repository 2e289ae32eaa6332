use super::Lifetime;
use glam::Vec2;
use nr_render::{RenderTarget, Rgba};

const BASE_ALPHA: f32 = 120.0;
const MIN_SIZE: f32 = 5.0;

/// Stationary fading blob marking where the player was mid-dash.
#[derive(Debug, Clone)]
pub struct Ghost {
    pos: Vec2,
    color: Rgba,
    initial_size: f32,
    life: Lifetime,
}

impl Ghost {
    pub fn new(pos: Vec2, color: Rgba, life: f32, size: f32) -> Self {
        Self {
            pos,
            color,
            initial_size: size.max(MIN_SIZE),
            life: Lifetime::new(life),
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.life.tick(dt);
    }

    pub fn alpha(&self) -> f32 {
        BASE_ALPHA * self.life.ratio()
    }

    pub fn size(&self) -> f32 {
        (self.initial_size * self.life.ratio()).max(MIN_SIZE)
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if self.is_expired() {
            return;
        }
        let (alpha, size) = (self.alpha(), self.size());
        target.fill_circle(self.pos, size * 1.5, self.color.with_alpha(alpha / 3.0));
        target.fill_circle(self.pos, size, self.color.with_alpha(alpha));
        target.fill_circle(self.pos, size * 0.5, self.color.brighten(50.0).with_alpha(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scroll_moves_a_ghost() {
        let mut ghost = Ghost::new(Vec2::new(50.0, 60.0), Rgba::WHITE, 8.0, 10.0);
        ghost.advance(1.0);
        assert_eq!(ghost.pos, Vec2::new(50.0, 60.0));
        ghost.scroll(-5.0);
        assert_eq!(ghost.pos, Vec2::new(45.0, 60.0));
    }

    #[test]
    fn size_shrinks_to_floor() {
        let mut ghost = Ghost::new(Vec2::ZERO, Rgba::WHITE, 8.0, 10.0);
        let mut size = ghost.size();
        while !ghost.is_expired() {
            ghost.advance(1.0);
            assert!(ghost.size() <= size);
            size = ghost.size();
        }
        assert_eq!(size, MIN_SIZE);
        assert_eq!(ghost.alpha(), 0.0);
    }
}
