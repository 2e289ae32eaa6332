use super::Lifetime;
use nr_core::Rect;
use nr_render::{RenderTarget, Rgba};

/// Full-screen tint whose alpha falls linearly from `intensity` to zero.
#[derive(Debug, Clone)]
pub struct Flash {
    color: Rgba,
    intensity: f32,
    life: Lifetime,
}

impl Flash {
    pub fn new(color: Rgba, intensity: f32, duration: f32) -> Self {
        Self {
            color,
            intensity: intensity.clamp(0.0, 255.0),
            life: Lifetime::new(duration),
        }
    }

    pub(super) fn advance(&mut self, dt: f32) {
        self.life.tick(dt);
    }

    pub fn alpha(&self) -> f32 {
        self.intensity * self.life.ratio()
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let alpha = self.alpha();
        if alpha <= 0.0 {
            return;
        }
        let (w, h) = target.size();
        target.fill_rect(
            Rect::new(0.0, 0.0, w as f32, h as f32),
            self.color.with_alpha(alpha),
        );
    }
}
