use glam::Vec2;
use nr_render::{RenderTarget, Rgba};

const START_RADIUS: f32 = 5.0;
const RING_SPACING: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub width: f32,
    speed_factor: f32,
}

/// Concentric expanding rings. Each ring grows at its own rate and fades as
/// `255 * (1 - radius / max_radius)`; the set expires once every ring has
/// reached the max radius.
#[derive(Debug, Clone)]
pub struct RingBurst {
    center: Vec2,
    color: Rgba,
    max_radius: f32,
    speed: f32,
    rings: Vec<Ring>,
}

impl RingBurst {
    pub fn new(
        center: Vec2,
        color: Rgba,
        max_radius: f32,
        width: f32,
        speed: f32,
        ring_count: usize,
    ) -> Self {
        Self::starting_at(center, color, START_RADIUS, max_radius, width, speed, ring_count)
    }

    pub fn starting_at(
        center: Vec2,
        color: Rgba,
        start_radius: f32,
        max_radius: f32,
        width: f32,
        speed: f32,
        ring_count: usize,
    ) -> Self {
        let max_radius = max_radius.max(start_radius + 1.0);
        let rings = (0..ring_count.max(1))
            .map(|i| {
                let i = i as f32;
                Ring {
                    radius: (start_radius + i * RING_SPACING).min(max_radius),
                    width: (width - i * 2.0).max(2.0),
                    speed_factor: (1.0 - i * 0.1).max(0.1),
                }
            })
            .collect();
        Self {
            center,
            color,
            max_radius,
            speed,
            rings,
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        self.center.x += dx;
    }

    pub(super) fn advance(&mut self, dt: f32) {
        for ring in &mut self.rings {
            ring.radius = (ring.radius + self.speed * ring.speed_factor * dt).min(self.max_radius);
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring_alpha(&self, ring: &Ring) -> f32 {
        (255.0 * (1.0 - ring.radius / self.max_radius)).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.rings.iter().all(|r| r.radius >= self.max_radius)
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let inner = self.color.brighten(50.0);
        for ring in &self.rings {
            let alpha = self.ring_alpha(ring);
            if alpha <= 0.0 {
                continue;
            }
            target.stroke_circle(self.center, ring.radius, self.color.with_alpha(alpha), ring.width);
            let half = (ring.width * 0.5).max(1.0);
            target.stroke_circle(
                self.center,
                (ring.radius - half).max(1.0),
                inner.with_alpha(alpha * 0.5),
                half,
            );
        }
    }
}
