use super::Lifetime;
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_render::{RenderTarget, Rgba};

const SEGMENT_LENGTH: f32 = 8.0;
const MIN_INTERIOR_POINTS: usize = 3;
const DRIFT_GRAVITY: f32 = 0.5;
const JITTER: f32 = 1.5;

/// Jagged lightning polyline between two points.
///
/// Interior points are displaced along the bolt's normal, most strongly at
/// the midpoint and tapering to zero at both ends. The polyline then drifts
/// downward and re-jitters slightly every step while it fades.
#[derive(Debug, Clone)]
pub struct Bolt {
    points: Vec<Vec2>,
    normal: Vec2,
    color: Rgba,
    life: Lifetime,
    drift: f32,
}

impl Bolt {
    pub fn new(from: Vec2, to: Vec2, color: Rgba, life: f32, displace: f32, rng: &mut SimRng) -> Self {
        let delta = to - from;
        let length = delta.length();
        let mut points = vec![from];
        let mut normal = Vec2::ZERO;

        if length >= 0.01 {
            normal = Vec2::new(-delta.y, delta.x) / length;
            let interior = ((length / SEGMENT_LENGTH) as usize).max(MIN_INTERIOR_POINTS);
            let divisions = (interior + 1) as f32;
            for i in 1..=interior {
                let t = i as f32 / divisions;
                let taper = 1.0 - (t - 0.5).abs() * 2.0;
                let offset = rng::range(rng, -displace, displace) * taper;
                points.push(from + delta * t + normal * offset);
            }
        }
        points.push(to);

        Self {
            points,
            normal,
            color,
            life: Lifetime::new(life),
            drift: 0.0,
        }
    }

    pub(super) fn scroll(&mut self, dx: f32) {
        for p in &mut self.points {
            p.x += dx;
        }
    }

    pub(super) fn advance(&mut self, dt: f32, rng: &mut SimRng) {
        let last = self.points.len() - 1;
        for (i, p) in self.points.iter_mut().enumerate() {
            p.y += self.drift * dt;
            if i != 0 && i != last {
                *p += self.normal * rng::range(rng, -JITTER, JITTER);
            }
        }
        self.drift += DRIFT_GRAVITY * dt;
        self.life.tick(dt);
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn alpha(&self) -> f32 {
        255.0 * self.life.ratio()
    }

    pub fn is_expired(&self) -> bool {
        self.life.is_over()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if self.is_expired() {
            return;
        }
        let alpha = self.alpha();

        let glow_alpha = alpha * 0.4;
        for width in [10.0_f32, 8.0, 6.0] {
            target.polyline(&self.points, self.color.with_alpha(glow_alpha / (width / 2.0)), width);
        }
        target.polyline(&self.points, self.color.brighten(50.0).with_alpha(alpha * 0.7), 5.0);
        target.polyline(&self.points, Rgba::WHITE.with_alpha(alpha), 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_core::rng::seeded;

    #[test]
    fn zero_length_bolt_is_two_points() {
        let mut rng = seeded(1);
        let p = Vec2::new(10.0, 10.0);
        let bolt = Bolt::new(p, p, Rgba::WHITE, 10.0, 15.0, &mut rng);
        assert_eq!(bolt.points(), &[p, p]);
    }

    #[test]
    fn short_bolt_still_has_three_interior_points() {
        let mut rng = seeded(2);
        let bolt = Bolt::new(Vec2::ZERO, Vec2::new(5.0, 0.0), Rgba::WHITE, 10.0, 15.0, &mut rng);
        assert_eq!(bolt.points().len(), MIN_INTERIOR_POINTS + 2);
    }

    #[test]
    fn long_bolt_scales_point_count_and_keeps_endpoints() {
        let mut rng = seeded(3);
        let to = Vec2::new(80.0, 0.0);
        let bolt = Bolt::new(Vec2::ZERO, to, Rgba::WHITE, 10.0, 15.0, &mut rng);
        assert_eq!(bolt.points().len(), 10 + 2);
        assert_eq!(bolt.points()[0], Vec2::ZERO);
        assert_eq!(*bolt.points().last().unwrap(), to);
    }

    #[test]
    fn displacement_stays_within_bound() {
        let mut rng = seeded(4);
        let bolt = Bolt::new(Vec2::ZERO, Vec2::new(160.0, 0.0), Rgba::WHITE, 10.0, 15.0, &mut rng);
        assert!(bolt.points().iter().all(|p| p.y.abs() <= 15.0));
    }

    #[test]
    fn alpha_fades_to_zero_on_last_tick() {
        let mut rng = seeded(5);
        let mut bolt = Bolt::new(Vec2::ZERO, Vec2::new(40.0, 0.0), Rgba::WHITE, 10.0, 15.0, &mut rng);
        let mut alpha = bolt.alpha();
        for _ in 0..10 {
            bolt.advance(1.0, &mut rng);
            assert!(bolt.alpha() <= alpha);
            alpha = bolt.alpha();
        }
        assert!(bolt.is_expired());
        assert_eq!(alpha, 0.0);
    }
}
