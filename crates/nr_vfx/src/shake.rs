use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;

/// Decaying random camera offset.
///
/// Intensity falls linearly from its trigger value to zero over the duration
/// (in reference ticks). A new offset is sampled on every `update`, so
/// reading it during draw never touches the RNG.
#[derive(Debug, Clone, Default)]
pub struct ScreenShake {
    intensity: f32,
    duration: f32,
    elapsed: f32,
    offset: Vec2,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new shake, replacing any shake in progress.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        if intensity <= 0.0 || duration <= 0.0 {
            return;
        }
        self.intensity = intensity;
        self.duration = duration;
        self.elapsed = 0.0;
    }

    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        if self.duration <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.intensity = 0.0;
            self.duration = 0.0;
            self.elapsed = 0.0;
            self.offset = Vec2::ZERO;
            return;
        }
        let distance = rng::range(rng, 0.0, self.current_intensity());
        self.offset = rng::polar(rng, distance);
    }

    pub fn current_intensity(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.intensity * (1.0 - self.elapsed / self.duration).max(0.0)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
