//! Fixed-step frame clock.
//!
//! Rendering may run at any rate, but the simulation only ever advances in
//! whole fixed steps. Each step hands the simulation a frame multiplier
//! (`step_multiplier()`), where `1.0` means one reference tick at
//! [`REFERENCE_HZ`]. Every timer, integration step and effect decay in the
//! game scales by that multiplier, so a 120 Hz step rate produces the same
//! trajectories as 60 Hz with half-sized steps.

use std::time::Instant;

/// Rate at which all tuned constants (speeds, tick durations) were authored.
pub const REFERENCE_HZ: f64 = 60.0;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_frame_time: f64,
    accumulator: f64,
    pub total_time: f64,
    pub step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Option<Instant>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_step_rate(REFERENCE_HZ)
    }

    pub fn with_step_rate(hz: f64) -> Self {
        let hz = if hz > 0.0 { hz } else { REFERENCE_HZ };
        Self {
            fixed_dt: 1.0 / hz,
            max_frame_time: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: None,
            fps_samples: [1.0 / REFERENCE_HZ; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: REFERENCE_HZ,
        }
    }

    /// Frame multiplier handed to the simulation for each fixed step.
    pub fn step_multiplier(&self) -> f32 {
        (self.fixed_dt * REFERENCE_HZ) as f32
    }

    /// Start a frame using wall-clock time since the previous call.
    pub fn begin_frame_now(&mut self) {
        let now = Instant::now();
        let elapsed = match self.last_instant {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => self.fixed_dt,
        };
        self.last_instant = Some(now);
        self.begin_frame(elapsed);
    }

    /// Start a frame that took `elapsed` seconds of real time.
    pub fn begin_frame(&mut self, elapsed: f64) {
        self.real_dt = elapsed.max(0.0);

        // Spiral-of-death cap
        if self.real_dt > self.max_frame_time {
            log::warn!(
                "Frame took {:.1}ms, capping to {:.0}ms",
                self.real_dt * 1000.0,
                self.max_frame_time * 1000.0
            );
            self.real_dt = self.max_frame_time;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        // Small tolerance so frame times that are exact multiples of the step
        // do not lose a step to rounding.
        if self.accumulator + 1e-9 >= self.fixed_dt {
            self.accumulator = (self.accumulator - self.fixed_dt).max(0.0);
            self.total_time += self.fixed_dt;
            self.step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
