//! Seeded randomness shared by world generation and cosmetics.
//!
//! Everything random in a run draws from one `SimRng` owned by the session,
//! so a seed fully reproduces a run. Helpers here cover the few shapes of
//! randomness the game actually uses.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub type SimRng = StdRng;

pub fn seeded(seed: u64) -> SimRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform angle in `[0, 2π)`.
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..TAU)
}

/// Uniform float in `[lo, hi]`; returns `lo` for an empty range.
pub fn range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Uniform count in `[lo, hi]`; returns `lo` for an empty range.
pub fn count<R: Rng + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Per-step chance scaled by the frame multiplier, so emission rates hold
/// across step sizes.
pub fn chance_per_tick<R: Rng + ?Sized>(rng: &mut R, per_tick: f32, dt: f32) -> bool {
    let p = (per_tick * dt).clamp(0.0, 1.0) as f64;
    rng.gen_bool(p)
}

/// Unit vector at a random angle, scaled.
pub fn polar<R: Rng + ?Sized>(rng: &mut R, length: f32) -> Vec2 {
    Vec2::from_angle(angle(rng)) * length
}
