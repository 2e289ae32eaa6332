//! Tuning constants, loaded from JSON at startup.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! values it changes. Durations are in reference ticks unless named otherwise.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub dash: DashConfig,
    pub slam: SlamConfig,
    pub world: WorldConfig,
    pub enemies: EnemyConfig,
    pub damage_wave: DamageWaveConfig,
    pub effects: EffectsConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_power: f32,
    pub player_speed: f32,
    pub max_jumps: u32,
    pub player_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_power: 28.0,
            player_speed: 10.0,
            max_jumps: 2,
            player_size: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            duration: 20.0,
            cooldown: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlamConfig {
    pub stall_ticks: f32,
    pub cooldown: f32,
    pub release_velocity: f32,
    pub gravity: f32,
    pub gravity_factor: f32,
    /// Vertical velocity after a slam landing (negative is up).
    pub bounce: f32,
}

impl Default for SlamConfig {
    fn default() -> Self {
        Self {
            stall_ticks: 15.0,
            cooldown: 120.0,
            release_velocity: 30.0,
            gravity: 5.0,
            gravity_factor: 1.8,
            bounce: -15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub camera_speed_start: f32,
    pub camera_speed_max: f32,
    pub camera_speed_ramp: f32,
    pub platform_width_min: f32,
    pub platform_width_max: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub platform_height: f32,
    /// Candidate platform top edges.
    pub vertical_buckets: Vec<f32>,
    pub spawn_margin: f32,
    pub exit_margin_left: f32,
    pub exit_margin_bottom: f32,
    pub floor_width: f32,
    pub player_spawn: [f32; 2],
    pub star_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            camera_speed_start: 5.0,
            camera_speed_max: 15.0,
            camera_speed_ramp: 0.001,
            platform_width_min: 100.0,
            platform_width_max: 300.0,
            gap_min: 120.0,
            gap_max: 250.0,
            platform_height: 50.0,
            vertical_buckets: vec![1030.0, 850.0, 670.0, 490.0],
            spawn_margin: 100.0,
            exit_margin_left: 50.0,
            exit_margin_bottom: 100.0,
            floor_width: 400.0,
            player_spawn: [150.0, 780.0],
            star_count: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub threshold_width: f32,
    pub spawn_chance: f64,
    pub patrol_speed: f32,
    pub kill_bonus: f32,
    pub size: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            threshold_width: 180.0,
            spawn_chance: 0.35,
            patrol_speed: 2.0,
            kill_bonus: 50.0,
            size: 26.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageWaveConfig {
    pub start_radius: f32,
    pub speed: f32,
    pub thickness: f32,
    pub max_radius: f32,
}

impl Default for DamageWaveConfig {
    fn default() -> Self {
        Self {
            start_radius: 10.0,
            speed: 12.0,
            thickness: 15.0,
            max_radius: 250.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub max_live: usize,
    pub cull_interval: u32,
    pub trail_interval: u32,
    pub animation_intensity: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            max_live: 150,
            cull_interval: 30,
            trail_interval: 3,
            animation_intensity: nr_vfx::animation::DEFAULT_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    let fail = |msg: &str| Err(format!("Config validation failed: {msg}"));

    let p = &config.physics;
    if p.max_jumps < 1 {
        return fail("physics.max_jumps must be >= 1");
    }
    if p.player_speed <= 0.0 || p.jump_power <= 0.0 || p.player_size <= 0.0 {
        return fail("physics speeds and player_size must be > 0");
    }
    if config.dash.speed <= 0.0 || config.dash.duration <= 0.0 {
        return fail("dash.speed and dash.duration must be > 0");
    }

    let s = &config.slam;
    if s.stall_ticks <= 0.0 || s.release_velocity <= 0.0 {
        return fail("slam.stall_ticks and slam.release_velocity must be > 0");
    }

    let w = &config.world;
    if w.camera_speed_start <= 0.0 || w.camera_speed_max < w.camera_speed_start {
        return fail("world camera speeds must be > 0 with start <= max");
    }
    if w.camera_speed_ramp < 0.0 {
        return fail("world.camera_speed_ramp must be >= 0");
    }
    if w.platform_width_min <= 0.0 || w.platform_width_min > w.platform_width_max {
        return fail("world platform widths must be > 0 with min <= max");
    }
    if w.gap_min <= 0.0 || w.gap_min > w.gap_max {
        return fail("world gaps must be > 0 with min <= max");
    }
    if w.platform_height <= 0.0 {
        return fail("world.platform_height must be > 0");
    }
    if w.vertical_buckets.is_empty() {
        return fail("world.vertical_buckets is empty");
    }
    if w.floor_width <= 0.0 {
        return fail("world.floor_width must be > 0");
    }

    let e = &config.enemies;
    if !(0.0..=1.0).contains(&e.spawn_chance) {
        return fail("enemies.spawn_chance must be in [0, 1]");
    }
    if e.patrol_speed <= 0.0 || e.size <= 0.0 {
        return fail("enemies.patrol_speed and enemies.size must be > 0");
    }

    let d = &config.damage_wave;
    if d.speed <= 0.0 || d.thickness <= 0.0 || d.start_radius > d.max_radius {
        return fail("damage_wave speed and thickness must be > 0 with start_radius <= max_radius");
    }

    if config.effects.cull_interval == 0 || config.effects.trail_interval == 0 {
        return fail("effects intervals must be >= 1");
    }
    if config.viewport.width == 0 || config.viewport.height == 0 {
        return fail("viewport dimensions must be > 0");
    }
    Ok(())
}
