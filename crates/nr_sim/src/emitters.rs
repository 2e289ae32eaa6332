//! Gameplay events to cosmetics: which effects to spawn, which shake to
//! trigger and which sound to play.

use crate::audio::Sound;
use crate::events::{GameEvent, Landing};
use crate::motion::MotionEvent;
use crate::player::Player;
use crate::theme::{Theme, ENEMY_BODY, ENEMY_EDGE, SLAM_COLOR, SLAM_RING_COLOR};
use glam::Vec2;
use nr_core::rng;
use nr_core::SimRng;
use nr_vfx::effects::{Bolt, Burst, Flash, Ghost, Orb, RingBurst, Spark, Streak, Trail};
use nr_vfx::{EffectsEngine, ScreenShake};
use rand::Rng;
use std::f32::consts::{FRAC_PI_3, PI};

const BOLT_DISPLACE: f32 = 15.0;
const RING_WIDTH: f32 = 8.0;
const RING_SPEED: f32 = 10.0;
const TRAIL_LIFE: f32 = 12.0;

/// Where spawned effects go.
pub struct FxSinks<'a> {
    pub engine: &'a mut EffectsEngine,
    pub shake: &'a mut ScreenShake,
    pub rng: &'a mut SimRng,
}

pub struct Emitter {
    theme: Theme,
    dash_angle: f32,
    trail_interval: f32,
    trail_timer: f32,
}

impl Emitter {
    pub fn new(theme: Theme, trail_interval: u32) -> Self {
        Self {
            theme,
            dash_angle: 0.0,
            trail_interval: trail_interval.max(1) as f32,
            trail_timer: 0.0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn emit(&mut self, event: &GameEvent, player: &Player, fx: &mut FxSinks) {
        match event {
            GameEvent::Motion(motion) => self.motion(motion, player, fx),
            GameEvent::Landed(landing) => self.landing(landing, player, fx),
            GameEvent::EnemyKilled { at, .. } => enemy_explosion(*at, fx),
            GameEvent::GameOver(_) => {}
        }
    }

    fn motion(&mut self, event: &MotionEvent, player: &Player, fx: &mut FxSinks) {
        let center = player.center();
        let border = self.theme.border;
        match *event {
            MotionEvent::Jumped => {
                fx.engine.spawn(Burst::new(center, self.theme.player, 6, fx.rng));
                for _ in 0..2 {
                    let pos = center + jitter(fx.rng, 10);
                    fx.engine.spawn(Orb::new(pos, border, 4.0, 15.0, fx.rng));
                }
            }
            MotionEvent::DashStarted { direction } => {
                self.dash_angle = direction.y.atan2(direction.x);
                fx.shake.shake(8.0, 8.0);
                fx.engine.spawn(Flash::new(border, 60.0, 6.0));
                fx.engine
                    .spawn(RingBurst::new(center, border, 100.0, RING_WIDTH, RING_SPEED, 2));
                spawn_bolts(center, border, 2, 10.0, fx);
            }
            MotionEvent::DashTick { count } => {
                if count % 4 == 0 {
                    fx.engine.spawn(Ghost::new(center, border, 8.0, 10.0));
                }
                if count % 6 == 1 {
                    let pos = center + jitter(fx.rng, 5);
                    let angle = self.dash_angle + rng::range(fx.rng, -0.15, 0.15);
                    fx.engine.spawn(Streak::warp(pos, angle, border, fx.rng));
                }
                if count % 8 == 0 {
                    let angle = self.dash_angle + PI + rng::range(fx.rng, -0.2, 0.2);
                    let speed = rng::range(fx.rng, 6.0, 10.0);
                    fx.engine
                        .spawn(Streak::speed_line(center, angle, speed, border, fx.rng));
                }
            }
            MotionEvent::DashEnded => {
                fx.engine.spawn(Burst::new(center, border, 8, fx.rng));
            }
            MotionEvent::SlamStarted => {
                fx.engine.spawn(Flash::new(SLAM_COLOR, 80.0, 8.0));
                fx.engine
                    .spawn(RingBurst::new(center, SLAM_COLOR, 150.0, RING_WIDTH, RING_SPEED, 3));
                spawn_bolts(center, SLAM_COLOR, 3, 12.0, fx);
            }
            MotionEvent::SlamCharging {
                spark_pulse,
                midpoint,
            } => {
                if spark_pulse {
                    // Sparks start on a circle and fly inward.
                    for _ in 0..2 {
                        let angle = rng::angle(fx.rng);
                        let distance = fx.rng.gen_range(20..=40) as f32;
                        let pos = center + Vec2::from_angle(angle) * distance;
                        let size = fx.rng.gen_range(4..=6) as f32;
                        fx.engine.spawn(Spark::new(
                            pos,
                            angle + PI,
                            distance / 10.0,
                            SLAM_COLOR,
                            15.0,
                            size,
                        ));
                    }
                }
                if midpoint {
                    fx.engine.spawn(Burst::new(center, SLAM_COLOR, 15, fx.rng));
                    for _ in 0..2 {
                        fx.engine.spawn(RingBurst::starting_at(
                            center,
                            SLAM_RING_COLOR,
                            20.0,
                            120.0,
                            RING_WIDTH,
                            RING_SPEED,
                            3,
                        ));
                    }
                }
            }
            MotionEvent::SlamReleased => {
                fx.shake.shake(12.0, 12.0);
                fx.engine.spawn(Burst::new(center, SLAM_COLOR, 12, fx.rng));
                for _ in 0..6 {
                    let angle = PI + rng::range(fx.rng, -FRAC_PI_3, FRAC_PI_3);
                    let speed = rng::range(fx.rng, 8.0, 18.0);
                    let size = fx.rng.gen_range(3..=5) as f32;
                    fx.engine
                        .spawn(Spark::new(center, angle, speed, SLAM_COLOR, 15.0, size));
                }
            }
        }
    }

    fn landing(&mut self, landing: &Landing, player: &Player, fx: &mut FxSinks) {
        if landing.slam {
            fx.shake.shake(30.0, 30.0);
            for i in 0..2 {
                let i = i as f32;
                fx.engine.spawn(RingBurst::starting_at(
                    landing.point,
                    SLAM_RING_COLOR,
                    30.0 + 30.0 * i,
                    180.0 + 60.0 * i,
                    RING_WIDTH,
                    RING_SPEED,
                    3,
                ));
            }
            fx.engine.spawn(Flash::new(SLAM_COLOR, 100.0, 10.0));
            fx.engine
                .spawn(Burst::new(landing.point, SLAM_COLOR, 25, fx.rng));
        } else if landing.from_air {
            fx.engine
                .spawn(Burst::new(player.feet(), self.theme.player, 8, fx.rng));
        }
    }

    /// Called once per step. Drops a trail every few steps while an ability
    /// is active.
    pub fn trail(&mut self, player: &Player, dt: f32, fx: &mut FxSinks) {
        self.trail_timer += dt;
        if self.trail_timer < self.trail_interval || !player.is_attacking() {
            return;
        }
        self.trail_timer = 0.0;
        let (color, size) = if player.is_dashing() {
            (self.theme.border, fx.rng.gen_range(6..=10))
        } else {
            (SLAM_COLOR, fx.rng.gen_range(8..=12))
        };
        fx.engine.spawn(Trail::new(
            player.center(),
            color,
            size as f32,
            TRAIL_LIFE,
            fx.rng,
        ));
    }
}

/// Sound for an event, if it has one.
pub fn sound_for(event: &GameEvent) -> Option<Sound> {
    match event {
        GameEvent::Motion(MotionEvent::Jumped) => Some(Sound::Jump),
        GameEvent::Motion(MotionEvent::DashStarted { .. }) => Some(Sound::Dash),
        GameEvent::Motion(MotionEvent::SlamStarted) => Some(Sound::Slam),
        GameEvent::Landed(Landing { slam: true, .. }) => Some(Sound::SlamImpact),
        GameEvent::EnemyKilled { .. } => Some(Sound::EnemyKill),
        _ => None,
    }
}

fn enemy_explosion(at: Vec2, fx: &mut FxSinks) {
    fx.engine.spawn(Burst::new(at, ENEMY_EDGE, 20, fx.rng));
    fx.engine
        .spawn(RingBurst::new(at, ENEMY_BODY, 60.0, 6.0, RING_SPEED, 2));
}

fn spawn_bolts(from: Vec2, color: nr_render::Rgba, count: usize, life: f32, fx: &mut FxSinks) {
    for _ in 0..count {
        let to = from + jitter(fx.rng, 60);
        fx.engine
            .spawn(Bolt::new(from, to, color, life, BOLT_DISPLACE, fx.rng));
    }
}

/// Whole-pixel offset in [-reach, reach] on both axes.
fn jitter(rng: &mut SimRng, reach: i32) -> Vec2 {
    let x = rng.gen_range(-reach..=reach) as f32;
    let y = rng.gen_range(-reach..=reach) as f32;
    Vec2::new(x, y)
}
