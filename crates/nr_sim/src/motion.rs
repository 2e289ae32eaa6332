//! Ability commands and kinematic integration for the player.
//!
//! Commands are applied first, then `step` advances one frame multiplier.
//! Anything worth a cosmetic reaction is reported as a [`MotionEvent`]; this
//! module never spawns effects or plays sounds itself.

use crate::config::{DashConfig, GameConfig, PhysicsConfig, SlamConfig};
use crate::player::Player;
use glam::Vec2;
use nr_core::{Action, InputSource, Locomotion};

const SLAM_SPARK_PERIOD: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Jump,
    /// Raw directional input; zero means "forward".
    Dash { direction: Vec2 },
    Slam,
    MoveLeft,
    MoveRight,
}

impl Command {
    /// Commands implied by one step of input.
    pub fn from_input(input: &dyn InputSource) -> Vec<Command> {
        let mut commands = Vec::new();
        if input.is_just_pressed(Action::Jump) {
            commands.push(Command::Jump);
        }
        if input.is_just_pressed(Action::Slam) {
            commands.push(Command::Slam);
        }
        if input.is_just_pressed(Action::Dash) {
            commands.push(Command::Dash {
                direction: Vec2::new(input.axis_x(), input.axis_y()),
            });
        }
        if input.is_held(Action::MoveLeft) {
            commands.push(Command::MoveLeft);
        }
        if input.is_held(Action::MoveRight) {
            commands.push(Command::MoveRight);
        }
        commands
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    Jumped,
    DashStarted { direction: Vec2 },
    /// `count` starts at 1 on the first dash step.
    DashTick { count: u32 },
    DashEnded,
    SlamStarted,
    SlamCharging { spark_pulse: bool, midpoint: bool },
    SlamReleased,
}

pub struct MotionController {
    physics: PhysicsConfig,
    dash: DashConfig,
    slam: SlamConfig,
    move_intent: f32,
    dash_ticks: u32,
    events: Vec<MotionEvent>,
}

impl MotionController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            physics: config.physics.clone(),
            dash: config.dash.clone(),
            slam: config.slam.clone(),
            move_intent: 0.0,
            dash_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Applies one command. Returns false when a guard rejected it; a
    /// rejected command leaves the player untouched.
    pub fn handle_input(&mut self, player: &mut Player, command: Command) -> bool {
        match command {
            Command::Jump => {
                if player.jumps_left == 0 || player.is_dashing() {
                    return false;
                }
                player.jumps_left -= 1;
                player.vy = -self.physics.jump_power;
                player.state = Locomotion::Jumping;
                player.slam_stall = 0.0;
                log::debug!("Jump ({} left)", player.jumps_left);
                self.events.push(MotionEvent::Jumped);
            }
            Command::Slam => {
                if !player.state.is_airborne() || player.slam_cooldown > 0.0 {
                    return false;
                }
                player.state = Locomotion::Slamming;
                player.vy = 0.0;
                player.slam_stall = self.slam.stall_ticks;
                player.slam_cooldown = self.slam.cooldown;
                log::debug!("Slam started");
                self.events.push(MotionEvent::SlamStarted);
            }
            Command::Dash { direction } => {
                if player.dash_cooldown > 0.0 || player.is_dashing() {
                    return false;
                }
                let direction = if direction.length_squared() > 0.0 {
                    direction.normalize()
                } else {
                    Vec2::X
                };
                player.state = Locomotion::Dashing;
                player.dash_timer = self.dash.duration;
                player.dash_cooldown = self.dash.cooldown;
                player.dash_velocity = direction * self.dash.speed;
                player.vy = 0.0;
                player.slam_stall = 0.0;
                player.invulnerable = true;
                self.dash_ticks = 0;
                log::debug!("Dash started toward ({:.2}, {:.2})", direction.x, direction.y);
                self.events.push(MotionEvent::DashStarted { direction });
            }
            Command::MoveLeft => self.move_intent -= 1.0,
            Command::MoveRight => self.move_intent += 1.0,
        }
        true
    }

    /// Advances the player by one frame multiplier.
    pub fn step(&mut self, player: &mut Player, camera_speed: f32, dt: f32) {
        let intent = self.move_intent.clamp(-1.0, 1.0);
        self.move_intent = 0.0;

        if player.state.is_grounded() {
            player.state = if intent != 0.0 {
                Locomotion::Running
            } else {
                Locomotion::Idle
            };
        }

        if player.is_dashing() {
            self.dash_ticks += 1;
            self.events.push(MotionEvent::DashTick {
                count: self.dash_ticks,
            });
            player.pos += player.dash_velocity * dt;
            player.pos.x -= camera_speed * dt;
            player.dash_timer = (player.dash_timer - dt).max(0.0);
            if player.dash_timer <= 0.0 {
                player.state = Locomotion::Idle;
                player.vy = 0.0;
                player.invulnerable = false;
                player.dash_velocity = Vec2::ZERO;
                log::debug!("Dash ended after {} steps", self.dash_ticks);
                self.events.push(MotionEvent::DashEnded);
            }
        } else if player.is_stalled() {
            let before = player.slam_stall;
            let after = (before - dt).max(0.0);
            player.slam_stall = after;
            player.pos.x -= camera_speed * dt;
            let midpoint = (self.slam.stall_ticks / 2.0).floor();
            self.events.push(MotionEvent::SlamCharging {
                spark_pulse: (before / SLAM_SPARK_PERIOD).ceil()
                    != (after / SLAM_SPARK_PERIOD).ceil(),
                midpoint: before > midpoint && after <= midpoint,
            });
            if after <= 0.0 {
                player.vy = self.slam.release_velocity;
                log::debug!("Slam released");
                self.events.push(MotionEvent::SlamReleased);
            }
        } else {
            player.pos.x -= camera_speed * dt;
            player.pos.x += intent * self.physics.player_speed * dt;
            player.pos.y += player.vy * dt;
            let gravity = if player.is_slamming() {
                self.slam.gravity * self.slam.gravity_factor
            } else {
                self.physics.gravity
            };
            player.vy += gravity * dt;
            if player.state == Locomotion::Jumping && player.vy >= 0.0 {
                player.state = Locomotion::Falling;
            }
        }

        player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
        player.slam_cooldown = (player.slam_cooldown - dt).max(0.0);
    }

    /// Post-collision fixup: a grounded player that is now moving down
    /// without having landed has walked off an edge.
    pub fn settle(&mut self, player: &mut Player, landed: bool) {
        if !landed && player.state.is_grounded() && player.vy > 0.0 {
            player.state = Locomotion::Falling;
        }
    }

    pub fn take_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn reset(&mut self) {
        self.move_intent = 0.0;
        self.dash_ticks = 0;
        self.events.clear();
    }
}
