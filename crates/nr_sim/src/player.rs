use crate::config::GameConfig;
use glam::Vec2;
use nr_core::{Locomotion, Rect};

/// The player box and its ability resources.
///
/// `pos` is the top-left corner of a square `size`x`size` box. Timers are
/// in reference ticks and never go below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub vy: f32,
    pub state: Locomotion,
    pub jumps_left: u32,
    pub dash_timer: f32,
    pub dash_cooldown: f32,
    pub dash_velocity: Vec2,
    pub slam_stall: f32,
    pub slam_cooldown: f32,
    pub invulnerable: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let [x, y] = config.world.player_spawn;
        Self::at(Vec2::new(x, y), config)
    }

    pub fn at(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            size: config.physics.player_size,
            vy: 0.0,
            state: Locomotion::Idle,
            jumps_left: config.physics.max_jumps,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
            dash_velocity: Vec2::ZERO,
            slam_stall: 0.0,
            slam_cooldown: 0.0,
            invulnerable: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Midpoint of the bottom edge.
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size)
    }

    pub fn is_dashing(&self) -> bool {
        self.state == Locomotion::Dashing
    }

    pub fn is_slamming(&self) -> bool {
        self.state == Locomotion::Slamming
    }

    /// Slamming and still held in place before the release.
    pub fn is_stalled(&self) -> bool {
        self.is_slamming() && self.slam_stall > 0.0
    }

    /// Dash or slam: enemies die on contact instead of ending the run.
    pub fn is_attacking(&self) -> bool {
        self.is_dashing() || self.is_slamming()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_at_configured_point_with_full_jumps() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        assert_eq!(player.pos, Vec2::new(150.0, 780.0));
        assert_eq!(player.jumps_left, 2);
        assert_eq!(player.center(), Vec2::new(165.0, 795.0));
        assert_eq!(player.feet(), Vec2::new(165.0, 810.0));
        assert!(!player.is_attacking());
    }
}
