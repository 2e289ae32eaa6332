//! Player-versus-world contact: landings, enemy hits, slam damage waves and
//! the out-of-bounds check.
//!
//! Landings use a vertical sweep from the previous position so a fast fall
//! can not skip over a thin platform between two steps.

use crate::config::{DamageWaveConfig, GameConfig, PhysicsConfig, SlamConfig};
use crate::events::{GameOverCause, KillCause, Landing};
use crate::player::Player;
use crate::world::{Enemy, Platform};
use glam::Vec2;
use nr_core::{Locomotion, Rect};

/// Expanding ring left behind by a slam landing. Kills enemies whose center
/// enters its band.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageWave {
    pub center: Vec2,
    pub radius: f32,
    previous_radius: f32,
    speed: f32,
    thickness: f32,
    max_radius: f32,
}

impl DamageWave {
    pub fn new(center: Vec2, config: &DamageWaveConfig) -> Self {
        Self {
            center,
            radius: config.start_radius,
            previous_radius: config.start_radius,
            speed: config.speed,
            thickness: config.thickness,
            max_radius: config.max_radius,
        }
    }

    pub fn advance(&mut self, shift: f32, dt: f32) {
        self.center.x -= shift;
        self.previous_radius = self.radius;
        self.radius += self.speed * dt;
    }

    /// True when `point` lies in the band swept since the last advance.
    /// The band never reaches past `max_radius`.
    pub fn hits(&self, point: Vec2) -> bool {
        let half = self.thickness / 2.0;
        let outer = self.radius.min(self.max_radius) + half;
        let distance = point.distance(self.center);
        distance >= self.previous_radius - half && distance <= outer
    }

    pub fn is_done(&self) -> bool {
        self.radius > self.max_radius
    }
}

/// What direct enemy contact did this step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyContact {
    pub kills: Vec<(Vec2, KillCause)>,
    pub fatal: bool,
}

pub struct CollisionResolver {
    physics: PhysicsConfig,
    slam: SlamConfig,
    wave: DamageWaveConfig,
    exit_margin_left: f32,
    exit_margin_bottom: f32,
    waves: Vec<DamageWave>,
}

impl CollisionResolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            physics: config.physics.clone(),
            slam: config.slam.clone(),
            wave: config.damage_wave.clone(),
            exit_margin_left: config.world.exit_margin_left,
            exit_margin_bottom: config.world.exit_margin_bottom,
            waves: Vec::new(),
        }
    }

    /// Lands the player on the first platform its vertical sweep crossed.
    ///
    /// `old_pos` is the position before this step's motion; the player
    /// already holds the new one.
    pub fn resolve(
        &mut self,
        player: &mut Player,
        old_pos: Vec2,
        platforms: &[Platform],
    ) -> Option<Landing> {
        let size = player.size;
        let swept = Rect::swept_vertical(player.pos.x, old_pos.y, player.pos.y, size, size);
        let old_bottom = old_pos.y + size;
        let new_bottom = player.pos.y + size;

        let platform = platforms.iter().find(|p| {
            let top = p.rect.top();
            swept.touches(&p.rect) && old_bottom <= top && new_bottom >= top
        })?;
        let top = platform.rect.top();
        player.pos.y = top - size;
        let point = Vec2::new(player.center().x, top);

        if player.is_slamming() {
            player.vy = self.slam.bounce;
            player.state = Locomotion::Jumping;
            player.slam_stall = 0.0;
            player.jumps_left = self.physics.max_jumps.saturating_sub(1);
            self.waves.push(DamageWave::new(point, &self.wave));
            log::debug!("Slam landing on platform {} at x={:.0}", platform.id.0, point.x);
            return Some(Landing {
                point,
                slam: true,
                from_air: true,
            });
        }

        let from_air = player.state.is_airborne();
        player.vy = 0.0;
        player.jumps_left = self.physics.max_jumps;
        if !player.is_dashing() {
            player.state = Locomotion::Idle;
        }
        if from_air {
            log::debug!("Landed on platform {}", platform.id.0);
        }
        Some(Landing {
            point,
            slam: false,
            from_air,
        })
    }

    /// Direct overlap with enemies. Killed enemies are removed.
    pub fn check_enemies(&self, player: &Player, enemies: &mut Vec<Enemy>) -> EnemyContact {
        let body = player.rect();
        let cause = match player.state {
            Locomotion::Dashing => Some(KillCause::Dash),
            Locomotion::Slamming => Some(KillCause::Slam),
            _ => None,
        };
        let mut contact = EnemyContact::default();
        enemies.retain(|enemy| {
            if !enemy.rect().intersects(&body) {
                return true;
            }
            match cause {
                Some(cause) => {
                    contact.kills.push((enemy.center(), cause));
                    false
                }
                None => {
                    contact.fatal = true;
                    true
                }
            }
        });
        contact
    }

    /// Expands every live damage wave and kills enemies inside its band.
    /// Returns the kill positions.
    pub fn update_waves(&mut self, shift: f32, dt: f32, enemies: &mut Vec<Enemy>) -> Vec<Vec2> {
        let mut kills = Vec::new();
        for wave in &mut self.waves {
            wave.advance(shift, dt);
            enemies.retain(|enemy| {
                if wave.hits(enemy.center()) {
                    kills.push(enemy.center());
                    false
                } else {
                    true
                }
            });
        }
        self.waves.retain(|w| !w.is_done());
        kills
    }

    pub fn world_exit(&self, player: &Player, left_bound: f32, bottom_bound: f32) -> Option<GameOverCause> {
        if player.pos.x < left_bound - self.exit_margin_left {
            Some(GameOverCause::LeftBehind)
        } else if player.pos.y > bottom_bound + self.exit_margin_bottom {
            Some(GameOverCause::FellOut)
        } else {
            None
        }
    }

    pub fn waves(&self) -> &[DamageWave] {
        &self.waves
    }

    pub fn reset(&mut self) {
        self.waves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Command, MotionController};
    use crate::world::PlatformId;

    fn platform(id: u64, x: f32, y: f32, w: f32) -> Platform {
        Platform {
            id: PlatformId(id),
            rect: Rect::new(x, y, w, 50.0),
        }
    }

    fn enemy_at(center: Vec2) -> Enemy {
        Enemy {
            pos: center - Vec2::splat(13.0),
            size: 26.0,
            direction: 1.0,
            platform: PlatformId(99),
        }
    }

    fn setup() -> (GameConfig, CollisionResolver, MotionController) {
        let config = GameConfig::default();
        let resolver = CollisionResolver::new(&config);
        let motion = MotionController::new(&config);
        (config, resolver, motion)
    }

    #[test]
    fn fast_fall_does_not_tunnel() {
        let (config, mut resolver, _) = setup();
        let mut player = Player::at(Vec2::new(100.0, 400.0), &config);
        player.state = Locomotion::Falling;
        player.vy = 200.0;
        let old = player.pos;
        player.pos.y += 200.0;
        let landing = resolver
            .resolve(&mut player, old, &[platform(0, 50.0, 500.0, 200.0)])
            .expect("sweep should catch the platform");
        assert_eq!(player.pos.y, 470.0);
        assert_eq!(player.vy, 0.0);
        assert_eq!(player.state, Locomotion::Idle);
        assert!(landing.from_air && !landing.slam);
        assert_eq!(player.jumps_left, 2);
    }

    #[test]
    fn no_landing_when_starting_below_the_top() {
        let (config, mut resolver, _) = setup();
        let mut player = Player::at(Vec2::new(100.0, 480.0), &config);
        player.state = Locomotion::Falling;
        let old = player.pos;
        player.pos.y += 10.0;
        assert!(resolver
            .resolve(&mut player, old, &[platform(0, 50.0, 500.0, 200.0)])
            .is_none());
    }

    #[test]
    fn first_platform_in_order_wins_ties() {
        let (config, mut resolver, _) = setup();
        let mut player = Player::at(Vec2::new(100.0, 400.0), &config);
        player.state = Locomotion::Falling;
        let old = player.pos;
        player.pos.y += 200.0;
        let platforms = [platform(7, 50.0, 550.0, 200.0), platform(3, 50.0, 500.0, 200.0)];
        resolver.resolve(&mut player, old, &platforms);
        assert_eq!(player.pos.y, 520.0);
    }

    #[test]
    fn standing_player_relands_without_dust() {
        let (config, mut resolver, mut motion) = setup();
        let floor = [platform(0, -1000.0, 1030.0, 2000.0)];
        let mut player = Player::at(Vec2::new(150.0, 1000.0), &config);
        for _ in 0..100 {
            let old = player.pos;
            motion.step(&mut player, 5.0, 1.0);
            let landing = resolver.resolve(&mut player, old, &floor);
            assert!(landing.is_some_and(|l| !l.from_air));
            motion.settle(&mut player, landing.is_some());
        }
        assert_eq!(player.state, Locomotion::Idle);
        assert_eq!(player.pos.y, 1000.0);
        assert!((player.pos.x - (150.0 - 500.0)).abs() < 1e-3);
    }

    #[test]
    fn slam_landing_bounces_and_spawns_one_wave() {
        let (config, mut resolver, mut motion) = setup();
        let floor = [platform(0, 0.0, 1030.0, 2000.0)];
        let mut player = Player::at(Vec2::new(300.0, 600.0), &config);
        motion.handle_input(&mut player, Command::Jump);
        motion.handle_input(&mut player, Command::Slam);

        let mut landings = Vec::new();
        for _ in 0..60 {
            let old = player.pos;
            motion.step(&mut player, 0.0, 1.0);
            if let Some(landing) = resolver.resolve(&mut player, old, &floor) {
                landings.push(landing);
                break;
            }
        }
        assert_eq!(landings.len(), 1);
        assert!(landings[0].slam);
        assert_eq!(player.state, Locomotion::Jumping);
        assert_eq!(player.jumps_left, 1);
        assert_eq!(player.vy, -15.0);
        assert_eq!(resolver.waves().len(), 1);
        assert_eq!(resolver.waves()[0].radius, 10.0);
        assert_eq!(resolver.waves()[0].center, Vec2::new(315.0, 1030.0));
    }

    #[test]
    fn damage_wave_kills_enemy_entering_its_band() {
        let (_, mut resolver, _) = setup();
        let config = DamageWaveConfig::default();
        resolver.waves.push(DamageWave::new(Vec2::new(500.0, 1030.0), &config));
        let mut enemies = vec![
            enemy_at(Vec2::new(600.0, 1017.0)),
            enemy_at(Vec2::new(900.0, 1017.0)),
        ];

        let mut killed = Vec::new();
        let mut steps = 0;
        while !resolver.waves().is_empty() {
            killed.extend(resolver.update_waves(0.0, 1.0, &mut enemies));
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(killed.len(), 1);
        assert_eq!(killed[0], Vec2::new(600.0, 1017.0));
        assert_eq!(enemies.len(), 1, "out of reach survives");
    }

    #[test]
    fn fast_wave_can_not_skip_an_enemy() {
        let (_, mut resolver, _) = setup();
        let config = DamageWaveConfig {
            speed: 80.0,
            thickness: 4.0,
            ..DamageWaveConfig::default()
        };
        resolver.waves.push(DamageWave::new(Vec2::ZERO, &config));
        let mut enemies = vec![enemy_at(Vec2::new(130.0, 0.0))];
        for _ in 0..4 {
            resolver.update_waves(0.0, 1.0, &mut enemies);
        }
        assert!(enemies.is_empty());
    }

    #[test]
    fn wave_band_stops_at_max_radius() {
        let (_, mut resolver, _) = setup();
        let config = DamageWaveConfig::default();
        resolver.waves.push(DamageWave::new(Vec2::ZERO, &config));
        let mut enemies = vec![
            enemy_at(Vec2::new(245.0, 0.0)),
            enemy_at(Vec2::new(265.0, 0.0)),
        ];
        let mut killed = Vec::new();
        let mut steps = 0;
        while !resolver.waves().is_empty() {
            killed.extend(resolver.update_waves(0.0, 1.0, &mut enemies));
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(killed, vec![Vec2::new(245.0, 0.0)]);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].center(), Vec2::new(265.0, 0.0));
    }

    #[test]
    fn enemy_contact_kills_or_ends_the_run() {
        let (config, resolver, _) = setup();
        let mut player = Player::at(Vec2::new(100.0, 100.0), &config);
        let mut enemies = vec![enemy_at(player.center())];

        let contact = resolver.check_enemies(&player, &mut enemies);
        assert!(contact.fatal);
        assert_eq!(enemies.len(), 1);

        player.state = Locomotion::Dashing;
        let contact = resolver.check_enemies(&player, &mut enemies);
        assert!(!contact.fatal);
        assert_eq!(contact.kills.len(), 1);
        assert_eq!(contact.kills[0].1, KillCause::Dash);
        assert!(enemies.is_empty());
    }

    #[test]
    fn world_exit_uses_margins() {
        let (config, resolver, _) = setup();
        let mut player = Player::at(Vec2::new(-49.0, 500.0), &config);
        assert_eq!(resolver.world_exit(&player, 0.0, 1080.0), None);
        player.pos.x = -51.0;
        assert_eq!(resolver.world_exit(&player, 0.0, 1080.0), Some(GameOverCause::LeftBehind));
        player.pos = Vec2::new(100.0, 1181.0);
        assert_eq!(resolver.world_exit(&player, 0.0, 1080.0), Some(GameOverCause::FellOut));
    }
}
