//! Procedurally streamed platforms, their enemies, and the star backdrop.
//!
//! The world scrolls left by the camera speed every step. Platforms are
//! created at the right as needed and retired once they pass the left edge.

use crate::config::{EnemyConfig, GameConfig, WorldConfig};
use glam::Vec2;
use nr_core::rng;
use nr_core::{Rect, SimRng};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: PlatformId,
    pub rect: Rect,
}

/// A patrolling hazard standing on a platform.
///
/// `platform` only bounds the patrol; when the platform is gone the enemy
/// keeps walking until it scrolls off.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    /// +1 walks right, -1 walks left.
    pub direction: f32,
    pub platform: PlatformId,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// Parallax backdrop scrolling at a third of the camera speed, scaled per star.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut SimRng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng::range(rng, 0.0, width), rng::range(rng, 0.0, height)),
                size: rng.gen_range(1..=3) as f32,
                speed: rng::range(rng, 0.5, 1.5),
            })
            .collect();
        Self {
            stars,
            width,
            height,
        }
    }

    pub fn update(&mut self, camera_speed: f32, dt: f32, rng: &mut SimRng) {
        for star in &mut self.stars {
            star.pos.x -= star.speed * camera_speed / 3.0 * dt;
            if star.pos.x < 0.0 {
                star.pos.x = self.width;
                star.pos.y = rng::range(rng, 0.0, self.height);
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

pub struct WorldStreamer {
    config: WorldConfig,
    enemy_config: EnemyConfig,
    viewport: Vec2,
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    starfield: Starfield,
    next_platform: u64,
    camera_speed: f32,
}

impl WorldStreamer {
    /// A fresh world: the floor under the spawn point, then platforms out
    /// past the right edge of the screen.
    pub fn new(config: &GameConfig, rng: &mut SimRng) -> Self {
        let viewport = Vec2::new(config.viewport.width as f32, config.viewport.height as f32);
        let starfield = Starfield::new(config.world.star_count, viewport.x, viewport.y, rng);
        let mut world = Self {
            config: config.world.clone(),
            enemy_config: config.enemies.clone(),
            viewport,
            platforms: Vec::new(),
            enemies: Vec::new(),
            starfield,
            next_platform: 0,
            camera_speed: config.world.camera_speed_start,
        };
        let floor_height = world.config.platform_height;
        let floor = Rect::new(
            0.0,
            viewport.y - floor_height,
            world.config.floor_width,
            floor_height,
        );
        world.push_platform(floor);
        let fill_to = viewport.x + 2.0 * world.config.spawn_margin;
        while world.rightmost_edge() < fill_to {
            world.spawn_platform(rng);
        }
        world
    }

    /// Left edge of the visible world.
    pub fn left_bound(&self) -> f32 {
        0.0
    }

    pub fn camera_right(&self) -> f32 {
        self.viewport.x
    }

    pub fn bottom_bound(&self) -> f32 {
        self.viewport.y
    }

    pub fn camera_speed(&self) -> f32 {
        self.camera_speed
    }

    /// Linear ramp toward the configured cap.
    pub fn advance_camera(&mut self, dt: f32) -> f32 {
        self.camera_speed = (self.camera_speed + self.config.camera_speed_ramp * dt)
            .min(self.config.camera_speed_max);
        self.camera_speed
    }

    /// Scrolls, patrols, retires and refills. Runs after collision.
    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        let shift = self.camera_speed * dt;
        for platform in &mut self.platforms {
            platform.rect.x -= shift;
        }
        for enemy in &mut self.enemies {
            enemy.pos.x -= shift;
        }
        self.patrol(dt);
        self.retire();
        self.ensure_platform_ahead(rng);
        self.starfield.update(self.camera_speed, dt, rng);
    }

    /// Spawns platforms until the rightmost edge reaches past the camera.
    pub fn ensure_platform_ahead(&mut self, rng: &mut SimRng) {
        let required = self.camera_right() + self.config.spawn_margin;
        while self.rightmost_edge() < required {
            self.spawn_platform(rng);
        }
    }

    pub fn rightmost_edge(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.rect.right())
            .fold(f32::MIN, f32::max)
    }

    fn spawn_platform(&mut self, rng: &mut SimRng) {
        let c = &self.config;
        let x = if self.platforms.is_empty() {
            self.viewport.x
        } else {
            self.rightmost_edge() + rng::range(rng, c.gap_min, c.gap_max)
        };
        let width = rng::range(rng, c.platform_width_min, c.platform_width_max);
        let top = c
            .vertical_buckets
            .choose(rng)
            .copied()
            .unwrap_or(self.viewport.y - c.platform_height);
        let rect = Rect::new(x, top, width, c.platform_height);
        let id = self.push_platform(rect);
        log::trace!("Platform {} spawned at x={:.0} w={:.0} top={:.0}", id.0, x, width, top);

        let e = &self.enemy_config;
        if width > e.threshold_width && rng.gen_bool(e.spawn_chance) {
            let x = rng::range(rng, rect.left(), rect.right() - e.size);
            self.enemies.push(Enemy {
                pos: Vec2::new(x, rect.top() - e.size),
                size: e.size,
                direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                platform: id,
            });
        }
    }

    fn push_platform(&mut self, rect: Rect) -> PlatformId {
        let id = PlatformId(self.next_platform);
        self.next_platform += 1;
        self.platforms.push(Platform { id, rect });
        id
    }

    fn patrol(&mut self, dt: f32) {
        let speed = self.enemy_config.patrol_speed;
        for enemy in &mut self.enemies {
            enemy.pos.x += enemy.direction * speed * dt;
            let Some(home) = self.platforms.iter().find(|p| p.id == enemy.platform) else {
                continue;
            };
            let max_x = home.rect.right() - enemy.size;
            if enemy.pos.x <= home.rect.left() {
                enemy.pos.x = home.rect.left();
                enemy.direction = 1.0;
            } else if enemy.pos.x >= max_x {
                enemy.pos.x = max_x;
                enemy.direction = -1.0;
            }
        }
    }

    fn retire(&mut self) {
        let left = self.left_bound();
        let before = self.platforms.len();
        self.platforms.retain(|p| p.rect.right() >= left);
        let retired = before - self.platforms.len();
        if retired > 0 {
            log::trace!("Retired {} platform(s)", retired);
        }
        self.enemies.retain(|e| e.rect().right() >= left);
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Test and tooling hook: replaces the platform set.
    pub fn set_platforms(&mut self, rects: &[Rect]) {
        self.platforms.clear();
        self.enemies.clear();
        for rect in rects {
            self.push_platform(*rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_core::rng::seeded;

    fn world(seed: u64) -> (WorldStreamer, SimRng) {
        let mut rng = seeded(seed);
        let world = WorldStreamer::new(&GameConfig::default(), &mut rng);
        (world, rng)
    }

    #[test]
    fn fresh_world_has_floor_and_fills_past_the_screen() {
        let (world, _) = world(10);
        let floor = &world.platforms()[0];
        assert_eq!(floor.rect, Rect::new(0.0, 1030.0, 400.0, 50.0));
        assert!(world.rightmost_edge() >= 1920.0 + 200.0);
    }

    #[test]
    fn platform_is_always_ahead_of_the_camera() {
        let (mut world, mut rng) = world(11);
        for _ in 0..2000 {
            world.advance_camera(1.0);
            world.update(1.0, &mut rng);
            assert!(world.rightmost_edge() >= world.camera_right() + 100.0);
        }
    }

    #[test]
    fn generated_platforms_respect_ranges() {
        let (mut world, mut rng) = world(12);
        for _ in 0..600 {
            world.update(1.0, &mut rng);
        }
        let config = WorldConfig::default();
        let platforms = world.platforms();
        for pair in platforms.windows(2) {
            let gap = pair[1].rect.left() - pair[0].rect.right();
            // Scrolling accumulates float error in absolute positions.
            assert!(gap >= config.gap_min - 0.5 && gap <= config.gap_max + 0.5, "gap {gap}");
        }
        for p in platforms.iter().filter(|p| p.id.0 > 0) {
            assert!(p.rect.w >= 100.0 && p.rect.w <= 300.0);
            assert!(config.vertical_buckets.contains(&p.rect.y));
        }
    }

    #[test]
    fn scrolled_off_platforms_and_enemies_are_retired() {
        let (mut world, mut rng) = world(13);
        for _ in 0..200 {
            world.update(1.0, &mut rng);
        }
        assert!(world.platforms().iter().all(|p| p.rect.right() >= 0.0));
        assert!(world.enemies().iter().all(|e| e.rect().right() >= 0.0));
        assert!(world.platform(PlatformId(0)).is_none(), "floor scrolled away");
    }

    #[test]
    fn camera_ramp_is_monotonic_and_capped() {
        let (mut world, _) = world(14);
        let mut last = world.camera_speed();
        for _ in 0..20_000 {
            let speed = world.advance_camera(1.0);
            assert!(speed >= last);
            last = speed;
        }
        assert_eq!(last, 15.0);
    }

    #[test]
    fn enemies_only_spawn_on_wide_platforms() {
        let mut config = GameConfig::default();
        config.enemies.spawn_chance = 1.0;
        let mut rng = seeded(15);
        let world = WorldStreamer::new(&config, &mut rng);
        assert!(!world.enemies().is_empty());
        for enemy in world.enemies() {
            let home = world.platform(enemy.platform).expect("home platform");
            assert!(home.rect.w > 180.0);
            assert_eq!(enemy.rect().bottom(), home.rect.top());
            assert!(enemy.pos.x >= home.rect.left() && enemy.rect().right() <= home.rect.right());
        }
    }

    #[test]
    fn enemy_patrol_turns_at_platform_edges() {
        let (mut world, _) = world(16);
        world.set_platforms(&[Rect::new(100.0, 500.0, 60.0, 50.0)]);
        let home = world.platforms()[0].id;
        world.enemies_mut().push(Enemy {
            pos: Vec2::new(130.0, 474.0),
            size: 26.0,
            direction: 1.0,
            platform: home,
        });
        world.camera_speed = 0.0;
        world.patrol(1.0);
        world.patrol(1.0);
        let enemy = &world.enemies()[0];
        assert_eq!(enemy.pos.x, 134.0);
        assert_eq!(enemy.direction, -1.0);
    }

    #[test]
    fn stars_wrap_to_the_right_edge() {
        let mut rng = seeded(17);
        let mut field = Starfield::new(50, 1920.0, 1080.0, &mut rng);
        for _ in 0..3000 {
            field.update(15.0, 1.0, &mut rng);
            for star in field.stars() {
                assert!(star.pos.x >= 0.0 && star.pos.x <= 1920.0);
                assert!(star.pos.y >= 0.0 && star.pos.y <= 1080.0);
            }
        }
    }
}
