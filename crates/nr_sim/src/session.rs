//! One run of the game, from the start screen through game over and restart.
//!
//! `tick` is the only mutator. Its order is fixed: phase input, commands,
//! motion, collision, world, damage waves, cosmetics. Everything a frame
//! draws is complete when `tick` returns.

use crate::audio::AudioSink;
use crate::collision::CollisionResolver;
use crate::config::GameConfig;
use crate::emitters::{sound_for, Emitter, FxSinks};
use crate::events::{GameEvent, GameOverCause, KillCause};
use crate::hud::{cooldown_ratio, HudSnapshot};
use crate::motion::{Command, MotionController};
use crate::player::Player;
use crate::theme::Theme;
use crate::world::WorldStreamer;
use glam::Vec2;
use nr_core::rng;
use nr_core::{Action, InputSource, SimRng};
use nr_render::Camera2D;
use nr_vfx::{AnimationDirector, EffectsEngine, EngineLimits, PlayerShape, ScreenShake};
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Start,
    Playing,
    Paused,
    GameOver,
}

pub struct GameSession {
    config: GameConfig,
    rng: SimRng,
    phase: GamePhase,
    camera: Camera2D,
    player: Player,
    motion: MotionController,
    collision: CollisionResolver,
    world: WorldStreamer,
    effects: EffectsEngine,
    director: AnimationDirector,
    shake: ScreenShake,
    emitter: Emitter,
    shape: PlayerShape,
    score: f32,
    high_score: u32,
    steps: u64,
    runs: u32,
    events: Vec<GameEvent>,
    game_over_cause: Option<GameOverCause>,
}

impl GameSession {
    /// A session on the start screen. The first run's world is already
    /// built so the start screen has something to show.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = rng::seeded(seed);
        let theme = Theme::random(&mut rng);
        let shape = pick_shape(&mut rng);
        let world = WorldStreamer::new(&config, &mut rng);
        let limits = EngineLimits {
            max_live: config.effects.max_live,
            cull_interval: config.effects.cull_interval,
        };
        Self {
            camera: Camera2D::new(config.viewport.width, config.viewport.height),
            player: Player::new(&config),
            motion: MotionController::new(&config),
            collision: CollisionResolver::new(&config),
            world,
            effects: EffectsEngine::new(limits),
            director: AnimationDirector::new(config.effects.animation_intensity),
            shake: ScreenShake::new(),
            emitter: Emitter::new(theme, config.effects.trail_interval),
            shape,
            score: 0.0,
            high_score: 0,
            steps: 0,
            runs: 0,
            events: Vec::new(),
            game_over_cause: None,
            phase: GamePhase::Start,
            rng,
            config,
        }
    }

    /// Rebuilds every piece of run state. High score and RNG carry over.
    fn new_run(&mut self, audio: &mut dyn AudioSink) {
        let theme = Theme::random(&mut self.rng);
        self.shape = pick_shape(&mut self.rng);
        self.world = WorldStreamer::new(&self.config, &mut self.rng);
        self.player = Player::new(&self.config);
        self.motion.reset();
        self.collision.reset();
        self.effects.clear();
        self.director.reset();
        self.shake.reset();
        self.emitter = Emitter::new(theme, self.config.effects.trail_interval);
        self.score = 0.0;
        self.game_over_cause = None;
        self.events.clear();
        self.runs += 1;
        self.phase = GamePhase::Playing;
        audio.start_channel();
        log::info!(
            "Run {} started (theme {}, shape {})",
            self.runs,
            theme.name,
            self.shape.as_str()
        );
    }

    pub fn start(&mut self, audio: &mut dyn AudioSink) {
        if self.phase == GamePhase::Start {
            self.new_run(audio);
        }
    }

    pub fn restart(&mut self, audio: &mut dyn AudioSink) {
        if self.phase == GamePhase::GameOver {
            self.new_run(audio);
        }
    }

    pub fn toggle_pause(&mut self, audio: &mut dyn AudioSink) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                audio.pause_channel();
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                audio.resume_channel();
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    /// Advances the session by one frame multiplier of `dt` reference ticks.
    pub fn tick(&mut self, input: &dyn InputSource, dt: f32, audio: &mut dyn AudioSink) {
        self.events.clear();
        if input.is_just_pressed(Action::Pause) {
            self.toggle_pause(audio);
        }
        match self.phase {
            GamePhase::Start => {
                if input.is_just_pressed(Action::Confirm) {
                    self.start(audio);
                }
            }
            GamePhase::Paused => {}
            GamePhase::GameOver => {
                if input.is_just_pressed(Action::Restart) {
                    self.restart(audio);
                } else {
                    // Already-spawned effects finish decaying.
                    let camera_speed = self.world.camera_speed();
                    self.effects.update(camera_speed, dt, &mut self.rng);
                    self.shake.update(dt, &mut self.rng);
                }
            }
            GamePhase::Playing => self.gameplay_step(input, dt, audio),
        }
    }

    fn gameplay_step(&mut self, input: &dyn InputSource, dt: f32, audio: &mut dyn AudioSink) {
        self.steps += 1;
        let camera_speed = self.world.advance_camera(dt);
        self.score += 0.1 * camera_speed * dt;

        for command in Command::from_input(input) {
            self.motion.handle_input(&mut self.player, command);
        }

        let old_pos = self.player.pos;
        self.motion.step(&mut self.player, camera_speed, dt);
        let landing = self
            .collision
            .resolve(&mut self.player, old_pos, self.world.platforms());
        self.motion.settle(&mut self.player, landing.is_some());

        self.events
            .extend(self.motion.take_events().into_iter().map(GameEvent::Motion));
        if let Some(landing) = landing {
            self.events.push(GameEvent::Landed(landing));
        }

        let contact = self
            .collision
            .check_enemies(&self.player, self.world.enemies_mut());
        for (at, cause) in contact.kills {
            self.events.push(GameEvent::EnemyKilled { at, cause });
        }

        self.world.update(dt, &mut self.rng);
        let wave_kills =
            self.collision
                .update_waves(camera_speed * dt, dt, self.world.enemies_mut());
        for at in wave_kills {
            self.events.push(GameEvent::EnemyKilled {
                at,
                cause: KillCause::DamageWave,
            });
        }

        let cause = if contact.fatal {
            Some(GameOverCause::EnemyContact)
        } else {
            self.collision.world_exit(
                &self.player,
                self.world.left_bound(),
                self.world.bottom_bound(),
            )
        };
        if let Some(cause) = cause {
            self.events.push(GameEvent::GameOver(cause));
        }

        let kill_bonus = self.config.enemies.kill_bonus;
        let mut fx = FxSinks {
            engine: &mut self.effects,
            shake: &mut self.shake,
            rng: &mut self.rng,
        };
        for event in &self.events {
            if let GameEvent::EnemyKilled { cause, .. } = event {
                self.score += kill_bonus;
                log::debug!("Enemy killed by {:?}", cause);
            }
            if let Some(sound) = sound_for(event) {
                audio.play(sound);
            }
            self.emitter.emit(event, &self.player, &mut fx);
        }
        if cause.is_none() {
            self.emitter.trail(&self.player, dt, &mut fx);
        }

        self.effects.update(camera_speed, dt, &mut self.rng);
        self.director.update(
            dt,
            self.player.state,
            self.player.state.is_grounded(),
            self.player.vy,
            &mut self.rng,
        );
        self.shake.update(dt, &mut self.rng);

        if let Some(cause) = cause {
            self.end_run(cause, audio);
        }
    }

    fn end_run(&mut self, cause: GameOverCause, audio: &mut dyn AudioSink) {
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.high_score = self.high_score.max(self.score as u32);
        audio.stop_channel();
        log::info!(
            "Game over ({}): score {}, high score {}",
            cause.as_str(),
            self.score as u32,
            self.high_score
        );
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            dash_cooldown_ratio: cooldown_ratio(self.player.dash_cooldown, self.config.dash.cooldown),
            slam_cooldown_ratio: cooldown_ratio(self.player.slam_cooldown, self.config.slam.cooldown),
            theme_colors: self.emitter.theme(),
            camera_speed: self.world.camera_speed(),
            live_effects: self.effects.len(),
            steps: self.steps,
        }
    }

    /// Impact shake plus animation shake, summed for drawing.
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset() + self.director.shake_offset()
    }

    /// Camera carrying this frame's shake offset.
    pub fn camera(&self) -> Camera2D {
        Camera2D {
            offset: self.shake_offset(),
            ..self.camera
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &WorldStreamer {
        &self.world
    }

    pub fn effects(&self) -> &EffectsEngine {
        &self.effects
    }

    pub fn director(&self) -> &AnimationDirector {
        &self.director
    }

    pub fn theme(&self) -> Theme {
        self.emitter.theme()
    }

    pub fn shape(&self) -> PlayerShape {
        self.shape
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Events from the most recent `tick`.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut WorldStreamer {
        &mut self.world
    }
}

fn pick_shape(rng: &mut SimRng) -> PlayerShape {
    PlayerShape::ALL.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCall, RecordingAudio, Sound};
    use crate::world::{Enemy, PlatformId};
    use nr_core::{InputSnapshot, Locomotion, Rect};

    fn playing(seed: u64) -> (GameSession, RecordingAudio) {
        let mut audio = RecordingAudio::new();
        let mut session = GameSession::new(GameConfig::default(), seed);
        session.tick(&InputSnapshot::new().pressing(Action::Confirm), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Playing);
        (session, audio)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::new()
    }

    #[test]
    fn start_screen_waits_for_confirm() {
        let mut audio = RecordingAudio::new();
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.tick(&idle(), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Start);
        assert_eq!(session.steps(), 0);
        session.tick(&idle().pressing(Action::Confirm), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(audio.calls, vec![AudioCall::Start]);
    }

    #[test]
    fn spawn_falls_onto_the_floor_with_dust() {
        let (mut session, mut audio) = playing(2);
        let mut landed_from_air = false;
        for _ in 0..30 {
            session.tick(&idle(), 1.0, &mut audio);
            landed_from_air |= session
                .last_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Landed(l) if l.from_air));
        }
        assert!(landed_from_air);
        assert!(session.player().state.is_grounded());
        assert_eq!(session.player().pos.y, 1000.0);
    }

    #[test]
    fn idle_on_a_platform_only_drifts_with_the_camera() {
        let (mut session, mut audio) = playing(3);
        session
            .world_mut()
            .set_platforms(&[Rect::new(-5000.0, 1030.0, 20_000.0, 50.0)]);
        session.player_mut().pos = Vec2::new(1500.0, 1000.0);
        session.player_mut().state = Locomotion::Idle;
        session.player_mut().vy = 0.0;
        let x0 = session.player().pos.x;
        let mut scrolled = 0.0;
        for _ in 0..100 {
            session.tick(&idle(), 1.0, &mut audio);
            scrolled += session.world().camera_speed();
            assert_eq!(session.player().state, Locomotion::Idle);
            assert_eq!(session.player().pos.y, 1000.0);
        }
        assert!((session.player().pos.x - (x0 - scrolled)).abs() < 1e-2);
    }

    #[test]
    fn pause_freezes_and_toggles_the_ambient_channel() {
        let (mut session, mut audio) = playing(4);
        session.tick(&idle().pressing(Action::Pause), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Paused);
        let steps = session.steps();
        let pos = session.player().pos;
        session.tick(&idle().pressing(Action::Jump), 1.0, &mut audio);
        assert_eq!(session.steps(), steps);
        assert_eq!(session.player().pos, pos);
        session.tick(&idle().pressing(Action::Pause), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(&audio.calls[1..], &[AudioCall::Pause, AudioCall::Resume]);
    }

    #[test]
    fn jump_plays_sound_and_spawns_effects() {
        let (mut session, mut audio) = playing(5);
        session.tick(&idle().pressing(Action::Jump), 1.0, &mut audio);
        assert_eq!(audio.count(Sound::Jump), 1);
        assert!(!session.effects().is_empty());
        assert_eq!(session.player().state, Locomotion::Jumping);
    }

    #[test]
    fn falling_out_ends_the_run_and_keeps_effects_decaying() {
        let (mut session, mut audio) = playing(6);
        session.world_mut().set_platforms(&[Rect::new(3000.0, 1030.0, 100.0, 50.0)]);
        session.player_mut().pos = Vec2::new(1000.0, 780.0);
        let mut ticks = 0;
        while session.phase() == GamePhase::Playing {
            session.tick(&idle(), 1.0, &mut audio);
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.game_over_cause(), Some(GameOverCause::FellOut));
        assert_eq!(session.high_score(), session.score() as u32);
        assert_eq!(audio.calls.last(), Some(&AudioCall::Stop));

        for _ in 0..200 {
            session.tick(&idle(), 1.0, &mut audio);
        }
        assert!(session.effects().is_empty());
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn restart_keeps_high_score_and_resets_the_run() {
        let (mut session, mut audio) = playing(7);
        session.world_mut().set_platforms(&[]);
        while session.phase() == GamePhase::Playing {
            session.tick(&idle(), 1.0, &mut audio);
        }
        let best = session.high_score();
        session.tick(&idle().pressing(Action::Restart), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0.0);
        assert_eq!(session.high_score(), best);
        assert_eq!(session.runs(), 2);
        assert_eq!(session.player().pos, Vec2::new(150.0, 780.0));
    }

    #[test]
    fn touching_an_enemy_without_an_ability_is_fatal() {
        let (mut session, mut audio) = playing(8);
        session
            .world_mut()
            .set_platforms(&[Rect::new(-5000.0, 1030.0, 20_000.0, 50.0)]);
        session.player_mut().pos = Vec2::new(1500.0, 1000.0);
        let pos = session.player().pos;
        session.world_mut().enemies_mut().push(Enemy {
            pos: pos + Vec2::new(4.0, 4.0),
            size: 26.0,
            direction: 1.0,
            platform: PlatformId(0),
        });
        session.tick(&idle(), 1.0, &mut audio);
        assert_eq!(session.game_over_cause(), Some(GameOverCause::EnemyContact));
    }

    #[test]
    fn dashing_through_an_enemy_scores_the_bonus() {
        let (mut session, mut audio) = playing(9);
        session
            .world_mut()
            .set_platforms(&[Rect::new(-5000.0, 1030.0, 20_000.0, 50.0)]);
        session.player_mut().pos = Vec2::new(1000.0, 1000.0);
        let pos = session.player().pos;
        session.world_mut().enemies_mut().push(Enemy {
            pos: pos + Vec2::new(60.0, 4.0),
            size: 26.0,
            direction: 1.0,
            platform: PlatformId(0),
        });
        let before = session.score();
        session.tick(&idle().pressing(Action::Dash), 1.0, &mut audio);
        session.tick(&idle(), 1.0, &mut audio);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.world().enemies().is_empty());
        assert_eq!(audio.count(Sound::EnemyKill), 1);
        assert!(session.score() - before >= 50.0);
    }

    #[test]
    fn slam_landing_wave_clears_nearby_enemies() {
        let (mut session, mut audio) = playing(10);
        session
            .world_mut()
            .set_platforms(&[Rect::new(-5000.0, 1030.0, 20_000.0, 50.0)]);
        session.player_mut().pos = Vec2::new(1000.0, 700.0);
        session.player_mut().state = Locomotion::Falling;
        session.world_mut().enemies_mut().push(Enemy {
            pos: Vec2::new(1120.0, 1004.0),
            size: 26.0,
            direction: 1.0,
            platform: PlatformId(0),
        });
        session.tick(&idle().pressing(Action::Slam), 1.0, &mut audio);
        assert!(session.player().is_slamming());

        let mut slam_landed = false;
        for _ in 0..80 {
            session.tick(&idle(), 1.0, &mut audio);
            slam_landed |= session
                .last_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Landed(l) if l.slam));
        }
        assert!(slam_landed);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.world().enemies().is_empty());
        assert_eq!(audio.count(Sound::SlamImpact), 1);
    }

    #[test]
    fn hud_reports_cooldowns_as_ratios() {
        let (mut session, mut audio) = playing(11);
        session.tick(&idle().pressing(Action::Dash), 1.0, &mut audio);
        let hud = session.hud();
        assert_eq!(hud.phase, GamePhase::Playing);
        assert!(hud.dash_cooldown_ratio > 0.9 && hud.dash_cooldown_ratio < 1.0);
        assert_eq!(hud.slam_cooldown_ratio, 0.0);
    }
}
