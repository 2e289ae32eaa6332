//! Neon Runner headless runner.
//!
//! Drives a `GameSession` through the fixed-step `FrameClock` the same way a
//! windowed front end would:
//!
//!   1. `begin_frame()` with the simulated render-frame duration
//!   2. `while should_step()` feed one input snapshot per fixed step
//!   3. after the last step, optionally rasterize the final frame to PNG
//!
//! Input comes from a replay file when one is given, otherwise from the
//! autopilot. The final HUD snapshot is printed to stdout as JSON.

mod autopilot;

use std::path::{Path, PathBuf};

use clap::Parser;

use autopilot::Autopilot;
use nr_core::{FrameClock, InputSnapshot};
use nr_render::RasterTarget;
use nr_sim::audio::RecordingAudio;
use nr_sim::{
    draw_frame, load_config_from_path, load_replay_from_path, GameConfig, GameSession,
    ReplaySequence, Sound,
};

const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";
const PROGRESS_EVERY_STEPS: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "nr_game", version, about = "Headless Neon Runner simulation")]
struct Cli {
    /// Game config JSON. Defaults are used when the file is missing.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Input replay JSON. Without one the autopilot plays.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Fixed steps to simulate. A replay stops at its last frame.
    #[arg(long, default_value_t = 1800)]
    ticks: u64,

    /// RNG seed. Overrides the replay's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated render rate; the fixed step rate stays at the reference rate.
    #[arg(long, default_value_t = 60.0)]
    render_fps: f64,

    /// Character animation intensity (0.8..=3.0).
    #[arg(long)]
    intensity: Option<f32>,

    /// Write the final frame to this PNG.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

enum Driver {
    Replay(std::vec::IntoIter<InputSnapshot>),
    Autopilot(Autopilot),
}

impl Driver {
    fn next_input(&mut self, session: &GameSession) -> Option<InputSnapshot> {
        match self {
            Driver::Replay(frames) => frames.next(),
            Driver::Autopilot(pilot) => Some(pilot.next_input(session)),
        }
    }
}

fn load_config(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::warn!("Config {} not found, using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let config = load_config_from_path(path)?;
    log::info!("Loaded config {}", path.display());
    Ok(config)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    log::info!("Neon Runner starting...");

    let mut config = load_config(&cli.config)?;
    if let Some(intensity) = cli.intensity {
        config.effects.animation_intensity = intensity;
    }

    let replay: Option<ReplaySequence> = cli
        .replay
        .as_deref()
        .map(load_replay_from_path)
        .transpose()?;
    let seed = cli
        .seed
        .or_else(|| replay.as_ref().map(|r| r.seed))
        .unwrap_or(0);

    let mut clock = match &replay {
        Some(r) => FrameClock::with_step_rate(1.0 / r.fixed_dt as f64),
        None => FrameClock::new(),
    };
    let mut driver = match &replay {
        Some(r) => Driver::Replay(r.expanded_inputs().into_iter()),
        None => Driver::Autopilot(Autopilot::new(true)),
    };

    let (width, height) = (config.viewport.width, config.viewport.height);
    let mut session = GameSession::new(config, seed);
    let mut audio = RecordingAudio::new();
    let render_dt = if cli.render_fps > 0.0 {
        1.0 / cli.render_fps
    } else {
        clock.fixed_dt
    };

    log::info!(
        "Simulating up to {} steps (seed {}, {} input)",
        cli.ticks,
        seed,
        if replay.is_some() { "replay" } else { "autopilot" }
    );

    'frames: while clock.step_count < cli.ticks {
        clock.begin_frame(render_dt);
        while clock.should_step() {
            let Some(input) = driver.next_input(&session) else {
                log::info!("Replay finished after {} steps", clock.step_count - 1);
                break 'frames;
            };
            session.tick(&input, clock.step_multiplier(), &mut audio);
            if clock.step_count % PROGRESS_EVERY_STEPS == 0 {
                log::info!(
                    "Step {}: {:?}, score {:.0}, {} effects",
                    clock.step_count,
                    session.phase(),
                    session.score(),
                    session.effects().len()
                );
            }
            if clock.step_count >= cli.ticks {
                break 'frames;
            }
        }
    }

    log::info!(
        "Finished after {} steps: {} runs, high score {}, sounds jump={} dash={} slam={} impact={} kill={}",
        session.steps(),
        session.runs(),
        session.high_score(),
        audio.count(Sound::Jump),
        audio.count(Sound::Dash),
        audio.count(Sound::Slam),
        audio.count(Sound::SlamImpact),
        audio.count(Sound::EnemyKill)
    );

    if let Some(path) = &cli.snapshot {
        let mut target = RasterTarget::new(width, height);
        draw_frame(&session, &mut target);
        target.save_png(path)?;
        log::info!("Wrote snapshot {}", path.display());
    }

    println!("{}", session.hud().to_json()?);
    Ok(())
}
