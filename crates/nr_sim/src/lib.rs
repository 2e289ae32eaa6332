//! Gameplay simulation: the player, the streamed world, and the session that
//! ties them to the effects and animation layers.
//!
//! One `GameSession::tick` runs the fixed order input, motion, collision,
//! world, effects, animation. Drawing goes through [`compositor`] and only
//! reads session state.

pub mod audio;
pub mod collision;
pub mod compositor;
pub mod config;
pub mod emitters;
pub mod events;
pub mod hud;
pub mod motion;
pub mod player;
pub mod replay;
pub mod session;
pub mod theme;
pub mod world;

pub use audio::{AudioSink, NullAudio, Sound};
pub use compositor::draw_frame;
pub use config::{load_config_from_path, GameConfig};
pub use hud::HudSnapshot;
pub use motion::{Command, MotionController, MotionEvent};
pub use player::Player;
pub use replay::{load_replay_from_path, ReplaySequence};
pub use session::{GamePhase, GameSession};
pub use theme::Theme;
pub use world::{Enemy, Platform, PlatformId, Starfield, WorldStreamer};
