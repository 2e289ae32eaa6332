use crate::motion::MotionEvent;
use glam::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KillCause {
    Dash,
    Slam,
    DamageWave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverCause {
    EnemyContact,
    LeftBehind,
    FellOut,
}

impl GameOverCause {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverCause::EnemyContact => "enemy contact",
            GameOverCause::LeftBehind => "left behind",
            GameOverCause::FellOut => "fell out",
        }
    }
}

/// A platform contact reported by the collision resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Contact point on the platform's top edge, under the player's center.
    pub point: Vec2,
    pub slam: bool,
    /// The player was jumping or falling before this contact.
    pub from_air: bool,
}

/// Everything that happened during one gameplay step, in the order it
/// happened. The session turns these into effects, sounds and score.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Motion(MotionEvent),
    Landed(Landing),
    EnemyKilled { at: Vec2, cause: KillCause },
    GameOver(GameOverCause),
}
