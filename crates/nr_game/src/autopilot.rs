//! Scripted input for headless runs without a replay file: run right, jump
//! near platform edges, double-jump when nothing is below, dash through
//! enemies ahead.

use nr_core::{Action, InputSnapshot};
use nr_sim::{GamePhase, GameSession};

/// Distance from a platform's right edge at which a jump is taken.
const EDGE_LOOKAHEAD: f32 = 40.0;
/// Horizontal reach when looking for a platform or an enemy ahead.
const GROUND_LOOKAHEAD: f32 = 60.0;
const DASH_RANGE: f32 = 160.0;
/// Past this x the autopilot stops pushing right and lets the scroll catch up.
const MAX_SCREEN_X: f32 = 1400.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    restart: bool,
}

impl Autopilot {
    /// With `restart`, a finished run is restarted instead of left on the
    /// game over screen.
    pub fn new(restart: bool) -> Self {
        Self { restart }
    }

    pub fn next_input(&mut self, session: &GameSession) -> InputSnapshot {
        let input = InputSnapshot::new();
        match session.phase() {
            GamePhase::Start => input.pressing(Action::Confirm),
            GamePhase::Paused => input.pressing(Action::Pause),
            GamePhase::GameOver if self.restart => input.pressing(Action::Restart),
            GamePhase::GameOver => input,
            GamePhase::Playing => self.steer(session, input),
        }
    }

    fn steer(&self, session: &GameSession, mut input: InputSnapshot) -> InputSnapshot {
        let player = session.player();
        let body = player.rect();
        let feet = player.feet();
        let platforms = session.world().platforms();

        if body.right() < MAX_SCREEN_X || player.state.is_airborne() {
            input = input.holding(Action::MoveRight);
        }

        let enemy_ahead = session.world().enemies().iter().any(|e| {
            let dx = e.rect().left() - body.right();
            (0.0..DASH_RANGE).contains(&dx) && (e.center().y - player.center().y).abs() < body.h
        });
        if enemy_ahead && player.dash_cooldown <= 0.0 && !player.is_attacking() {
            return input.pressing(Action::Dash);
        }

        if player.state.is_grounded() {
            let standing_on = platforms
                .iter()
                .find(|p| p.rect.left() <= feet.x && feet.x <= p.rect.right());
            let near_edge = standing_on
                .map(|p| body.right() > p.rect.right() - EDGE_LOOKAHEAD)
                .unwrap_or(true);
            if near_edge {
                input = input.pressing(Action::Jump);
            }
        } else if player.vy > 0.0 && player.jumps_left > 0 && !player.is_attacking() {
            let reach = feet.x + GROUND_LOOKAHEAD;
            let ground_below = platforms.iter().any(|p| {
                p.rect.top() >= feet.y && p.rect.left() <= reach && feet.x <= p.rect.right()
            });
            if !ground_below {
                input = input.pressing(Action::Jump);
            }
        }
        input
    }
}
