//! Logical input with both edge-triggered and level-triggered queries.
//!
//! The simulation never sees physical keys, only [`Action`]s. A platform
//! layer (or a replay file) maps its own events onto `key_down`/`key_up`.
//!
//! - **Held:** true every step the action is down. Used for movement and the
//!   dash direction.
//! - **Just pressed:** true only on the step the press happened. Cleared by
//!   `end_frame()`, which the loop calls only after at least one fixed step has
//!   consumed it, so a press is never lost on a frame with zero steps.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,
    Dash,
    Slam,
    Pause,
    Confirm,
    Restart,
}

/// Read-only view of input for one simulation step.
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
    fn is_just_pressed(&self, action: Action) -> bool;

    /// Horizontal intent in {-1, 0, 1}.
    fn axis_x(&self) -> f32 {
        axis(self.is_held(Action::MoveLeft), self.is_held(Action::MoveRight))
    }

    /// Vertical intent in {-1, 0, 1}, screen-down positive.
    fn axis_y(&self) -> f32 {
        axis(self.is_held(Action::MoveUp), self.is_held(Action::MoveDown))
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, action: Action) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn key_up(&mut self, action: Action) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    pub fn is_just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl InputSource for InputState {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }
}

/// Input for exactly one step, as produced by a replay or an autopilot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: HashSet<Action>,
    pub pressed: HashSet<Action>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    /// A press also counts as held for the step it happens on.
    pub fn pressing(mut self, action: Action) -> Self {
        self.held.insert(action);
        self.pressed.insert(action);
        self
    }
}

impl InputSource for InputSnapshot {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Action::Jump);
        assert!(input.is_held(Action::Jump));
        assert!(input.is_just_pressed(Action::Jump));
    }

    #[test]
    fn key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Action::Dash);
        input.key_up(Action::Dash);
        assert!(!input.is_held(Action::Dash));
        assert!(input.is_just_released(Action::Dash));
    }

    #[test]
    fn repeated_key_down_keeps_single_press() {
        let mut input = InputState::new();
        input.key_down(Action::Slam);
        input.end_frame();
        // OS key repeat: already held, so no new edge.
        input.key_down(Action::Slam);
        assert!(input.is_held(Action::Slam));
        assert!(!input.is_just_pressed(Action::Slam));
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Action::MoveLeft);
        assert!(!input.is_just_released(Action::MoveLeft));
    }

    #[test]
    fn end_frame_keeps_held_state() {
        let mut input = InputState::new();
        input.key_down(Action::MoveRight);
        input.end_frame();
        assert!(!input.is_just_pressed(Action::MoveRight));
        assert!(input.is_held(Action::MoveRight));
    }

    #[test]
    fn axes_cancel_when_both_held() {
        let mut input = InputState::new();
        input.key_down(Action::MoveLeft);
        assert_eq!(input.axis_x(), -1.0);
        input.key_down(Action::MoveRight);
        assert_eq!(input.axis_x(), 0.0);
        input.key_down(Action::MoveDown);
        assert_eq!(input.axis_y(), 1.0);
    }

    #[test]
    fn snapshot_press_implies_held() {
        let snap = InputSnapshot::new().pressing(Action::Jump);
        assert!(snap.is_held(Action::Jump));
        assert!(snap.is_just_pressed(Action::Jump));
        assert!(!snap.is_just_pressed(Action::Dash));
    }
}
