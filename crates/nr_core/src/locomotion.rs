use serde::{Deserialize, Serialize};

/// The player's movement state, shared by the simulation and the animation
/// director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locomotion {
    #[default]
    Idle,
    Running,
    Jumping,
    Falling,
    Dashing,
    Slamming,
}

impl Locomotion {
    pub fn is_grounded(self) -> bool {
        matches!(self, Locomotion::Idle | Locomotion::Running)
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, Locomotion::Jumping | Locomotion::Falling)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locomotion::Idle => "idle",
            Locomotion::Running => "running",
            Locomotion::Jumping => "jumping",
            Locomotion::Falling => "falling",
            Locomotion::Dashing => "dashing",
            Locomotion::Slamming => "slamming",
        }
    }
}

impl std::fmt::Display for Locomotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
