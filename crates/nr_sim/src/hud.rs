use crate::session::GamePhase;
use crate::theme::Theme;
use serde::Serialize;

/// What the HUD and menus need each frame. Built by the session; never fed
/// back into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: f32,
    pub high_score: u32,
    /// 1.0 right after a dash, 0.0 when ready.
    pub dash_cooldown_ratio: f32,
    pub slam_cooldown_ratio: f32,
    pub theme_colors: Theme,
    pub camera_speed: f32,
    pub live_effects: usize,
    pub steps: u64,
}

impl HudSnapshot {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to encode HUD snapshot: {e}"))
    }
}

pub(crate) fn cooldown_ratio(remaining: f32, total: f32) -> f32 {
    if total <= 0.0 {
        0.0
    } else {
        (remaining / total).clamp(0.0, 1.0)
    }
}
