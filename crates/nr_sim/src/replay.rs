use nr_core::{Action, InputSnapshot, REFERENCE_HZ};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub held: Vec<Action>,
    #[serde(default)]
    pub pressed: Vec<Action>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// One snapshot per step. Held actions last for every repeat; presses
    /// only fire on the first.
    pub fn expanded_inputs(&self) -> Vec<InputSnapshot> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for i in 0..frame.repeat.max(1) {
                let mut input = InputSnapshot::new();
                for &action in &frame.held {
                    input = input.holding(action);
                }
                if i == 0 {
                    for &action in &frame.pressed {
                        input = input.pressing(action);
                    }
                }
                out.push(input);
            }
        }
        out
    }

    /// Frame multiplier for `fixed_dt`.
    pub fn step_multiplier(&self) -> f32 {
        (self.fixed_dt as f64 * REFERENCE_HZ) as f32
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    log::info!(
        "Loaded replay {} ({} frames, seed {})",
        path.display(),
        replay.frames.len(),
        replay.seed
    );
    Ok(replay)
}

pub fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 || replay.fixed_dt.is_nan() {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}
