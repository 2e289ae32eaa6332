//! Fire-and-forget sound triggers.
//!
//! Synthesis and playback live outside the simulation. The session only says
//! what should be heard; a sink decides what to do with it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Jump,
    Dash,
    Slam,
    SlamImpact,
    EnemyKill,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    /// Starts (or restarts) the ambient loop.
    fn start_channel(&mut self);
    fn pause_channel(&mut self);
    fn resume_channel(&mut self);
    fn stop_channel(&mut self);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: Sound) {}
    fn start_channel(&mut self) {}
    fn pause_channel(&mut self) {}
    fn resume_channel(&mut self) {}
    fn stop_channel(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCall {
    Play(Sound),
    Start,
    Pause,
    Resume,
    Stop,
}

/// Keeps every call in order. The headless runner reports from it.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, sound: Sound) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == AudioCall::Play(sound))
            .count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.calls.push(AudioCall::Play(sound));
    }

    fn start_channel(&mut self) {
        self.calls.push(AudioCall::Start);
    }

    fn pause_channel(&mut self) {
        self.calls.push(AudioCall::Pause);
    }

    fn resume_channel(&mut self) {
        self.calls.push(AudioCall::Resume);
    }

    fn stop_channel(&mut self) {
        self.calls.push(AudioCall::Stop);
    }
}
