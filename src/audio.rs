//! Sound cues for the audio collaborator
//!
//! The simulation never plays sound itself. A frontend maps each emitted
//! `GameEvent` to a cue and hands it to whatever `AudioSink` it owns.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball touched a flipper
    Flipper,
    /// Ball struck the bash target
    Bash,
    /// Ball rolled through a lane, ramp or rollover
    Lane,
    /// Badge advanced without completing
    Progress,
    /// Badge completed
    Badge,
    /// All badges lit
    Champion,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FlipperHit { .. } => Some(SoundEffect::Flipper),
            GameEvent::BashHit { .. } => Some(SoundEffect::Bash),
            GameEvent::LaneRollover { .. } => Some(SoundEffect::Lane),
            GameEvent::BadgeProgress { .. } => Some(SoundEffect::Progress),
            GameEvent::BadgeComplete { .. } => Some(SoundEffect::Badge),
            GameEvent::Champion { .. } => Some(SoundEffect::Champion),
            _ => None,
        }
    }

    /// Cue name as frontends know it
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Flipper => "flipper",
            SoundEffect::Bash => "bash",
            SoundEffect::Lane => "lane",
            SoundEffect::Progress => "progress",
            SoundEffect::Badge => "badge",
            SoundEffect::Champion => "champion",
        }
    }

    /// Sine tone frequency (Hz)
    pub fn tone_hz(&self) -> f32 {
        match self {
            SoundEffect::Flipper => 220.0,
            SoundEffect::Bash => 150.0,
            SoundEffect::Lane => 460.0,
            SoundEffect::Progress => 600.0,
            SoundEffect::Badge => 880.0,
            SoundEffect::Champion => 520.0,
        }
    }

    /// Tone length (seconds)
    pub fn duration(&self) -> f32 {
        0.3
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Play the cue of every event that has one, in order
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Sink that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played since creation
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::trace!(
            "♪ {} ({} Hz, {:.1}s)",
            effect.name(),
            effect.tone_hz(),
            effect.duration()
        );
    }
}
