//! Badge Pinball - a single-ball arcade pinball table
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, flippers, collisions, shots, game flow)
//! - `tuning`: Data-driven physics and timing balance
//! - `audio`: Sound cue mapping for domain events

pub mod audio;
pub mod sim;
pub mod tuning;

pub use audio::{AudioSink, LogAudio, SoundEffect};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest timestep a single `tick` will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Downward acceleration on the ball (units/s²)
    pub const GRAVITY: f32 = 900.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const LAUNCH_VELOCITY: (f32, f32) = (-150.0, -650.0);

    /// Flipper defaults
    pub const FLIPPER_LENGTH: f32 = 120.0;
    pub const FLIPPER_WIDTH: f32 = 14.0;
    pub const FLIPPER_SPEED: f32 = 7.0;
    /// Exponential approach rate toward the target angle (speed × 8)
    pub const FLIPPER_RESPONSE: f32 = FLIPPER_SPEED * 8.0;
    /// Inbound normal velocity is reflected scaled by this factor
    pub const FLIPPER_REFLECT: f32 = 1.8;
    pub const FLIPPER_IMPULSE_POWERED: f32 = 400.0;
    pub const FLIPPER_IMPULSE_PASSIVE: f32 = 150.0;

    /// Wall/segment bounce
    pub const WALL_RESTITUTION: f32 = 0.9;

    /// Timers (seconds)
    pub const SHOT_COOLDOWN: f32 = 0.5;
    pub const BALL_LOSS_DELAY: f32 = 1.5;
    pub const CELEBRATION_DURATION: f32 = 2.0;

    /// Ball drains once its top edge is this far below the canvas
    pub const DRAIN_MARGIN: f32 = 40.0;

    pub const TOTAL_BALLS: u32 = 3;

    /// Scoring
    pub const BADGE_MAX: u8 = 3;
    pub const PROGRESS_BONUS: u64 = 250;
    pub const COMPLETE_BONUS: u64 = 1000;
    pub const CHAMPION_BONUS: u64 = 10_000;
    /// Multiplier is tracked in tenths: 1.0x .. 2.0x
    pub const MULTIPLIER_BASE_TENTHS: u32 = 10;
    pub const MULTIPLIER_MAX_TENTHS: u32 = 20;

    /// Guards against zero-length contact normals
    pub const SEGMENT_EPSILON: f32 = 0.0001;
    pub const FLIPPER_EPSILON: f32 = 0.001;
}

/// Clamp a raw frame delta to what the physics step may integrate
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    // max() also maps NaN to 0
    dt.max(0.0).min(consts::MAX_FRAME_DT)
}

/// Unit vector at `angle` radians (screen space, y down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
