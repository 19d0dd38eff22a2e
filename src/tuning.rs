//! Physics and timing balance
//!
//! Every field falls back to its `consts` default, so a tuning file only
//! needs to name the values it changes. The frame-dt clamp is not tunable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable physics/timing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    pub ball_radius: f32,
    /// Velocity given to the ball on launch
    pub launch_velocity: Vec2,

    // === Flippers ===
    pub flipper_length: f32,
    pub flipper_width: f32,
    /// Exponential approach rate toward the target angle (1/s)
    pub flipper_response: f32,
    pub flipper_reflect: f32,
    pub flipper_impulse_powered: f32,
    pub flipper_impulse_passive: f32,

    // === Walls ===
    pub wall_restitution: f32,

    // === Timers (seconds) ===
    pub shot_cooldown: f32,
    pub ball_loss_delay: f32,
    pub celebration_duration: f32,

    // === Session ===
    /// How far below the canvas the ball's top edge must fall to drain
    pub drain_margin: f32,
    pub total_balls: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            launch_velocity: Vec2::new(LAUNCH_VELOCITY.0, LAUNCH_VELOCITY.1),

            flipper_length: FLIPPER_LENGTH,
            flipper_width: FLIPPER_WIDTH,
            flipper_response: FLIPPER_RESPONSE,
            flipper_reflect: FLIPPER_REFLECT,
            flipper_impulse_powered: FLIPPER_IMPULSE_POWERED,
            flipper_impulse_passive: FLIPPER_IMPULSE_PASSIVE,

            wall_restitution: WALL_RESTITUTION,

            shot_cooldown: SHOT_COOLDOWN,
            ball_loss_delay: BALL_LOSS_DELAY,
            celebration_duration: CELEBRATION_DURATION,

            drain_margin: DRAIN_MARGIN,
            total_balls: TOTAL_BALLS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning (gravity {}, {} balls)",
            tuning.gravity,
            tuning.total_balls
        );
        Ok(tuning)
    }

    /// Impulse added along the flipper contact normal
    pub fn flipper_impulse(&self, powered: bool) -> f32 {
        if powered {
            self.flipper_impulse_powered
        } else {
            self.flipper_impulse_passive
        }
    }
}
