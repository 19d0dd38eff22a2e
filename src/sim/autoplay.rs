//! Attract-mode autoplayer
//!
//! Produces input events from the current state: starts and launches
//! automatically, and flips when the ball drops into a flipper's reach.
//! A seeded PCG stream adds a little hesitation so demo runs vary by seed
//! but replay exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Flipper, GamePhase, GameState, InputEvent};

/// Seconds a flipper stays up once triggered
const HOLD_TIME: f32 = 0.15;
/// Extra reach beyond the flipper length that still triggers a flip
const REACH_MARGIN: f32 = 30.0;
/// Chance per frame of ignoring a flip opportunity
const HESITATION: f64 = 0.1;

/// Deterministic demo player
#[derive(Debug, Clone)]
pub struct Autoplayer {
    rng: Pcg32,
    /// Restart after game over
    pub restart: bool,
    left_hold: f32,
    right_hold: f32,
}

impl Autoplayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            restart: false,
            left_hold: 0.0,
            right_hold: 0.0,
        }
    }

    /// Inputs to apply before the next tick of `dt` seconds
    pub fn decide(&mut self, state: &GameState, dt: f32) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        match state.phase {
            GamePhase::Title | GamePhase::Ready => inputs.push(InputEvent::PrimaryAction),
            GamePhase::GameOver if self.restart => inputs.push(InputEvent::PrimaryAction),
            _ => {}
        }

        let playing = state.phase == GamePhase::Playing && state.ball.active;
        let left = playing && self.wants_flip(state, &state.left_flipper);
        let right = playing && self.wants_flip(state, &state.right_flipper);

        if let Some(active) = Self::update_hold(&mut self.left_hold, left, dt, state.left_flipper.activated) {
            inputs.push(InputEvent::LeftFlipper(active));
        }
        if let Some(active) = Self::update_hold(&mut self.right_hold, right, dt, state.right_flipper.activated) {
            inputs.push(InputEvent::RightFlipper(active));
        }
        inputs
    }

    /// Ball is falling within reach of the flipper
    fn wants_flip(&mut self, state: &GameState, flipper: &Flipper) -> bool {
        let ball = &state.ball;
        let reach = flipper.length + REACH_MARGIN;
        let near = (ball.pos - flipper.pivot).length() < reach;
        let falling = ball.vel.y > 0.0;
        near && falling && !self.rng.random_bool(HESITATION)
    }

    /// Track hold time; returns a new activation state when it changes
    fn update_hold(hold: &mut f32, trigger: bool, dt: f32, activated: bool) -> Option<bool> {
        if trigger {
            *hold = HOLD_TIME;
        } else {
            *hold = (*hold - dt).max(0.0);
        }
        let want = *hold > 0.0;
        (want != activated).then_some(want)
    }
}
