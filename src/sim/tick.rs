//! Frame update and input handling
//!
//! Core game loop: one `tick` per display frame with the raw frame delta.
//! The delta is clamped before anything integrates it.

use super::collision::{bounce_off_segments, collide_flipper};
use super::state::{FlipperSide, GameEvent, GamePhase, GameState, InputEvent};
use crate::clamp_frame_dt;

/// Advance the game by one frame; returns the events it produced, in order
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let dt = clamp_frame_dt(dt);

    match state.phase {
        GamePhase::Title | GamePhase::GameOver => {}

        GamePhase::Ready => {
            state.left_flipper.step(dt);
            state.right_flipper.step(dt);
            // Ball stays pinned in the shooter lane until launch
            state.ball.pos = state.table.launch_position;
        }

        GamePhase::Playing => {
            state.left_flipper.step(dt);
            state.right_flipper.step(dt);
            state.ball.step(dt, state.tuning.gravity);

            bounce_off_segments(&mut state.ball, &state.table.walls, state.tuning.wall_restitution);
            collide_flippers(state);
            detect_lanes(state, dt);
            strike_targets(state);

            let drain_line = state.table.drain_line(state.tuning.drain_margin);
            if state.ball.pos.y - state.ball.radius > drain_line {
                lose_ball(state);
            }
        }

        GamePhase::BallLost => {
            state.ball_loss_timer -= dt;
            if state.ball_loss_timer <= 0.0 {
                state.ball_loss_timer = 0.0;
                if state.balls_remaining > 0 {
                    state.ball.reset(state.table.launch_position);
                    state.phase = GamePhase::Ready;
                    log::info!("Ball {} ready", state.current_ball);
                    state.emit(GameEvent::BallReady);
                } else {
                    state.phase = GamePhase::GameOver;
                    log::info!("Game over, final score {}", state.score);
                    let score = state.score;
                    state.emit(GameEvent::GameOver { score });
                }
            }
        }
    }

    // Presentation-only timer, runs in every phase
    if state.celebration_timer > 0.0 {
        state.celebration_timer = (state.celebration_timer - dt).max(0.0);
    }

    state.drain_events()
}

/// Apply one input; returns any events it produced
pub fn handle_input(state: &mut GameState, input: InputEvent) -> Vec<GameEvent> {
    match input {
        InputEvent::PrimaryAction => match state.phase {
            GamePhase::Title | GamePhase::GameOver => start_game(state),
            GamePhase::Ready => launch_ball(state),
            GamePhase::Playing | GamePhase::BallLost => {}
        },
        InputEvent::LeftFlipper(active) => state.left_flipper.set_active(active),
        InputEvent::RightFlipper(active) => state.right_flipper.set_active(active),
    }
    state.drain_events()
}

impl GameState {
    /// See [`handle_input`]
    pub fn handle_input(&mut self, input: InputEvent) -> Vec<GameEvent> {
        handle_input(self, input)
    }

    /// See [`tick`]
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        tick(self, dt)
    }
}

/// Reset the session and park the first ball
fn start_game(state: &mut GameState) {
    state.score = 0;
    state.multiplier = Default::default();
    state.balls_remaining = state.tuning.total_balls;
    state.current_ball = 1;
    state.badges.reset();
    state.ball_loss_timer = 0.0;
    state.ball.reset(state.table.launch_position);
    state.phase = GamePhase::Ready;
    log::info!("Game started ({} balls)", state.balls_remaining);
    state.emit(GameEvent::GameStarted);
}

fn launch_ball(state: &mut GameState) {
    if state.ball.launch(state.tuning.launch_velocity) {
        log::debug!("Ball {} launched", state.current_ball);
        state.emit(GameEvent::BallLaunched);
    }
    state.phase = GamePhase::Playing;
}

fn lose_ball(state: &mut GameState) {
    let total = state.tuning.total_balls;
    state.ball.active = false;
    state.balls_remaining = state.balls_remaining.saturating_sub(1);
    state.current_ball = if state.balls_remaining == 0 {
        total
    } else {
        total - state.balls_remaining + 1
    };
    state.ball_loss_timer = state.tuning.ball_loss_delay;
    state.phase = GamePhase::BallLost;
    log::info!("Ball drained, {} remaining", state.balls_remaining);
    let balls_remaining = state.balls_remaining;
    state.emit(GameEvent::BallDrained { balls_remaining });
}

fn collide_flippers(state: &mut GameState) {
    for side in [FlipperSide::Left, FlipperSide::Right] {
        let flipper = match side {
            FlipperSide::Left => &state.left_flipper,
            FlipperSide::Right => &state.right_flipper,
        };
        let powered = flipper.activated;
        let impulse = state.tuning.flipper_impulse(powered);
        if collide_flipper(&mut state.ball, flipper, state.tuning.flipper_reflect, impulse) {
            state.emit(GameEvent::FlipperHit { side, powered });
        }
    }
}

/// Count cooldowns down, then score every ready roll-through zone the ball is in
fn detect_lanes(state: &mut GameState, dt: f32) {
    state.shots.decay(dt);
    for index in state.shots.ready_zones(state.ball.pos, state.ball.radius) {
        let id = state.shots.at(index).id.clone();
        state.register_shot(&id);
        state.shots.arm(index, state.tuning.shot_cooldown);
        state.emit(GameEvent::LaneRollover { shot: id });
    }
}

/// Deflect off solid targets; a hit scores when the target is off cooldown
fn strike_targets(state: &mut GameState) {
    for index in state.shots.targets() {
        let region = &state.shots.at(index).region;
        if !region.overlaps(state.ball.pos, state.ball.radius) || !region.deflect(&mut state.ball) {
            continue;
        }
        if state.shots.is_ready(index) {
            let id = state.shots.at(index).id.clone();
            state.register_shot(&id);
            state.emit(GameEvent::BashHit { shot: id });
            state.shots.arm(index, state.tuning.shot_cooldown);
        }
    }
}
