//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`; presentation
//! reads it through `Snapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scoring::{Badge, BadgeProgress, Multiplier};
use super::shots::{HitRegion, ShotRegistry};
use super::table::{FlipperMount, Table};
use crate::direction;
use crate::tuning::Tuning;

/// Current phase of the game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Title,
    /// Ball parked in the shooter lane, waiting for launch
    Ready,
    /// Full physics, collisions and scoring
    Playing,
    /// Ball drained; counting down before the next ball
    BallLost,
    /// No balls left, waiting for restart
    GameOver,
}

/// The single pinball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False while resting in the shooter lane or between balls
    pub active: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            active: false,
        }
    }

    /// Park the ball at `pos`, motionless and inactive
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.active = false;
    }

    /// Explicit Euler step under gravity. No-op while inactive.
    pub fn step(&mut self, dt: f32, gravity: f32) {
        if !self.active {
            return;
        }
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
    }

    /// Activate with the given velocity. Returns false if already in play.
    pub fn launch(&mut self, velocity: Vec2) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.vel = velocity;
        true
    }
}

/// Which side of the table a flipper guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// Resting angle in degrees (screen space, y down)
    pub fn rest_degrees(&self) -> f32 {
        match self {
            FlipperSide::Left => 25.0,
            FlipperSide::Right => 155.0,
        }
    }

    /// Raised angle in degrees
    pub fn active_degrees(&self) -> f32 {
        match self {
            FlipperSide::Left => -45.0,
            FlipperSide::Right => 215.0,
        }
    }
}

/// An operator-controlled flipper rotating about a fixed pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub length: f32,
    pub width: f32,
    /// Radians
    pub base_angle: f32,
    /// Radians
    pub active_angle: f32,
    pub current_angle: f32,
    pub activated: bool,
    /// Approach rate toward the target angle (1/s)
    pub response: f32,
}

impl Flipper {
    pub fn new(side: FlipperSide, pivot: Vec2, length: f32, width: f32, response: f32) -> Self {
        let base_angle = side.rest_degrees().to_radians();
        Self {
            side,
            pivot,
            length,
            width,
            base_angle,
            active_angle: side.active_degrees().to_radians(),
            current_angle: base_angle,
            activated: false,
            response,
        }
    }

    /// Build from table geometry, honoring per-table angle overrides
    pub fn from_mount(mount: &FlipperMount, tuning: &Tuning) -> Self {
        let mut flipper = Self::new(
            mount.side,
            mount.pivot,
            tuning.flipper_length,
            tuning.flipper_width,
            tuning.flipper_response,
        );
        if let Some(deg) = mount.rest_degrees {
            flipper.base_angle = deg.to_radians();
            flipper.current_angle = flipper.base_angle;
        }
        if let Some(deg) = mount.active_degrees {
            flipper.active_angle = deg.to_radians();
        }
        flipper
    }

    pub fn target_angle(&self) -> f32 {
        if self.activated {
            self.active_angle
        } else {
            self.base_angle
        }
    }

    /// Exponentially approach the target angle; never overshoots
    pub fn step(&mut self, dt: f32) {
        let diff = self.target_angle() - self.current_angle;
        self.current_angle += diff * (dt * self.response).min(1.0);
    }

    /// Change the target; the angle itself moves on the next `step`
    pub fn set_active(&mut self, active: bool) {
        self.activated = active;
    }

    pub fn tip(&self) -> Vec2 {
        self.pivot + direction(self.current_angle) * self.length
    }
}

/// Input delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start / launch / restart depending on phase
    PrimaryAction,
    LeftFlipper(bool),
    RightFlipper(bool),
}

/// Ordered domain events for presentation and audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    BallLaunched,
    /// Ball touched a flipper this frame
    FlipperHit { side: FlipperSide, powered: bool },
    /// Ball passed through a polygon shot zone
    LaneRollover { shot: String },
    /// Ball struck a circular bash target
    BashHit { shot: String },
    /// Base points awarded for a shot (multiplier applied)
    ShotScored { shot: String, points: u64 },
    BadgeProgress { badge: Badge, level: u8 },
    BadgeComplete { badge: Badge },
    /// Every badge lit
    Champion { bonus: u64 },
    BallDrained { balls_remaining: u32 },
    BallReady,
    GameOver { score: u64 },
}

/// Complete game session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Static table geometry
    pub table: Table,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    /// Shot zones and their cooldowns (persist across games)
    pub shots: ShotRegistry,
    pub score: u64,
    pub multiplier: Multiplier,
    pub balls_remaining: u32,
    /// 1-indexed ball number for display
    pub current_ball: u32,
    pub badges: BadgeProgress,
    /// Seconds until the next ball after a drain
    pub ball_loss_timer: f32,
    /// Seconds of champion flash left (presentation only)
    pub celebration_timer: f32,
    /// Events produced since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting at the title screen
    pub fn new(table: Table, tuning: Tuning) -> Self {
        let ball = Ball::new(table.launch_position, tuning.ball_radius);
        let left_flipper = Flipper::from_mount(&table.left_flipper, &tuning);
        let right_flipper = Flipper::from_mount(&table.right_flipper, &tuning);
        let shots = ShotRegistry::new(table.shots.clone());
        Self {
            phase: GamePhase::Title,
            ball,
            left_flipper,
            right_flipper,
            shots,
            score: 0,
            multiplier: Multiplier::default(),
            balls_remaining: tuning.total_balls,
            current_ball: 1,
            badges: BadgeProgress::default(),
            ball_loss_timer: 0.0,
            celebration_timer: 0.0,
            events: Vec::new(),
            table,
            tuning,
        }
    }

    /// Session on the built-in table with default tuning
    pub fn classic() -> Self {
        Self::new(Table::classic(), Tuning::default())
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderer and HUD
    pub fn snapshot(&self) -> Snapshot {
        let flipper_view = |f: &Flipper| FlipperView {
            side: f.side,
            pivot: f.pivot,
            tip: f.tip(),
            width: f.width,
        };
        Snapshot {
            phase: self.phase,
            score: self.score,
            multiplier: self.multiplier.as_f32(),
            balls_remaining: self.balls_remaining,
            current_ball: self.current_ball,
            total_balls: self.tuning.total_balls,
            badges: Badge::ALL
                .iter()
                .map(|&badge| BadgeView {
                    badge,
                    progress: self.badges.get(badge),
                    lit: self.badges.is_complete(badge),
                })
                .collect(),
            shots: self
                .shots
                .iter()
                .map(|shot| ShotView {
                    id: shot.id.clone(),
                    region: shot.region.clone(),
                    color: shot.color.clone(),
                    badge: shot.badge,
                    progress: self.badges.get(shot.badge),
                })
                .collect(),
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
                active: self.ball.active,
            },
            flippers: [
                flipper_view(&self.left_flipper),
                flipper_view(&self.right_flipper),
            ],
            celebration_timer: self.celebration_timer,
        }
    }
}

/// Per-badge HUD state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeView {
    pub badge: Badge,
    pub progress: u8,
    pub lit: bool,
}

/// Shot zone outline and intensity for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotView {
    pub id: String,
    pub region: HitRegion,
    pub color: String,
    pub badge: Badge,
    /// Drives the zone's glow (0..=3)
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlipperView {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub tip: Vec2,
    pub width: f32,
}

/// Everything presentation needs from one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub multiplier: f32,
    pub balls_remaining: u32,
    pub current_ball: u32,
    pub total_balls: u32,
    pub badges: Vec<BadgeView>,
    pub shots: Vec<ShotView>,
    pub ball: BallView,
    pub flippers: [FlipperView; 2],
    pub celebration_timer: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_inactive_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(720.0, 780.0), BALL_RADIUS);
        ball.vel = Vec2::new(10.0, 10.0);
        ball.step(0.05, GRAVITY);
        assert_eq!(ball.pos, Vec2::new(720.0, 780.0));
        assert_eq!(ball.vel, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_ball_gravity_then_position() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), BALL_RADIUS);
        assert!(ball.launch(Vec2::new(10.0, 0.0)));
        ball.step(0.01, GRAVITY);
        // Velocity is updated before position
        assert!((ball.vel.y - 9.0).abs() < 1e-4);
        assert!((ball.pos.x - 100.1).abs() < 1e-4);
        assert!((ball.pos.y - 100.09).abs() < 1e-4);
    }

    #[test]
    fn test_launch_is_noop_when_active() {
        let mut ball = Ball::new(Vec2::ZERO, BALL_RADIUS);
        assert!(ball.launch(Vec2::new(-150.0, -650.0)));
        ball.vel = Vec2::new(5.0, 5.0);
        assert!(!ball.launch(Vec2::new(-150.0, -650.0)));
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_flipper_angles_from_side() {
        let left = Flipper::new(FlipperSide::Left, Vec2::ZERO, 120.0, 14.0, FLIPPER_RESPONSE);
        let right = Flipper::new(FlipperSide::Right, Vec2::ZERO, 120.0, 14.0, FLIPPER_RESPONSE);
        assert!((left.base_angle - 25f32.to_radians()).abs() < 1e-6);
        assert!((left.active_angle + 45f32.to_radians()).abs() < 1e-6);
        assert!((right.base_angle - 155f32.to_radians()).abs() < 1e-6);
        assert!((right.active_angle - 215f32.to_radians()).abs() < 1e-6);
        assert_eq!(left.current_angle, left.base_angle);
    }

    #[test]
    fn test_set_active_does_not_snap() {
        let mut f = Flipper::new(FlipperSide::Left, Vec2::ZERO, 120.0, 14.0, FLIPPER_RESPONSE);
        f.set_active(true);
        assert_eq!(f.current_angle, f.base_angle);

        f.step(0.005);
        let expected = f.base_angle + (f.active_angle - f.base_angle) * 0.28;
        assert!((f.current_angle - expected).abs() < 1e-5);
    }

    #[test]
    fn test_flipper_large_step_lands_exactly() {
        let mut f = Flipper::new(FlipperSide::Right, Vec2::ZERO, 120.0, 14.0, FLIPPER_RESPONSE);
        f.set_active(true);
        f.step(0.05);
        assert!((f.current_angle - f.active_angle).abs() < 1e-6);

        f.set_active(false);
        for _ in 0..10 {
            f.step(0.01);
            assert!(f.current_angle <= f.active_angle + 1e-6);
            assert!(f.current_angle >= f.base_angle - 1e-6);
        }
    }

    #[test]
    fn test_flipper_tip_follows_angle() {
        let mut f = Flipper::new(FlipperSide::Left, Vec2::new(250.0, 880.0), 120.0, 14.0, 56.0);
        f.current_angle = 0.0;
        assert!((f.tip() - Vec2::new(370.0, 880.0)).length() < 1e-4);
    }

    #[test]
    fn test_new_state_is_title() {
        let state = GameState::classic();
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.balls_remaining, TOTAL_BALLS);
        assert!(!state.ball.active);
        assert_eq!(state.ball.pos, state.table.launch_position);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::classic();
        state.score = 1234;
        let snap = state.snapshot();
        assert_eq!(snap.score, 1234);
        assert_eq!(snap.multiplier, 1.0);
        assert_eq!(snap.badges.len(), 8);
        assert_eq!(snap.shots.len(), state.shots.len());
        let bash = snap.shots.iter().find(|s| s.id == "bash").unwrap();
        assert!(bash.region.is_solid());
        assert_eq!(bash.color, Badge::Rock.color());
        assert_eq!(snap.flippers[0].side, FlipperSide::Left);
        assert!((snap.flippers[1].tip - state.right_flipper.tip()).length() < 1e-6);
        assert!(serde_json::to_string(&snap).is_ok());
    }
}
