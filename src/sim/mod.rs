//! Pinball simulation module
//!
//! All gameplay logic lives here. This module has no rendering, audio or
//! platform dependencies:
//! - One `tick(dt)` per frame, dt clamped before integration
//! - Input applied through `handle_input`
//! - Presentation reads `snapshot()` and the returned events

pub mod autoplay;
pub mod collision;
pub mod geometry;
pub mod scoring;
pub mod shots;
pub mod state;
pub mod table;
pub mod tick;

pub use autoplay::Autoplayer;
pub use collision::{
    Contact, bounce_off_circle, bounce_off_segments, collide_flipper, reflect_velocity,
    segment_contact,
};
pub use geometry::{Segment, closest_point_on_segment, polygon_contains};
pub use scoring::{Badge, BadgeProgress, Multiplier};
pub use shots::{HitRegion, Shot, ShotRegistry};
pub use state::{
    Ball, BallView, BadgeView, Flipper, FlipperSide, FlipperView, GameEvent, GamePhase, GameState,
    InputEvent, ShotView, Snapshot,
};
pub use table::{FlipperMount, Table};
pub use tick::{handle_input, tick};
