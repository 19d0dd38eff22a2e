//! Table geometry: walls, flipper mounts, launch position and shot zones
//!
//! Geometry is plain data so table revisions can be swapped without touching
//! the physics or scoring code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use super::scoring::Badge;
use super::shots::{HitRegion, Shot};
use super::state::FlipperSide;

/// Where a flipper is mounted; angles default to the side's standard pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipperMount {
    pub pivot: Vec2,
    pub side: FlipperSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_degrees: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_degrees: Option<f32>,
}

impl FlipperMount {
    pub fn new(side: FlipperSide, x: f32, y: f32) -> Self {
        Self {
            pivot: Vec2::new(x, y),
            side,
            rest_degrees: None,
            active_degrees: None,
        }
    }
}

/// Static description of one pinball table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub width: f32,
    /// Drain is measured from this edge
    pub height: f32,
    /// Ball rest position in the shooter lane
    pub launch_position: Vec2,
    pub walls: Vec<Segment>,
    pub left_flipper: FlipperMount,
    pub right_flipper: FlipperMount,
    pub shots: Vec<Shot>,
}

impl Default for Table {
    fn default() -> Self {
        Self::classic()
    }
}

impl Table {
    /// The gym badge table
    pub fn classic() -> Self {
        let width = 800.0;
        let height = 960.0;
        let seg = |x1: f32, y1: f32, x2: f32, y2: f32, buffer: f32| {
            Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y2), buffer)
        };

        let walls = vec![
            // Cabinet
            seg(20.0, 20.0, 780.0, 20.0, 3.0),
            seg(20.0, 20.0, 20.0, height, 3.0),
            seg(780.0, 20.0, 780.0, height, 3.0),
            // Top corners
            seg(20.0, 120.0, 120.0, 20.0, 3.0),
            seg(680.0, 20.0, 780.0, 120.0, 3.0),
            // Inlane guides feeding the flippers
            seg(20.0, 800.0, 238.0, 872.0, 4.0),
            seg(780.0, 800.0, 562.0, 872.0, 4.0),
        ];

        let shots = vec![
            Shot::new(
                "leftOrbit",
                HitRegion::polygon(&[(80.0, 80.0), (140.0, 80.0), (140.0, 820.0), (80.0, 700.0)]),
                Badge::Fire,
                100,
            ),
            Shot::new(
                "leftRamp",
                HitRegion::polygon(&[(200.0, 600.0), (320.0, 500.0), (260.0, 350.0), (160.0, 420.0)]),
                Badge::Grass,
                100,
            ),
            Shot::new(
                "bash",
                HitRegion::Circle {
                    center: Vec2::new(400.0, 380.0),
                    radius: 30.0,
                },
                Badge::Rock,
                150,
            ),
            Shot::new(
                "rightRamp",
                HitRegion::polygon(&[(600.0, 600.0), (480.0, 500.0), (540.0, 350.0), (640.0, 420.0)]),
                Badge::Electric,
                100,
            ),
            Shot::new(
                "rightOrbit",
                HitRegion::polygon(&[(720.0, 80.0), (660.0, 80.0), (660.0, 820.0), (720.0, 700.0)]),
                Badge::Water,
                100,
            ),
            Shot::new("rolloverLeft", HitRegion::rect(220.0, 140.0, 100.0, 40.0), Badge::Ground, 75),
            Shot::new("rolloverMid", HitRegion::rect(350.0, 110.0, 100.0, 40.0), Badge::Psychic, 75),
            Shot::new("rolloverRight", HitRegion::rect(480.0, 140.0, 100.0, 40.0), Badge::Fairy, 75),
        ];

        Self {
            width,
            height,
            launch_position: Vec2::new(width - 80.0, height - 180.0),
            walls,
            left_flipper: FlipperMount::new(FlipperSide::Left, 250.0, 880.0),
            right_flipper: FlipperMount::new(FlipperSide::Right, 550.0, 880.0),
            shots,
        }
    }

    /// Parse a table layout
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: Table = serde_json::from_str(json)?;
        let degenerate = table.walls.iter().filter(|w| w.is_degenerate()).count();
        if degenerate > 0 {
            log::warn!("Table has {} zero-length wall(s); they will be ignored", degenerate);
        }
        log::info!(
            "Loaded table {}x{} ({} walls, {} shots)",
            table.width,
            table.height,
            table.walls.len(),
            table.shots.len()
        );
        Ok(table)
    }

    /// y beyond which a ball's top edge counts as drained
    pub fn drain_line(&self, margin: f32) -> f32 {
        self.height + margin
    }
}
