//! Shot zones: named trigger regions bound to a badge and a base score
//!
//! Each zone carries a cooldown so one pass of the ball scores it once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::bounce_off_circle;
use super::geometry::{circles_overlap, polygon_contains, rect_points};
use super::scoring::Badge;
use super::state::Ball;

/// Hit-test region of a shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitRegion {
    /// Closed path the ball rolls through, tested against its center
    Polygon { points: Vec<Vec2> },
    /// Solid target the ball bounces off
    Circle { center: Vec2, radius: f32 },
}

impl HitRegion {
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        HitRegion::Polygon {
            points: rect_points(x, y, w, h),
        }
    }

    pub fn polygon(points: &[(f32, f32)]) -> Self {
        HitRegion::Polygon {
            points: points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        }
    }

    /// Is `point` inside the region?
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            HitRegion::Polygon { points } => polygon_contains(points, point),
            HitRegion::Circle { center, radius } => {
                (point - *center).length_squared() < radius * radius
            }
        }
    }

    /// Does a ball of `ball_radius` at `ball_pos` touch the region?
    pub fn overlaps(&self, ball_pos: Vec2, ball_radius: f32) -> bool {
        match self {
            HitRegion::Polygon { .. } => self.contains(ball_pos),
            HitRegion::Circle { center, radius } => {
                circles_overlap(ball_pos, ball_radius, *center, *radius)
            }
        }
    }

    /// Solid regions deflect the ball; the rest are roll-through zones
    pub fn is_solid(&self) -> bool {
        matches!(self, HitRegion::Circle { .. })
    }

    /// Apply the region's collision response. Returns true if the ball was deflected.
    pub fn deflect(&self, ball: &mut Ball) -> bool {
        match self {
            HitRegion::Polygon { .. } => false,
            HitRegion::Circle { center, radius } => bounce_off_circle(ball, *center, *radius),
        }
    }
}

/// A named trigger zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: String,
    pub region: HitRegion,
    /// Display color (CSS hex)
    pub color: String,
    pub badge: Badge,
    /// Base points before the multiplier
    pub score: u64,
}

impl Shot {
    pub fn new(id: &str, region: HitRegion, badge: Badge, score: u64) -> Self {
        Self {
            id: id.to_string(),
            region,
            color: badge.color().to_string(),
            badge,
            score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    shot: Shot,
    /// Seconds until the shot may score again (>= 0)
    #[serde(default)]
    cooldown: f32,
}

/// All shots of a table plus their cooldown timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotRegistry {
    slots: Vec<Slot>,
}

impl ShotRegistry {
    /// Build a registry; a repeated id keeps its first definition
    pub fn new(shots: Vec<Shot>) -> Self {
        let mut slots: Vec<Slot> = Vec::with_capacity(shots.len());
        for shot in shots {
            if slots.iter().any(|s| s.shot.id == shot.id) {
                log::warn!("Duplicate shot id '{}' ignored", shot.id);
                continue;
            }
            slots.push(Slot { shot, cooldown: 0.0 });
        }
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shot> {
        self.slots.iter().map(|s| &s.shot)
    }

    pub fn get(&self, id: &str) -> Option<&Shot> {
        self.iter().find(|s| s.id == id)
    }

    pub(crate) fn at(&self, index: usize) -> &Shot {
        &self.slots[index].shot
    }

    /// Remaining cooldown for a shot id
    pub fn cooldown(&self, id: &str) -> Option<f32> {
        self.index_of(id).map(|i| self.slots[i].cooldown)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.iter().position(|s| s.id == id)
    }

    /// Count every cooldown down by `dt`, stopping at zero
    pub fn decay(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.cooldown = (slot.cooldown - dt).max(0.0);
        }
    }

    pub fn is_ready(&self, index: usize) -> bool {
        self.slots[index].cooldown == 0.0
    }

    /// Restart a shot's cooldown after it fires
    pub fn arm(&mut self, index: usize, duration: f32) {
        self.slots[index].cooldown = duration;
    }

    /// Roll-through zones touched by the ball that are off cooldown
    pub fn ready_zones(&self, ball_pos: Vec2, ball_radius: f32) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                !s.shot.region.is_solid()
                    && self.is_ready(*i)
                    && s.shot.region.overlaps(ball_pos, ball_radius)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of solid targets
    pub fn targets(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.shot.region.is_solid())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;

    fn registry() -> ShotRegistry {
        ShotRegistry::new(vec![
            Shot::new("rolloverMid", HitRegion::rect(350.0, 110.0, 100.0, 40.0), Badge::Psychic, 75),
            Shot::new(
                "bash",
                HitRegion::Circle {
                    center: Vec2::new(400.0, 380.0),
                    radius: 30.0,
                },
                Badge::Rock,
                150,
            ),
        ])
    }

    #[test]
    fn test_region_contains() {
        let rect = HitRegion::rect(350.0, 110.0, 100.0, 40.0);
        assert!(rect.contains(Vec2::new(400.0, 130.0)));
        assert!(!rect.contains(Vec2::new(400.0, 160.0)));

        let circle = HitRegion::Circle {
            center: Vec2::new(400.0, 380.0),
            radius: 30.0,
        };
        assert!(circle.contains(Vec2::new(410.0, 380.0)));
        assert!(!circle.contains(Vec2::new(435.0, 380.0)));
        // Ball radius counts for overlap but not containment
        assert!(circle.overlaps(Vec2::new(435.0, 380.0), 12.0));
        // Roll-through zones only care about the ball center
        assert!(!rect.overlaps(Vec2::new(400.0, 155.0), 12.0));
    }

    #[test]
    fn test_deflect_dispatch() {
        let lane = HitRegion::rect(350.0, 110.0, 100.0, 40.0);
        let mut ball = Ball::new(Vec2::new(400.0, 130.0), BALL_RADIUS);
        ball.vel = Vec2::new(0.0, -100.0);
        assert!(!lane.deflect(&mut ball));
        assert_eq!(ball.vel, Vec2::new(0.0, -100.0));

        let target = HitRegion::Circle {
            center: Vec2::new(400.0, 100.0),
            radius: 20.0,
        };
        assert!(target.deflect(&mut ball));
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("bash").map(|s| s.score), Some(150));
        assert!(reg.get("missing").is_none());
        assert_eq!(reg.cooldown("bash"), Some(0.0));
        assert_eq!(reg.targets(), vec![1]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let reg = ShotRegistry::new(vec![
            Shot::new("lane", HitRegion::rect(0.0, 0.0, 10.0, 10.0), Badge::Fire, 100),
            Shot::new("lane", HitRegion::rect(50.0, 50.0, 10.0, 10.0), Badge::Water, 999),
        ]);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("lane").map(|s| s.badge), Some(Badge::Fire));
    }

    #[test]
    fn test_cooldown_gates_zone() {
        let mut reg = registry();
        let inside = Vec2::new(400.0, 130.0);
        assert_eq!(reg.ready_zones(inside, BALL_RADIUS), vec![0]);

        reg.arm(0, 0.5);
        assert!(reg.ready_zones(inside, BALL_RADIUS).is_empty());

        reg.decay(0.3);
        assert!(!reg.is_ready(0));
        reg.decay(0.3);
        assert!(reg.is_ready(0));
        assert_eq!(reg.cooldown("rolloverMid"), Some(0.0));
    }

    #[test]
    fn test_solid_target_is_not_a_zone() {
        let reg = registry();
        assert!(reg.ready_zones(Vec2::new(400.0, 380.0), BALL_RADIUS).is_empty());
    }

    #[test]
    fn test_region_json_shape() {
        let json = r#"{ "kind": "circle", "center": [400.0, 380.0], "radius": 30.0 }"#;
        let region: HitRegion = serde_json::from_str(json).unwrap();
        assert!(region.is_solid());
    }

    #[test]
    fn test_cooldowns_travel_with_their_shot() {
        let mut reg = registry();
        reg.arm(1, 0.25);
        let json = serde_json::to_string(&reg).unwrap();
        let restored: ShotRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.cooldown("bash"), Some(0.25));
        assert!(restored.is_ready(0));

        // A saved entry without a timer is simply ready
        let bare = r##"[ { "shot": { "id": "solo", "color": "#fff", "badge": "fire", "score": 10,
                        "region": { "kind": "circle", "center": [0.0, 0.0], "radius": 5.0 } } } ]"##;
        let restored: ShotRegistry = serde_json::from_str(bare).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.is_ready(0));
    }
}
