//! Plane geometry for table walls, flippers and shot regions
//!
//! Screen-space coordinates: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A static wall segment with a collision buffer (half its drawn thickness)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    #[serde(default)]
    pub buffer: f32,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2, buffer: f32) -> Self {
        Self { start, end, buffer }
    }

    /// Zero-length segments take no part in collision
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (self.end - self.start).length_squared() == 0.0
    }
}

/// Closest point to `p` on the segment `a`-`b` (parameter clamped to [0, 1])
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Do two circles overlap (strictly)?
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let r = r1 + r2;
    (c1 - c2).length_squared() < r * r
}

/// Unit normal from `from` toward `to`, with `epsilon` standing in for a zero distance
#[inline]
pub fn contact_normal(from: Vec2, to: Vec2, epsilon: f32) -> Vec2 {
    let d = to - from;
    let dist = d.length();
    d / if dist > 0.0 { dist } else { epsilon }
}

/// Point-in-polygon using the non-zero winding rule.
///
/// The polygon is implicitly closed. Fewer than three vertices never contain anything.
pub fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        // > 0 when p is left of a->b
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Corners of an axis-aligned rectangle, clockwise on screen
pub fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ]
}
