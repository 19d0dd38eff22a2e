//! Collision detection and response for the ball
//!
//! Three responses share one closest-point test:
//! - walls: push out to touch, then damp the inbound normal component
//! - flippers: reflect the inbound component and add a swat impulse
//! - circular targets: full elastic reflection and push out

use glam::Vec2;

use super::geometry::{Segment, closest_point_on_segment, contact_normal};
use super::state::{Ball, Flipper};
use crate::consts::{FLIPPER_EPSILON, SEGMENT_EPSILON};

/// Where a ball touches an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the obstacle
    pub point: Vec2,
    /// Unit normal from the obstacle toward the ball center
    pub normal: Vec2,
}

/// Test a circle of `contact_radius` at `center` against segment `a`-`b`.
///
/// `inclusive` also counts exact touching as contact.
pub fn segment_contact(
    center: Vec2,
    contact_radius: f32,
    a: Vec2,
    b: Vec2,
    inclusive: bool,
    epsilon: f32,
) -> Option<Contact> {
    let point = closest_point_on_segment(center, a, b);
    let dist_sq = (center - point).length_squared();
    let limit = contact_radius * contact_radius;
    let touching = if inclusive { dist_sq <= limit } else { dist_sq < limit };
    touching.then(|| Contact {
        point,
        normal: contact_normal(point, center, epsilon),
    })
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce the ball off each static segment in turn.
///
/// Returns true if any segment was touched.
pub fn bounce_off_segments(ball: &mut Ball, segments: &[Segment], restitution: f32) -> bool {
    let mut any = false;
    for segment in segments {
        if segment.is_degenerate() {
            continue;
        }
        let radius = ball.radius + segment.buffer;
        let Some(contact) =
            segment_contact(ball.pos, radius, segment.start, segment.end, true, SEGMENT_EPSILON)
        else {
            continue;
        };
        any = true;

        // Positional correction: sit exactly on the boundary
        ball.pos = contact.point + contact.normal * radius;

        let rel = ball.vel.dot(contact.normal);
        if rel < 0.0 {
            ball.vel -= (1.0 + restitution) * rel * contact.normal;
        }
    }
    any
}

/// Bounce the ball off a flipper's pivot-tip line.
///
/// No positional correction. Returns true on contact.
pub fn collide_flipper(ball: &mut Ball, flipper: &Flipper, reflect: f32, impulse: f32) -> bool {
    let Some(contact) = segment_contact(
        ball.pos,
        ball.radius + flipper.width,
        flipper.pivot,
        flipper.tip(),
        false,
        FLIPPER_EPSILON,
    ) else {
        return false;
    };

    let n = contact.normal;
    let rel = ball.vel.dot(n);
    if rel < 0.0 {
        ball.vel -= reflect * rel * n;
    }
    ball.vel += n * impulse;
    true
}

/// Elastic bounce off a solid circle. Returns true on overlap.
pub fn bounce_off_circle(ball: &mut Ball, center: Vec2, radius: f32) -> bool {
    let reach = ball.radius + radius;
    let offset = ball.pos - center;
    if offset.length_squared() >= reach * reach {
        return false;
    }

    let mut normal = contact_normal(center, ball.pos, SEGMENT_EPSILON);
    if normal == Vec2::ZERO {
        // Dead center: eject upward
        normal = Vec2::NEG_Y;
    }
    ball.vel = reflect_velocity(ball.vel, normal);
    ball.pos = center + normal * reach;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::FlipperSide;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), BALL_RADIUS);
        ball.active = true;
        ball.vel = Vec2::new(vx, vy);
        ball
    }

    fn floor() -> Vec<Segment> {
        vec![Segment::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), 0.0)]
    }

    #[test]
    fn test_head_on_bounce_uses_restitution() {
        // Touching exactly, moving straight into the segment
        let mut ball = ball_at(100.0, 112.0, 0.0, -300.0);
        assert!(bounce_off_segments(&mut ball, &floor(), WALL_RESTITUTION));
        assert!(ball.vel.x.abs() < 1e-3);
        assert!((ball.vel.y - 270.0).abs() < 1e-2);
        assert!((ball.pos.y - 112.0).abs() < 1e-4);
    }

    #[test]
    fn test_penetration_is_corrected() {
        let mut ball = ball_at(100.0, 105.0, 50.0, -100.0);
        bounce_off_segments(&mut ball, &floor(), WALL_RESTITUTION);
        assert!((ball.pos - Vec2::new(100.0, 112.0)).length() < 1e-3);
        // Tangential velocity untouched
        assert!((ball.vel.x - 50.0).abs() < 1e-4);
        assert!((ball.vel.y - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_separating_ball_is_pushed_but_not_reflected() {
        let mut ball = ball_at(100.0, 108.0, 0.0, 40.0);
        assert!(bounce_off_segments(&mut ball, &floor(), WALL_RESTITUTION));
        assert_eq!(ball.vel, Vec2::new(0.0, 40.0));
        assert!((ball.pos.y - 112.0).abs() < 1e-4);
    }

    #[test]
    fn test_buffer_extends_contact() {
        let walls = vec![Segment::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), 4.0)];
        let mut ball = ball_at(100.0, 114.0, 0.0, -10.0);
        assert!(bounce_off_segments(&mut ball, &walls, WALL_RESTITUTION));
        assert!((ball.pos.y - 116.0).abs() < 1e-4);

        let mut clear = ball_at(100.0, 117.0, 0.0, -10.0);
        assert!(!bounce_off_segments(&mut clear, &walls, WALL_RESTITUTION));
    }

    #[test]
    fn test_segment_end_cap() {
        // Beyond the end of the segment, contact is with the endpoint
        let mut ball = ball_at(208.0, 92.0, -10.0, 10.0);
        assert!(bounce_off_segments(&mut ball, &floor(), WALL_RESTITUTION));
        let d = (ball.pos - Vec2::new(200.0, 100.0)).length();
        assert!((d - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segment_ignored() {
        let walls = vec![Segment::new(Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0), 0.0)];
        let mut ball = ball_at(50.0, 50.0, 10.0, 10.0);
        assert!(!bounce_off_segments(&mut ball, &walls, WALL_RESTITUTION));
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
    }

    fn flat_flipper(activated: bool) -> Flipper {
        let mut f = Flipper::new(FlipperSide::Left, Vec2::new(0.0, 100.0), 120.0, 14.0, FLIPPER_RESPONSE);
        f.current_angle = 0.0;
        f.activated = activated;
        f
    }

    #[test]
    fn test_flipper_passive_impulse_bounded() {
        let flipper = flat_flipper(false);
        // Above the flipper, falling onto it
        let mut ball = ball_at(60.0, 80.0, 0.0, 200.0);
        assert!(collide_flipper(&mut ball, &flipper, FLIPPER_REFLECT, 150.0));
        // Reflected: 200 - 1.8*200 = -160, then 150 up along the normal
        let reflected_only = Vec2::new(0.0, -160.0);
        assert!((ball.vel - reflected_only).length() <= 150.0 + 1e-3);
        assert!((ball.vel.y + 310.0).abs() < 1e-2);
        // No positional correction
        assert_eq!(ball.pos, Vec2::new(60.0, 80.0));
    }

    #[test]
    fn test_flipper_powered_impulse_bounded() {
        let flipper = flat_flipper(true);
        let mut ball = ball_at(60.0, 80.0, 30.0, 200.0);
        assert!(collide_flipper(&mut ball, &flipper, FLIPPER_REFLECT, 400.0));
        let reflected_only = Vec2::new(30.0, -160.0);
        assert!((ball.vel - reflected_only).length() <= 400.0 + 1e-3);
        assert!((ball.vel.x - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_flipper_miss() {
        let flipper = flat_flipper(true);
        let mut ball = ball_at(60.0, 50.0, 0.0, 200.0);
        assert!(!collide_flipper(&mut ball, &flipper, FLIPPER_REFLECT, 400.0));
        assert_eq!(ball.vel, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_circle_bounce_is_elastic() {
        let center = Vec2::new(400.0, 380.0);
        let mut ball = ball_at(400.0, 420.0, 20.0, -250.0);
        assert!(bounce_off_circle(&mut ball, center, 30.0));
        // Normal points straight down; vy fully reversed, no damping
        assert!((ball.vel - Vec2::new(20.0, 250.0)).length() < 1e-3);
        assert!((ball.pos - Vec2::new(400.0, 422.0)).length() < 1e-3);
    }

    #[test]
    fn test_circle_bounce_reflects_outbound_too() {
        let center = Vec2::new(0.0, 0.0);
        let mut ball = ball_at(30.0, 0.0, 100.0, 0.0);
        assert!(bounce_off_circle(&mut ball, center, 30.0));
        assert!((ball.vel - Vec2::new(-100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_circle_dead_center() {
        let mut ball = ball_at(10.0, 10.0, 0.0, 50.0);
        assert!(bounce_off_circle(&mut ball, Vec2::new(10.0, 10.0), 30.0));
        assert!(ball.pos.is_finite() && ball.vel.is_finite());
        assert!((ball.pos - Vec2::new(10.0, -32.0)).length() < 1e-3);
    }

    #[test]
    fn test_segment_contact_inclusive_edge() {
        let a = Vec2::new(0.0, 100.0);
        let b = Vec2::new(200.0, 100.0);
        let touching = Vec2::new(50.0, 112.0);

        let contact = segment_contact(touching, 12.0, a, b, true, SEGMENT_EPSILON);
        assert_eq!(
            contact,
            Some(Contact {
                point: Vec2::new(50.0, 100.0),
                normal: Vec2::Y,
            })
        );
        // Flippers need strict overlap
        assert_eq!(segment_contact(touching, 12.0, a, b, false, FLIPPER_EPSILON), None);
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }
}
