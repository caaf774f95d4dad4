//! Collision detection between the ball and pipe rectangles
//!
//! A circle-vs-rect distance test: find the closest point on the rectangle
//! to the ball's center and compare against the radius. Pure function of
//! its inputs, no state.

use glam::Vec2;

use super::rect::Rect;
use super::state::PipePair;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the rectangle (if hit)
    pub point: Vec2,
    /// Surface normal at contact (pointing toward ball center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a rectangle
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let offset = ball_pos - closest;
    let dist_sq = offset.length_squared();

    if dist_sq >= ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-4 {
        offset / dist
    } else {
        // Ball center is inside the rect - push out toward the nearest face
        let to_left = ball_pos.x - rect.left();
        let to_right = rect.right() - ball_pos.x;
        let to_top = ball_pos.y - rect.top();
        let to_bottom = rect.bottom() - ball_pos.y;
        let min = to_left.min(to_right).min(to_top).min(to_bottom);
        if min == to_left {
            Vec2::new(-1.0, 0.0)
        } else if min == to_right {
            Vec2::new(1.0, 0.0)
        } else if min == to_top {
            Vec2::new(0.0, -1.0)
        } else {
            Vec2::new(0.0, 1.0)
        }
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: ball_radius - dist,
    }
}

/// Check the ball against both rectangles of a pipe pair
pub fn ball_pipe_collision(ball_pos: Vec2, ball_radius: f32, pipe: &PipePair) -> CollisionResult {
    let top = ball_rect_collision(ball_pos, ball_radius, &pipe.top_rect());
    if top.hit {
        return top;
    }
    ball_rect_collision(ball_pos, ball_radius, &pipe.bottom_rect())
}
