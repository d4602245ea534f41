//! Kinematic bodies: position/velocity state with explicit Euler integration
//!
//! No sub-stepping. A body falling fast enough can pass through a platform
//! thinner than one tick of travel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// An axis-aligned rectangle that moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
        }
    }

    /// Current bounds, recomputed from position
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel.y += gravity;
    }

    #[inline]
    pub fn integrate_x(&mut self) {
        self.pos.x += self.vel.x;
    }

    #[inline]
    pub fn integrate_y(&mut self) {
        self.pos.y += self.vel.y;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom - self.size.y;
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.size.x;
    }
}

/// The platformer's player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// True only if a downward collision happened during the current tick
    pub on_ground: bool,
    pub facing_right: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(pos, size),
            on_ground: false,
            facing_right: true,
        }
    }

    /// Start a jump if standing on something. Returns whether it happened.
    pub fn jump(&mut self, jump_speed: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.body.vel.y = jump_speed;
        true
    }

    /// Shift horizontally without collision checks
    pub fn walk(&mut self, dx: f32) {
        self.body.pos.x += dx;
        if dx < 0.0 {
            self.facing_right = false;
        } else if dx > 0.0 {
            self.facing_right = true;
        }
    }

    /// +1 when facing right, -1 when facing left
    pub fn facing_sign(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_then_integrate() {
        let mut body = Body::new(Vec2::new(0.0, 100.0), Vec2::new(10.0, 10.0));
        body.apply_gravity(0.8);
        body.integrate_y();
        assert!((body.vel.y - 0.8).abs() < 1e-6);
        assert!((body.pos.y - 100.8).abs() < 1e-4);

        body.apply_gravity(0.8);
        body.integrate_y();
        assert!((body.pos.y - 102.4).abs() < 1e-4);
    }

    #[test]
    fn test_edge_setters() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(30.0, 50.0));
        body.set_bottom(550.0);
        assert_eq!(body.rect().bottom(), 550.0);
        body.set_top(320.0);
        assert_eq!(body.rect().top(), 320.0);
        body.set_right(300.0);
        assert_eq!(body.rect().right(), 300.0);
        body.set_left(500.0);
        assert_eq!(body.rect().left(), 500.0);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut player = Player::new(Vec2::new(100.0, 300.0), Vec2::new(30.0, 50.0));
        player.body.vel.y = 3.2;
        assert!(!player.jump(-15.0));
        assert_eq!(player.body.vel.y, 3.2);

        player.on_ground = true;
        assert!(player.jump(-15.0));
        assert_eq!(player.body.vel.y, -15.0);
    }

    #[test]
    fn test_walk_sets_facing() {
        let mut player = Player::new(Vec2::new(100.0, 300.0), Vec2::new(30.0, 50.0));
        player.walk(-5.0);
        assert!(!player.facing_right);
        assert_eq!(player.body.pos.x, 95.0);
        player.walk(0.0);
        assert!(!player.facing_right);
        player.walk(5.0);
        assert!(player.facing_right);
        assert_eq!(player.facing_sign(), 1.0);
    }
}
