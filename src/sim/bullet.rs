//! Bouncing projectiles
//!
//! Bullets fall under reduced gravity, bounce off platforms on both axes with
//! damping, and expire after too many bounces or on leaving the play area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Player};
use super::collision::{OverlapPolicy, Response, resolve_horizontal, resolve_vertical};
use super::rect::Rect;

/// Tunables shared by every bullet in a world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletPhysics {
    pub gravity: f32,
    pub speed: f32,
    pub size: f32,
    pub damping: f32,
    pub max_bounces: u32,
    pub muzzle_offset: f32,
    pub overlap_policy: OverlapPolicy,
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub body: Body,
    pub bounces: u32,
    pub max_bounces: u32,
}

/// Result of advancing a bullet one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletFate {
    Alive,
    /// Hit the bounce limit this tick
    Spent,
    /// Left the play area
    OutOfBounds,
}

impl Bullet {
    /// Fire from `shooter`: top-left at the shooter's center, pushed out
    /// sideways in the facing direction, moving horizontally.
    pub fn fire(id: u32, shooter: &Player, physics: &BulletPhysics) -> Self {
        let dir = shooter.facing_sign();
        let rect = shooter.body.rect();
        let pos = Vec2::new(rect.center_x() + physics.muzzle_offset * dir, rect.center_y());

        let mut body = Body::new(pos, Vec2::splat(physics.size));
        body.vel = Vec2::new(physics.speed * dir, 0.0);

        Self {
            id,
            body,
            bounces: 0,
            max_bounces: physics.max_bounces,
        }
    }

    /// Advance one tick against the platform set.
    ///
    /// Horizontal and vertical motion are resolved separately; a tick with a
    /// collision on either axis (or both) counts as a single bounce.
    pub fn update(
        &mut self,
        platforms: &[Rect],
        bounds: &Rect,
        physics: &BulletPhysics,
    ) -> BulletFate {
        let response = Response::Reflect {
            damping: physics.damping,
        };

        self.body.apply_gravity(physics.gravity);

        self.body.integrate_x();
        let side = resolve_horizontal(&mut self.body, platforms, response, physics.overlap_policy);

        self.body.integrate_y();
        let vertical = resolve_vertical(&mut self.body, platforms, response, physics.overlap_policy);

        if side.merge(vertical).hit {
            self.bounces += 1;
        }

        self.fate(bounds)
    }

    /// Whether the bullet should be removed, checked after motion
    pub fn fate(&self, bounds: &Rect) -> BulletFate {
        let r = self.body.rect();
        if r.right() < bounds.left()
            || r.left() > bounds.right()
            || r.bottom() < bounds.top()
            || r.top() > bounds.bottom()
        {
            BulletFate::OutOfBounds
        } else if self.bounces >= self.max_bounces {
            BulletFate::Spent
        } else {
            BulletFate::Alive
        }
    }
}
