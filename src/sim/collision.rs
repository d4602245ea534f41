//! Collision detection and response against static platforms
//!
//! Each pass handles one axis. The caller moves the body along that axis
//! first, then asks the resolver to push it back out of whatever it entered,
//! using the sign of the velocity on that axis to decide which edge to snap.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::Rect;

/// How to choose among several platforms overlapped in the same pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Walk platforms in layout order, resolving each overlap as found.
    /// Later platforms overwrite earlier snaps.
    #[default]
    IterationOrder,
    /// Resolve only against the platform with the smallest penetration
    MinPenetration,
}

/// What happens to the velocity component on the colliding axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Zero it (player)
    Stop,
    /// Reverse it and scale by `damping` (bullets)
    Reflect { damping: f32 },
}

impl Response {
    #[inline]
    fn apply(self, v: f32) -> f32 {
        match self {
            Response::Stop => 0.0,
            Response::Reflect { damping } => -v * damping,
        }
    }
}

/// Summary of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// At least one platform was resolved against
    pub hit: bool,
    /// A downward collision snapped the body onto a platform top
    pub landed: bool,
}

impl Contact {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn merge(self, other: Contact) -> Contact {
        Contact {
            hit: self.hit || other.hit,
            landed: self.landed || other.landed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Push `body` out of any platform it overlaps along the vertical axis
pub fn resolve_vertical(
    body: &mut Body,
    platforms: &[Rect],
    response: Response,
    policy: OverlapPolicy,
) -> Contact {
    resolve_axis(body, platforms, Axis::Y, response, policy)
}

/// Push `body` out of any platform it overlaps along the horizontal axis
pub fn resolve_horizontal(
    body: &mut Body,
    platforms: &[Rect],
    response: Response,
    policy: OverlapPolicy,
) -> Contact {
    resolve_axis(body, platforms, Axis::X, response, policy)
}

fn resolve_axis(
    body: &mut Body,
    platforms: &[Rect],
    axis: Axis,
    response: Response,
    policy: OverlapPolicy,
) -> Contact {
    match policy {
        OverlapPolicy::IterationOrder => {
            let mut contact = Contact::miss();
            for platform in platforms {
                if body.rect().overlaps(platform) {
                    contact = contact.merge(push_out(body, platform, axis, response));
                }
            }
            contact
        }
        OverlapPolicy::MinPenetration => {
            let rect = body.rect();
            let v = velocity_along(body, axis);
            if v == 0.0 {
                return Contact::miss();
            }
            let shallowest = platforms
                .iter()
                .filter(|p| rect.overlaps(p))
                .min_by(|a, b| {
                    penetration(&rect, a, axis, v)
                        .partial_cmp(&penetration(&rect, b, axis, v))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            match shallowest {
                Some(platform) => push_out(body, platform, axis, response),
                None => Contact::miss(),
            }
        }
    }
}

#[inline]
fn velocity_along(body: &Body, axis: Axis) -> f32 {
    match axis {
        Axis::X => body.vel.x,
        Axis::Y => body.vel.y,
    }
}

/// Depth of `rect` inside `platform`, measured against the direction of travel
fn penetration(rect: &Rect, platform: &Rect, axis: Axis, v: f32) -> f32 {
    match (axis, v > 0.0) {
        (Axis::Y, true) => rect.bottom() - platform.top(),
        (Axis::Y, false) => platform.bottom() - rect.top(),
        (Axis::X, true) => rect.right() - platform.left(),
        (Axis::X, false) => platform.right() - rect.left(),
    }
}

/// Snap the leading edge to the platform face and apply the response.
/// A body with no velocity on this axis is left where it is.
fn push_out(body: &mut Body, platform: &Rect, axis: Axis, response: Response) -> Contact {
    let v = velocity_along(body, axis);
    if v == 0.0 {
        return Contact::miss();
    }

    match (axis, v > 0.0) {
        (Axis::Y, true) => body.set_bottom(platform.top()),
        (Axis::Y, false) => body.set_top(platform.bottom()),
        (Axis::X, true) => body.set_right(platform.left()),
        (Axis::X, false) => body.set_left(platform.right()),
    }

    match axis {
        Axis::X => body.vel.x = response.apply(v),
        Axis::Y => body.vel.y = response.apply(v),
    }

    Contact {
        hit: true,
        landed: axis == Axis::Y && v > 0.0,
    }
}
