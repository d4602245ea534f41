//! Axis-aligned rectangle geometry
//!
//! Screen-space convention: x grows right, y grows down, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in simulation space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Integer form used for draw commands
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            w: self.w.round() as i32,
            h: self.h.round() as i32,
        }
    }
}

/// Integer rectangle as handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 45.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let ground = Rect::new(0.0, 550.0, 800.0, 50.0);

        // Resting exactly on top: touching, not overlapping
        let standing = Rect::new(100.0, 500.0, 30.0, 50.0);
        assert!(!standing.overlaps(&ground));

        // Sunk in by a fraction of a pixel
        let sunk = Rect::new(100.0, 500.8, 30.0, 50.0);
        assert!(sunk.overlaps(&ground));
        assert!(ground.overlaps(&sunk));

        // Side by side
        let beside = Rect::new(800.0, 560.0, 10.0, 10.0);
        assert!(!beside.overlaps(&ground));
    }

    #[test]
    fn test_to_pixels_floors_position() {
        let r = Rect::new(10.7, -0.2, 30.0, 50.0);
        assert_eq!(r.to_pixels(), PixelRect::new(10, -1, 30, 50));
    }
}
