//! Collision detection and response for axis-aligned boxes
//!
//! Everything in the level is an axis-aligned rectangle. The player is
//! resolved against each static platform independently, using the previous
//! frame's position to decide which side it came from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on a point
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Shrink by `by` pixels on every side
    pub fn inset(&self, by: i32) -> Self {
        Self::new(self.x + by, self.y + by, self.w - 2 * by, self.h - 2 * by)
    }

    /// Shift horizontally (world → screen conversion)
    pub fn offset_x(&self, dx: i32) -> Self {
        Self::new(self.x + dx, self.y, self.w, self.h)
    }

    /// Strict overlap test: touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// How a box was pushed out of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No overlap
    None,
    /// Came down onto the platform top
    Landed,
    /// Came up into the platform underside
    Ceiling,
    /// Pushed back out of the platform's left side
    PushedLeft,
    /// Pushed back out of the platform's right side
    PushedRight,
    /// Overlapping but already inside on the previous frame
    Embedded,
}

/// Overlap test between a floating-point square box and a rectangle
pub fn box_overlaps(pos: Vec2, size: f32, rect: &Rect) -> bool {
    let overlaps_x = pos.x + size > rect.x as f32 && pos.x < rect.right() as f32;
    let overlaps_y = pos.y + size > rect.y as f32 && pos.y < rect.bottom() as f32;
    overlaps_x && overlaps_y
}

/// Resolve a moving square box against one static platform
///
/// `old_pos` is where the box was before this frame's integration. The
/// vertical cases are tried first: a downward move from above lands, an
/// upward move from below hits the ceiling. Anything else is treated as a
/// horizontal approach and pushed out on the side it came from.
pub fn resolve_platform(
    pos: &mut Vec2,
    vel: &mut Vec2,
    old_pos: Vec2,
    size: f32,
    rect: &Rect,
) -> Contact {
    if !box_overlaps(*pos, size, rect) {
        return Contact::None;
    }

    let top = rect.y as f32;
    let bottom = rect.bottom() as f32;
    let left = rect.x as f32;
    let right = rect.right() as f32;

    if old_pos.y + size <= top && vel.y > 0.0 {
        pos.y = top - size;
        vel.y = 0.0;
        Contact::Landed
    } else if old_pos.y >= bottom && vel.y < 0.0 {
        pos.y = bottom;
        vel.y = 0.0;
        Contact::Ceiling
    } else if old_pos.x + size <= left {
        pos.x = left - size;
        Contact::PushedLeft
    } else if old_pos.x >= right {
        pos.x = right;
        Contact::PushedRight
    } else {
        Contact::Embedded
    }
}
