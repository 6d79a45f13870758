//! Kinematic body and axis-aligned collision resolution
//!
//! Shared by the player and enemies. Motion is applied one axis at a time and
//! any overlap with static geometry is pushed back flush against the contacted
//! box. Callers resolve the horizontal axis before the vertical one, which
//! decides how corner contacts come out.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Integer axis-aligned box covering `[x, x + w) x [y, y + h)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Overlap test. Boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn translated(&self, offset: IVec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Axis of a single movement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Side of the moving body that made contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// A moving box with sub-pixel position
///
/// `rect()` is always the truncated float position, so the integer box the
/// renderer and collision tests see never drifts from `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: IVec2,
}

impl Body {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: Vec2::new(x as f32, y as f32),
            size: IVec2::new(w, h),
        }
    }

    /// Integer box derived from the float position
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, self.size.x, self.size.y)
    }

    /// Teleport to an integer position
    pub fn place(&mut self, x: i32, y: i32) {
        self.pos = Vec2::new(x as f32, y as f32);
    }

    /// Move along one axis and push back out of any static box hit.
    ///
    /// Returns the side of the body that was blocked. A zero `delta` never
    /// reports contact, though an overlapping body still snaps to its integer
    /// position on that axis.
    pub fn move_axis(&mut self, axis: Axis, delta: f32, solids: &[Rect]) -> Option<Side> {
        match axis {
            Axis::Horizontal => self.pos.x += delta,
            Axis::Vertical => self.pos.y += delta,
        }

        let rect = self.rect();
        let mut hits = solids.iter().filter(|s| s.intersects(&rect)).peekable();
        hits.peek()?;

        let (side, snapped) = match axis {
            Axis::Horizontal if delta > 0.0 => {
                let edge = hits.map(Rect::left).min().unwrap_or(rect.left());
                (Some(Side::Right), edge - rect.w)
            }
            Axis::Horizontal if delta < 0.0 => {
                let edge = hits.map(Rect::right).max().unwrap_or(rect.right());
                (Some(Side::Left), edge)
            }
            Axis::Horizontal => (None, rect.x),
            Axis::Vertical if delta > 0.0 => {
                let edge = hits.map(Rect::top).min().unwrap_or(rect.top());
                (Some(Side::Bottom), edge - rect.h)
            }
            Axis::Vertical if delta < 0.0 => {
                let edge = hits.map(Rect::bottom).max().unwrap_or(rect.bottom());
                (Some(Side::Top), edge)
            }
            Axis::Vertical => (None, rect.y),
        };

        match axis {
            Axis::Horizontal => self.pos.x = snapped as f32,
            Axis::Vertical => self.pos.y = snapped as f32,
        }
        side
    }

    /// Lookahead overlap test without moving the body
    pub fn probe(&self, offset: IVec2, solids: &[Rect]) -> bool {
        let probe = self.rect().translated(offset);
        solids.iter().any(|s| s.intersects(&probe))
    }
}
