//! Geometry utilities
//!
//! Pure functions over points and axis-aligned rectangles. No engine state
//! is touched here; the spatial store and the layout algorithms build on
//! these primitives.

use crate::models::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width and height of a region, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle with its top-left corner at `origin`
    pub fn at(origin: Position, extent: Size) -> Self {
        Self::new(origin.x, origin.y, extent.width, extent.height)
    }

    /// True when `point` lies inside the rectangle.
    /// The top/left edges are inclusive, bottom/right exclusive.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// True when the interiors of the two rectangles overlap.
    /// Rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Clamp `position` so a rectangle of `extent` anchored there stays fully
/// inside `bounds`.
///
/// The lower bound wins when `bounds` is smaller than `extent`, keeping the
/// result non-negative.
pub fn clamp_to_bounds(position: Position, bounds: Size, extent: Size) -> Position {
    let max_x = (bounds.width - extent.width).max(0.0);
    let max_y = (bounds.height - extent.height).max(0.0);
    Position {
        x: position.x.clamp(0.0, max_x),
        y: position.y.clamp(0.0, max_y),
    }
}

/// Rejection-sample a placement for a rectangle of `extent` inside `bounds`
/// that does not overlap any rectangle in `placed`.
///
/// Draws up to `attempts` uniform candidates and accepts the first one whose
/// bounding box is overlap-free. When the attempt budget is exhausted the
/// last candidate is returned anyway and the second tuple element is `false`;
/// callers treat that as a documented best-effort placement, not an error.
pub fn sample_non_overlapping<R: Rng>(
    rng: &mut R,
    bounds: Size,
    extent: Size,
    placed: &[Rect],
    attempts: u32,
) -> (Position, bool) {
    let max_x = (bounds.width - extent.width).max(0.0);
    let max_y = (bounds.height - extent.height).max(0.0);

    let mut candidate = Position::default();
    for _ in 0..attempts {
        candidate = Position {
            x: rng.gen::<f64>() * max_x,
            y: rng.gen::<f64>() * max_y,
        };
        let footprint = Rect::at(candidate, extent);
        if !placed.iter().any(|r| r.intersects(&footprint)) {
            return (candidate, true);
        }
    }
    (candidate, false)
}
