//! Geometry kernel.
//!
//! Stateless predicates and transforms on normalized image coordinates.
//! Inputs are not validated: garbage in, garbage out.

use serde::{Deserialize, Serialize};

use crate::model::Region;

/// A 2D point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle spanning two corner points, in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            w: (p1.x - p2.x).abs(),
            h: (p1.y - p2.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Clamp a point into this rectangle.
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.x, self.right()),
            point.y.clamp(self.y, self.bottom()),
        )
    }

    /// Smallest rectangle containing all points. None when empty.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Inclusive point-in-rectangle test.
pub fn point_in_rect(point: &Point, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// True when the whole box lies inside `rect`.
pub fn box_fully_contained(bx: &Rect, rect: &Rect) -> bool {
    point_in_rect(&Point::new(bx.x, bx.y), rect)
        && point_in_rect(&Point::new(bx.right(), bx.bottom()), rect)
}

/// True when every polygon vertex lies inside `rect`.
pub fn polygon_fully_contained(points: &[[f64; 2]], rect: &Rect) -> bool {
    points
        .iter()
        .all(|[x, y]| point_in_rect(&Point::new(*x, *y), rect))
}

/// True when both line endpoints lie inside `rect`.
pub fn line_fully_contained(start: &Point, end: &Point, rect: &Rect) -> bool {
    point_in_rect(start, rect) && point_in_rect(end, rect)
}

/// Intersection over union of two axis-aligned rectangles, in [0, 1].
pub fn intersection_over_union(a: &Rect, b: &Rect) -> f64 {
    let ix = (a.right().min(b.right()) - a.x.max(b.x)).max(0.0);
    let iy = (a.bottom().min(b.bottom()) - a.y.max(b.y)).max(0.0);
    let intersection = ix * iy;
    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        return 0.0;
    }
    intersection / union
}

/// Move a region so that its anchor lands on `(x, y)`.
///
/// Points move directly, every other shape is moved by its bounding-box center.
pub fn translate_region(region: &Region, x: f64, y: f64) -> Region {
    Region {
        shape: region.shape.translated_to(Point::new(x, y)),
        ..region.clone()
    }
}
