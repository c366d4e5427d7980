// src/bsp/bsp_util.rs
// Ground-plane geometry used by the street partition.

use crate::bsp::{SplitOrientation, EPSILON};
use serde::{Deserialize, Serialize};

/// A point on the ground plane. `z` is the depth axis of the city.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    pub fn new(x: f64, z: f64) -> Self {
        Point2D { x, z }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Coordinate along the axis a split of `orientation` cuts.
    pub fn along(&self, orientation: SplitOrientation) -> f64 {
        match orientation {
            SplitOrientation::Horizontal => self.z,
            SplitOrientation::Vertical => self.x,
        }
    }
}

/// Axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Point2D,
    pub max: Point2D,
}

impl Rectangle {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Rectangle { min, max }
    }

    pub fn from_bounds(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> Self {
        Rectangle::new(Point2D::new(min_x, min_z), Point2D::new(max_x, max_z))
    }

    /// A `width` x `depth` rectangle centered on the origin.
    pub fn centered(width: f64, depth: f64) -> Self {
        Rectangle::from_bounds(-width / 2.0, -depth / 2.0, width / 2.0, depth / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn area(&self) -> f64 {
        self.width() * self.depth()
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Extent of the rectangle along the axis a split of `orientation` cuts.
    /// A horizontal street cuts the depth, a vertical one the width.
    pub fn extent(&self, orientation: SplitOrientation) -> f64 {
        match orientation {
            SplitOrientation::Horizontal => self.depth(),
            SplitOrientation::Vertical => self.width(),
        }
    }

    /// `(start, end)` bounds along the axis a split of `orientation` cuts.
    pub fn range(&self, orientation: SplitOrientation) -> (f64, f64) {
        (self.min.along(orientation), self.max.along(orientation))
    }

    /// True when the corners are finite and not inverted.
    pub fn is_well_formed(&self) -> bool {
        [self.min.x, self.min.z, self.max.x, self.max.z]
            .iter()
            .all(|v| v.is_finite())
            && self.min.x <= self.max.x
            && self.min.z <= self.max.z
    }

    pub fn contains_point(&self, p: &Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Area shared with `other`; rectangles that only touch along an edge overlap by zero.
    pub fn overlap_area(&self, other: &Rectangle) -> f64 {
        let w = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let d = self.max.z.min(other.max.z) - self.min.z.max(other.min.z);
        if w <= 0.0 || d <= 0.0 {
            0.0
        } else {
            w * d
        }
    }

    /// Whether `p` lies on one of the four edges (within `EPSILON`).
    pub fn is_on_boundary(&self, p: &Point2D) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= EPSILON;
        self.contains_point(p)
            && (near(p.x, self.min.x)
                || near(p.x, self.max.x)
                || near(p.z, self.min.z)
                || near(p.z, self.max.z))
    }

    /// Cuts the rectangle at `coordinate`, returning the half toward the
    /// minimum corner and the half toward the maximum corner.
    pub fn split(&self, orientation: SplitOrientation, coordinate: f64) -> (Rectangle, Rectangle) {
        match orientation {
            SplitOrientation::Horizontal => (
                Rectangle::from_bounds(self.min.x, self.min.z, self.max.x, coordinate),
                Rectangle::from_bounds(self.min.x, coordinate, self.max.x, self.max.z),
            ),
            SplitOrientation::Vertical => (
                Rectangle::from_bounds(self.min.x, self.min.z, coordinate, self.max.z),
                Rectangle::from_bounds(coordinate, self.min.z, self.max.x, self.max.z),
            ),
        }
    }
}
